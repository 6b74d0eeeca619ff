// Field finishing and markup stripping

use super::encoding::normalize_utf8;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Markup-like tags: `<` followed by any non-whitespace character, up to the
/// closing `>` or the end of the field when unterminated. A `>` inside a
/// quoted attribute value does not close the tag.
static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<(?:>|(?:[^\s"'>]|"[^"]*"?|'[^']*'?)(?:"[^"]*"?|'[^']*'?|[^"'>])*>?)"#)
        .expect("tag pattern is valid")
});

/// Turn the raw bytes accumulated for one field into text.
#[inline]
pub fn finish_field(raw: Vec<u8>) -> String {
    normalize_utf8(raw).0
}

/// Remove angle-bracket tags from a field.
/// Returns Cow::Borrowed when the field contains no tag.
pub fn strip_tags(field: &str) -> Cow<'_, str> {
    if !field.contains('<') {
        return Cow::Borrowed(field);
    }
    TAG_PATTERN.replace_all(field, "")
}

/// Strip tags from every field of a record in place.
pub fn strip_record_tags(fields: &mut [String]) {
    for field in fields.iter_mut() {
        let stripped = match strip_tags(field) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(stripped) => stripped,
        };
        *field = stripped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_simple_tags() {
        assert_eq!(strip_tags("<house>73</house>"), "73");
        assert_eq!(strip_tags("<b>bold</b> and <i>it</i>"), "bold and it");
    }

    #[test]
    fn test_strip_leaves_plain_text_borrowed() {
        assert!(matches!(strip_tags("Rebenring"), Cow::Borrowed(_)));
        assert!(matches!(strip_tags("a < b"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_strip_comment_and_unterminated() {
        assert_eq!(strip_tags("x<!-- note -->y"), "xy");
        assert_eq!(strip_tags("before<br"), "before");
        assert_eq!(strip_tags("1 < 2 <br/>ok"), "1 < 2 ok");
    }

    #[test]
    fn test_strip_quoted_attribute_and_non_letter_start() {
        assert_eq!(strip_tags(r#"<a title=">">z"#), "z");
        assert_eq!(strip_tags("<a href='x>y'>link</a>"), "link");
        assert_eq!(strip_tags("<3 b>y"), "y");
        assert_eq!(strip_tags("a<>b"), "ab");
        assert_eq!(strip_tags(r#"x<a title="open"#), "x");
    }

    #[test]
    fn test_strip_record() {
        let mut fields = vec!["<p>a</p>".to_string(), "b".to_string()];
        strip_record_tags(&mut fields);
        assert_eq!(fields, vec!["a", "b"]);
    }

    #[test]
    fn test_finish_field_repairs_latin1() {
        assert_eq!(finish_field(b"M\xFCnchen".to_vec()), "München");
    }
}
