// Byte-level helpers for separator detection.

/// Separator used when the vote has no clear winner.
pub const DEFAULT_SEPARATOR: u8 = b',';

/// Candidate separators, in vote order.
pub const CANDIDATE_SEPARATORS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Check if a byte is one of the candidate separators
#[inline]
pub fn is_candidate_separator(byte: u8) -> bool {
    matches!(byte, b',' | b';' | b'\t' | b'|')
}

/// Running per-candidate counts over the first physical line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeparatorVote {
    counts: [usize; 4],
}

impl SeparatorVote {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn observe(&mut self, byte: u8) {
        if !is_candidate_separator(byte) {
            return;
        }
        if let Some(idx) = CANDIDATE_SEPARATORS.iter().position(|&c| c == byte) {
            self.counts[idx] += 1;
        }
    }

    pub fn count(&self, separator: u8) -> usize {
        CANDIDATE_SEPARATORS
            .iter()
            .position(|&c| c == separator)
            .map_or(0, |idx| self.counts[idx])
    }

    /// The strictly-highest count wins; ties and zero counts yield `,`.
    pub fn winner(&self) -> u8 {
        let max = self.counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            return DEFAULT_SEPARATOR;
        }
        let mut leaders = CANDIDATE_SEPARATORS
            .iter()
            .zip(self.counts.iter())
            .filter(|(_, n)| **n == max);
        match (leaders.next(), leaders.next()) {
            (Some((&sep, _)), None) => sep,
            _ => DEFAULT_SEPARATOR,
        }
    }
}

/// Detect the dominant separator of a single in-memory line.
///
/// Pure counterpart of the stream sniffer's vote; same tie-break rule.
pub fn detect_separator(line: &[u8]) -> u8 {
    let mut vote = SeparatorVote::new();
    for &byte in line {
        vote.observe(byte);
    }
    vote.winner()
}

/// Check if a byte is the active separator
#[inline]
pub fn is_separator(byte: u8, separator: u8) -> bool {
    byte == separator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_separator_majority() {
        assert_eq!(detect_separator(b"1,2,3,4,5,6"), b',');
        assert_eq!(detect_separator(b"1;2;3;4"), b';');
        assert_eq!(detect_separator(b"1|2,3|4"), b'|');
        assert_eq!(detect_separator(b"1\t2\t3\t4"), b'\t');
    }

    #[test]
    fn test_detect_separator_ties_and_empty() {
        assert_eq!(detect_separator(b"a;b|c"), b',');
        assert_eq!(detect_separator(b"a;b;c|d|e"), b',');
        assert_eq!(detect_separator(b"single column"), b',');
        assert_eq!(detect_separator(b""), b',');
    }

    #[test]
    fn test_vote_counts() {
        let mut vote = SeparatorVote::new();
        for &b in b"a|b|c;d" {
            vote.observe(b);
        }
        assert_eq!(vote.count(b'|'), 2);
        assert_eq!(vote.count(b';'), 1);
        assert_eq!(vote.count(b'x'), 0);
        assert_eq!(vote.winner(), b'|');
    }

    #[test]
    fn test_candidates() {
        assert!(CANDIDATE_SEPARATORS.iter().all(|&b| is_candidate_separator(b)));
        assert!(!is_candidate_separator(b':'));
    }
}
