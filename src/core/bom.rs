// Byte-order-mark signatures.
//
// See https://en.wikipedia.org/wiki/Byte_order_mark

/// A known BOM: display name and raw signature bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bom {
    pub name: &'static str,
    pub signature: &'static [u8],
}

impl Bom {
    pub fn len(&self) -> usize {
        self.signature.len()
    }
}

/// Longest signature in the table; the sniffer never reads more than this.
pub const MAX_BOM_LEN: usize = 4;

pub const BOM_TABLE: &[Bom] = &[
    Bom { name: "UTF-8", signature: &[0xEF, 0xBB, 0xBF] },
    Bom { name: "UTF-16 (BE)", signature: &[0xFE, 0xFF] },
    Bom { name: "UTF-16 (LE)", signature: &[0xFF, 0xFE] },
    Bom { name: "UTF-32 (BE)", signature: &[0x00, 0x00, 0xFE, 0xFF] },
    Bom { name: "UTF-32 (LE)", signature: &[0xFF, 0xFE, 0x00, 0x00] },
    Bom { name: "UTF-7 (a)", signature: &[0x2B, 0x2F, 0x76, 0x38] },
    Bom { name: "UTF-7 (b)", signature: &[0x2B, 0x2F, 0x76, 0x39] },
    Bom { name: "UTF-7 (c)", signature: &[0x2B, 0x2F, 0x76, 0x2B] },
    Bom { name: "UTF-7 (d)", signature: &[0x2B, 0x2F, 0x76, 0x2F] },
    Bom { name: "UTF-1", signature: &[0xF7, 0x64, 0x4C] },
    Bom { name: "UTF-EBCDIC", signature: &[0xDD, 0x73, 0x66, 0x73] },
    Bom { name: "SCSU", signature: &[0x0E, 0xFE, 0xFF] },
    Bom { name: "BOCU-1 (a)", signature: &[0xFB, 0xEE, 0x28] },
    Bom { name: "BOCU-1 (b)", signature: &[0xFB, 0xEE, 0x28, 0xFF] },
    Bom { name: "GB 18030", signature: &[0x84, 0x31, 0x95, 0x33] },
];

/// Match the head of a stream against the BOM table.
///
/// Only signatures fully contained in `head` can match. Among matches the
/// longest wins, so UTF-32 (LE) beats its UTF-16 (LE) prefix.
pub fn match_bom(head: &[u8]) -> Option<&'static Bom> {
    let mut best: Option<&'static Bom> = None;
    for bom in BOM_TABLE {
        if head.starts_with(bom.signature) && best.map_or(true, |b| bom.len() > b.len()) {
            best = Some(bom);
        }
    }
    best
}
