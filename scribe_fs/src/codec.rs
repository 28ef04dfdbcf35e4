//! UTF-8 <-> Windows-1252 conversion and the post-write corruption scan.
//!
//! Decoding is total: every byte value maps to exactly one character, so
//! reading an existing file can never fail. Encoding is lossy by
//! contract: characters outside the Windows-1252 repertoire become
//! [`FALLBACK_BYTE`] rather than an error, and the loss surfaces through
//! the verification scan instead.

use std::fs;
use std::io;
use std::path::Path;

/// Name reported for the on-disk encoding.
pub const ENCODING_NAME: &str = "windows-1252";

/// Byte substituted for characters Windows-1252 cannot represent.
///
/// Fixed at `0x3F` (`?`) to stay bit-compatible with existing backups
/// and tests; changing it would alter every lossy write.
pub const FALLBACK_BYTE: u8 = b'?';

/// Corruption marker scanned for during verification: the Windows-1252
/// decoding of the UTF-8 replacement-character bytes `EF BF BD`.
pub const CORRUPTION_MARKER: &str = "\u{00EF}\u{00BF}\u{00BD}";

/// Unicode mappings for bytes 0x80..=0x9F per the WHATWG windows-1252
/// table. The five unassigned slots (0x81, 0x8D, 0x8F, 0x90, 0x9D) keep
/// their C1 control value so the mapping stays total and reversible.
const HIGH_TABLE: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

/// Decode Windows-1252 bytes into UTF-8 text. Total; never fails.
pub fn decode(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for &b in bytes {
        text.push(byte_to_char(b));
    }
    text
}

/// Encode UTF-8 text into Windows-1252 bytes, substituting
/// [`FALLBACK_BYTE`] for characters with no single-byte mapping.
pub fn encode(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for ch in text.chars() {
        bytes.push(char_to_byte(ch));
    }
    bytes
}

fn byte_to_char(b: u8) -> char {
    match b {
        0x80..=0x9F => HIGH_TABLE[(b - 0x80) as usize],
        _ => b as char,
    }
}

fn char_to_byte(ch: char) -> u8 {
    let cp = ch as u32;
    match ch {
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        // Unassigned slots round-trip through their C1 control value
        // instead of folding into the fallback byte.
        '\u{0081}' | '\u{008D}' | '\u{008F}' | '\u{0090}' | '\u{009D}' => cp as u8,
        _ if cp < 0x80 || (0xA0..=0xFF).contains(&cp) => cp as u8,
        _ => FALLBACK_BYTE,
    }
}

/// Result of a post-write encoding verification pass. Derived and
/// reported once per operation, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    /// Occurrences of [`CORRUPTION_MARKER`] in the decoded file
    pub corruption_count: usize,
    /// True when no marker was found
    pub is_clean: bool,
}

/// Count occurrences of [`CORRUPTION_MARKER`] in decoded text.
pub fn count_corruption_markers(text: &str) -> usize {
    text.matches(CORRUPTION_MARKER).count()
}

/// Re-read `path` and scan its decoded content for corruption markers.
///
/// Best-effort heuristic: it flags the mojibake left behind when UTF-8
/// replacement characters pass through the single-byte encoding. A file
/// that legitimately contains the byte sequence `EF BF BD` reports a
/// false positive; that is accepted, this is a symptom scan and not a
/// corruption proof.
pub fn verify_file(path: &Path) -> io::Result<Verification> {
    let bytes = fs::read(path)?;
    let decoded = decode(&bytes);
    let corruption_count = count_corruption_markers(&decoded);
    Ok(Verification { corruption_count, is_clean: corruption_count == 0 })
}
