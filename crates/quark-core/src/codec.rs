//! Hex text codec with display grouping.
//!
//! Every byte encodes as exactly two characters from a fixed 16-symbol
//! alphabet. Encoding can insert a single space every `group_size` bytes
//! and a newline every `row_length` groups for display; the decoder
//! ignores all whitespace, accepts both cases, and left-pads odd-length
//! input with a single `0` so `"FFF"` decodes as `"0FFF"`.
//!
//! Round-trip law: `decode(&encode(b, &EncodeOptions::default())) == b`
//! for every byte buffer `b`.

use crate::error::CodecError;

const ALPHABET_LOWER: &[u8; 16] = b"0123456789abcdef";
const ALPHABET_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Display options for [`encode`].
///
/// The defaults (no grouping, lowercase) produce the machine round-trip
/// form used everywhere hashes and positions appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeOptions {
    /// Insert a single space after every `group_size` encoded bytes.
    /// Zero disables grouping.
    pub group_size: usize,
    /// Insert a newline after every `row_length` groups. Zero disables
    /// row breaks; ignored when `group_size` is zero.
    pub row_length: usize,
    /// Emit `A-F` instead of `a-f`.
    pub uppercase: bool,
}

/// Encode a byte buffer as hex text.
///
/// Pure function; no trailing separator is emitted after the final byte.
pub fn encode(bytes: &[u8], options: &EncodeOptions) -> String {
    let alphabet = if options.uppercase {
        ALPHABET_UPPER
    } else {
        ALPHABET_LOWER
    };

    let mut out = String::with_capacity(bytes.len() * 3);
    let mut groups_in_row = 0usize;

    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 && options.group_size > 0 && i % options.group_size == 0 {
            groups_in_row += 1;
            if options.row_length > 0 && groups_in_row % options.row_length == 0 {
                out.push('\n');
            } else {
                out.push(' ');
            }
        }
        out.push(alphabet[(byte >> 4) as usize] as char);
        out.push(alphabet[(byte & 0x0f) as usize] as char);
    }
    out
}

/// Decode hex text into a byte buffer.
///
/// Strips all whitespace and lowercases before parsing; odd-length input
/// is left-padded with a single `0`. Fails with
/// [`CodecError::InvalidHexCharacter`] on the first character outside
/// `[0-9a-f]` after normalization; the reported offset is into the
/// normalized text.
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    let mut normalized: Vec<char> = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if normalized.len() % 2 == 1 {
        normalized.insert(0, '0');
    }

    let mut out = Vec::with_capacity(normalized.len() / 2);
    for (i, pair) in normalized.chunks_exact(2).enumerate() {
        let hi = nibble(pair[0], i * 2)?;
        let lo = nibble(pair[1], i * 2 + 1)?;
        out.push((hi << 4) | lo);
    }
    Ok(out)
}

fn nibble(c: char, position: usize) -> Result<u8, CodecError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        _ => Err(CodecError::InvalidHexCharacter {
            character: c,
            position,
        }),
    }
}
