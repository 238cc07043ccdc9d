//! Standard Base64 codec (RFC 4648 alphabet, `=` padding).
//!
//! Used to embed binary payloads such as images inside JSON request bodies.
//! Encoding is total; decoding rejects anything that is not canonical
//! padded Base64 text.

use thiserror::Error;

/// The 64-symbol alphabet, indexed by 6-bit value.
pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Padding symbol.
pub const PAD: u8 = b'=';

const INVALID: u8 = 0xFF;

/// Reverse lookup: byte → 6-bit value, `INVALID` for bytes outside the alphabet.
const DECODE_TABLE: [u8; 256] = build_decode_table();

const fn build_decode_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

// ─────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────

/// Broad classification of decode failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// The text is not well-formed padded Base64.
    MalformedInput,
}

/// Error returned by [`decode_base64`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Base64Error {
    #[error("malformed base64: length {0} is not a multiple of 4")]
    InvalidLength(usize),
    #[error("malformed base64: unexpected {symbol:?} at offset {offset}")]
    InvalidSymbol { symbol: char, offset: usize },
}

impl Base64Error {
    pub fn kind(&self) -> DecodeErrorKind {
        match self {
            Base64Error::InvalidLength(_) | Base64Error::InvalidSymbol { .. } => {
                DecodeErrorKind::MalformedInput
            }
        }
    }
}

// ─────────────────────────────────────────────
// Encoding
// ─────────────────────────────────────────────

/// Number of symbols produced when encoding `n` bytes: `4 * ceil(n / 3)`.
pub fn encoded_len(n: usize) -> usize {
    n.div_ceil(3) * 4
}

/// Encode bytes as padded Base64 text.
///
/// ```
/// use promptkit_core::base64::encode_base64;
///
/// assert_eq!(encode_base64(b"Man"), "TWFu");
/// assert_eq!(encode_base64(b"M"), "TQ==");
/// ```
pub fn encode_base64(data: &[u8]) -> String {
    let mut out = String::with_capacity(encoded_len(data.len()));
    for chunk in data.chunks(3) {
        let b0 = chunk[0] as u32;
        let b1 = chunk.get(1).copied().unwrap_or(0) as u32;
        let b2 = chunk.get(2).copied().unwrap_or(0) as u32;
        let triple = (b0 << 16) | (b1 << 8) | b2;

        out.push(symbol(triple >> 18));
        out.push(symbol(triple >> 12));
        out.push(if chunk.len() > 1 {
            symbol(triple >> 6)
        } else {
            PAD as char
        });
        out.push(if chunk.len() > 2 {
            symbol(triple)
        } else {
            PAD as char
        });
    }
    out
}

#[inline]
fn symbol(sextet: u32) -> char {
    ALPHABET[(sextet & 0x3F) as usize] as char
}

// ─────────────────────────────────────────────
// Decoding
// ─────────────────────────────────────────────

/// Upper bound on the decoded size of `text`, exact for valid input.
pub fn decoded_len_hint(text: &str) -> usize {
    let bytes = text.as_bytes();
    let pads = bytes.iter().rev().take(2).take_while(|&&b| b == PAD).count();
    (bytes.len() / 4 * 3).saturating_sub(pads)
}

/// Decode padded Base64 text back to bytes.
///
/// Fails with [`Base64Error::InvalidLength`] when the length is not a
/// multiple of 4, and with [`Base64Error::InvalidSymbol`] for characters
/// outside the alphabet or padding anywhere but the final one or two
/// positions.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, Base64Error> {
    let input = text.as_bytes();
    if input.is_empty() {
        return Ok(Vec::new());
    }
    if input.len() % 4 != 0 {
        return Err(Base64Error::InvalidLength(input.len()));
    }

    let padding = trailing_padding(input);
    let last_group = input.len() / 4 - 1;
    let mut out = Vec::with_capacity(decoded_len_hint(text));

    for (group_idx, group) in input.chunks_exact(4).enumerate() {
        let base = group_idx * 4;
        let pad_here = if group_idx == last_group { padding } else { 0 };

        let mut triple = 0u32;
        for (i, &byte) in group.iter().enumerate() {
            let value = if i < 4 - pad_here {
                lookup(text, byte, base + i)?
            } else {
                0
            };
            triple = (triple << 6) | value as u32;
        }

        out.push((triple >> 16) as u8);
        if pad_here < 2 {
            out.push((triple >> 8) as u8);
        }
        if pad_here < 1 {
            out.push(triple as u8);
        }
    }

    Ok(out)
}

/// Count the `=` symbols at the end of a non-empty input (0, 1 or 2).
fn trailing_padding(input: &[u8]) -> usize {
    match input {
        [.., a, b] if *a == PAD && *b == PAD => 2,
        [.., b] if *b == PAD => 1,
        _ => 0,
    }
}

fn lookup(text: &str, byte: u8, offset: usize) -> Result<u8, Base64Error> {
    match DECODE_TABLE[byte as usize] {
        INVALID => Err(Base64Error::InvalidSymbol {
            // Every earlier byte was ASCII, so `offset` is a char boundary.
            symbol: text[offset..]
                .chars()
                .next()
                .unwrap_or(char::REPLACEMENT_CHARACTER),
            offset,
        }),
        value => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(encode_base64(b"Man"), "TWFu");
        assert_eq!(encode_base64(b"Ma"), "TWE=");
        assert_eq!(encode_base64(b"M"), "TQ==");
        assert_eq!(encode_base64(b"Hello"), "SGVsbG8=");
        assert_eq!(encode_base64(b"hello world"), "aGVsbG8gd29ybGQ=");
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode_base64(b""), "");
        assert_eq!(encoded_len(0), 0);
    }

    #[test]
    fn test_encode_high_bytes() {
        assert_eq!(encode_base64(&[0xFF, 0xFF, 0xFF]), "////");
        assert_eq!(encode_base64(&[0xFB, 0xEF]), "++8=");
        assert_eq!(encode_base64(&[0x00]), "AA==");
    }

    #[test]
    fn test_decode_known_vectors() {
        assert_eq!(decode_base64("TWFu").unwrap(), b"Man");
        assert_eq!(decode_base64("TWE=").unwrap(), b"Ma");
        assert_eq!(decode_base64("TQ==").unwrap(), b"M");
        assert_eq!(decode_base64("").unwrap(), b"");
    }

    #[test]
    fn test_decode_rejects_bad_length() {
        let err = decode_base64("TWF").unwrap_err();
        assert_eq!(err, Base64Error::InvalidLength(3));
        assert_eq!(err.kind(), DecodeErrorKind::MalformedInput);
    }

    #[test]
    fn test_decode_rejects_foreign_symbol() {
        let err = decode_base64("TW!u").unwrap_err();
        assert_eq!(
            err,
            Base64Error::InvalidSymbol {
                symbol: '!',
                offset: 2
            }
        );
        assert_eq!(err.kind(), DecodeErrorKind::MalformedInput);
    }

    #[test]
    fn test_decode_rejects_url_safe_alphabet() {
        assert!(matches!(
            decode_base64("-_8="),
            Err(Base64Error::InvalidSymbol { symbol: '-', offset: 0 })
        ));
    }

    #[test]
    fn test_decode_rejects_misplaced_padding() {
        // Padding in an earlier group.
        assert!(matches!(
            decode_base64("TQ==TWFu"),
            Err(Base64Error::InvalidSymbol { offset: 2, .. })
        ));
        // `=` followed by a data symbol.
        assert!(matches!(
            decode_base64("TW=u"),
            Err(Base64Error::InvalidSymbol { symbol: '=', offset: 2 })
        ));
        // Three pads.
        assert!(matches!(
            decode_base64("T==="),
            Err(Base64Error::InvalidSymbol { symbol: '=', offset: 1 })
        ));
    }

    #[test]
    fn test_decode_reports_non_ascii() {
        assert!(matches!(
            decode_base64("TWé"),
            Err(Base64Error::InvalidSymbol { symbol: 'é', offset: 2 })
        ));
    }

    #[test]
    fn test_decoded_len_hint() {
        assert_eq!(decoded_len_hint("TWFu"), 3);
        assert_eq!(decoded_len_hint("TWE="), 2);
        assert_eq!(decoded_len_hint("TQ=="), 1);
        assert_eq!(decoded_len_hint(""), 0);
    }

    #[test]
    fn test_error_display() {
        let err = Base64Error::InvalidLength(5);
        assert_eq!(
            err.to_string(),
            "malformed base64: length 5 is not a multiple of 4"
        );
    }

    proptest! {
        #[test]
        fn prop_round_trip(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let encoded = encode_base64(&data);
            prop_assert_eq!(decode_base64(&encoded).unwrap(), data);
        }

        #[test]
        fn prop_length_law(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let encoded = encode_base64(&data);
            prop_assert_eq!(encoded.len(), 4 * data.len().div_ceil(3));
            prop_assert_eq!(encoded.len(), encoded_len(data.len()));
        }

        #[test]
        fn prop_padding_law(data in proptest::collection::vec(any::<u8>(), 1..256)) {
            let encoded = encode_base64(&data);
            let pads = encoded.bytes().filter(|&b| b == PAD).count();
            let expected = match data.len() % 3 {
                1 => 2,
                2 => 1,
                _ => 0,
            };
            prop_assert_eq!(pads, expected);
            prop_assert!(encoded.bytes().rev().skip(pads).all(|b| b != PAD));
        }
    }
}
