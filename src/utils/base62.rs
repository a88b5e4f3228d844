//! Base62 conversion between row ids and short codes.
//!
//! The mapping is a bijection between non-negative integers and canonical
//! codes over a fixed 62-symbol alphabet. Ids are assigned by the database
//! starting at 1, so the zero code (`"a"`) is never handed out, but the
//! functions stay total over the full `i64` range for symmetry.

/// Fixed symbol order shared by [`encode`] and [`decode`].
///
/// Index 0 is `'a'`, so `encode(1) == "b"`.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const BASE: i64 = 62;

/// Reasons a short code fails to decode.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("code is empty")]
    Empty,

    #[error("character {0:?} is outside the base62 alphabet")]
    InvalidCharacter(char),

    #[error("code has a redundant leading zero symbol")]
    LeadingZero,

    #[error("decoded value overflows i64")]
    Overflow,
}

/// Encodes a non-negative id into its canonical short code.
///
/// Standard base conversion: divide by 62, map each remainder to an alphabet
/// symbol, most significant symbol first. `encode(0)` is `"a"`; ids below
/// zero never occur (`BIGSERIAL` starts at 1) and are rejected by a debug
/// assertion only.
pub fn encode(mut id: i64) -> String {
    debug_assert!(id >= 0, "ids are assigned by the database starting at 1");

    if id == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    let mut buf = Vec::new();
    while id > 0 {
        buf.push(ALPHABET[(id % BASE) as usize] as char);
        id /= BASE;
    }
    buf.iter().rev().collect()
}

/// Decodes a canonical short code back into its id.
///
/// Rejects the empty string, characters outside the alphabet, values that
/// overflow `i64`, and non-canonical codes (a multi-character code starting
/// with the zero symbol would alias a shorter code).
pub fn decode(code: &str) -> Result<i64, DecodeError> {
    if code.is_empty() {
        return Err(DecodeError::Empty);
    }
    if code.len() > 1 && code.as_bytes()[0] == ALPHABET[0] {
        return Err(DecodeError::LeadingZero);
    }

    let mut value: i64 = 0;
    for c in code.chars() {
        let index = symbol_index(c).ok_or(DecodeError::InvalidCharacter(c))?;
        value = value
            .checked_mul(BASE)
            .and_then(|v| v.checked_add(index))
            .ok_or(DecodeError::Overflow)?;
    }

    Ok(value)
}

fn symbol_index(c: char) -> Option<i64> {
    match c {
        'a'..='z' => Some(c as i64 - 'a' as i64),
        'A'..='Z' => Some(c as i64 - 'A' as i64 + 26),
        '0'..='9' => Some(c as i64 - '0' as i64 + 52),
        _ => None,
    }
}
