//! Parsing of comma-separated byte lists such as `0b00111100, 0x42, 129`.

use heapless::Vec;

use crate::error::ByteParseError;

/// Most values one decoded list can hold.
pub const MAX_BYTE_LIST: usize = 64;

pub type ByteList = Vec<u8, MAX_BYTE_LIST>;

/// Decodes a list of binary (`0b`), hexadecimal (`0x`) or decimal bytes.
///
/// Whitespace around tokens is ignored and empty tokens are skipped. Any bad
/// token fails the whole list.
pub fn decode_byte_list(text: &str) -> Result<ByteList, ByteParseError> {
    let mut bytes = ByteList::new();

    for (position, token) in text.split(',').enumerate() {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let value = parse_byte_token(token).ok_or(ByteParseError::InvalidToken { position })?;
        bytes.push(value).map_err(|_| ByteParseError::TooLong)?;
    }

    if bytes.is_empty() {
        return Err(ByteParseError::Empty);
    }

    Ok(bytes)
}

/// Parses one token. A radix prefix only counts when digits follow it.
pub fn parse_byte_token(token: &str) -> Option<u8> {
    let token = token.trim();
    let (radix, digits) = match token.as_bytes() {
        [b'0', b'b' | b'B', _, ..] => (2, &token[2..]),
        [b'0', b'x' | b'X', _, ..] => (16, &token[2..]),
        _ => (10, token),
    };

    parse_digits(digits, radix)
}

fn parse_digits(digits: &str, radix: u32) -> Option<u8> {
    if digits.is_empty() {
        return None;
    }

    let mut value = 0u8;
    for ch in digits.chars() {
        let digit = ch.to_digit(radix)?;
        value = value.checked_mul(radix as u8)?.checked_add(digit as u8)?;
    }

    Some(value)
}
