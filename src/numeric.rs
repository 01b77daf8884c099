//! Lexical checks and conversions for the two numeric token grammars:
//! non-negative decimals (sample values) and non-negative integers
//! (room count).

use core::fmt;

/// Longest accepted decimal token, in bytes.
pub const MAX_DECIMAL_LEN: usize = 9;

/// Why a token was rejected by one of the grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFault {
    Empty,
    TooLong,
    Negative,
    IllegalChar(char),
    LeadingPoint,
    TrailingPoint,
    ExtraPoint,
    LeadingZero,
    Overflow,
}

impl fmt::Display for TokenFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenFault::Empty => write!(f, "empty token"),
            TokenFault::TooLong => {
                write!(f, "longer than {} characters", MAX_DECIMAL_LEN)
            }
            TokenFault::Negative => write!(f, "negative values are not allowed"),
            TokenFault::IllegalChar(c) => write!(f, "illegal character {:?}", c),
            TokenFault::LeadingPoint => write!(f, "starts with a decimal point"),
            TokenFault::TrailingPoint => write!(f, "ends with a decimal point"),
            TokenFault::ExtraPoint => write!(f, "more than one decimal point"),
            TokenFault::LeadingZero => write!(f, "leading zero"),
            TokenFault::Overflow => write!(f, "value out of range"),
        }
    }
}

/// Check `token` against the non-negative decimal grammar.
pub fn check_decimal(token: &str) -> Result<(), TokenFault> {
    let bytes = token.as_bytes();
    if bytes.is_empty() {
        return Err(TokenFault::Empty);
    }
    if bytes.len() > MAX_DECIMAL_LEN {
        return Err(TokenFault::TooLong);
    }

    let mut point_idx = None;
    for (i, c) in token.char_indices() {
        if i == 0 {
            match c {
                '-' => return Err(TokenFault::Negative),
                '.' => return Err(TokenFault::LeadingPoint),
                _ => {}
            }
        }

        match c {
            '0'..='9' => {}
            '.' => {
                if point_idx.is_some() {
                    return Err(TokenFault::ExtraPoint);
                }
                point_idx = Some(i);
            }
            other => return Err(TokenFault::IllegalChar(other)),
        }

        if i == bytes.len() - 1 && c == '.' {
            return Err(TokenFault::TrailingPoint);
        }
    }

    // "0.xxx" is the only form allowed to open with a zero, apart from "0".
    if point_idx != Some(1) && token != "0" && bytes[0] == b'0' {
        return Err(TokenFault::LeadingZero);
    }

    Ok(())
}

pub fn is_valid_decimal(token: &str) -> bool {
    check_decimal(token).is_ok()
}

/// Check `token` against the non-negative integer grammar. Digits only,
/// so surrounding whitespace is a fault too.
pub fn check_integer(token: &str) -> Result<(), TokenFault> {
    if token.is_empty() {
        return Err(TokenFault::Empty);
    }
    if let Some(c) = token.chars().find(|c| !c.is_ascii_digit()) {
        return Err(if c == '-' {
            TokenFault::Negative
        } else {
            TokenFault::IllegalChar(c)
        });
    }
    if token.len() > 1 && token.starts_with('0') {
        return Err(TokenFault::LeadingZero);
    }
    Ok(())
}

pub fn is_valid_integer(token: &str) -> bool {
    check_integer(token).is_ok()
}

/// Convert a token that already passed [`check_decimal`].
///
/// Each digit is weighted by the power of ten implied by its distance from
/// the decimal point; a token without a point is read as a whole number.
/// The result for tokens that fail the grammar is meaningless.
pub fn parse_decimal(token: &str) -> f64 {
    let bytes = token.as_bytes();
    let point = bytes
        .iter()
        .position(|&b| b == b'.')
        .unwrap_or(bytes.len());

    let mut exponent = point as i32 - 1;
    let mut result = 0.0;
    for &b in bytes.iter().filter(|&&b| b != b'.') {
        let digit = f64::from(b.wrapping_sub(b'0'));
        result += digit * 10f64.powi(exponent);
        exponent -= 1;
    }
    result
}

/// Convert a token that already passed [`check_integer`]. Returns `None`
/// when the value does not fit a `u32`.
pub fn parse_integer(token: &str) -> Option<u32> {
    token.bytes().try_fold(0u32, |acc, b| {
        acc.checked_mul(10)?
            .checked_add(u32::from(b.wrapping_sub(b'0')))
    })
}
