//! Strict integer parsing for population guesses.
//!
//! Accepted: digits, optionally grouped with commas or spaces, optionally
//! surrounded by whitespace. Rejected: signs, decimal points, letters,
//! suffixes ("3M"), and anything with more than [`MAX_DIGITS`] digits.
//!
//! Grouping is not checked for position ("12,34" parses as 1234); players
//! type separators inconsistently and the tolerance band absorbs it.

use crate::error::ParseError;

/// Sanity ceiling on digit count. Larger inputs are pasted garbage.
pub const MAX_DIGITS: usize = 15;

/// Parse a non-negative integer from free text.
pub fn parse_integer(text: &str) -> Result<u64, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut digits = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        match ch {
            '0'..='9' => digits.push(ch),
            ',' | ' ' => {}
            '+' | '-' => return Err(ParseError::Signed),
            other => return Err(ParseError::InvalidCharacter(other)),
        }
    }

    if digits.is_empty() {
        return Err(ParseError::Empty);
    }
    if digits.len() > MAX_DIGITS {
        return Err(ParseError::TooLarge);
    }

    // At most 15 ASCII digits: always fits in u64.
    digits.parse::<u64>().map_err(|_| ParseError::TooLarge)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_grouped_digits() {
        let cases: Vec<(u64, &str)> = vec![
            (1_234_567, "1234567"),
            (1_234_567, "1,234,567"),
            (1_234_567, "1 234 567"),
            (1_234_567, "  1,234,567  "),
            (0, "0"),
            (33, "0033"),
            (999_999_999_999_999, "999999999999999"),
        ];
        for (expected, input) in cases {
            assert_eq!(parse_integer(input), Ok(expected), "input {input:?}");
        }
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_integer(""), Err(ParseError::Empty));
        assert_eq!(parse_integer("   "), Err(ParseError::Empty));
        assert_eq!(parse_integer(" , , "), Err(ParseError::Empty));
        assert_eq!(parse_integer("abc"), Err(ParseError::InvalidCharacter('a')));
        assert_eq!(parse_integer("1.5"), Err(ParseError::InvalidCharacter('.')));
        assert_eq!(parse_integer("1.2.3"), Err(ParseError::InvalidCharacter('.')));
        assert_eq!(parse_integer("3M"), Err(ParseError::InvalidCharacter('M')));
        assert_eq!(parse_integer("-5"), Err(ParseError::Signed));
        assert_eq!(parse_integer("+5"), Err(ParseError::Signed));
    }

    #[test]
    fn rejects_oversized_input() {
        assert_eq!(parse_integer("1000000000000000"), Err(ParseError::TooLarge));
        assert_eq!(parse_integer("99999999999999999999999"), Err(ParseError::TooLarge));
    }
}
