//! Competitive-mode player names.
//!
//! Names end up on a shared scoreboard, so they are cleaned and checked
//! before use. Country eligibility for competitive rounds lives on
//! [`Country::is_complete`](crate::Country::is_complete).

use thiserror::Error;

use crate::engine::normalize;

pub const MAX_NAME_CHARS: usize = 24;
pub const MIN_NAME_LETTERS: usize = 3;

/// Substrings rejected anywhere in a normalized name.
const PROFANITY: &[&str] = &["fuck", "shit", "cunt", "bitch", "wanker", "twat"];

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    #[error("please enter a name")]
    Empty,

    #[error("name is too long (max 24 characters)")]
    TooLong,

    #[error("name can only contain letters, numbers, spaces, apostrophes and hyphens")]
    InvalidCharacters,

    #[error("name must include at least 3 letters")]
    TooFewLetters,

    #[error("please choose a different name")]
    Profane,
}

/// Trim and collapse internal whitespace runs to one space.
pub fn normalize_player_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check a player name and return its cleaned form.
///
/// ```
/// use atlasquiz::competition::{NameError, validate_player_name};
///
/// assert_eq!(validate_player_name("  Jean-Pierre  "), Ok("Jean-Pierre".to_string()));
/// assert_eq!(validate_player_name("Al"), Err(NameError::TooFewLetters));
/// ```
pub fn validate_player_name(raw: &str) -> Result<String, NameError> {
    let name = normalize_player_name(raw);
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(NameError::TooLong);
    }
    if !regex!(r"^[A-Za-z0-9 '\-]+$").is_match(&name) {
        return Err(NameError::InvalidCharacters);
    }
    if name.chars().filter(|c| c.is_ascii_alphabetic()).count() < MIN_NAME_LETTERS {
        return Err(NameError::TooFewLetters);
    }

    let folded = normalize(&name);
    if PROFANITY.iter().any(|bad| folded.contains(bad)) {
        return Err(NameError::Profane);
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_rules() {
        let cases: Vec<(&str, Result<&str, NameError>)> = vec![
            ("Abc", Ok("Abc")),
            ("Jean-Pierre", Ok("Jean-Pierre")),
            ("  O'Brien   the\tGreat ", Ok("O'Brien the Great")),
            ("R2D2 Fan", Ok("R2D2 Fan")),
            ("", Err(NameError::Empty)),
            ("   \t ", Err(NameError::Empty)),
            ("Al", Err(NameError::TooFewLetters)),
            ("a1b2", Err(NameError::TooFewLetters)),
            ("Bad!!!", Err(NameError::InvalidCharacters)),
            ("Zoë", Err(NameError::InvalidCharacters)),
            ("abcdefghijklmnopqrstuvwxyz", Err(NameError::TooLong)),
            ("shithead", Err(NameError::Profane)),
            ("Big-Twat", Err(NameError::Profane)),
        ];

        for (input, expected) in cases {
            assert_eq!(validate_player_name(input), expected.map(str::to_string), "input: {input:?}");
        }
    }

    #[test]
    fn max_length_is_inclusive() {
        let name = "a".repeat(MAX_NAME_CHARS);
        assert_eq!(validate_player_name(&name), Ok(name.clone()));
    }
}
