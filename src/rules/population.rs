use tracing::debug;

use crate::engine::parse_integer;

/// Accepted relative error, as a fraction of the official figure.
pub const TOLERANCE_PERCENT: u64 = 20;

/// Correct iff the guess parses and lies within ±20% of the official figure.
///
/// A zero official population only accepts an exact zero. Unparseable input
/// is a wrong answer, never an error.
pub fn check_population(guess: &str, official: u64) -> bool {
    let parsed = match parse_integer(guess) {
        Ok(n) => n,
        Err(err) => {
            debug!(error = %err, "population guess rejected");
            return false;
        }
    };

    if official == 0 {
        return parsed == 0;
    }

    // |parsed - official| * 100 <= official * 20, in u128 to stay exact.
    let diff = u128::from(parsed.abs_diff(official));
    diff * 100 <= u128::from(official) * u128::from(TOLERANCE_PERCENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_band() {
        let cases: Vec<(bool, &str, u64)> = vec![
            (true, "1,000,000", 1_000_000),
            (true, "1000000", 1_000_000),
            (true, "1 199 999", 1_000_000),
            (true, "1199999", 1_000_000),
            (true, "1200000", 1_000_000),
            (false, "1200001", 1_000_000),
            (true, "800000", 1_000_000),
            (false, "799999", 1_000_000),
            (true, "83,000,000", 83_240_525),
            (false, "0", 1_000_000),
        ];

        for (expected, guess, official) in cases {
            assert_eq!(check_population(guess, official), expected, "guess {guess:?} vs {official}");
        }
    }

    #[test]
    fn unparseable_guesses_are_wrong() {
        assert!(!check_population("abc", 1_000_000));
        assert!(!check_population("", 1_000_000));
        assert!(!check_population("-1000000", 1_000_000));
        assert!(!check_population("1.0e6", 1_000_000));
        assert!(!check_population("1000000000000000000", 1_000_000));
    }

    #[test]
    fn zero_population_needs_exact_zero() {
        assert!(check_population("0", 0));
        assert!(!check_population("1", 0));
        assert!(!check_population("abc", 0));
    }

    #[test]
    fn huge_official_values_do_not_overflow() {
        let big = 999_999_999_999_999;
        assert!(check_population("999999999999999", big));
        assert!(!check_population("1", big));
    }
}
