use crate::engine::normalize;

/// Capitals are proper nouns: exact match after normalization, nothing else.
/// No translation either; "mexico city" is not "Ciudad de México".
pub fn check_capital(guess: &str, official: &str) -> bool {
    let guess = normalize(guess);
    !guess.is_empty() && guess == normalize(official)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capital_examples() {
        let cases: Vec<(bool, &str, &str)> = vec![
            (true, "Paris", "Paris"),
            (true, "paris", "Paris"),
            (true, "  PARIS ", "Paris"),
            (true, "bogota", "Bogotá"),
            (true, "ciudad de mexico", "Ciudad de México"),
            (true, "port au prince", "Port-au-Prince"),
            (true, "washington d.c.", "Washington, D.C."),
            (false, "Washington DC", "Washington, D.C."),
            (false, "mexico city", "Ciudad de México"),
            (false, "Pari", "Paris"),
            (false, "Paris France", "Paris"),
            (false, "", "Paris"),
            (false, "  ", "Paris"),
        ];

        for (expected, guess, official) in cases {
            assert_eq!(check_capital(guess, official), expected, "guess {guess:?} vs official {official:?}");
        }
    }
}
