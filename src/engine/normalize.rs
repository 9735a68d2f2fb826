//! Answer normalization.
//!
//! ```text
//! "  Ciudad de México! " ──▶ NFKD ──▶ drop marks ──▶ lowercase ──▶ collapse ──▶ "ciudad de mexico"
//! ```
//!
//! Decomposition runs before case folding so compatibility characters that
//! decompose to uppercase letters are folded too; marks are dropped again
//! after folding because a few lowercase mappings emit a combining dot
//! ("İ" -> "i\u{307}"). This ordering is what keeps `normalize` idempotent.
//!
//! Anything that is not alphanumeric acts as a separator. Runs of separators
//! become one ASCII space and leading/trailing separators are removed.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize free text for comparison.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_sep = false;

    let folded = text.nfkd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase);

    for ch in folded {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push(' ');
            }
            pending_sep = false;
            out.push(ch);
        } else {
            pending_sep = true;
        }
    }

    out
}

/// Keep ASCII letters only and uppercase them ("u.s.d." -> "USD").
pub fn iso_code_of(text: &str) -> String {
    text.chars().filter(char::is_ascii_alphabetic).map(|c| c.to_ascii_uppercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_case_and_accents() {
        assert_eq!(normalize("México"), "mexico");
        assert_eq!(normalize("MEXICO"), "mexico");
        assert_eq!(normalize("Bogotá"), "bogota");
        assert_eq!(normalize("São Tomé"), "sao tome");
        assert_eq!(normalize("Reykjavík"), "reykjavik");
    }

    #[test]
    fn collapses_separators() {
        assert_eq!(normalize("  Port-au-Prince "), "port au prince");
        assert_eq!(normalize("St. John's"), "st john s");
        assert_eq!(normalize("a\t\n  b"), "a b");
        assert_eq!(normalize("...hello..."), "hello");
    }

    #[test]
    fn empty_and_separator_only_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("?!-,"), "");
    }

    #[test]
    fn keeps_non_latin_letters() {
        assert_eq!(normalize("Москва"), "москва");
        assert_eq!(normalize("東京"), "東京");
    }

    #[test]
    fn idempotent_on_tricky_inputs() {
        let samples = [
            "Ciudad de México",
            "İstanbul",
            "ﬁnland",
            "㎒ hertz",
            "Ærøskøbing",
            "  N'Djamena  ",
            "Nuku'alofa",
            "ΣΊΣΥΦΟΣ",
            "straße",
            "1,234,567",
            "",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn iso_code_extraction() {
        assert_eq!(iso_code_of("usd"), "USD");
        assert_eq!(iso_code_of(" u.s.d. "), "USD");
        assert_eq!(iso_code_of("€"), "");
        assert_eq!(iso_code_of("Eur0"), "EUR");
    }
}
