use std::collections::BTreeSet;

use crate::engine::normalize;
use crate::rules::tables::RuleTables;

/// Split one official label into its acceptable normalized tokens.
///
/// `"Persian (Farsi)"` yields `{"persian", "farsi", "persian farsi"}`. Splits
/// on parentheses, commas, semicolons, slashes and the words
/// "and" / "or" / "aka" / "a.k.a.".
pub fn explode_label(label: &str) -> BTreeSet<String> {
    let mut out = BTreeSet::new();

    for part in regex!(r"(?i)[(),;/]| and | or | aka | a\.k\.a\. ").split(label) {
        let token = normalize(part);
        if !token.is_empty() {
            out.insert(token);
        }
    }

    let full = normalize(label);
    if !full.is_empty() {
        out.insert(full);
    }

    out
}

/// Every answer accepted for a country's official languages: exploded labels
/// plus one hop of curated synonyms.
pub fn accepted_language_answers(languages: &[String], tables: &RuleTables) -> BTreeSet<String> {
    let exploded: BTreeSet<String> = languages.iter().flat_map(|label| explode_label(label)).collect();

    let mut accepted = exploded.clone();
    for token in &exploded {
        accepted.extend(tables.synonyms_of(token).map(str::to_string));
    }
    accepted
}

/// A guess is correct if it names any one of the official languages.
pub fn check_language_with(guess: &str, languages: &[String], tables: &RuleTables) -> bool {
    let guess = normalize(guess);
    if guess.is_empty() {
        return false;
    }
    accepted_language_answers(languages, tables).contains(&guess)
}
