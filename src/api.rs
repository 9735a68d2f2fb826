//! Public surface consumed by the web/session layer.
//!
//! Every `check_*` that depends on curated tables comes in two forms: a plain
//! one using [`RuleTables::builtin`], and a `*_with` twin taking explicit
//! tables (for tests and for deployments that load their own tables).
//!
//! Nothing here panics or returns an error for bad user input: a guess that
//! cannot be understood is simply wrong.

use rand::Rng;

use crate::dataset::Snapshot;
use crate::error::SelectError;
use crate::round::{self, Answers, Mode, Round, RoundScore};
use crate::rules::currency::rules::CurrencyMatch;
use crate::rules::tables::RuleTables;
use crate::{Country, Currency, Tier};

pub use crate::engine::{normalize, parse_integer};
pub use crate::rules::capital::check_capital;
pub use crate::rules::currency::rules::{check_currency_with, format_currency_answer, match_currency_with};
pub use crate::rules::language::rules::check_language_with;
pub use crate::rules::population::check_population;

/// Does `guess` name any of the country's official languages?
///
/// # Example
/// ```
/// assert!(atlasquiz::check_language("farsi", &["Persian (Farsi)".to_string()]));
/// ```
pub fn check_language(guess: &str, languages: &[String]) -> bool {
    check_language_with(guess, languages, RuleTables::builtin())
}

/// Match a currency guess; returns whether it matched and which tier fired.
///
/// # Example
/// ```
/// use atlasquiz::{Currency, Tier, check_currency};
///
/// let azn = [Currency::new("AZN", "Azerbaijani manat")];
/// assert_eq!(check_currency("manat", &azn), (true, Some(Tier::CoreName)));
/// ```
pub fn check_currency(guess: &str, currencies: &[Currency]) -> (bool, Option<Tier>) {
    check_currency_with(guess, currencies, RuleTables::builtin())
}

/// Like [`check_currency`], but reports which currency matched.
pub fn match_currency(guess: &str, currencies: &[Currency]) -> Option<CurrencyMatch> {
    match_currency_with(guess, currencies, RuleTables::builtin())
}

/// Pick a country uniformly at random for a new round.
pub fn select_round(mode: Mode, snapshot: &Snapshot) -> Result<Round, SelectError> {
    select_round_with(mode, snapshot, &mut rand::thread_rng())
}

/// [`select_round`] with a caller-supplied RNG (seeded in tests).
pub fn select_round_with<R: Rng + ?Sized>(mode: Mode, snapshot: &Snapshot, rng: &mut R) -> Result<Round, SelectError> {
    round::pick(mode, snapshot.countries(), &[], rng).map(Round::new)
}

/// Score one submission against `country` using the built-in tables.
pub fn score_round(country: &Country, answers: &Answers) -> RoundScore {
    score_round_with(country, answers, RuleTables::builtin())
}

/// Score one submission with explicit tables.
pub fn score_round_with(country: &Country, answers: &Answers, tables: &RuleTables) -> RoundScore {
    round::score(country, answers, tables)
}
