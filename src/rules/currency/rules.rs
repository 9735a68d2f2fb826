//! Tiered currency matching.
//!
//! A guess is tested against every currency the country holds, one tier at a
//! time. The first tier that matches any currency wins:
//!
//! ```text
//! guess ──▶ (1) ISO code          "usd"            -> USD
//!       ──▶ (2) official name     "azerbaijani manat"
//!               symbol shortcut   "₼"  (single-currency countries only)
//!       ──▶ (3) core name         "manat"  (descriptor stripped)
//!       ──▶ (4) controlled default "dollar" -> USD only, conclusive
//!       ──▶ (5) curated alias     "cfa franc" -> XOF / XAF
//! ```
//!
//! Tier 4 is conclusive: a bare controlled-default word either names its one
//! currency or is wrong. It never falls through to the alias tier, and it is
//! never produced as a core name for another currency (so "dollar" cannot
//! match AUD at tier 3).

use std::collections::BTreeSet;

use tracing::trace;

use crate::engine::{iso_code_of, normalize};
use crate::rules::tables::RuleTables;
use crate::{Currency, Tier};

/// Which currency a guess matched, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyMatch {
    pub tier: Tier,
    pub code: String,
    /// True when tier 2 fired through the symbol shortcut.
    pub via_symbol: bool,
}

/// Core names derived from the official name by dropping leading descriptors.
///
/// Normally this is the last token ("Azerbaijani manat" -> "manat"). When the
/// last token is a controlled-default word, the bare word is withheld and the
/// 2- to 4-token suffixes are used instead ("Australian dollar" ->
/// "australian dollar").
pub fn core_names(currency: &Currency, tables: &RuleTables) -> BTreeSet<String> {
    let name = normalize(&currency.name);
    let tokens: Vec<&str> = name.split(' ').filter(|t| !t.is_empty()).collect();
    let Some(last) = tokens.last() else {
        return BTreeSet::new();
    };

    if tables.default_code_for(last).is_none() {
        return BTreeSet::from([last.to_string()]);
    }

    (2..=4).filter(|n| tokens.len() >= *n).map(|n| tokens[tokens.len() - n..].join(" ")).collect()
}

/// Run the tier hierarchy. `None` means no tier fired.
pub fn match_currency_with(guess: &str, currencies: &[Currency], tables: &RuleTables) -> Option<CurrencyMatch> {
    let raw = guess.trim();
    if raw.is_empty() || currencies.is_empty() {
        return None;
    }

    let name = normalize(raw);
    let code = iso_code_of(raw);
    let single = currencies.len() == 1;

    let found = |tier: Tier, c: &Currency, via_symbol: bool| {
        trace!(guess = raw, code = %c.code, tier = tier.number(), via_symbol, "currency matched");
        Some(CurrencyMatch { tier, code: c.code.clone(), via_symbol })
    };

    // (1) ISO code
    if code.len() == 3 {
        if let Some(c) = currencies.iter().find(|c| c.code == code) {
            return found(Tier::IsoCode, c, false);
        }
    }

    // (2) official name, plus the symbol shortcut at the same precedence
    if !name.is_empty() {
        if let Some(c) = currencies.iter().find(|c| normalize(&c.name) == name) {
            return found(Tier::OfficialName, c, false);
        }
    }
    if single {
        let c = &currencies[0];
        if c.symbol.as_deref().map(str::trim).is_some_and(|s| !s.is_empty() && s == raw) {
            return found(Tier::OfficialName, c, true);
        }
    }

    if name.is_empty() {
        return None;
    }

    // (3) descriptor-stripped core name
    if let Some(c) = currencies.iter().find(|c| core_names(c, tables).contains(&name)) {
        return found(Tier::CoreName, c, false);
    }

    // (4) controlled defaults
    if let Some(default_code) = tables.default_code_for(&name) {
        return match currencies.iter().find(|c| c.code == default_code) {
            Some(c) => found(Tier::ControlledDefault, c, false),
            None => {
                trace!(guess = raw, default_code, "controlled default names a currency this country lacks");
                None
            }
        };
    }

    // (5) curated aliases
    if let Some(c) = currencies.iter().find(|c| tables.aliases_for(&c.code).any(|a| a == name)) {
        return found(Tier::Alias, c, false);
    }

    None
}

/// `(matched, tier)` form of [`match_currency_with`].
pub fn check_currency_with(guess: &str, currencies: &[Currency], tables: &RuleTables) -> (bool, Option<Tier>) {
    match match_currency_with(guess, currencies, tables) {
        Some(m) => (true, Some(m.tier)),
        None => (false, None),
    }
}

/// Display form of a country's currencies: "CODE — Name; CODE — Name".
pub fn format_currency_answer(currencies: &[Currency]) -> String {
    currencies.iter().map(currency_label).filter(|s| !s.is_empty()).collect::<Vec<_>>().join("; ")
}

pub(crate) fn currency_label(c: &Currency) -> String {
    match (c.code.is_empty(), c.name.is_empty()) {
        (false, false) => format!("{} — {}", c.code, c.name),
        (true, false) => c.name.clone(),
        (false, true) => c.code.clone(),
        (true, true) => String::new(),
    }
}
