extern crate self as atlasquiz;

use serde::{Deserialize, Serialize};

#[macro_use]
mod macros;
mod api;
mod engine;
mod rules;

pub mod competition;
pub mod config;
pub mod dataset;
pub mod error;
pub mod round;

pub use api::{
    check_capital, check_currency, check_currency_with, check_language, check_language_with, check_population,
    format_currency_answer, match_currency, match_currency_with, normalize, parse_integer, score_round,
    score_round_with, select_round, select_round_with,
};
pub use competition::{NameError, validate_player_name};
pub use config::Config;
pub use dataset::{
    CacheSettings, CountrySource, DatasetCache, FallbackStore, FileStore, HttpSource, MemoryStore, OfflineSource,
    RawCountry, Snapshot, SnapshotOrigin,
};
pub use error::{ConfigError, FetchError, ParseError, RoundError, SelectError, StoreError, Unavailable};
pub use round::{Answers, Mode, Round, RoundScore, RoundState, SessionStats};
pub use rules::currency::rules::CurrencyMatch;
pub use rules::tables::{RuleTables, TableSpec};

// --- Country records ---------------------------------------------------------

/// One currency a country uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 code, uppercase.
    pub code: String,
    /// Official name as published upstream, e.g. "Azerbaijani manat".
    pub name: String,
    /// Display symbol, when known.
    #[serde(default)]
    pub symbol: Option<String>,
}

impl Currency {
    pub fn new(code: &str, name: &str) -> Self {
        Currency { code: code.trim().to_ascii_uppercase(), name: name.trim().to_string(), symbol: None }
    }

    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.to_string());
        self
    }
}

/// A country as the rule engine sees it. Read-only once a snapshot holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub capital: Option<String>,
    pub population: Option<u64>,
    /// Official languages, in upstream order.
    pub languages: Vec<String>,
    pub currencies: Vec<Currency>,
    pub subregion: Option<String>,
    /// Area in km².
    pub area: Option<f64>,
    /// Neighbouring country codes.
    pub borders: Vec<String>,
    pub flag: Option<String>,
}

bitflags::bitflags! {
    /// Which answerable fields a country actually carries.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldSet: u8 {
        const CAPITAL    = 1 << 0;
        const POPULATION = 1 << 1;
        const LANGUAGE   = 1 << 2;
        const CURRENCY   = 1 << 3;
    }
}

impl Country {
    /// A bare record with only a name; fill fields with struct update syntax.
    pub fn named(name: &str) -> Self {
        Country {
            name: name.to_string(),
            capital: None,
            population: None,
            languages: Vec::new(),
            currencies: Vec::new(),
            subregion: None,
            area: None,
            borders: Vec::new(),
            flag: None,
        }
    }

    /// Fields a round asks about. A zero population counts as absent
    /// (uninhabited territories make poor questions).
    pub fn fields(&self) -> FieldSet {
        let mut set = FieldSet::empty();
        if self.capital.as_deref().is_some_and(|c| !c.trim().is_empty()) {
            set |= FieldSet::CAPITAL;
        }
        if self.population.is_some_and(|p| p > 0) {
            set |= FieldSet::POPULATION;
        }
        if !self.languages.is_empty() {
            set |= FieldSet::LANGUAGE;
        }
        if !self.currencies.is_empty() {
            set |= FieldSet::CURRENCY;
        }
        set
    }

    /// True when capital, population, a language and a currency are all present.
    pub fn is_complete(&self) -> bool {
        self.fields().is_all()
    }

    /// Short trivia lines shown after a round.
    pub fn facts(&self) -> Vec<String> {
        let mut facts = Vec::new();
        if let Some(subregion) = self.subregion.as_deref().filter(|s| !s.is_empty()) {
            facts.push(format!("{} is located in {}.", self.name, subregion));
        }
        if let Some(area) = self.area {
            facts.push(format!("It covers an area of {} km².", group_thousands(area.round() as u64)));
        }
        match self.borders.len() {
            0 => facts.push("It has no land borders: it's an island nation or territory.".to_string()),
            1 => facts.push("It shares a border with just one country.".to_string()),
            n => facts.push(format!("It shares borders with {n} countries.")),
        }
        facts
    }
}

// --- Validation outcomes -----------------------------------------------------

/// The four answerable fields of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Capital,
    Population,
    Language,
    Currency,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Capital => "Capital",
            Field::Population => "Population",
            Field::Language => "Language",
            Field::Currency => "Currency",
        }
    }
}

/// Precedence levels of the currency matcher, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    IsoCode = 1,
    OfficialName = 2,
    CoreName = 3,
    ControlledDefault = 4,
    Alias = 5,
}

impl Tier {
    pub fn number(self) -> u8 {
        self as u8
    }
}

/// Result of checking one submitted field. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub field: Field,
    pub submitted: String,
    /// Accepted official value(s), already formatted for display.
    pub expected: Vec<String>,
    pub matched: bool,
    /// Currency only: which tier fired.
    pub tier: Option<Tier>,
}

impl ValidationOutcome {
    pub fn expected_display(&self) -> String {
        let sep = if self.field == Field::Currency { "; " } else { ", " };
        self.expected.join(sep)
    }
}

/// Format an integer with comma thousands separators ("1234567" -> "1,234,567").
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Country {
        Country {
            capital: Some("Baku".to_string()),
            population: Some(10_000_000),
            languages: vec!["Azerbaijani".to_string()],
            currencies: vec![Currency::new("azn", "Azerbaijani manat")],
            ..Country::named("Azerbaijan")
        }
    }

    #[test]
    fn completeness_needs_all_four_fields() {
        assert!(complete().is_complete());
        assert!(!Country { capital: None, ..complete() }.is_complete());
        assert!(!Country { capital: Some("  ".to_string()), ..complete() }.is_complete());
        assert!(!Country { population: Some(0), ..complete() }.is_complete());
        assert!(!Country { languages: vec![], ..complete() }.is_complete());
        assert!(!Country { currencies: vec![], ..complete() }.is_complete());
    }

    #[test]
    fn currency_code_is_uppercased() {
        assert_eq!(Currency::new(" azn ", "Azerbaijani manat").code, "AZN");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn facts_cover_borders_cases() {
        let island = Country { subregion: Some("Polynesia".to_string()), area: Some(2842.0), ..complete() };
        let facts = island.facts();
        assert_eq!(facts[0], "Azerbaijan is located in Polynesia.");
        assert_eq!(facts[1], "It covers an area of 2,842 km².");
        assert!(facts[2].contains("no land borders"));

        let one = Country { borders: vec!["ESP".to_string()], ..complete() };
        assert_eq!(one.facts(), vec!["It shares a border with just one country.".to_string()]);

        let many = Country { borders: vec!["ARM".into(), "GEO".into(), "IRN".into()], ..complete() };
        assert_eq!(many.facts(), vec!["It shares borders with 3 countries.".to_string()]);
    }
}
