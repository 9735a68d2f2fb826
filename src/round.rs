//! Rounds and scoring.
//!
//! A round is one country plus one submission:
//!
//! ```text
//! Snapshot ──select──▶ Round { Pending } ──submit──▶ Round { Submitted } + RoundScore
//!                                                      │
//!                                                      └──▶ SessionStats::record
//! ```
//!
//! The engine trusts its caller to score each round instance at most once.
//! [`Round`] makes that explicit for callers who want it; [`score`] itself is
//! pure and does not deduplicate.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::Snapshot;
use crate::error::{RoundError, SelectError};
use crate::rules::capital::check_capital;
use crate::rules::currency::rules::{currency_label, match_currency_with};
use crate::rules::language::rules::check_language_with;
use crate::rules::population::check_population;
use crate::rules::tables::RuleTables;
use crate::{Country, Field, ValidationOutcome, group_thousands};

/// Game mode. Competitive rounds only use complete countries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Casual,
    Competitive,
}

impl Mode {
    pub fn admits(self, country: &Country) -> bool {
        match self {
            Mode::Casual => true,
            Mode::Competitive => country.is_complete(),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Casual => "casual",
            Mode::Competitive => "competitive",
        })
    }
}

/// Raw answers as submitted. Missing fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answers {
    #[serde(default)]
    pub capital: String,
    #[serde(default)]
    pub population: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub currency: String,
}

/// Outcome of scoring one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundScore {
    /// One entry per field the country actually has, in field order.
    pub outcomes: Vec<ValidationOutcome>,
    pub points: u32,
    pub possible: u32,
}

impl RoundScore {
    pub fn outcome(&self, field: Field) -> Option<&ValidationOutcome> {
        self.outcomes.iter().find(|o| o.field == field)
    }

    pub fn is_perfect(&self) -> bool {
        self.points == self.possible
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    Pending,
    Submitted,
}

/// One round: a chosen country that accepts exactly one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    country: Country,
    state: RoundState,
}

impl Round {
    pub fn new(country: Country) -> Self {
        Round { country, state: RoundState::Pending }
    }

    pub fn country(&self) -> &Country {
        &self.country
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn submit(&mut self, answers: &Answers) -> Result<RoundScore, RoundError> {
        self.submit_with(answers, RuleTables::builtin())
    }

    /// Score the round and move it to `Submitted`. A second call fails.
    pub fn submit_with(&mut self, answers: &Answers, tables: &RuleTables) -> Result<RoundScore, RoundError> {
        if self.state == RoundState::Submitted {
            return Err(RoundError::AlreadySubmitted);
        }
        self.state = RoundState::Submitted;
        Ok(score(&self.country, answers, tables))
    }
}

/// Cumulative counters for one player session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_score: u32,
    pub total_possible: u32,
    pub rounds: u32,
    /// Names of countries explored (submitted), oldest first.
    pub seen: Vec<String>,
}

impl SessionStats {
    /// Add a scored round. A country is only marked explored once.
    pub fn record(&mut self, country: &Country, score: &RoundScore) {
        self.total_score += score.points;
        self.total_possible += score.possible;
        self.rounds += 1;
        if !self.has_seen(&country.name) {
            self.seen.push(country.name.clone());
        }
    }

    pub fn has_seen(&self, name: &str) -> bool {
        self.seen.iter().any(|s| s == name)
    }

    pub fn countries_seen(&self) -> usize {
        self.seen.len()
    }

    /// Select a round, preferring countries not yet explored. Once every
    /// eligible country has been explored, the explored list starts over.
    pub fn select_unseen<R: Rng + ?Sized>(
        &mut self,
        mode: Mode,
        snapshot: &Snapshot,
        rng: &mut R,
    ) -> Result<Round, SelectError> {
        let exhausted = !snapshot.countries().iter().any(|c| mode.admits(c) && !self.has_seen(&c.name));
        if exhausted && !self.seen.is_empty() {
            debug!(seen = self.seen.len(), "every eligible country explored, starting over");
            self.seen.clear();
        }
        pick(mode, snapshot.countries(), &self.seen, rng).map(Round::new)
    }
}

/// Uniform draw among countries admitted by `mode`, skipping `seen` names
/// unless that would leave nothing to draw from.
pub(crate) fn pick<R: Rng + ?Sized>(
    mode: Mode,
    countries: &[Country],
    seen: &[String],
    rng: &mut R,
) -> Result<Country, SelectError> {
    let eligible: Vec<&Country> = countries.iter().filter(|c| mode.admits(c)).collect();
    let unseen: Vec<&Country> = eligible.iter().copied().filter(|c| !seen.contains(&c.name)).collect();
    let pool = if unseen.is_empty() { &eligible } else { &unseen };

    pool.choose(rng).map(|c| (*c).clone()).ok_or(SelectError::NoEligibleCountry(mode))
}

/// Check every field the country carries. Fields without an official value
/// (including a zero population) are not asked and do not count towards
/// `possible`.
pub(crate) fn score(country: &Country, answers: &Answers, tables: &RuleTables) -> RoundScore {
    let mut outcomes = Vec::with_capacity(4);

    if let Some(capital) = country.capital.as_deref().filter(|c| !c.trim().is_empty()) {
        outcomes.push(ValidationOutcome {
            field: Field::Capital,
            submitted: answers.capital.trim().to_string(),
            expected: vec![capital.to_string()],
            matched: check_capital(&answers.capital, capital),
            tier: None,
        });
    }

    if let Some(population) = country.population.filter(|p| *p > 0) {
        outcomes.push(ValidationOutcome {
            field: Field::Population,
            submitted: answers.population.trim().to_string(),
            expected: vec![group_thousands(population)],
            matched: check_population(&answers.population, population),
            tier: None,
        });
    }

    if !country.languages.is_empty() {
        outcomes.push(ValidationOutcome {
            field: Field::Language,
            submitted: answers.language.trim().to_string(),
            expected: country.languages.clone(),
            matched: check_language_with(&answers.language, &country.languages, tables),
            tier: None,
        });
    }

    if !country.currencies.is_empty() {
        let hit = match_currency_with(&answers.currency, &country.currencies, tables);
        outcomes.push(ValidationOutcome {
            field: Field::Currency,
            submitted: answers.currency.trim().to_string(),
            expected: country.currencies.iter().map(currency_label).collect(),
            matched: hit.is_some(),
            tier: hit.map(|m| m.tier),
        });
    }

    let points = outcomes.iter().filter(|o| o.matched).count() as u32;
    let possible = outcomes.len() as u32;
    debug!(country = %country.name, points, possible, "round scored");

    RoundScore { outcomes, points, possible }
}
