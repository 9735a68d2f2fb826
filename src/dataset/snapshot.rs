use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::Country;
use crate::dataset::RawCountry;
use crate::engine::normalize;

/// Where a snapshot's records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SnapshotOrigin {
    Upstream,
    Fallback,
}

/// Point-in-time, immutable country collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    countries: Vec<Country>,
    fetched_at: DateTime<Utc>,
    origin: SnapshotOrigin,
}

impl Snapshot {
    pub fn new(countries: Vec<Country>, fetched_at: DateTime<Utc>, origin: SnapshotOrigin) -> Self {
        Snapshot { countries, fetched_at, origin }
    }

    /// Build from an upstream-shaped listing, keeping upstream order.
    pub fn from_listing(listing: &[RawCountry], fetched_at: DateTime<Utc>, origin: SnapshotOrigin) -> Self {
        Snapshot::new(listing.iter().filter_map(Country::from_raw).collect(), fetched_at, origin)
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn origin(&self) -> SnapshotOrigin {
        self.origin
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Fresh while `now - fetched_at <= ttl`. A timestamp in the future
    /// (clock skew) counts as fresh.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
        now.signed_duration_since(self.fetched_at) <= ttl
    }

    /// Look a country up by name, ignoring case and accents.
    pub fn find(&self, name: &str) -> Option<&Country> {
        let wanted = normalize(name);
        if wanted.is_empty() {
            return None;
        }
        self.countries.iter().find(|c| normalize(&c.name) == wanted)
    }

    /// Country names sorted alphabetically (developer tooling).
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.countries.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(at: DateTime<Utc>) -> Snapshot {
        Snapshot::new(
            vec![Country::named("Côte d'Ivoire"), Country::named("Benin")],
            at,
            SnapshotOrigin::Upstream,
        )
    }

    #[test]
    fn freshness_boundary() {
        let t0 = Utc::now();
        let ttl = Duration::from_secs(6 * 60 * 60);
        let s = snap(t0);

        assert!(s.is_fresh_at(t0, ttl));
        assert!(s.is_fresh_at(t0 + TimeDelta::hours(6), ttl));
        assert!(!s.is_fresh_at(t0 + TimeDelta::hours(6) + TimeDelta::seconds(1), ttl));
        assert!(s.is_fresh_at(t0 - TimeDelta::hours(1), ttl));
    }

    #[test]
    fn find_ignores_case_and_accents() {
        let s = snap(Utc::now());
        assert_eq!(s.find("cote d'ivoire").map(|c| c.name.as_str()), Some("Côte d'Ivoire"));
        assert_eq!(s.find("BENIN").map(|c| c.name.as_str()), Some("Benin"));
        assert!(s.find("Togo").is_none());
        assert!(s.find("").is_none());
    }

    #[test]
    fn names_are_sorted() {
        assert_eq!(snap(Utc::now()).names(), vec!["Benin", "Côte d'Ivoire"]);
    }
}
