//! Answer rules, one module per answer type.
//!
//! Capital and population are thin rules over the engine primitives. Language
//! and currency each carry their own curated tables (`tables.rs`) and a
//! table-driven test suite (`tests.rs`); the combined, runtime-substitutable
//! form of those tables lives in [`tables::RuleTables`].

pub mod capital;
pub mod population;
pub mod tables;

pub mod language {
    pub mod rules;
    pub mod tables;
    #[cfg(test)]
    mod tests;
}

pub mod currency {
    pub mod rules;
    pub mod tables;
    #[cfg(test)]
    mod tests;
}
