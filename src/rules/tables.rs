//! Curated lookup tables as configuration data.
//!
//! Tables come in two forms:
//!
//! - [`TableSpec`]: the serialized shape (JSON), exactly as an operator writes
//!   it. Entries may use any case or accents.
//! - [`RuleTables`]: the compiled form the rules consult. Every key and value
//!   is normalized once here so lookups are plain hash probes.
//!
//! The built-in tables are compiled on first use and shared. Tests and
//! deployments can substitute their own via [`RuleTables::from_json`].

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::engine::{iso_code_of, normalize};
use crate::error::ConfigError;
use crate::rules::currency::tables::{BUILTIN_CONTROLLED_DEFAULTS, builtin_aliases};
use crate::rules::language::tables::BUILTIN_SYNONYMS;

static BUILTIN: Lazy<RuleTables> =
    Lazy::new(|| RuleTables::from_spec(&TableSpec::builtin()).expect("built-in rule tables are valid"));

/// Serialized rule tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Symmetric language synonym pairs.
    #[serde(default)]
    pub language_synonyms: Vec<(String, String)>,
    /// ISO code -> accepted common names.
    #[serde(default)]
    pub currency_aliases: BTreeMap<String, BTreeSet<String>>,
    /// Bare term -> the single ISO code it stands for.
    #[serde(default)]
    pub controlled_defaults: BTreeMap<String, String>,
}

impl TableSpec {
    pub fn builtin() -> Self {
        TableSpec {
            language_synonyms: BUILTIN_SYNONYMS.iter().map(|(a, b)| (a.to_string(), b.to_string())).collect(),
            currency_aliases: builtin_aliases(),
            controlled_defaults: BUILTIN_CONTROLLED_DEFAULTS
                .iter()
                .map(|(term, code)| (term.to_string(), code.to_string()))
                .collect(),
        }
    }
}

/// Compiled, normalized rule tables.
#[derive(Debug, Clone, Default)]
pub struct RuleTables {
    language_synonyms: HashMap<String, BTreeSet<String>>,
    currency_aliases: HashMap<String, BTreeSet<String>>,
    controlled_defaults: HashMap<String, String>,
}

impl RuleTables {
    /// The shared built-in tables.
    pub fn builtin() -> &'static RuleTables {
        &BUILTIN
    }

    /// Tables with no entries at all.
    pub fn empty() -> Self {
        RuleTables::default()
    }

    /// Compile a [`TableSpec`], normalizing every entry.
    pub fn from_spec(spec: &TableSpec) -> Result<Self, ConfigError> {
        let mut tables = RuleTables::default();

        for (a, b) in &spec.language_synonyms {
            let (a, b) = (normalized_entry(a)?, normalized_entry(b)?);
            if a == b {
                continue;
            }
            tables.language_synonyms.entry(a.clone()).or_default().insert(b.clone());
            tables.language_synonyms.entry(b).or_default().insert(a);
        }

        for (code, aliases) in &spec.currency_aliases {
            let code = iso_code(code)?;
            let entry = tables.currency_aliases.entry(code).or_default();
            for alias in aliases {
                entry.insert(normalized_entry(alias)?);
            }
        }

        for (term, code) in &spec.controlled_defaults {
            let term = normalized_entry(term)?;
            if term.contains(' ') {
                return Err(ConfigError::Tables(format!("controlled default '{term}' must be a single word")));
            }
            tables.controlled_defaults.insert(term, iso_code(code)?);
        }

        Ok(tables)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let spec: TableSpec = serde_json::from_str(json).map_err(|e| ConfigError::Tables(e.to_string()))?;
        Self::from_spec(&spec)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        Self::from_json(&json)
    }

    /// Curated synonyms of a normalized language token.
    pub fn synonyms_of<'a>(&'a self, token: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.language_synonyms.get(token).into_iter().flatten().map(String::as_str)
    }

    /// Normalized aliases curated for `code` (uppercase ISO code).
    pub fn aliases_for<'a>(&'a self, code: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.currency_aliases.get(code).into_iter().flatten().map(String::as_str)
    }

    /// The one code a bare term stands for, if it is a controlled default.
    pub fn default_code_for(&self, term: &str) -> Option<&str> {
        self.controlled_defaults.get(term).map(String::as_str)
    }
}

fn normalized_entry(raw: &str) -> Result<String, ConfigError> {
    let n = normalize(raw);
    if n.is_empty() {
        return Err(ConfigError::Tables(format!("entry '{raw}' is empty after normalization")));
    }
    Ok(n)
}

fn iso_code(raw: &str) -> Result<String, ConfigError> {
    let code = iso_code_of(raw);
    if code.len() != 3 || raw.trim().len() != 3 {
        return Err(ConfigError::Tables(format!("'{raw}' is not a three-letter currency code")));
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_compile() {
        let t = RuleTables::builtin();
        assert!(t.synonyms_of("farsi").any(|s| s == "persian"));
        assert!(t.synonyms_of("persian").any(|s| s == "farsi"));
        assert!(t.aliases_for("XOF").any(|a| a == "cfa franc"));
        assert_eq!(t.default_code_for("dollar"), Some("USD"));
        assert_eq!(t.default_code_for("franc"), None);
    }

    #[test]
    fn synonyms_are_symmetric_and_single_hop() {
        let t = RuleTables::builtin();
        let norwegian: BTreeSet<&str> = t.synonyms_of("norwegian").collect();
        assert_eq!(norwegian, BTreeSet::from(["norwegian bokmal", "norwegian nynorsk"]));
        let bokmal: Vec<&str> = t.synonyms_of("norwegian bokmal").collect();
        assert_eq!(bokmal, vec!["norwegian"]);
    }

    #[test]
    fn json_tables_are_normalized() {
        let json = r#"{
            "language_synonyms": [["Español", "Castellano"]],
            "currency_aliases": {"chf": ["Franken"]},
            "controlled_defaults": {"Franc": "CHF"}
        }"#;
        let t = RuleTables::from_json(json).unwrap();
        assert!(t.synonyms_of("espanol").any(|s| s == "castellano"));
        assert!(t.aliases_for("CHF").any(|a| a == "franken"));
        assert_eq!(t.default_code_for("franc"), Some("CHF"));
        assert!(t.aliases_for("USD").next().is_none());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let t = RuleTables::from_json("{}").unwrap();
        assert_eq!(t.default_code_for("dollar"), None);
    }

    #[test]
    fn invalid_tables_are_rejected() {
        assert!(matches!(RuleTables::from_json("not json"), Err(ConfigError::Tables(_))));
        assert!(RuleTables::from_json(r#"{"currency_aliases": {"DOLLAR": ["x"]}}"#).is_err());
        assert!(RuleTables::from_json(r#"{"language_synonyms": [["", "x"]]}"#).is_err());
        assert!(RuleTables::from_json(r#"{"controlled_defaults": {"us dollar": "USD"}}"#).is_err());
    }
}
