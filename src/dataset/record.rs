use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Country, Currency};

/// One entry of the upstream country listing (RestCountries v3.1 shape).
///
/// Collections are optional because upstream omits or nulls them for
/// territories without a capital, languages or currencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCountry {
    pub name: RawName,
    #[serde(default)]
    pub capital: Option<Vec<String>>,
    #[serde(default)]
    pub population: Option<u64>,
    /// Language code -> label.
    #[serde(default)]
    pub languages: Option<Entries<String>>,
    /// ISO code -> details.
    #[serde(default)]
    pub currencies: Option<Entries<RawCurrency>>,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub borders: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawName {
    #[serde(default)]
    pub common: Option<String>,
    #[serde(default)]
    pub official: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCurrency {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// A JSON object kept as key/value pairs in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entries<T>(pub Vec<(String, T)>);

impl<T> Entries<T> {
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<T: Serialize> Serialize for Entries<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Entries<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
            type Value = Entries<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, T>()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

impl Country {
    /// Convert an upstream record. Records without a common name are dropped.
    pub fn from_raw(raw: &RawCountry) -> Option<Country> {
        let name = raw.name.common.as_deref().map(str::trim).filter(|n| !n.is_empty())?;

        let capital = raw
            .capital
            .iter()
            .flatten()
            .map(|c| c.trim())
            .find(|c| !c.is_empty())
            .map(str::to_string);

        let languages = raw
            .languages
            .iter()
            .flat_map(Entries::values)
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();

        let currencies = raw
            .currencies
            .iter()
            .flat_map(Entries::iter)
            .map(|(code, info)| Currency {
                symbol: info.symbol.clone().filter(|s| !s.trim().is_empty()),
                ..Currency::new(code, info.name.as_deref().unwrap_or(""))
            })
            .collect();

        Some(Country {
            name: name.to_string(),
            capital,
            population: raw.population,
            languages,
            currencies,
            subregion: raw.subregion.clone().filter(|s| !s.trim().is_empty()),
            area: raw.area,
            borders: raw.borders.clone().unwrap_or_default(),
            flag: raw.flag.clone(),
        })
    }
}
