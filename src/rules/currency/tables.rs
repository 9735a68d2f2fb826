//! Curated currency tables.

use std::collections::{BTreeMap, BTreeSet};

/// Bare generic words that resolve to exactly one currency.
///
/// "dollar" alone means USD, never AUD/CAD/NZD. Other dollars must be named
/// with their descriptor ("australian dollar").
pub const BUILTIN_CONTROLLED_DEFAULTS: &[(&str, &str)] = &[("dollar", "USD")];

/// Code -> common names that diverge from the official name.
pub fn builtin_aliases() -> BTreeMap<String, BTreeSet<String>> {
    aliases! {
        "USD" => ["us dollar", "u s dollar"],
        "GBP" => ["pound sterling", "sterling", "pound"],
        "EUR" => ["euro"],
        "JPY" => ["yen"],
        "CNY" => ["yuan", "renminbi", "rmb"],
        "KRW" => ["won"],
        "INR" => ["rupee"],
        "RUB" => ["ruble", "rouble"],
        "PLN" => ["zloty"],
        "XAF" => ["cfa franc", "central african cfa franc", "cfa"],
        "XOF" => ["cfa franc", "west african cfa franc", "cfa"],
    }
}
