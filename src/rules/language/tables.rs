//! Curated language synonyms.
//!
//! Pairs are symmetric: `("persian", "farsi")` accepts "farsi" when the
//! official label is Persian and "persian" when it is Farsi. Expansion is a
//! single hop, so chains ("norwegian bokmal" -> "norwegian" -> "norwegian
//! nynorsk") do not leak across variants.
//!
//! Keep this list explicit. Every entry is an answer we decided to accept.

pub const BUILTIN_SYNONYMS: &[(&str, &str)] = &[
    ("persian", "farsi"),
    // Official label is Filipino; most players answer Tagalog.
    ("filipino", "tagalog"),
    ("burmese", "myanmar"),
    ("greek", "hellenic"),
    ("chinese", "mandarin"),
    ("slovak", "slovakian"),
    ("swahili", "kiswahili"),
    ("lao", "laotian"),
    // Scottish Gaelic exists, but quiz players almost always mean Irish.
    ("irish", "gaelic"),
    ("norwegian bokmal", "norwegian"),
    ("norwegian nynorsk", "norwegian"),
    ("malay", "bahasa malaysia"),
    ("indonesian", "bahasa indonesia"),
    ("hindi", "hindustani"),
    ("romanian", "moldovan"),
    ("khmer", "cambodian"),
    ("sinhalese", "sinhala"),
    ("haitian creole", "haitian"),
    ("dutch", "nederlands"),
    ("dutch", "flemish"),
];
