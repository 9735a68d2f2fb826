#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a `BTreeSet<String>` from string literals.
#[macro_export]
macro_rules! set {
    ($($item:expr),* $(,)?) => {{
        let mut out = std::collections::BTreeSet::<String>::new();
        $( out.insert(String::from($item)); )*
        out
    }};
}

/// Build an alias table entry: `"CODE" => ["alias", ...]`.
#[macro_export]
macro_rules! aliases {
    ($($code:literal => [ $($alias:literal),* $(,)? ]),* $(,)?) => {{
        let mut out = std::collections::BTreeMap::<String, std::collections::BTreeSet<String>>::new();
        $( out.insert(String::from($code), $crate::set![$($alias),*]); )*
        out
    }};
}
