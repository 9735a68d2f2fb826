use atlasquiz::dataset::SnapshotOrigin;
use atlasquiz::{Country, RoundScore, SessionStats, Snapshot, ValidationOutcome};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            self.paint(s, BOLD)
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            self.paint(s, DIM)
        }
    }
}

pub use ansi::Palette;

pub fn print_intro(country: &Country, snapshot: &Snapshot, palette: &Palette) {
    if snapshot.origin() == SnapshotOrigin::Fallback {
        println!("{}", palette.paint("Using saved country data (live data unavailable).", ansi::YELLOW));
    }
    let flag = country.flag.as_deref().map(|f| format!("{f} ")).unwrap_or_default();
    println!("\n{}", palette.bold(palette.paint(format!("🌍 Country: {flag}{}", country.name), ansi::CYAN)));
}

pub fn print_round(country: &Country, score: &RoundScore, stats: &SessionStats, palette: &Palette) {
    println!("\n{}", palette.paint("━━━ Results ━━━", ansi::GRAY));
    if score.outcomes.is_empty() {
        println!("{}", palette.dim("  Nothing to ask about this one."));
    }
    for outcome in &score.outcomes {
        println!("{}", outcome_line(outcome, palette));
    }

    println!("\n{}", palette.paint("━━━ Score ━━━", ansi::GRAY));
    let round = format!("{}/{}", score.points, score.possible);
    println!(
        "  Round: {}  │  Session: {}  │  Countries explored: {}",
        if score.is_perfect() { palette.paint(round, ansi::GREEN) } else { palette.paint(round, ansi::YELLOW) },
        palette.paint(format!("{}/{}", stats.total_score, stats.total_possible), ansi::BLUE),
        palette.dim(stats.countries_seen().to_string()),
    );

    let facts = country.facts();
    if !facts.is_empty() {
        println!("\n{}", palette.paint("━━━ Country facts ━━━", ansi::GRAY));
        for fact in facts {
            println!("  • {fact}");
        }
    }
    println!();
}

fn outcome_line(outcome: &ValidationOutcome, palette: &Palette) -> String {
    let (mark, color) = if outcome.matched { ("✓", ansi::GREEN) } else { ("✗", ansi::RED) };
    let submitted = if outcome.submitted.is_empty() { "(no answer)" } else { outcome.submitted.as_str() };
    let tier = outcome.tier.map(|t| palette.dim(format!("  tier {}", t.number()))).unwrap_or_default();
    format!(
        "  {} {:<11} {}  {} {}{}",
        palette.paint(mark, color),
        palette.paint(outcome.field.label(), ansi::BLUE),
        palette.bold(submitted),
        palette.dim("│ answer:"),
        palette.paint(outcome.expected_display(), ansi::CYAN),
        tier,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlasquiz::{Field, Tier};

    #[test]
    fn plain_outcome_line() {
        let outcome = ValidationOutcome {
            field: Field::Currency,
            submitted: "dollar".to_string(),
            expected: vec!["USD — United States dollar".to_string()],
            matched: true,
            tier: Some(Tier::ControlledDefault),
        };
        let line = outcome_line(&outcome, &Palette::new(false));
        assert_eq!(line, "  ✓ Currency    dollar  │ answer: USD — United States dollar  tier 4");
    }

    #[test]
    fn empty_answer_is_labelled() {
        let outcome = ValidationOutcome {
            field: Field::Capital,
            submitted: String::new(),
            expected: vec!["Baku".to_string()],
            matched: false,
            tier: None,
        };
        let line = outcome_line(&outcome, &Palette::new(false));
        assert!(line.starts_with("  ✗ Capital     (no answer)"));
    }

    #[test]
    fn colors_only_when_enabled() {
        assert_eq!(Palette::new(false).bold("x"), "x");
        assert_eq!(Palette::new(true).bold("x"), "\x1b[1mx\x1b[0m");
    }
}
