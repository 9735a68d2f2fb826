mod report;

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;

use atlasquiz::competition::validate_player_name;
use atlasquiz::dataset::OfflineSource;
use atlasquiz::{
    Answers, Config, CountrySource, DatasetCache, FieldSet, Mode, Round, RuleTables, SessionStats, Snapshot, select_round,
};
use tracing_subscriber::EnvFilter;

use report::Palette;

fn main() {
    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("atlasquiz=info")))
        .with_writer(io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    let code = if cli.offline { run(&cli, &config, OfflineSource) } else { run(&cli, &config, config.http_source()) };
    std::process::exit(code);
}

fn run<S: CountrySource>(cli: &CliConfig, config: &Config, source: S) -> i32 {
    let tables = match config.rule_tables() {
        Ok(tables) => tables,
        Err(err) => {
            eprintln!("error: {err}");
            return 2;
        }
    };

    let cache = DatasetCache::new(source, config.file_store(), config.cache_settings());
    let snapshot = match cache.get_dataset() {
        Ok(snapshot) => snapshot,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };

    match play(cli, &snapshot, &tables) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn play(cli: &CliConfig, snapshot: &Arc<Snapshot>, tables: &RuleTables) -> Result<(), String> {
    let palette = Palette::new(cli.color);
    let stdin = io::stdin();
    let mut input = stdin.lock();

    if cli.mode == Mode::Competitive {
        let name = ask_player_name(&mut input)?;
        println!("Good luck, {name}!");
    }

    let mut round = choose_round(cli.mode, cli.country.as_deref(), snapshot)?;
    let country = round.country().clone();
    report::print_intro(&country, snapshot, &palette);

    let fields = country.fields();
    let mut answers = Answers::default();
    if fields.contains(FieldSet::CAPITAL) {
        answers.capital = prompt(&mut input, "What is the capital?")?;
    }
    if fields.contains(FieldSet::POPULATION) {
        answers.population = prompt(&mut input, "What is the population?")?;
    }
    if fields.contains(FieldSet::LANGUAGE) {
        answers.language = prompt(&mut input, "Name one official language:")?;
    }
    if fields.contains(FieldSet::CURRENCY) {
        answers.currency = prompt(&mut input, "What currency is used?")?;
    }

    let score = round.submit_with(&answers, tables).map_err(|err| format!("error: {err}"))?;
    let mut stats = SessionStats::default();
    stats.record(&country, &score);
    report::print_round(&country, &score, &stats, &palette);
    Ok(())
}

/// A named country must still be eligible for `mode`.
fn choose_round(mode: Mode, country: Option<&str>, snapshot: &Snapshot) -> Result<Round, String> {
    let Some(name) = country else {
        return select_round(mode, snapshot).map_err(|err| format!("error: {err}"));
    };
    let country = snapshot.find(name).ok_or_else(|| format!("error: unknown country '{name}'"))?;
    if !mode.admits(country) {
        return Err(format!("error: {} is missing answers and cannot be played in {mode} mode", country.name));
    }
    Ok(Round::new(country.clone()))
}

fn ask_player_name(input: &mut impl BufRead) -> Result<String, String> {
    loop {
        let raw = prompt(input, "Player name:")?;
        if raw.is_empty() {
            return Err("error: a player name is required in competitive mode".to_string());
        }
        match validate_player_name(&raw) {
            Ok(name) => return Ok(name),
            Err(err) => println!("  {err}"),
        }
    }
}

/// Print `label` and read one line. EOF reads as an empty answer.
fn prompt(input: &mut impl BufRead, label: &str) -> Result<String, String> {
    print!("{label} ");
    io::stdout().flush().map_err(|err| format!("error: failed to write prompt: {err}"))?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(line.trim().to_string())
}

struct CliConfig {
    mode: Mode,
    offline: bool,
    color: bool,
    country: Option<String>,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut cli =
        CliConfig { mode: Mode::Casual, offline: false, color: io::stdout().is_terminal(), country: None };
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("atlasquiz {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--competitive" => cli.mode = Mode::Competitive,
            "--offline" => cli.offline = true,
            "--color" => cli.color = true,
            "--no-color" => cli.color = false,
            "--country" => {
                let value = args.next().ok_or_else(|| "error: --country expects a value".to_string())?;
                cli.country = Some(value);
            }
            _ if arg.starts_with("--country=") => {
                cli.country = Some(arg.trim_start_matches("--country=").to_string());
            }
            _ => {
                return Err(format!("error: unknown option '{arg}'\n\n{}", help_text()));
            }
        }
    }

    if cli.country.as_deref().is_some_and(|c| c.trim().is_empty()) {
        return Err("error: --country expects a non-empty name".to_string());
    }
    Ok(cli)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "atlasquiz {version}

Geography trivia: name the capital, population, a language and the currency.

Usage:
  atlasquiz [OPTIONS]

Options:
  --competitive         Only ask about countries with all four answers known,
                        and ask for a player name first.
  --offline             Skip the live country service and use saved data.
  --country <name>      Play a specific country instead of a random one.
  --color               Force ANSI color output.
  --no-color            Disable ANSI color output.
  -h, --help            Show this help message.
  -V, --version         Print version information.

Environment:
  ATLASQUIZ_COUNTRIES_URL, ATLASQUIZ_CACHE_TTL_SECS, ATLASQUIZ_FETCH_TIMEOUT_SECS,
  ATLASQUIZ_FALLBACK_PATH, ATLASQUIZ_FALLBACK_REFRESH_DAYS, ATLASQUIZ_RULE_TABLES,
  RUST_LOG (default: atlasquiz=info)

Exit codes:
  0  Success.
  1  No country data, or the round could not be played.
  2  Invalid arguments or configuration.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
