use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use mind_core::bank::QuestionCatalog;
use mind_core::model::{AssessmentMode, AssessmentSettings, MiniGameType, TimeoutPolicy};
use services::{
    AssessmentSession, Clock, ErrorKind, MiniGameAdapter, SessionError, SoundEvent, SoundSink,
};

mod render;
mod simulated;

use simulated::SimulatedRunner;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidMode { raw: String },
    InvalidSeed { raw: String },
    InvalidGame { raw: String },
    InvalidTimeoutPolicy { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidMode { raw } => write!(f, "invalid --mode value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidGame { raw } => write!(f, "invalid --games entry: {raw}"),
            ArgsError::InvalidTimeoutPolicy { raw } => {
                write!(f, "invalid --timeout value (expected last or none): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--mode quick|standard|deep] [--seed <u64>] [--shuffle] \
         [--games <a,b,..>] [--timeout last|none] [--json] [--verbose]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --mode quick, all mini-games, questions in catalog order");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MIND_MODE, MIND_SEED, MIND_SHUFFLE, RUST_LOG");
}

#[derive(Debug, Clone)]
struct Args {
    mode: AssessmentMode,
    seed: Option<u64>,
    shuffle: bool,
    games: Vec<MiniGameType>,
    timeout_policy: TimeoutPolicy,
    json: bool,
    verbose: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut mode = match std::env::var("MIND_MODE") {
            Ok(raw) => parse_mode(raw)?,
            Err(_) => AssessmentMode::default(),
        };
        let mut seed = match std::env::var("MIND_SEED") {
            Ok(raw) => Some(parse_seed(raw)?),
            Err(_) => None,
        };
        let mut shuffle = std::env::var("MIND_SHUFFLE")
            .ok()
            .is_some_and(|value| matches!(value.trim(), "1" | "true" | "yes"));
        let mut games = MiniGameType::ALL.to_vec();
        let mut timeout_policy = TimeoutPolicy::default();
        let mut json = false;
        let mut verbose = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--mode" => mode = parse_mode(require_value(args, "--mode")?)?,
                "--seed" => seed = Some(parse_seed(require_value(args, "--seed")?)?),
                "--shuffle" => shuffle = true,
                "--games" => {
                    let value = require_value(args, "--games")?;
                    games = value
                        .split(',')
                        .map(|raw| {
                            raw.parse::<MiniGameType>()
                                .map_err(|_| ArgsError::InvalidGame {
                                    raw: raw.to_string(),
                                })
                        })
                        .collect::<Result<_, _>>()?;
                }
                "--timeout" => {
                    let value = require_value(args, "--timeout")?;
                    timeout_policy = match value.as_str() {
                        "last" => TimeoutPolicy::MarkedOrLast,
                        "none" => TimeoutPolicy::MarkedOnly,
                        _ => return Err(ArgsError::InvalidTimeoutPolicy { raw: value }),
                    };
                }
                "--json" => json = true,
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            mode,
            seed,
            shuffle,
            games,
            timeout_policy,
            json,
            verbose,
        })
    }

    fn settings(&self) -> Result<AssessmentSettings, Box<dyn std::error::Error>> {
        Ok(AssessmentSettings::new(
            self.games.clone(),
            self.shuffle,
            self.seed,
            self.timeout_policy,
        )?)
    }
}

fn parse_mode(raw: String) -> Result<AssessmentMode, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidMode { raw })
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidSeed { raw })
}

/// Sound cues go to the log; a terminal has no speaker worth driving.
struct LoggedSound;

impl SoundSink for LoggedSound {
    fn play(&self, event: SoundEvent) {
        debug!(target: "sound", %event, "play");
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

enum Command {
    Answer(usize),
    Back,
    Quit,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    match line.trim() {
        "b" | "back" => Command::Back,
        "q" | "quit" => Command::Quit,
        other => other
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .map_or(Command::Unknown, Command::Answer),
    }
}

/// Report caller mistakes and keep going; anything else ends the run.
fn recoverable(result: Result<(), SessionError>) -> Result<(), SessionError> {
    match result {
        Err(err) if err.kind() != ErrorKind::Configuration => {
            println!("  {err}");
            Ok(())
        }
        other => other,
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    init_tracing(args.verbose);

    let catalog = QuestionCatalog::builtin()?;
    let runner = SimulatedRunner::new(args.seed, Duration::from_millis(1500));
    let mut session = AssessmentSession::new(catalog, MiniGameAdapter::new(runner))
        .with_settings(args.settings()?)
        .with_sound(Arc::new(LoggedSound))
        .with_clock(Clock::default());

    let total = args.mode.question_count();
    session.on_question(move |index, question| render::question(index, total, question));
    session.on_timer_tick(|_, remaining| render::countdown(remaining));
    session.on_mini_game_trigger(|game| {
        println!();
        println!("-- mini-game: {game} (playing...) --");
    });

    session.start(args.mode)?;
    info!(session = %session.id(), mode = %args.mode, "session running");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.tick().await;

    while !session.state().is_completed() {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    println!("input closed; stopping early");
                    return Ok(());
                };
                if session.state().is_awaiting_mini_game() {
                    println!("  mini-game in progress, hold on");
                    continue;
                }
                let step = match parse_command(&line) {
                    Command::Answer(option) => session
                        .submit_answer(Some(option))
                        .and_then(|_| session.advance().map(|_| ())),
                    Command::Back => session.go_back(),
                    Command::Quit => {
                        println!("quitting");
                        return Ok(());
                    }
                    Command::Unknown => {
                        println!("  type an option number, `b` or `q`");
                        Ok(())
                    }
                };
                recoverable(step)?;
            }
            _ = ticker.tick() => {
                session.tick()?;
            }
        }
    }

    let Some(results) = session.results() else {
        return Ok(());
    };
    if args.json {
        let report = serde_json::json!({
            "session": session.id(),
            "mode": args.mode,
            "progress": session.progress(),
            "results": results,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render::results(results);
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
