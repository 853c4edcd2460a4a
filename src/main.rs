use anyhow::{Context, Result};
use clap::Parser;
use rsearch::config::{Cli, Command, Config, SourceKind};
use rsearch::history::{FileHistory, HistoryList, HistorySource, SessionLog};
use rsearch::repl::{start_repl, EMPTY_HISTORY};
use rsearch::terminal::Tty;
use rsearch::util::writeln_ignore_broken_pipe;
use rsearch::{picker, Outcome};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn load(source: &SourceKind) -> Result<HistoryList> {
    let list = match source {
        SourceKind::File(path) => FileHistory::new(path)
            .load()
            .with_context(|| format!("reading history file {}", path.display()))?,
        SourceKind::Session(path) => SessionLog::new(path)
            .load()
            .with_context(|| format!("reading session log {}", path.display()))?,
    };
    Ok(list)
}

fn pick(config: &Config) -> Result<i32> {
    let history = match &config.source {
        Some(source) => load(source)?,
        None => HistoryList::new(),
    };
    if history.is_empty() {
        eprintln!("{}", EMPTY_HISTORY);
        return Ok(1);
    }
    let mut tty = Tty::open().context("opening the terminal")?;
    let outcome = picker::run(&history, &mut tty, &config.query)?;
    drop(tty);
    match outcome {
        Outcome::Accepted(text) => {
            writeln_ignore_broken_pipe(std::io::stdout(), text)?;
            Ok(0)
        }
        Outcome::Cancelled => Ok(1),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();
    colored::control::set_override(config.color);
    debug!(?config, "starting");

    let code = match cli.command {
        Command::Pick(_) => pick(&config)?,
        Command::Repl(_) => start_repl(&config)?,
    };
    std::process::exit(code);
}
