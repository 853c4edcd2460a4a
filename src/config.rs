// config.rs

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rsearch", version, about = "Readline-style reverse-i-search over shell and prompt history")]
pub struct Cli {
    /// Disable colored output (NO_COLOR is honored too)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log at debug level (RSEARCH_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search once and print the accepted entry to stdout
    Pick(PickArgs),
    /// Interactive prompt with Ctrl+R bound to reverse search
    Repl(HistArgs),
}

#[derive(Args, Debug)]
pub struct HistArgs {
    /// Plain history file, one entry per line
    #[arg(long, env = "HISTFILE")]
    pub histfile: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PickArgs {
    #[command(flatten)]
    pub hist: HistArgs,

    /// JSON-lines agent session log; takes precedence over the history file
    #[arg(long)]
    pub session: Option<PathBuf>,

    /// Initial query
    #[arg(long, short, default_value = "")]
    pub query: String,
}

/// Where a search takes its entries from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    File(PathBuf),
    Session(PathBuf),
}

/// Settings resolved once from the command line and environment.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub histfile: Option<PathBuf>,
    pub source: Option<SourceKind>,
    pub query: String,
    pub color: bool,
    pub log_filter: String,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        let color = !cli.no_color && std::env::var_os("NO_COLOR").is_none();
        let log_filter = std::env::var("RSEARCH_LOG")
            .unwrap_or_else(|_| if cli.verbose { "debug" } else { "warn" }.to_string());
        let mut config = Config {
            color,
            log_filter,
            ..Config::default()
        };
        match &cli.command {
            Command::Pick(args) => {
                config.histfile = args.hist.histfile.clone();
                config.source = match (&args.session, &args.hist.histfile) {
                    (Some(log), _) => Some(SourceKind::Session(log.clone())),
                    (None, Some(file)) => Some(SourceKind::File(file.clone())),
                    (None, None) => None,
                };
                config.query = args.query.clone();
            }
            Command::Repl(args) => {
                config.histfile = args.histfile.clone();
            }
        }
        config
    }
}
