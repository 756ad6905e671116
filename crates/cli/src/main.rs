// userlink CLI - link user records that share an email or phone

mod exit_codes;
mod profile;
mod run;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use exit_codes::{EXIT_SUCCESS, EXIT_USAGE};
use run::{cmd_run, RunOptions};

#[derive(Parser)]
#[command(name = "userlink")]
#[command(about = "Group user records that share a normalized email or phone and label each group with a user_id")]
#[command(version)]
#[command(after_help = "\
Match types are given first, the input file last. Names are case-insensitive;
omitting a name disables that match type. With no match types every row is its
own group.

Examples:
  userlink email phone users.csv
  userlink email users.csv -o deduped.csv
  userlink phone users.tsv --delimiter $'\\t'
  userlink email phone users.csv --json | jq .summary.groups
  userlink username email users.csv --profile profile.toml --strict")]
struct Cli {
    /// Match types to enable (e.g. email, phone) followed by the input file
    #[arg(value_name = "MATCH_TYPE... INPUT")]
    args: Vec<String>,

    /// Output file (default: input name with "_output" before the extension)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Field delimiter (default: detected from the first lines)
    #[arg(long, short = 'd')]
    delimiter: Option<char>,

    /// Match profile TOML (default: ~/.config/userlink/profile.toml if present)
    #[arg(long, short = 'p', env = "USERLINK_PROFILE")]
    profile: Option<PathBuf>,

    /// Fail on unknown match type names instead of ignoring them
    #[arg(long)]
    strict: bool,

    /// Print the resolution summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Only print warnings and errors
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    quiet: bool,

    /// Print debug diagnostics
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Stderr logger. `RUST_LOG` overrides the level picked by --quiet/--verbose.
fn init_logging(quiet: bool, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            log::Level::Warn => writeln!(buf, "warning: {}", record.args()),
            log::Level::Error => writeln!(buf, "error: {}", record.args()),
            level => writeln!(buf, "[{} {}] {}", level, record.target(), record.args()),
        })
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let result = cmd_run(RunOptions {
        args: cli.args,
        output: cli.output,
        delimiter: cli.delimiter,
        profile: cli.profile,
        strict: cli.strict,
        json: cli.json,
    });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}
