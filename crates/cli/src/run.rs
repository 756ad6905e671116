//! `userlink [MATCH_TYPE...] <INPUT>` — resolve one file into labeled output.

use std::path::{Path, PathBuf};

use userlink_engine::{resolve, MatchProfile, Resolution, Selection};
use userlink_io::csv::{load, LoadedTable};
use userlink_io::output::{derive_output_path, write_labeled};

use crate::exit_codes::{io_exit_code, resolve_exit_code, EXIT_ERROR};
use crate::profile::load_profile;
use crate::CliError;

pub struct RunOptions {
    pub args: Vec<String>,
    pub output: Option<PathBuf>,
    pub delimiter: Option<char>,
    pub profile: Option<PathBuf>,
    pub strict: bool,
    pub json: bool,
}

/// Split positionals into (match type names, input path). The input path is
/// always the last argument.
fn split_args(args: &[String]) -> Result<(&[String], &Path), CliError> {
    match args.split_last() {
        Some((input, names)) => Ok((names, Path::new(input))),
        None => Err(CliError::args("no input file given")
            .with_hint("usage: userlink [email] [phone] <input.csv>")),
    }
}

fn parse_delimiter(delimiter: Option<char>) -> Result<Option<u8>, CliError> {
    match delimiter {
        None => Ok(None),
        Some(c) if c.is_ascii() && !matches!(c, '"' | '\n' | '\r') => Ok(Some(c as u8)),
        Some(c) => Err(CliError::args(format!(
            "invalid delimiter {c:?}: must be a single ASCII character other than a quote or newline"
        ))),
    }
}

fn select<'p>(profile: &'p MatchProfile, names: &[String], strict: bool) -> Result<Selection<'p>, CliError> {
    let selection = if strict {
        profile.select_strict(names).map_err(|e| CliError {
            code: resolve_exit_code(&e),
            message: e.to_string(),
            hint: Some(format!("known match types: {}", known_names(profile))),
        })?
    } else {
        profile.select(names)
    };

    for name in &selection.ignored {
        log::warn!(
            "ignoring unknown match type '{name}' (known: {})",
            known_names(profile)
        );
    }
    if selection.enabled.is_empty() {
        log::warn!("no match types enabled; every row gets its own user_id");
    }
    Ok(selection)
}

/// Refuse an output path that names the input file, directly or through
/// a different spelling of the same existing file.
fn ensure_not_input(input: &Path, output: &Path) -> Result<(), CliError> {
    let same = input == output
        || matches!(
            (std::fs::canonicalize(input), std::fs::canonicalize(output)),
            (Ok(a), Ok(b)) if a == b
        );
    if same {
        return Err(CliError::args(format!(
            "output {} would overwrite the input file",
            output.display()
        ))
        .with_hint("pass a different path with --output"));
    }
    Ok(())
}

fn known_names(profile: &MatchProfile) -> String {
    profile
        .match_types
        .iter()
        .map(|m| m.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn cmd_run(opts: RunOptions) -> Result<(), CliError> {
    // Everything that can be rejected up front is checked before the input
    // is read.
    let (names, input) = split_args(&opts.args)?;
    let delimiter = parse_delimiter(opts.delimiter)?;
    let profile = load_profile(opts.profile.as_deref())?;
    let selection = select(&profile, names, opts.strict)?;

    let output = opts
        .output
        .clone()
        .unwrap_or_else(|| derive_output_path(input, &profile.output.suffix));
    ensure_not_input(input, &output)?;

    let LoadedTable { dataset, delimiter, .. } = load(input, delimiter)
        .map_err(|e| CliError { code: io_exit_code(&e), message: e.to_string(), hint: None })?;

    let resolution = resolve(&dataset, &selection);

    write_labeled(&output, &dataset, &resolution.user_ids, &profile.output.column, delimiter)
        .map_err(|e| CliError { code: io_exit_code(&e), message: e.to_string(), hint: None })?;

    report(&resolution, input, &output);

    if opts.json {
        let payload = serde_json::json!({
            "input": input.display().to_string(),
            "output": output.display().to_string(),
            "summary": resolution.summary,
        });
        let text = serde_json::to_string_pretty(&payload).map_err(|e| CliError {
            code: EXIT_ERROR,
            message: format!("JSON serialization error: {e}"),
            hint: None,
        })?;
        println!("{text}");
    }

    Ok(())
}

/// Human summary on stderr, through the logger so `--quiet` silences it.
fn report(resolution: &Resolution, input: &Path, output: &Path) {
    let s = &resolution.summary;
    log::info!(
        "{}: {} rows -> {} groups ({} linked rows, {} singletons, largest {})",
        input.display(),
        s.rows,
        s.groups,
        s.linked_rows,
        s.singletons,
        s.largest_group,
    );
    for mt in &s.match_types {
        log::info!(
            "  {}: {} shared values, {} merges",
            mt.name,
            mt.shared_keys,
            mt.unions
        );
    }
    log::info!("wrote {}", output.display());
}
