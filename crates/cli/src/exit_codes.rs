//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! | Code | Meaning                                                   |
//! |------|-----------------------------------------------------------|
//! | 0    | Success                                                   |
//! | 1    | General error (unspecified)                               |
//! | 2    | Usage error (no input path, bad delimiter)                |
//! | 3    | Input file missing, unreadable, empty, or malformed       |
//! | 4    | Output could not be written                               |
//! | 5    | Invalid match profile, or unknown match type (`--strict`) |
//!
//! No output file exists after any non-zero exit.

use userlink_engine::ResolveError;
use userlink_io::IoError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required positional.
pub const EXIT_USAGE: u8 = 2;

/// Input could not be loaded.
pub const EXIT_INPUT: u8 = 3;

/// Output could not be written or renamed into place.
pub const EXIT_OUTPUT: u8 = 4;

/// Profile failed to parse/validate, or `--strict` rejected a match type name.
pub const EXIT_PROFILE: u8 = 5;

/// Map an I/O adapter error to its exit code.
pub fn io_exit_code(err: &IoError) -> u8 {
    match err {
        IoError::Read { .. } | IoError::Parse { .. } | IoError::EmptyInput(_) => EXIT_INPUT,
        IoError::Write { .. } => EXIT_OUTPUT,
    }
}

/// Map an engine/profile error to its exit code.
pub fn resolve_exit_code(err: &ResolveError) -> u8 {
    match err {
        ResolveError::ConfigParse(_)
        | ResolveError::ConfigValidation(_)
        | ResolveError::UnknownMatchType(_) => EXIT_PROFILE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn io_errors_split_input_and_output() {
        let read = IoError::Read { path: PathBuf::from("a.csv"), message: "gone".into() };
        let write = IoError::Write { path: PathBuf::from("b.csv"), message: "full".into() };
        assert_eq!(io_exit_code(&read), EXIT_INPUT);
        assert_eq!(io_exit_code(&IoError::EmptyInput(PathBuf::from("c.csv"))), EXIT_INPUT);
        assert_eq!(io_exit_code(&write), EXIT_OUTPUT);
    }

    #[test]
    fn codes_are_distinct() {
        let codes = [EXIT_SUCCESS, EXIT_ERROR, EXIT_USAGE, EXIT_INPUT, EXIT_OUTPUT, EXIT_PROFILE];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
