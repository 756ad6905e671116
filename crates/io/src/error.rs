use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum IoError {
    /// Input file missing or unreadable.
    Read { path: PathBuf, message: String },
    /// Malformed delimited data.
    Parse { line: Option<u64>, message: String },
    /// Input has no header row.
    EmptyInput(PathBuf),
    /// Output could not be written or moved into place.
    Write { path: PathBuf, message: String },
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => write!(f, "cannot read {}: {message}", path.display()),
            Self::Parse { line: Some(line), message } => {
                write!(f, "parse error on line {line}: {message}")
            }
            Self::Parse { line: None, message } => write!(f, "parse error: {message}"),
            Self::EmptyInput(path) => write!(f, "{}: no header row", path.display()),
            Self::Write { path, message } => {
                write!(f, "cannot write {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for IoError {}

impl From<::csv::Error> for IoError {
    fn from(e: ::csv::Error) -> Self {
        Self::Parse {
            line: e.position().map(|p| p.line()),
            message: e.to_string(),
        }
    }
}
