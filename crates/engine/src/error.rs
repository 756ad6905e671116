use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Profile validation error (empty field list, blank name, etc.).
    ConfigValidation(String),
    /// A requested match type is not defined by the profile.
    UnknownMatchType(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "profile parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "profile validation error: {msg}"),
            Self::UnknownMatchType(name) => write!(f, "unknown match type: '{name}'"),
        }
    }
}

impl std::error::Error for ResolveError {}
