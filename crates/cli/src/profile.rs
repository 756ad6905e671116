// Match profile discovery
// Explicit --profile, else ~/.config/userlink/profile.toml, else built-ins

use std::path::{Path, PathBuf};

use userlink_engine::MatchProfile;

use crate::exit_codes::{resolve_exit_code, EXIT_PROFILE};
use crate::CliError;

/// Default per-user profile location.
pub fn default_profile_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("userlink").join("profile.toml"))
}

/// Load the profile to run with. A missing explicit profile is an error; a
/// missing default profile silently falls back to the built-in match types.
pub fn load_profile(explicit: Option<&Path>) -> Result<MatchProfile, CliError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_profile_path() {
            Some(path) if path.is_file() => path,
            _ => {
                log::debug!("no profile found, using built-in match types");
                return Ok(MatchProfile::default());
            }
        },
    };

    let text = std::fs::read_to_string(&path).map_err(|e| CliError {
        code: EXIT_PROFILE,
        message: format!("cannot read profile {}: {e}", path.display()),
        hint: None,
    })?;
    let profile = MatchProfile::from_toml(&text).map_err(|e| CliError {
        code: resolve_exit_code(&e),
        message: format!("{}: {e}", path.display()),
        hint: None,
    })?;

    log::debug!(
        "profile {}: match types [{}]",
        path.display(),
        profile
            .match_types
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(profile)
}
