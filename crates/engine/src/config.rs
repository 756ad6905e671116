use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::ResolveError;

pub const DEFAULT_ID_COLUMN: &str = "user_id";
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_output";

// ---------------------------------------------------------------------------
// Match types
// ---------------------------------------------------------------------------

/// A named linkage criterion and the ordered source fields it draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchType {
    pub name: String,
    pub fields: Vec<String>,
}

impl MatchType {
    pub fn new<S: Into<String>>(name: &str, fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.to_lowercase(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn email() -> Self {
        Self::new("email", ["Email", "Email1", "Email2"])
    }

    pub fn phone() -> Self {
        Self::new("phone", ["Phone", "Phone1", "Phone2"])
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Header of the prepended group-id column.
    #[serde(default = "default_column")]
    pub column: String,
    /// Inserted before the input file's extension to name the output.
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

fn default_column() -> String {
    DEFAULT_ID_COLUMN.into()
}

fn default_suffix() -> String {
    DEFAULT_OUTPUT_SUFFIX.into()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            column: default_column(),
            suffix: default_suffix(),
        }
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawProfile {
    #[serde(default)]
    match_types: Option<BTreeMap<String, RawMatchType>>,
    #[serde(default)]
    output: OutputConfig,
}

#[derive(Debug, Deserialize)]
struct RawMatchType {
    fields: Vec<String>,
}

/// Known match types plus output settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchProfile {
    pub match_types: Vec<MatchType>,
    pub output: OutputConfig,
}

impl Default for MatchProfile {
    fn default() -> Self {
        Self {
            match_types: vec![MatchType::email(), MatchType::phone()],
            output: OutputConfig::default(),
        }
    }
}

/// Match types picked for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection<'a> {
    pub enabled: Vec<&'a MatchType>,
    pub ignored: Vec<String>,
}

impl Selection<'_> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn enabled_names(&self) -> Vec<String> {
        self.enabled.iter().map(|m| m.name.clone()).collect()
    }
}

impl MatchProfile {
    /// Parse a TOML profile. A `[match_types]` table, when present, replaces
    /// the built-in email/phone types entirely.
    pub fn from_toml(input: &str) -> Result<Self, ResolveError> {
        let raw: RawProfile =
            toml::from_str(input).map_err(|e| ResolveError::ConfigParse(e.to_string()))?;

        let match_types = match raw.match_types {
            None => Self::default().match_types,
            Some(table) => {
                let mut types: Vec<MatchType> = Vec::with_capacity(table.len());
                for (name, mt) in table {
                    let candidate = MatchType::new(name.trim(), mt.fields);
                    if types.iter().any(|t| t.name == candidate.name) {
                        return Err(ResolveError::ConfigValidation(format!(
                            "match type '{}' defined more than once",
                            candidate.name
                        )));
                    }
                    types.push(candidate);
                }
                types
            }
        };

        let profile = Self {
            match_types,
            output: raw.output,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), ResolveError> {
        for mt in &self.match_types {
            if mt.name.is_empty() {
                return Err(ResolveError::ConfigValidation(
                    "match type name must not be empty".into(),
                ));
            }
            if mt.fields.is_empty() {
                return Err(ResolveError::ConfigValidation(format!(
                    "match type '{}': at least one field is required",
                    mt.name
                )));
            }
            if mt.fields.iter().any(|f| f.trim().is_empty()) {
                return Err(ResolveError::ConfigValidation(format!(
                    "match type '{}': field names must not be empty",
                    mt.name
                )));
            }
        }

        if self.output.column.trim().is_empty() {
            return Err(ResolveError::ConfigValidation(
                "output.column must not be empty".into(),
            ));
        }
        if self.output.suffix.trim().is_empty() {
            return Err(ResolveError::ConfigValidation(
                "output.suffix must not be empty: the output would replace the input".into(),
            ));
        }

        Ok(())
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&MatchType> {
        let wanted = name.trim().to_lowercase();
        self.match_types.iter().find(|m| m.name == wanted)
    }

    /// Resolve requested names against the profile. Unknown names land in
    /// `ignored`; duplicates are kept once, first occurrence wins.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Selection<'_> {
        let mut selection = Selection::none();
        for name in names {
            let name = name.as_ref();
            match self.get(name) {
                Some(mt) => {
                    if !selection.enabled.iter().any(|m| m.name == mt.name) {
                        selection.enabled.push(mt);
                    }
                }
                None => {
                    let name = name.trim().to_lowercase();
                    if !selection.ignored.contains(&name) {
                        selection.ignored.push(name);
                    }
                }
            }
        }
        selection
    }

    /// Like [`select`](Self::select), but an unknown name is an error.
    pub fn select_strict<S: AsRef<str>>(&self, names: &[S]) -> Result<Selection<'_>, ResolveError> {
        let selection = self.select(names);
        match selection.ignored.first() {
            Some(name) => Err(ResolveError::UnknownMatchType(name.clone())),
            None => Ok(selection),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_has_builtins() {
        let p = MatchProfile::default();
        assert_eq!(p.match_types.len(), 2);
        assert_eq!(p.get("email").unwrap().fields, vec!["Email", "Email1", "Email2"]);
        assert_eq!(p.get("phone").unwrap().fields, vec!["Phone", "Phone1", "Phone2"]);
        assert_eq!(p.output.column, "user_id");
        assert_eq!(p.output.suffix, "_output");
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(MatchProfile::from_toml("").unwrap(), MatchProfile::default());
    }

    #[test]
    fn output_only_keeps_builtin_types() {
        let p = MatchProfile::from_toml(
            r#"
[output]
column = "group"
"#,
        )
        .unwrap();
        assert_eq!(p.output.column, "group");
        assert_eq!(p.output.suffix, "_output");
        assert!(p.get("email").is_some());
    }

    #[test]
    fn match_types_table_replaces_builtins() {
        let p = MatchProfile::from_toml(
            r#"
[match_types.Username]
fields = ["Login", "Handle"]
"#,
        )
        .unwrap();
        assert_eq!(p.match_types.len(), 1);
        assert!(p.get("email").is_none());
        let mt = p.get("USERNAME").unwrap();
        assert_eq!(mt.name, "username");
        assert_eq!(mt.fields, vec!["Login", "Handle"]);
    }

    #[test]
    fn parse_error_reported() {
        let err = MatchProfile::from_toml("match_types = 3").unwrap_err();
        assert!(matches!(err, ResolveError::ConfigParse(_)));
    }

    #[test]
    fn empty_fields_rejected() {
        let err = MatchProfile::from_toml("[match_types.email]\nfields = []\n").unwrap_err();
        assert!(matches!(err, ResolveError::ConfigValidation(_)));
    }

    #[test]
    fn blank_field_name_rejected() {
        let err = MatchProfile::from_toml("[match_types.email]\nfields = [\"Email\", \" \"]\n")
            .unwrap_err();
        assert!(err.to_string().contains("field names must not be empty"));
    }

    #[test]
    fn case_colliding_names_rejected() {
        let err = MatchProfile::from_toml(
            "[match_types.email]\nfields = [\"A\"]\n[match_types.EMAIL]\nfields = [\"B\"]\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn blank_output_column_rejected() {
        let err = MatchProfile::from_toml("[output]\ncolumn = \"\"\n").unwrap_err();
        assert!(matches!(err, ResolveError::ConfigValidation(_)));
    }

    #[test]
    fn blank_output_suffix_rejected() {
        let err = MatchProfile::from_toml("[output]\nsuffix = \"\"\n").unwrap_err();
        assert!(matches!(err, ResolveError::ConfigValidation(ref m) if m.contains("suffix")));
        assert!(MatchProfile::from_toml("[output]\nsuffix = \"  \"\n").is_err());
    }

    #[test]
    fn select_dedups_and_ignores_unknown() {
        let p = MatchProfile::default();
        let sel = p.select(&["Phone", "email", "phone", "fax", "FAX"]);
        assert_eq!(sel.enabled_names(), vec!["phone", "email"]);
        assert_eq!(sel.ignored, vec!["fax"]);
    }

    #[test]
    fn select_nothing() {
        let p = MatchProfile::default();
        let names: [&str; 0] = [];
        let sel = p.select(&names);
        assert!(sel.enabled.is_empty());
        assert!(sel.ignored.is_empty());
    }

    #[test]
    fn select_strict_rejects_unknown() {
        let p = MatchProfile::default();
        assert_eq!(
            p.select_strict(&["email", "fax"]).unwrap_err(),
            ResolveError::UnknownMatchType("fax".into())
        );
        assert_eq!(p.select_strict(&["email"]).unwrap().enabled.len(), 1);
    }
}
