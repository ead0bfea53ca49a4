//! Run configuration shared by every stage of a generation run.
//!
//! A [`RunConfig`] is assembled once from command-line input and handed to
//! processors by reference. Processors never mutate the base maps; they copy
//! them into a fresh [`MetadataSet`](crate::MetadataSet) per source file.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

/// Namespace embedded in generated manifests when none is supplied.
pub const DEFAULT_NAMESPACE: &str = "monitoring";

/// Immutable settings for a single generation run.
///
/// # Examples
///
/// ```
/// use mcg::RunConfig;
///
/// let config = RunConfig::new("manifests",)
///     .with_namespace("observability",)
///     .with_label("env", "prod",)
///     .with_no_enforce_team("shared",);
///
/// assert_eq!(config.namespace(), "observability");
/// assert_eq!(config.labels().get("env").map(String::as_str), Some("prod"));
/// assert!(config.is_team_label_exempt("shared"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct RunConfig
{
    output_dir:       PathBuf,
    namespace:        String,
    annotations:      BTreeMap<String, String,>,
    labels:           BTreeMap<String, String,>,
    no_enforce_teams: BTreeSet<String,>,
}

impl RunConfig
{
    /// Creates a configuration writing into `output_dir` with the default
    /// namespace and no base metadata.
    pub fn new(output_dir: impl Into<PathBuf,>,) -> Self
    {
        Self {
            output_dir:       output_dir.into(),
            namespace:        DEFAULT_NAMESPACE.to_owned(),
            annotations:      BTreeMap::new(),
            labels:           BTreeMap::new(),
            no_enforce_teams: BTreeSet::new(),
        }
    }

    /// Overrides the namespace embedded in generated manifests.
    pub fn with_namespace(mut self, namespace: impl Into<String,>,) -> Self
    {
        self.namespace = namespace.into();
        self
    }

    /// Adds a base annotation. A repeated key keeps the last value.
    pub fn with_annotation(mut self, key: impl Into<String,>, value: impl Into<String,>,) -> Self
    {
        self.annotations.insert(key.into(), value.into(),);
        self
    }

    /// Adds a base label. A repeated key keeps the last value.
    pub fn with_label(mut self, key: impl Into<String,>, value: impl Into<String,>,) -> Self
    {
        self.labels.insert(key.into(), value.into(),);
        self
    }

    /// Exempts `team` from automatic team-label injection on rules manifests.
    pub fn with_no_enforce_team(mut self, team: impl Into<String,>,) -> Self
    {
        self.no_enforce_teams.insert(team.into(),);
        self
    }

    /// Directory receiving manifests, the index and the kustomization file.
    pub fn output_dir(&self,) -> &Path
    {
        &self.output_dir
    }

    /// Target namespace.
    pub fn namespace(&self,) -> &str
    {
        &self.namespace
    }

    /// Base annotations applied to every manifest.
    pub fn annotations(&self,) -> &BTreeMap<String, String,>
    {
        &self.annotations
    }

    /// Base labels applied to every manifest.
    pub fn labels(&self,) -> &BTreeMap<String, String,>
    {
        &self.labels
    }

    /// Returns `true` when rules owned by `team` must not receive a `team`
    /// label. Matching is case-sensitive.
    pub fn is_team_label_exempt(&self, team: &str,) -> bool
    {
        self.no_enforce_teams.contains(team,)
    }
}

/// Parses a `KEY=VALUE` pair, splitting at the first `=`.
///
/// Used as a `clap` value parser for the repeatable metadata flags.
///
/// # Errors
///
/// Returns a message when the separator is missing or the key is empty.
///
/// # Examples
///
/// ```
/// use mcg::parse_key_value;
///
/// let (key, value,) = parse_key_value("app.kubernetes.io/part-of=monitoring",).unwrap();
/// assert_eq!(key, "app.kubernetes.io/part-of");
/// assert_eq!(value, "monitoring");
/// ```
pub fn parse_key_value(raw: &str,) -> Result<(String, String,), String,>
{
    let (key, value,) =
        raw.split_once('=',).ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"),)?;
    if key.is_empty() {
        return Err(format!("empty key in {raw:?}"),);
    }
    Ok((key.to_owned(), value.to_owned(),),)
}

/// Accepts only paths naming an existing directory.
///
/// # Errors
///
/// Returns a message when the path does not exist or is not a directory.
pub fn parse_existing_dir(raw: &str,) -> Result<PathBuf, String,>
{
    let path = PathBuf::from(raw,);
    if !path.exists() {
        return Err(format!("path '{raw}' does not exist"),);
    }
    if !path.is_dir() {
        return Err(format!("path '{raw}' is not a directory"),);
    }
    Ok(path,)
}

#[cfg(test)]
mod tests
{
    use tempfile::tempdir;

    use super::{DEFAULT_NAMESPACE, RunConfig, parse_existing_dir, parse_key_value};

    #[test]
    fn new_config_uses_default_namespace()
    {
        let config = RunConfig::new("out",);
        assert_eq!(config.namespace(), DEFAULT_NAMESPACE);
        assert!(config.annotations().is_empty());
        assert!(config.labels().is_empty());
    }

    #[test]
    fn repeated_label_keeps_last_value()
    {
        let config = RunConfig::new("out",).with_label("env", "dev",).with_label("env", "prod",);
        assert_eq!(config.labels().get("env",).map(String::as_str,), Some("prod"));
    }

    #[test]
    fn exemption_is_case_sensitive()
    {
        let config = RunConfig::new("out",).with_no_enforce_team("payments",);
        assert!(config.is_team_label_exempt("payments"));
        assert!(!config.is_team_label_exempt("Payments"));
    }

    #[test]
    fn key_value_splits_at_first_separator()
    {
        let (key, value,) = parse_key_value("query=a=b",).expect("valid pair",);
        assert_eq!(key, "query");
        assert_eq!(value, "a=b");
    }

    #[test]
    fn key_value_allows_empty_value()
    {
        let (key, value,) = parse_key_value("flag=",).expect("valid pair",);
        assert_eq!(key, "flag");
        assert!(value.is_empty());
    }

    #[test]
    fn key_value_rejects_missing_separator_and_empty_key()
    {
        assert!(parse_key_value("novalue",).is_err());
        assert!(parse_key_value("=value",).is_err());
    }

    #[test]
    fn existing_dir_parser_rejects_files_and_missing_paths()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let file = temp.path().join("file.txt",);
        std::fs::write(&file, "x",).expect("failed to write file",);

        let dir = temp.path().to_str().expect("utf8",);
        assert_eq!(parse_existing_dir(dir,).expect("existing dir",), temp.path());
        assert!(parse_existing_dir(file.to_str().expect("utf8",),).is_err());
        assert!(parse_existing_dir(&format!("{dir}/missing"),).is_err());
    }
}
