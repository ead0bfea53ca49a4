// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Team inference and manifest-name validation.
//!
//! Ownership is derived from the directory layout alone: the directory that
//! directly contains a source file names the owning team. Manifest names are
//! built from that team and the file stem, and must satisfy the Kubernetes
//! object-name rules before anything is written.

use std::{fmt, path::Path, sync::LazyLock};

use regex::Regex;

use crate::error::Error;

/// Maximum length of a Kubernetes object name.
pub const MAX_NAME_LENGTH: usize = 253;

static NAME_PATTERN: LazyLock<Regex,> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9.-]*[a-z0-9]$",).unwrap_or_else(|error| {
        unreachable!("manifest name pattern is a valid regex: {error}")
    },)
},);

/// Team owning a source file together with the prefix used for its manifests.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct Team
{
    name:   String,
    prefix: String,
}

impl Team
{
    /// Infers the team from the immediate parent directory of `path`.
    ///
    /// Paths without a named parent resolve to an empty team, which later
    /// fails name validation because the prefix starts with `-`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    ///
    /// use mcg::Team;
    ///
    /// let team = Team::from_path(Path::new("teams/payments/dash.json",),);
    /// assert_eq!(team.name(), "payments");
    /// assert_eq!(team.prefix(), "payments-");
    /// ```
    pub fn from_path(path: &Path,) -> Self
    {
        let name = path
            .parent()
            .and_then(Path::file_name,)
            .map(|segment| segment.to_string_lossy().into_owned(),)
            .unwrap_or_default();
        let prefix = format!("{name}-");

        Self {
            name,
            prefix,
        }
    }

    /// Team identifier.
    pub fn name(&self,) -> &str
    {
        &self.name
    }

    /// Prefix prepended to every manifest name owned by the team.
    pub fn prefix(&self,) -> &str
    {
        &self.prefix
    }
}

/// Rule broken by a rejected manifest name.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum NameRule
{
    /// The name exceeds [`MAX_NAME_LENGTH`] characters.
    TooLong,
    /// The name contains disallowed characters or bad boundaries.
    Pattern,
}

impl fmt::Display for NameRule
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        match self {
            Self::TooLong => write!(f, "longer than {MAX_NAME_LENGTH} characters"),
            Self::Pattern => f.write_str(
                "should contain only lowercase alphanumeric characters or the special characters \
                 '-' and '.', and begin and end with an alphanumeric character",
            ),
        }
    }
}

/// Checks `candidate` against the Kubernetes object-name rules.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] naming the violated [`NameRule`].
pub fn validate_manifest_name(candidate: &str,) -> Result<(), Error,>
{
    if candidate.len() > MAX_NAME_LENGTH {
        return Err(Error::invalid_name(candidate, NameRule::TooLong,),);
    }
    if !NAME_PATTERN.is_match(candidate,) {
        return Err(Error::invalid_name(candidate, NameRule::Pattern,),);
    }
    Ok((),)
}

/// Manifest name that passed [`validate_manifest_name`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,)]
pub struct ManifestName(String,);

impl ManifestName
{
    /// Builds `<team>-<stem>` and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] when the combined name is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    ///
    /// use mcg::{ManifestName, Team};
    ///
    /// let team = Team::from_path(Path::new("teams/payments/dash.json",),);
    /// let name = ManifestName::derive(&team, "dash",).expect("valid name",);
    /// assert_eq!(name.as_str(), "payments-dash");
    /// ```
    pub fn derive(team: &Team, stem: &str,) -> Result<Self, Error,>
    {
        Self::parse(format!("{}{stem}", team.prefix()),)
    }

    /// Validates an already assembled name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] when the name is rejected.
    pub fn parse(candidate: String,) -> Result<Self, Error,>
    {
        validate_manifest_name(&candidate,)?;
        Ok(Self(candidate,),)
    }

    /// Borrowed view of the name.
    pub fn as_str(&self,) -> &str
    {
        &self.0
    }
}

impl fmt::Display for ManifestName
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str(&self.0,)
    }
}

impl AsRef<str,> for ManifestName
{
    fn as_ref(&self,) -> &str
    {
        &self.0
    }
}

#[cfg(test)]
mod tests
{
    use std::path::Path;

    use proptest::prelude::*;

    use super::{MAX_NAME_LENGTH, ManifestName, NameRule, Team, validate_manifest_name};
    use crate::Error;

    fn rule_of(candidate: &str,) -> Option<NameRule,>
    {
        match validate_manifest_name(candidate,) {
            Ok((),) => None,
            Err(Error::InvalidName {
                rule, ..
            },) => Some(rule,),
            Err(other,) => panic!("unexpected error variant: {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn well_formed_names_pass(candidate in "[a-z0-9][a-z0-9.-]{0,200}[a-z0-9]") {
            prop_assert!(validate_manifest_name(&candidate).is_ok());
        }

        #[test]
        fn uppercase_names_fail(prefix in "[a-z0-9]{1,8}", upper in "[A-Z]{1,4}", suffix in "[a-z0-9]{1,8}") {
            let candidate = format!("{prefix}{upper}{suffix}");
            prop_assert_eq!(rule_of(&candidate), Some(NameRule::Pattern));
        }
    }

    #[test]
    fn team_is_immediate_parent_directory()
    {
        let team = Team::from_path(Path::new("/repo/teams/payments/alerts.yaml",),);
        assert_eq!(team.name(), "payments");
        assert_eq!(team.prefix(), "payments-");
    }

    #[test]
    fn team_uses_nested_directory_not_glob_root()
    {
        let team = Team::from_path(Path::new("teams/payments/nested/dash.json",),);
        assert_eq!(team.name(), "nested");
    }

    #[test]
    fn path_without_parent_resolves_to_empty_team()
    {
        let team = Team::from_path(Path::new("dash.json",),);
        assert_eq!(team.name(), "");
        assert_eq!(team.prefix(), "-");
        assert!(ManifestName::derive(&team, "dash",).is_err());
    }

    #[test]
    fn name_at_length_limit_passes()
    {
        let candidate = "a".repeat(MAX_NAME_LENGTH,);
        assert_eq!(rule_of(&candidate,), None);
    }

    #[test]
    fn name_over_length_limit_fails()
    {
        let candidate = "a".repeat(MAX_NAME_LENGTH + 1,);
        assert_eq!(rule_of(&candidate,), Some(NameRule::TooLong));
    }

    #[test]
    fn pattern_rejects_bad_boundaries_and_case()
    {
        assert_eq!(rule_of("team-foo",), None);
        assert_eq!(rule_of("team.foo-v2",), None);
        assert_eq!(rule_of("Team-Foo",), Some(NameRule::Pattern));
        assert_eq!(rule_of("-team-foo",), Some(NameRule::Pattern));
        assert_eq!(rule_of("team-foo-",), Some(NameRule::Pattern));
        assert_eq!(rule_of(".team-foo",), Some(NameRule::Pattern));
        assert_eq!(rule_of("team-foo.",), Some(NameRule::Pattern));
        assert_eq!(rule_of("team_foo",), Some(NameRule::Pattern));
        assert_eq!(rule_of("",), Some(NameRule::Pattern));
    }

    #[test]
    fn single_character_names_are_rejected()
    {
        assert_eq!(rule_of("a",), Some(NameRule::Pattern));
    }

    #[test]
    fn derive_prefixes_stem_with_team()
    {
        let team = Team::from_path(Path::new("teams/payments/dash.json",),);
        let name = ManifestName::derive(&team, "dash",).expect("valid name",);
        assert_eq!(name.as_str(), "payments-dash");
        assert_eq!(name.to_string(), "payments-dash");
    }

    #[test]
    fn derive_rejects_uppercase_stem()
    {
        let team = Team::from_path(Path::new("teams/payments/Dash.json",),);
        let error = ManifestName::derive(&team, "Dash",).expect_err("expected rejection",);
        assert!(error.to_string().contains("payments-Dash"));
    }
}
