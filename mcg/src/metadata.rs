// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Per-team label and annotation composition.

use std::collections::BTreeMap;

use crate::config::RunConfig;

/// Key used for the team annotation and label.
pub const TEAM_KEY: &str = "team";
/// Annotation telling Grafana which folder a dashboard belongs to.
pub const FOLDER_ANNOTATION: &str = "grafana.org/folder";

/// Annotations and labels attached to one generated manifest.
///
/// Each set owns its maps; changing one never affects the [`RunConfig`] it was
/// composed from or any other set.
#[derive(Debug, Clone, Default, PartialEq, Eq,)]
pub struct MetadataSet
{
    /// Object annotations.
    pub annotations: BTreeMap<String, String,>,
    /// Object labels.
    pub labels:      BTreeMap<String, String,>,
}

impl MetadataSet
{
    /// Composes dashboard metadata: `team` and [`FOLDER_ANNOTATION`] on the
    /// annotations, `team` on the labels.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcg::{MetadataSet, RunConfig};
    ///
    /// let metadata = MetadataSet::for_dashboards(&RunConfig::new("out",), "payments",);
    /// assert_eq!(metadata.annotations["grafana.org/folder"], "payments");
    /// assert_eq!(metadata.labels["team"], "payments");
    /// ```
    pub fn for_dashboards(config: &RunConfig, team: &str,) -> Self
    {
        let mut metadata = Self::from_base(config,);
        metadata.annotations.insert(TEAM_KEY.to_owned(), team.to_owned(),);
        metadata.annotations.insert(FOLDER_ANNOTATION.to_owned(), team.to_owned(),);
        metadata.labels.insert(TEAM_KEY.to_owned(), team.to_owned(),);
        metadata
    }

    /// Composes rules metadata. The `team` label is only set when the team is
    /// not exempt from label enforcement; the annotation is always set.
    pub fn for_rules(config: &RunConfig, team: &str,) -> Self
    {
        let mut metadata = Self::from_base(config,);
        metadata.annotations.insert(TEAM_KEY.to_owned(), team.to_owned(),);
        if !config.is_team_label_exempt(team,) {
            metadata.labels.insert(TEAM_KEY.to_owned(), team.to_owned(),);
        }
        metadata
    }

    fn from_base(config: &RunConfig,) -> Self
    {
        Self {
            annotations: config.annotations().clone(),
            labels:      config.labels().clone(),
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::{FOLDER_ANNOTATION, MetadataSet, TEAM_KEY};
    use crate::RunConfig;

    fn base_config() -> RunConfig
    {
        RunConfig::new("out",)
            .with_annotation("owner", "sre",)
            .with_label("env", "prod",)
            .with_no_enforce_team("payments",)
    }

    #[test]
    fn dashboards_receive_team_and_folder()
    {
        let metadata = MetadataSet::for_dashboards(&base_config(), "payments",);

        assert_eq!(metadata.annotations.get(TEAM_KEY,).map(String::as_str,), Some("payments"));
        assert_eq!(
            metadata.annotations.get(FOLDER_ANNOTATION,).map(String::as_str,),
            Some("payments")
        );
        assert_eq!(metadata.annotations.get("owner",).map(String::as_str,), Some("sre"));
        assert_eq!(metadata.labels.get(TEAM_KEY,).map(String::as_str,), Some("payments"));
        assert_eq!(metadata.labels.get("env",).map(String::as_str,), Some("prod"));
    }

    #[test]
    fn exempt_rules_team_gets_annotation_but_no_label()
    {
        let metadata = MetadataSet::for_rules(&base_config(), "payments",);

        assert_eq!(metadata.annotations.get(TEAM_KEY,).map(String::as_str,), Some("payments"));
        assert!(!metadata.labels.contains_key(TEAM_KEY));
        assert!(!metadata.annotations.contains_key(FOLDER_ANNOTATION));
    }

    #[test]
    fn enforced_rules_team_gets_label()
    {
        let metadata = MetadataSet::for_rules(&base_config(), "checkout",);
        assert_eq!(metadata.labels.get(TEAM_KEY,).map(String::as_str,), Some("checkout"));
    }

    #[test]
    fn base_team_label_survives_for_exempt_team()
    {
        let config = base_config().with_label(TEAM_KEY, "platform",);
        let metadata = MetadataSet::for_rules(&config, "payments",);
        assert_eq!(metadata.labels.get(TEAM_KEY,).map(String::as_str,), Some("platform"));
    }

    #[test]
    fn composed_sets_do_not_alias_base_maps()
    {
        let config = base_config();
        let mut first = MetadataSet::for_dashboards(&config, "alpha",);
        first.labels.insert("mutated".to_owned(), "yes".to_owned(),);
        let second = MetadataSet::for_dashboards(&config, "beta",);

        assert!(!config.labels().contains_key("mutated"));
        assert!(!config.labels().contains_key(TEAM_KEY));
        assert!(!second.labels.contains_key("mutated"));
        assert_eq!(second.labels.get(TEAM_KEY,).map(String::as_str,), Some("beta"));
    }
}
