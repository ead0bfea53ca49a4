// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, HashSet};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    ConversionRequest, ConvertError, RulesConverter, non_empty, read_source, write_manifest,
};

const API_VERSION: &str = "monitoring.coreos.com/v1";
const KIND: &str = "PrometheusRule";

/// Prometheus rules file as loaded from disk.
///
/// Unknown keys are rejected at every level, as the Prometheus rule loader
/// does, so a misspelled field fails the conversion instead of vanishing from
/// the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize,)]
#[serde(deny_unknown_fields)]
pub struct RulesFile
{
    /// Rule groups declared in the file.
    #[serde(default)]
    pub groups: Vec<RuleGroup,>,
}

/// Named group of rules evaluated together.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize,)]
#[serde(deny_unknown_fields)]
pub struct RuleGroup
{
    /// Group name, unique within the file.
    pub name:         String,
    /// Optional evaluation interval override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval:     Option<String,>,
    /// Optional offset applied to the evaluation timestamp of every query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_offset: Option<String,>,
    /// Optional limit on alerts or series produced by the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit:        Option<u32,>,
    /// Labels added to every rule of the group.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels:       BTreeMap<String, String,>,
    /// Rules in evaluation order.
    #[serde(default)]
    pub rules:        Vec<Rule,>,
}

/// Single alerting or recording rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize,)]
#[serde(deny_unknown_fields)]
pub struct Rule
{
    /// Alert name for alerting rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert:           Option<String,>,
    /// Series name for recording rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record:          Option<String,>,
    /// PromQL expression.
    pub expr:            String,
    /// Pending duration for alerting rules.
    #[serde(default, rename = "for", skip_serializing_if = "Option::is_none")]
    pub for_duration:    Option<String,>,
    /// Duration an alert keeps firing after its condition clears.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_firing_for: Option<String,>,
    /// Labels attached to produced alerts or series.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels:          BTreeMap<String, String,>,
    /// Annotations attached to produced alerts.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations:     BTreeMap<String, String,>,
}

impl RulesFile
{
    /// Checks the structural requirements of a rules file.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Invalid`] when a group name is empty or
    /// duplicated, or a rule lacks an expression or does not declare exactly
    /// one of `alert` and `record`. A file without groups is valid.
    pub fn validate(&self,) -> Result<(), ConvertError,>
    {
        let mut seen = HashSet::with_capacity(self.groups.len(),);
        for group in &self.groups {
            if group.name.trim().is_empty() {
                return Err(ConvertError::invalid("rule group name must not be empty",),);
            }
            if !seen.insert(group.name.as_str(),) {
                return Err(ConvertError::invalid(format!(
                    "rule group '{}' is declared more than once",
                    group.name
                ),),);
            }
            for (position, rule,) in group.rules.iter().enumerate() {
                rule.validate(&group.name, position,)?;
            }
        }

        Ok((),)
    }

    /// Parses a rules file. Documents holding only whitespace or comments
    /// yield an empty file, as they do for Prometheus.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Yaml`] for malformed YAML or unknown keys.
    pub fn parse(contents: &str,) -> Result<Self, ConvertError,>
    {
        let blank = contents
            .lines()
            .map(str::trim,)
            .all(|line| line.is_empty() || line.starts_with('#',),);
        if blank {
            return Ok(Self::default(),);
        }
        Ok(serde_yaml::from_str(contents,)?,)
    }

    /// Sets every entry of `labels` on every rule, replacing existing values.
    pub fn enforce_labels(&mut self, labels: &BTreeMap<String, String,>,)
    {
        for rule in self.groups.iter_mut().flat_map(|group| group.rules.iter_mut(),) {
            for (key, value,) in labels {
                rule.labels.insert(key.clone(), value.clone(),);
            }
        }
    }
}

impl Rule
{
    fn validate(&self, group: &str, position: usize,) -> Result<(), ConvertError,>
    {
        match (&self.alert, &self.record,) {
            (Some(_,), Some(_,),) => {
                return Err(ConvertError::invalid(format!(
                    "rule #{position} in group '{group}' sets both alert and record"
                ),),);
            }
            (None, None,) => {
                return Err(ConvertError::invalid(format!(
                    "rule #{position} in group '{group}' sets neither alert nor record"
                ),),);
            }
            _ => {}
        }
        if self.expr.trim().is_empty() {
            return Err(ConvertError::invalid(format!(
                "rule #{position} in group '{group}' has an empty expr"
            ),),);
        }
        Ok((),)
    }
}

#[derive(Debug, Serialize,)]
#[serde(rename_all = "camelCase")]
struct PrometheusRule
{
    api_version: &'static str,
    kind:        &'static str,
    metadata:    ObjectMeta,
    spec:        RulesFile,
}

/// Wraps a Prometheus rules file into a `monitoring.coreos.com/v1`
/// `PrometheusRule` resource.
///
/// Metadata labels are set on the resource and enforced on every rule, so a
/// team label reaches the alerts the rules produce.
#[derive(Debug, Clone, Copy, Default,)]
pub struct PrometheusRuleConverter;

impl RulesConverter for PrometheusRuleConverter
{
    fn convert(&self, request: &ConversionRequest<'_,>,) -> Result<(), ConvertError,>
    {
        let contents = read_source(request.source,)?;
        let mut rules = RulesFile::parse(&contents,)?;
        rules.validate()?;
        rules.enforce_labels(&request.metadata.labels,);

        let manifest = PrometheusRule {
            api_version: API_VERSION,
            kind:        KIND,
            metadata:    ObjectMeta {
                name: Some(request.name.to_owned(),),
                namespace: Some(request.namespace.to_owned(),),
                labels: non_empty(request.metadata.labels.clone(),),
                annotations: non_empty(request.metadata.annotations.clone(),),
                ..ObjectMeta::default()
            },
            spec:        rules,
        };

        debug!("Writing PrometheusRule {} to {}", request.name, request.output.display());
        write_manifest(request.output, &manifest,)
    }
}
