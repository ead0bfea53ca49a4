#![allow(non_shorthand_field_patterns)]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Conversion of monitoring sources into Kubernetes manifests.
//!
//! The pipeline only knows the [`DashboardConverter`] and [`RulesConverter`]
//! seams. The built-in [`ConfigMapConverter`] and [`PrometheusRuleConverter`]
//! implement them; tests and embedders may supply their own.

mod dashboard;
mod rules;

use std::{
    fs,
    path::{Path, PathBuf},
};

pub use dashboard::{ConfigMapConverter, DASHBOARD_LABEL, SIDECAR_FOLDER_ANNOTATION};
pub use rules::{PrometheusRuleConverter, Rule, RuleGroup, RulesFile};
use serde::Serialize;

use crate::metadata::MetadataSet;

/// Error reported by a converter for a single source file.
#[derive(Debug, masterror::Error)]
pub enum ConvertError {
    /// The source file could not be read.
    #[error("failed to read {path:?}: {source}")]
    Read {
        /// Source file location.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// The source is not valid JSON.
    #[error("invalid JSON: {source}")]
    Json {
        /// Decoding error reported by serde_json.
        source: serde_json::Error
    },
    /// The source is not valid YAML or the manifest could not be encoded.
    #[error("invalid YAML: {source}")]
    Yaml {
        /// Error reported by serde_yaml.
        source: serde_yaml::Error
    },
    /// The generated manifest could not be written.
    #[error("failed to write {path:?}: {source}")]
    Write {
        /// Output manifest location.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// The source parsed but does not describe a usable document.
    #[error("{message}")]
    Invalid {
        /// Human readable description of the problem.
        message: String
    }
}

impl ConvertError {
    /// Constructs an [`ConvertError::Invalid`] from the provided message.
    pub fn invalid<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Invalid {
            message: message.into()
        }
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json {
            source
        }
    }
}

impl From<serde_yaml::Error> for ConvertError {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Yaml {
            source
        }
    }
}

/// Inputs shared by both converter contracts.
#[derive(Debug, Clone, Copy)]
pub struct ConversionRequest<'a> {
    /// Source file to convert.
    pub source:    &'a Path,
    /// Manifest file to create.
    pub output:    &'a Path,
    /// Namespace embedded in the manifest.
    pub namespace: &'a str,
    /// Validated manifest name.
    pub name:      &'a str,
    /// Labels and annotations for the manifest.
    pub metadata:  &'a MetadataSet
}

/// Converts a Grafana dashboard into a manifest file.
pub trait DashboardConverter {
    /// Writes the manifest for `request`. `wrap_in_folder` asks the converter
    /// to place the dashboard in the folder named by the metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] when the source is unreadable or invalid, or
    /// when the manifest cannot be written.
    fn convert(
        &self,
        request: &ConversionRequest<'_>,
        wrap_in_folder: bool
    ) -> Result<(), ConvertError>;
}

/// Converts a Prometheus rules file into a manifest file.
pub trait RulesConverter {
    /// Writes the manifest for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] when the source is unreadable or invalid, or
    /// when the manifest cannot be written.
    fn convert(&self, request: &ConversionRequest<'_>) -> Result<(), ConvertError>;
}

/// Converter pair used by a run.
#[derive(Clone, Copy)]
pub struct Converters<'a> {
    /// Converter for dashboard sources.
    pub dashboards: &'a dyn DashboardConverter,
    /// Converter for rules sources.
    pub rules:      &'a dyn RulesConverter
}

impl Default for Converters<'static> {
    fn default() -> Self {
        Self {
            dashboards: &ConfigMapConverter,
            rules:      &PrometheusRuleConverter
        }
    }
}

fn read_source(path: &Path) -> Result<String, ConvertError> {
    fs::read_to_string(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source
    })
}

fn write_manifest<T>(path: &Path, manifest: &T) -> Result<(), ConvertError>
where
    T: Serialize
{
    let rendered = serde_yaml::to_string(manifest)?;
    fs::write(path, rendered).map_err(|source| ConvertError::Write {
        path: path.to_path_buf(),
        source
    })
}

fn non_empty<K, V>(
    map: std::collections::BTreeMap<K, V>
) -> Option<std::collections::BTreeMap<K, V>> {
    if map.is_empty() { None } else { Some(map) }
}
