// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Emission of the `kustomization.yaml` resource list.
//!
//! The resource list is taken from the output directory itself rather than
//! from the manifest index, so whatever the converters left behind is what
//! kustomize sees.

use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{self, Error};

/// File name of the generated kustomization.
pub const KUSTOMIZATION_FILE_NAME: &str = "kustomization.yaml";
/// API version written into the kustomization.
pub const KUSTOMIZATION_API_VERSION: &str = "kustomize.config.k8s.io/v1beta1";
const KUSTOMIZATION_KIND: &str = "Kustomization";
const RESOURCE_EXTENSION: &str = "yaml";

/// Subset of the kustomize `Kustomization` document written by the generator.
///
/// # Examples
///
/// ```
/// use mcg::Kustomization;
///
/// let kustomization =
///     Kustomization::with_resources(vec!["a.yaml".to_owned(), "b.yaml".to_owned()],);
/// let rendered = kustomization.render().expect("serializable",);
/// assert!(rendered.starts_with("apiVersion: kustomize.config.k8s.io/v1beta1\n"));
/// assert!(!rendered.contains("bases"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct Kustomization
{
    /// Kustomize API version.
    pub api_version:        String,
    /// Always `Kustomization`.
    pub kind:               String,
    /// Annotations kustomize adds to every resource.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub common_annotations: BTreeMap<String, String,>,
    /// Base kustomizations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bases:              Vec<String,>,
    /// Resource files relative to the kustomization.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources:          Vec<String,>,
}

impl Kustomization
{
    /// Kustomization listing `resources` with no other optional fields.
    pub fn with_resources(resources: Vec<String,>,) -> Self
    {
        Self {
            api_version: KUSTOMIZATION_API_VERSION.to_owned(),
            kind: KUSTOMIZATION_KIND.to_owned(),
            common_annotations: BTreeMap::new(),
            bases: Vec::new(),
            resources,
        }
    }

    /// Serializes the document as YAML with two-space indentation.
    ///
    /// Sequence items are indented under their key (`resources:\n  - a.yaml`),
    /// matching what kustomize itself writes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] when encoding fails.
    pub fn render(&self,) -> Result<String, Error,>
    {
        Ok(indent_sequences(&serde_yaml::to_string(self,)?,),)
    }
}

/// Indents top-level block sequences by two spaces.
///
/// `serde_yaml` emits the items of a sequence at the column of their key.
fn indent_sequences(rendered: &str,) -> String
{
    let mut output = String::with_capacity(rendered.len(),);
    let mut in_sequence = false;

    for line in rendered.lines() {
        if line == "-" || line.starts_with("- ",) {
            in_sequence = true;
        } else if !line.starts_with(' ',) {
            in_sequence = false;
        }
        if in_sequence {
            output.push_str("  ",);
        }
        output.push_str(line,);
        output.push('\n',);
    }

    output
}

/// Lists the `.yaml` entries directly inside `dir`, sorted lexically.
///
/// # Errors
///
/// Returns [`Error::Kustomize`] when the directory cannot be listed.
pub fn collect_resources(dir: &Path,) -> Result<Vec<String,>, Error,>
{
    let entries = fs::read_dir(dir,).map_err(|source| error::kustomize_error(dir, source,),)?;

    let mut resources = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| error::kustomize_error(dir, source,),)?;
        let name = entry.file_name();
        if Path::new(&name,).extension().is_some_and(|extension| extension == RESOURCE_EXTENSION,) {
            resources.push(name.to_string_lossy().into_owned(),);
        }
    }
    resources.sort();

    Ok(resources,)
}

/// Writes `kustomization.yaml` into `dir` listing its current `.yaml` files.
///
/// Returns the document that was written.
///
/// # Errors
///
/// Returns [`Error::Kustomize`] when listing or writing fails and
/// [`Error::Serialize`] when encoding fails.
pub fn write_kustomization(dir: &Path,) -> Result<Kustomization, Error,>
{
    let kustomization = Kustomization::with_resources(collect_resources(dir,)?,);
    let rendered = kustomization.render()?;

    let path = dir.join(KUSTOMIZATION_FILE_NAME,);
    info!("Writing {} with {} resources", path.display(), kustomization.resources.len());
    fs::write(&path, rendered,).map_err(|source| error::kustomize_error(&path, source,),)?;

    Ok(kustomization,)
}
