// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use k8s_openapi::{api::core::v1::ConfigMap, apimachinery::pkg::apis::meta::v1::ObjectMeta};
use tracing::debug;

use super::{
    ConversionRequest, ConvertError, DashboardConverter, non_empty, read_source, write_manifest,
};
use crate::metadata::FOLDER_ANNOTATION;

/// Label the Grafana dashboard sidecar uses to discover ConfigMaps.
pub const DASHBOARD_LABEL: &str = "grafana_dashboard";
/// Annotation the Grafana dashboard sidecar uses to pick a target folder.
pub const SIDECAR_FOLDER_ANNOTATION: &str = "k8s-sidecar-target-directory";

/// Wraps a dashboard JSON document into a `v1/ConfigMap`.
///
/// The dashboard text is stored verbatim under `<name>.json`. The source only
/// has to parse as a JSON object; panel contents are not inspected.
#[derive(Debug, Clone, Copy, Default,)]
pub struct ConfigMapConverter;

impl ConfigMapConverter
{
    /// Builds the ConfigMap for `request` from already loaded `contents`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] when `contents` is not a JSON object.
    pub fn build(
        &self,
        request: &ConversionRequest<'_,>,
        contents: String,
        wrap_in_folder: bool,
    ) -> Result<ConfigMap, ConvertError,>
    {
        let document: serde_json::Value = serde_json::from_str(&contents,)?;
        if !document.is_object() {
            return Err(ConvertError::invalid("dashboard must be a JSON object",),);
        }

        let mut labels = request.metadata.labels.clone();
        labels.insert(DASHBOARD_LABEL.to_owned(), "1".to_owned(),);

        let mut annotations = request.metadata.annotations.clone();
        if wrap_in_folder && let Some(folder,) = annotations.get(FOLDER_ANNOTATION,).cloned() {
            annotations.insert(SIDECAR_FOLDER_ANNOTATION.to_owned(), folder,);
        }

        Ok(ConfigMap {
            metadata: ObjectMeta {
                name: Some(request.name.to_owned(),),
                namespace: Some(request.namespace.to_owned(),),
                labels: non_empty(labels,),
                annotations: non_empty(annotations,),
                ..ObjectMeta::default()
            },
            data: Some(BTreeMap::from([(format!("{}.json", request.name), contents,)],),),
            ..ConfigMap::default()
        },)
    }
}

impl DashboardConverter for ConfigMapConverter
{
    fn convert(
        &self,
        request: &ConversionRequest<'_,>,
        wrap_in_folder: bool,
    ) -> Result<(), ConvertError,>
    {
        let contents = read_source(request.source,)?;
        let config_map = self.build(request, contents, wrap_in_folder,)?;
        debug!("Writing dashboard ConfigMap {} to {}", request.name, request.output.display());
        write_manifest(request.output, &config_map,)
    }
}
