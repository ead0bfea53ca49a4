//! Conversion of team-owned monitoring sources into Kubernetes manifests.
//!
//! The library walks directories of Grafana dashboards and Prometheus rules,
//! infers the owning team from the directory layout, validates the derived
//! manifest names, converts each source into a ConfigMap or PrometheusRule
//! manifest and finally writes a `kustomization.yaml` listing everything that
//! was generated. Runs are sequential and deterministic: identical inputs
//! produce byte-identical index and kustomization files.

mod config;
pub mod convert;
mod dispatch;
mod error;
mod index;
mod kustomize;
mod metadata;
mod naming;
mod output;
mod processor;
mod run;
mod walk;

pub use config::{DEFAULT_NAMESPACE, RunConfig, parse_existing_dir, parse_key_value};
pub use convert::{ConvertError, Converters};
pub use dispatch::dispatch;
pub use error::Error;
pub use index::{INDEX_FILE_NAME, ManifestIndex};
pub use kustomize::{
    KUSTOMIZATION_API_VERSION, KUSTOMIZATION_FILE_NAME, Kustomization, collect_resources,
    write_kustomization,
};
pub use metadata::{FOLDER_ANNOTATION, MetadataSet, TEAM_KEY};
pub use naming::{MAX_NAME_LENGTH, ManifestName, NameRule, Team, validate_manifest_name};
pub use output::reset_output_dir;
pub use processor::{DirectoryProcessor, DirectoryReport, SourceFile};
pub use run::{RunSummary, SourceGlobs, run};
pub use walk::{Discovery, README_FILE_NAME, SourceKind, SourceWalk};
