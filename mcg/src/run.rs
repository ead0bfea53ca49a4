// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! One full regeneration run.

use tracing::{info, warn};

use crate::{
    config::RunConfig,
    convert::Converters,
    dispatch::dispatch,
    error::Error,
    kustomize::write_kustomization,
    output::reset_output_dir,
    processor::{DirectoryProcessor, DirectoryReport},
    walk::SourceKind,
};

/// Directory globs selecting the sources of a run. An empty glob disables
/// its kind.
#[derive(Debug, Clone, Default, PartialEq, Eq,)]
pub struct SourceGlobs
{
    /// Glob of directories holding dashboard JSON files.
    pub dashboards: String,
    /// Glob of directories holding rules YAML files.
    pub rules:      String,
}

/// Totals reported after a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq,)]
pub struct RunSummary
{
    /// Source directories processed across both kinds.
    pub directories: usize,
    /// Dashboard manifests written.
    pub dashboards:  usize,
    /// Rules manifests written.
    pub rules:       usize,
    /// Files skipped for carrying the wrong extension.
    pub skipped:     usize,
    /// Manifests that replaced another source's manifest of the same name.
    pub overwritten: usize,
    /// Resources listed in `kustomization.yaml`.
    pub resources:   usize,
}

/// Regenerates the output directory from scratch.
///
/// The output directory is reset, dashboards then rules are converted, and
/// `kustomization.yaml` is written last. Any error aborts the run and leaves
/// the output directory in whatever state it reached.
///
/// # Errors
///
/// Propagates the first error of any stage.
pub fn run(
    config: &RunConfig,
    globs: &SourceGlobs,
    converters: Converters<'_,>,
) -> Result<RunSummary, Error,>
{
    reset_output_dir(config.output_dir(),)?;

    let processor = DirectoryProcessor::new(config, converters,);
    let mut summary = RunSummary::default();

    for (kind, pattern,) in
        [(SourceKind::Dashboards, &globs.dashboards,), (SourceKind::Rules, &globs.rules,),]
    {
        let mut totals = DirectoryReport::default();
        summary.directories += dispatch(pattern, |dir| {
            let report = processor.process(kind, dir,)?;
            totals.converted += report.converted;
            totals.skipped += report.skipped;
            totals.overwritten += report.overwritten;
            Ok((),)
        },)?;

        match kind {
            SourceKind::Dashboards => summary.dashboards = totals.converted,
            SourceKind::Rules => summary.rules = totals.converted,
        }
        summary.skipped += totals.skipped;
        summary.overwritten += totals.overwritten;
    }

    summary.resources = write_kustomization(config.output_dir(),)?.resources.len();

    info!(
        "Generated {} dashboard and {} rules manifests from {} directories ({} files skipped)",
        summary.dashboards, summary.rules, summary.directories, summary.skipped
    );

    if summary.overwritten > 0 {
        warn!("{} manifests were overwritten by later sources of the same name", summary.overwritten);
    }

    Ok(summary,)
}
