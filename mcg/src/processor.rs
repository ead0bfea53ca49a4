// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Conversion of one source directory into manifests.
//!
//! The processor consumes a [`SourceWalk`], derives the team, manifest name
//! and metadata of every matching file, hands it to the converter for its
//! kind and records the produced manifest in the [`ManifestIndex`]. The first
//! failure aborts the directory.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{
    config::RunConfig,
    convert::{ConversionRequest, Converters},
    error::Error,
    index::ManifestIndex,
    metadata::MetadataSet,
    naming::{ManifestName, Team},
    walk::{Discovery, SourceKind, SourceWalk},
};

/// Source file resolved to its team and manifest name.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct SourceFile
{
    /// Location of the source file.
    pub path: PathBuf,
    /// Owning team.
    pub team: Team,
    /// Validated manifest name.
    pub name: ManifestName,
}

impl SourceFile
{
    /// Resolves the team and manifest name for `path`, a file of `kind`.
    ///
    /// The stem is the file name with the kind's extension removed, so
    /// `.json` has an empty stem and resolves to the invalid `<team>-`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] when `<team>-<stem>` is not a valid
    /// Kubernetes object name.
    pub fn resolve(path: PathBuf, kind: SourceKind,) -> Result<Self, Error,>
    {
        let team = Team::from_path(&path,);
        let stem = kind.source_stem(&path,).unwrap_or_default();
        let name = ManifestName::derive(&team, &stem,)?;

        Ok(Self {
            path,
            team,
            name,
        },)
    }

    /// Manifest path for this file inside `output_dir`.
    pub fn output_path(&self, output_dir: &Path, kind: SourceKind,) -> PathBuf
    {
        output_dir.join(format!("{}{}", self.name, kind.manifest_suffix()),)
    }
}

/// Outcome of processing one directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq,)]
pub struct DirectoryReport
{
    /// Manifests written.
    pub converted:   usize,
    /// Files that did not carry the kind's extension.
    pub skipped:     usize,
    /// Manifests that replaced one written earlier in the same run.
    pub overwritten: usize,
}

/// Converts source directories of one run.
pub struct DirectoryProcessor<'a,>
{
    config:     &'a RunConfig,
    converters: Converters<'a,>,
    index:      ManifestIndex,
}

impl<'a,> DirectoryProcessor<'a,>
{
    /// Creates a processor writing into the configured output directory.
    pub fn new(config: &'a RunConfig, converters: Converters<'a,>,) -> Self
    {
        Self {
            config,
            converters,
            index: ManifestIndex::in_dir(config.output_dir(),),
        }
    }

    /// Walks `dir` and converts every file of `kind`.
    ///
    /// # Errors
    ///
    /// Returns the first walk, validation, conversion or index error.
    pub fn process(&self, kind: SourceKind, dir: &Path,) -> Result<DirectoryReport, Error,>
    {
        info!("Processing {} directory {}", kind.label(), dir.display());
        let mut report = DirectoryReport::default();

        for discovery in SourceWalk::new(dir, kind,) {
            match discovery? {
                Discovery::Source(path,) => {
                    if self.process_file(kind, path,)? {
                        report.overwritten += 1;
                    }
                    report.converted += 1;
                }
                Discovery::Skipped {
                    path,
                    silent,
                } => {
                    if !silent {
                        info!("{} is not .{}, skipping...", path.display(), kind.extension());
                    }
                    report.skipped += 1;
                }
            }
        }

        Ok(report,)
    }

    /// Converts one file and returns whether its manifest replaced an
    /// existing one.
    fn process_file(&self, kind: SourceKind, path: PathBuf,) -> Result<bool, Error,>
    {
        let source = SourceFile::resolve(path, kind,)?;
        let output = source.output_path(self.config.output_dir(), kind,);
        let overwrites = output.exists();
        if overwrites {
            warn!(
                "{} overwrites {} generated earlier in this run",
                source.path.display(),
                output.display()
            );
        }
        let metadata = match kind {
            SourceKind::Dashboards => MetadataSet::for_dashboards(self.config, source.team.name(),),
            SourceKind::Rules => MetadataSet::for_rules(self.config, source.team.name(),),
        };

        let request = ConversionRequest {
            source:    &source.path,
            output:    &output,
            namespace: self.config.namespace(),
            name:      source.name.as_str(),
            metadata:  &metadata,
        };
        let converted = match kind {
            SourceKind::Dashboards => self.converters.dashboards.convert(&request, true,),
            SourceKind::Rules => self.converters.rules.convert(&request,),
        };
        converted.map_err(|error| Error::Convert {
            path:   source.path.clone(),
            source: error,
        },)?;

        debug!("Converted {} into {}", source.path.display(), output.display());
        self.index.append(&output,)?;
        Ok(overwrites,)
    }
}
