// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Lazy, lexically ordered discovery of source files.
//!
//! [`SourceWalk`] yields every file below a root directory in file-name order,
//! classifying it as a convertible source or a skipped file. Directories are
//! descended into and never yielded.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Error;

/// File name that is skipped without being reported.
pub const README_FILE_NAME: &str = "README.md";

/// Kind of monitoring source handled by a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash,)]
pub enum SourceKind
{
    /// Grafana dashboard JSON files.
    Dashboards,
    /// Prometheus rules YAML files.
    Rules,
}

impl SourceKind
{
    /// Extension (without the dot) of convertible files.
    pub fn extension(self,) -> &'static str
    {
        match self {
            Self::Dashboards => "json",
            Self::Rules => "yaml",
        }
    }

    /// Suffix appended to the manifest name to build the output file name.
    pub fn manifest_suffix(self,) -> &'static str
    {
        match self {
            Self::Dashboards => ".db.configmap.yaml",
            Self::Rules => ".prometheusrules.yaml",
        }
    }

    /// Human readable label used in log lines.
    pub fn label(self,) -> &'static str
    {
        match self {
            Self::Dashboards => "dashboards",
            Self::Rules => "rules",
        }
    }

    /// File name of `path` without the kind's `.<extension>` suffix, or
    /// `None` when the file does not carry it.
    ///
    /// A file named only `.json` carries the suffix and has an empty stem.
    ///
    /// ```
    /// use std::path::Path;
    ///
    /// use mcg::SourceKind;
    ///
    /// assert_eq!(SourceKind::Dashboards.source_stem(Path::new("t/a.b.json")), Some("a.b".to_owned()));
    /// assert_eq!(SourceKind::Dashboards.source_stem(Path::new("t/.json")), Some(String::new()));
    /// assert_eq!(SourceKind::Rules.source_stem(Path::new("t/a.yml")), None);
    /// ```
    pub fn source_stem(self, path: &Path,) -> Option<String,>
    {
        let name = path.file_name()?.to_str()?;
        let stem = name.strip_suffix(self.extension(),)?.strip_suffix('.',)?;
        Some(stem.to_owned(),)
    }

    fn matches(self, path: &Path,) -> bool
    {
        self.source_stem(path,).is_some()
    }
}

/// Classification of a file produced by [`SourceWalk`].
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum Discovery
{
    /// File carrying the kind's extension.
    Source(PathBuf,),
    /// File that will not be converted.
    Skipped
    {
        /// Location of the skipped file.
        path:   PathBuf,
        /// `true` for files that are skipped without a log line.
        silent: bool,
    },
}

/// Iterator over the files below one source directory.
///
/// The walk is restartable by constructing a new instance; each instance is
/// finite and visits entries in the same order on every run.
pub struct SourceWalk
{
    root:  PathBuf,
    kind:  SourceKind,
    inner: walkdir::IntoIter,
}

impl SourceWalk
{
    /// Starts a walk rooted at `root` for files of `kind`.
    pub fn new(root: &Path, kind: SourceKind,) -> Self
    {
        Self {
            root: root.to_path_buf(),
            kind,
            inner: WalkDir::new(root,).sort_by_file_name().into_iter(),
        }
    }

    fn classify(&self, path: PathBuf,) -> Discovery
    {
        if self.kind.matches(&path,) {
            return Discovery::Source(path,);
        }
        let silent = path.file_name().is_some_and(|name| name == README_FILE_NAME,);
        Discovery::Skipped {
            path,
            silent,
        }
    }
}

impl Iterator for SourceWalk
{
    type Item = Result<Discovery, Error,>;

    fn next(&mut self,) -> Option<Self::Item,>
    {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry,) => entry,
                Err(source,) => {
                    let path = source.path().map_or_else(|| self.root.clone(), Path::to_path_buf,);
                    return Some(Err(Error::Walk {
                        path,
                        source,
                    },),);
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            return Some(Ok(self.classify(entry.into_path(),),),);
        }
    }
}
