// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Append-only index of generated manifest paths.
//!
//! Downstream hooks read `.manifests` to learn which files a run produced,
//! so every successful conversion must land in it, in discovery order.

use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use crate::error::{self, Error};

/// File name of the index inside the output directory.
pub const INDEX_FILE_NAME: &str = ".manifests";

/// Handle to the `.manifests` file of an output directory.
///
/// The handle only stores the location; every [`append`](Self::append) opens,
/// writes and closes the file.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct ManifestIndex
{
    path: PathBuf,
}

impl ManifestIndex
{
    /// Index stored in `output_dir`.
    pub fn in_dir(output_dir: &Path,) -> Self
    {
        Self {
            path: output_dir.join(INDEX_FILE_NAME,),
        }
    }

    /// Location of the index file.
    pub fn path(&self,) -> &Path
    {
        &self.path
    }

    /// Appends `entry` followed by a newline, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Index`] when the file cannot be opened or written.
    pub fn append(&self, entry: &Path,) -> Result<(), Error,>
    {
        let mut file = OpenOptions::new()
            .create(true,)
            .append(true,)
            .open(&self.path,)
            .map_err(|source| error::index_error(&self.path, source,),)?;
        writeln!(file, "{}", entry.display()).map_err(|source| error::index_error(&self.path, source,),)
    }
}
