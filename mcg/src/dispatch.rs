// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Expansion of directory globs into processor invocations.

use std::path::Path;

use tracing::debug;

use crate::error::Error;

/// Expands `pattern` and calls `processor` for each matched directory in the
/// order the glob yields them.
///
/// An empty pattern disables the source kind and returns `Ok(0)`. Matches that
/// are not directories are ignored. Returns the number of directories
/// processed.
///
/// # Errors
///
/// Returns [`Error::Glob`] for an invalid pattern, [`Error::GlobEntry`] for an
/// unreadable match, and the first error returned by `processor`, after which
/// no further directories are visited.
pub fn dispatch<F,>(pattern: &str, mut processor: F,) -> Result<usize, Error,>
where
    F: FnMut(&Path,) -> Result<(), Error,>,
{
    if pattern.is_empty() {
        return Ok(0,);
    }

    let matches = glob::glob(pattern,).map_err(|source| Error::Glob {
        pattern: pattern.to_owned(),
        source,
    },)?;

    let mut processed = 0;
    for entry in matches {
        let dir = entry.map_err(|source| Error::GlobEntry {
            source,
        },)?;
        if !dir.is_dir() {
            debug!("{} matched {pattern:?} but is not a directory, ignoring", dir.display());
            continue;
        }
        processor(&dir,)?;
        processed += 1;
    }

    Ok(processed,)
}

#[cfg(test)]
mod tests
{
    use std::{fs, path::PathBuf};

    use tempfile::tempdir;

    use super::dispatch;
    use crate::{Error, naming::NameRule};

    #[test]
    fn empty_pattern_skips_processing()
    {
        let processed = dispatch("", |_| panic!("processor must not run"),).expect("dispatch",);
        assert_eq!(processed, 0);
    }

    #[test]
    fn invalid_pattern_is_reported()
    {
        let error = dispatch("teams/[", |_| Ok((),),).expect_err("expected glob error",);
        assert!(matches!(error, Error::Glob { .. }));
    }

    #[test]
    fn directories_are_processed_in_glob_order()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        for team in ["zeta", "alpha", "mid",] {
            fs::create_dir_all(temp.path().join("teams",).join(team,),).expect("create",);
        }
        fs::write(temp.path().join("teams/file.json",), "{}",).expect("write",);

        let pattern = format!("{}/teams/*", temp.path().display());
        let mut visited: Vec<PathBuf,> = Vec::new();
        let processed = dispatch(&pattern, |dir| {
            visited.push(dir.to_path_buf(),);
            Ok((),)
        },)
        .expect("dispatch",);

        assert_eq!(processed, 3);
        let names: Vec<_,> = visited
            .iter()
            .map(|dir| dir.file_name().expect("name",).to_string_lossy().into_owned(),)
            .collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn first_processor_error_stops_dispatch()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        for team in ["a", "b", "c",] {
            fs::create_dir_all(temp.path().join(team,),).expect("create",);
        }

        let pattern = format!("{}/*", temp.path().display());
        let mut calls = 0;
        let error = dispatch(&pattern, |_| {
            calls += 1;
            Err(Error::invalid_name("-", NameRule::Pattern,),)
        },)
        .expect_err("expected processor error",);

        assert!(matches!(error, Error::InvalidName { .. }));
        assert_eq!(calls, 1);
    }
}
