// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::{fs, io::ErrorKind, path::Path};

use tracing::info;

use crate::error::{self, Error};

/// Removes `dir` with everything inside it and recreates it empty.
///
/// A missing directory is not an error; it is simply created.
///
/// # Errors
///
/// Returns [`Error::OutputReset`] when removal or creation fails.
pub fn reset_output_dir(dir: &Path,) -> Result<(), Error,>
{
    info!("Cleaning output directory {}", dir.display());
    match fs::remove_dir_all(dir,) {
        Ok((),) => {}
        Err(source,) if source.kind() == ErrorKind::NotFound => {}
        Err(source,) => return Err(error::output_error(dir, source,),),
    }
    fs::create_dir_all(dir,).map_err(|source| error::output_error(dir, source,),)
}

#[cfg(test)]
mod tests
{
    use std::fs;

    use tempfile::tempdir;

    use super::reset_output_dir;
    use crate::Error;

    #[test]
    fn reset_removes_stale_files_and_directories()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let output = temp.path().join("manifests",);
        fs::create_dir_all(output.join("nested",),).expect("create",);
        fs::write(output.join("stale.yaml",), "kind: ConfigMap",).expect("write",);
        fs::write(output.join(".manifests",), "old\n",).expect("write",);

        reset_output_dir(&output,).expect("reset failed",);

        assert!(output.is_dir());
        assert_eq!(fs::read_dir(&output,).expect("read_dir",).count(), 0);
    }

    #[test]
    fn reset_creates_missing_directory()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let output = temp.path().join("a/b/manifests",);

        reset_output_dir(&output,).expect("reset failed",);
        assert!(output.is_dir());
    }

    #[test]
    fn reset_fails_when_parent_is_a_file()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let blocker = temp.path().join("blocker",);
        fs::write(&blocker, "x",).expect("write",);

        let error = reset_output_dir(&blocker.join("manifests",),).expect_err("expected failure",);
        assert!(matches!(error, Error::OutputReset { .. }));
    }
}
