#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the manifest generator crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.
//!
//! Every variant is fatal for the run that produced it. The binary reports the
//! error once and exits with a non-zero status; library code never terminates
//! the process.

use std::path::{Path, PathBuf};

use crate::{convert::ConvertError, naming::NameRule};

/// Unified error type returned by every stage of a generation run.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// The configured directory glob could not be compiled.
    #[error("invalid directory glob {pattern:?}: {source}")]
    Glob {
        /// Pattern supplied on the command line.
        pattern: String,
        /// Compilation error reported by the glob matcher.
        source:  glob::PatternError
    },
    /// A path matched by a glob could not be inspected.
    #[error("failed to expand directory glob: {source}")]
    GlobEntry {
        /// Underlying error carrying the unreadable path.
        source: glob::GlobError
    },
    /// A source directory could not be traversed.
    #[error("failed to walk {path:?}: {source}")]
    Walk {
        /// Directory or entry that failed to be read.
        path:   PathBuf,
        /// Underlying traversal error.
        source: walkdir::Error
    },
    /// The output directory could not be removed or recreated.
    #[error("failed to clean output directory {path:?}: {source}")]
    OutputReset {
        /// Configured output directory.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// A derived manifest name violates Kubernetes object-name rules.
    #[error("invalid manifest name {name:?}: {rule}")]
    InvalidName {
        /// Offending manifest name.
        name: String,
        /// Rule that the name breaks.
        rule: NameRule
    },
    /// A converter rejected a source file.
    #[error("{path:?} is not valid: {source}")]
    Convert {
        /// Source file handed to the converter.
        path:   PathBuf,
        /// Error reported by the converter.
        source: ConvertError
    },
    /// An entry could not be appended to the manifest index.
    #[error("failed to append to manifest index {path:?}: {source}")]
    Index {
        /// Location of the index file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// The kustomization file could not be produced.
    #[error("failed to write kustomization at {path:?}: {source}")]
    Kustomize {
        /// Directory listed or file written when the failure occurred.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML encoding errors for generated documents.
    #[error("failed to serialize manifest: {source}")]
    Serialize {
        /// Underlying serialization error.
        source: serde_yaml::Error
    }
}

impl Error {
    /// Constructs a name validation error for the provided name and rule.
    ///
    /// # Parameters
    ///
    /// * `name` - Manifest name that failed validation.
    /// * `rule` - Rule the name violates.
    pub fn invalid_name<N>(name: N, rule: NameRule) -> Self
    where
        N: Into<String>
    {
        Self::InvalidName {
            name: name.into(),
            rule
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

/// Creates an [`Error::OutputReset`] variant capturing the output directory.
///
/// # Parameters
///
/// * `path` - Output directory that could not be reset.
/// * `source` - I/O error reported by the operating system.
pub fn output_error(path: &Path, source: std::io::Error) -> Error {
    Error::OutputReset {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::Index`] variant capturing the index file location.
///
/// # Parameters
///
/// * `path` - Location of the manifest index.
/// * `source` - I/O error reported by the operating system.
pub fn index_error(path: &Path, source: std::io::Error) -> Error {
    Error::Index {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::Kustomize`] variant capturing the failing path.
///
/// # Parameters
///
/// * `path` - Directory or file involved in the failure.
/// * `source` - I/O error reported by the operating system.
pub fn kustomize_error(path: &Path, source: std::io::Error) -> Error {
    Error::Kustomize {
        path: path.to_path_buf(),
        source
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use crate::{convert::ConvertError, naming::NameRule};

    #[test]
    fn invalid_name_constructor_populates_fields() {
        let error = Error::invalid_name("Team-Foo", NameRule::Pattern);
        match error {
            Error::InvalidName {
                ref name,
                rule
            } => {
                assert_eq!(name, "Team-Foo");
                assert_eq!(rule, NameRule::Pattern);
            }
            other => panic!("expected invalid name error, got {other:?}")
        }
    }

    #[test]
    fn invalid_name_message_names_rule_and_offender() {
        let message = Error::invalid_name("x".repeat(254), NameRule::TooLong).to_string();
        assert!(message.contains("longer than 253 characters"));
        assert!(message.contains(&"x".repeat(254)));
    }

    #[test]
    fn to_display_string_matches_display() {
        let error = Error::invalid_name("-team", NameRule::Pattern);
        assert_eq!(error.to_string(), error.to_display_string());
    }

    #[test]
    fn convert_error_is_wrapped_with_source_path() {
        let error = Error::Convert {
            path:   std::path::PathBuf::from("teams/payments/dash.json"),
            source: ConvertError::invalid("dashboard must be a JSON object")
        };
        let message = error.to_string();
        assert!(message.contains("teams/payments/dash.json"));
        assert!(message.contains("dashboard must be a JSON object"));
    }

    #[test]
    fn index_error_helper_wraps_path_and_source() {
        let path = std::path::Path::new("/tmp/out/.manifests");
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = super::index_error(path, io_error);

        match error {
            Error::Index {
                path: ref stored_path,
                ref source
            } => {
                assert_eq!(stored_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected index error, got {other:?}")
        }
    }

    #[test]
    fn serde_yaml_conversion_maps_to_serialize_variant() {
        let error = serde_yaml::from_str::<usize>("not-a-number").unwrap_err();
        let mapped: Error = error.into();
        assert!(matches!(mapped, Error::Serialize { .. }));
    }
}
