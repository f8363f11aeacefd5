use std::borrow::Cow;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Stable identity of a candidate archive.
///
/// The identifier prefers canonical filesystem paths so the same archive named
/// through different user inputs (relative vs absolute, `.` vs `..`) maps to a
/// single working-table key. For archives that do not exist on disk (recorded
/// scans, fixtures) only the existing ancestor directories are canonicalized.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArchiveId(PathBuf);

impl ArchiveId {
    /// Create a new archive identifier from a filesystem path.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ArchiveIdError> {
        let path = path.as_ref();

        if path.as_os_str().is_empty() {
            return Err(ArchiveIdError::EmptyPath);
        }

        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|source| ArchiveIdError::CurrentDir { source })?
                .join(path)
        };

        resolve(&joined.clean()).map(Self)
    }

    /// Returns the underlying path representation.
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Borrow the identifier as a string for logging/serialization.
    pub fn path_string(&self) -> Cow<'_, str> {
        self.0.to_string_lossy()
    }

    /// File name of the archive, used to derive automatic module names.
    pub fn file_name(&self) -> Option<Cow<'_, str>> {
        self.0.file_name().map(|name| name.to_string_lossy())
    }
}

impl fmt::Display for ArchiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_string())
    }
}

impl Serialize for ArchiveId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.path_string())
    }
}

impl<'de> Deserialize<'de> for ArchiveId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        ArchiveId::new(value).map_err(serde::de::Error::custom)
    }
}

/// Canonicalize the longest existing ancestor of `cleaned` and re-append the
/// components that do not exist yet.
///
/// A recorded archive that is absent on disk must still resolve through the
/// same symlinks as the directory that contains it.
fn resolve(cleaned: &Path) -> Result<PathBuf, ArchiveIdError> {
    let mut missing = Vec::new();
    let mut current = cleaned;

    loop {
        match std::fs::canonicalize(current) {
            Ok(canonical) => {
                return Ok(missing
                    .iter()
                    .rev()
                    .fold(canonical, |path: PathBuf, part| path.join(part)));
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                match (current.parent(), current.file_name()) {
                    (Some(parent), Some(name)) => {
                        missing.push(name);
                        current = parent;
                    }
                    _ => return Ok(cleaned.to_path_buf()),
                }
            }
            Err(err) => {
                return Err(ArchiveIdError::Canonicalization {
                    path: cleaned.to_path_buf(),
                    source: err,
                });
            }
        }
    }
}

/// Error type for `ArchiveId` construction failures.
#[derive(Debug, Error)]
pub enum ArchiveIdError {
    /// The provided path was empty.
    #[error("archive path is empty")]
    EmptyPath,

    /// Failed to resolve the current working directory for canonicalisation.
    #[error("failed to resolve current directory: {source}")]
    CurrentDir {
        #[source]
        source: io::Error,
    },

    /// Canonicalisation failed for reasons other than `NotFound`.
    #[error("failed to canonicalize path '{path}': {source}")]
    Canonicalization {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
