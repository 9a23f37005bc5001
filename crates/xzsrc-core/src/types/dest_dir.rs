//! Validated destination directory type.

use crate::Result;
use std::path::Path;
use std::path::PathBuf;

/// The directory an archive is extracted into.
///
/// Construction creates the directory when it is missing and stores its
/// canonical absolute path, so every later containment check compares against
/// a symlink-free prefix.
///
/// # Examples
///
/// ```no_run
/// use xzsrc_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::create("deps")?;
/// println!("Extracting to: {}", dest.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Creates the directory (recursively) if absent and canonicalizes it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory cannot be created
    /// - The path exists but is not a directory
    /// - The path cannot be canonicalized
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        std::fs::create_dir_all(path)?;

        let canonical = path.canonicalize().map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to canonicalize path {}: {e}", path.display()),
            )
        })?;

        if !canonical.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("path is not a directory: {}", canonical.display()),
            )
            .into());
        }

        Ok(Self(canonical))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins a slash-separated relative path onto the destination.
    ///
    /// Only meant for paths that already passed validation.
    #[must_use]
    pub fn join(&self, relative: &str) -> PathBuf {
        let mut out = self.0.clone();
        out.extend(relative.split('/').filter(|c| !c.is_empty()));
        out
    }
}
