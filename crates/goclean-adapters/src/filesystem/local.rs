//! Local filesystem adapter rooted at the Go project directory.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::trace;

use goclean_core::{
    application::{ApplicationError, ports::ArtifactStore},
    domain::ArtifactPath,
    error::{GocleanError, GocleanResult},
};

/// Production artifact store backed by `std::fs`.
///
/// Every write goes to a temporary file in the target directory and is then
/// renamed over the destination, so a reader never sees a half-written file.
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    root: PathBuf,
}

impl LocalFilesystem {
    /// Create a store rooted at `root` (usually the directory holding `go.mod`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of `path` under the root.
    pub fn resolve(&self, path: &ArtifactPath) -> PathBuf {
        path.segments()
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }
}

impl ArtifactStore for LocalFilesystem {
    fn read(&self, path: &ArtifactPath) -> GocleanResult<Option<String>> {
        let full = self.resolve(path);
        match fs::read_to_string(&full) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io_error(&full, e, "read file")),
        }
    }

    fn write(&self, path: &ArtifactPath, content: &str) -> GocleanResult<()> {
        let full = self.resolve(path);
        trace!(path = %full.display(), bytes = content.len(), "writing artifact");
        atomic_write(&full, content).map_err(|e| map_io_error(&full, e, "write file"))
    }

    fn exists(&self, path: &ArtifactPath) -> bool {
        self.resolve(path).is_file()
    }
}

/// Write `content` to `path` via a sibling temp file and a rename.
pub(crate) fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub(crate) fn map_io_error(path: &Path, e: io::Error, operation: &str) -> GocleanError {
    ApplicationError::StoreError {
        path: path.display().to_string(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn path(p: &str) -> ArtifactPath {
        ArtifactPath::try_new(p).unwrap()
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new(dir.path());
        assert_eq!(fs.read(&path("go.mod")).unwrap(), None);
        assert!(!fs.exists(&path("go.mod")));
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new(dir.path());
        let target = path("internal/domain/user.go");

        fs.write(&target, "package domain\n").unwrap();

        assert!(dir.path().join("internal/domain/user.go").is_file());
        assert_eq!(fs.read(&target).unwrap().as_deref(), Some("package domain\n"));
        assert!(fs.exists(&target));
    }

    #[test]
    fn write_replaces_existing_content() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new(dir.path());
        let target = path("internal/messages/messages.go");

        fs.write(&target, "old").unwrap();
        fs.write(&target, "new").unwrap();

        assert_eq!(std::fs::read_to_string(fs.resolve(&target)).unwrap(), "new");
        // No temp files left next to the artifact.
        let siblings = std::fs::read_dir(dir.path().join("internal/messages"))
            .unwrap()
            .count();
        assert_eq!(siblings, 1);
    }

    #[test]
    fn unreadable_path_is_a_store_error() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("internal/domain/user.go")).unwrap();
        let fs = LocalFilesystem::new(dir.path());

        let err = fs.read(&path("internal/domain/user.go")).unwrap_err();
        assert!(matches!(
            err,
            GocleanError::Application(ApplicationError::StoreError { .. })
        ));
    }
}
