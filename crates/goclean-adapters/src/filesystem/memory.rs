//! In-memory artifact store for testing and dry planning.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use goclean_core::{
    application::{ApplicationError, ports::ArtifactStore},
    domain::ArtifactPath,
    error::GocleanResult,
};

/// In-memory artifact store. Clones share the same files.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    files: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file (builder style).
    pub fn with_file(self, path: &str, content: &str) -> Self {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.to_string(), content.to_string());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &str) -> Option<String> {
        self.files.read().ok()?.get(path).cloned()
    }

    /// List all file paths, sorted.
    pub fn list_files(&self) -> Vec<String> {
        self.files
            .read()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        if let Ok(mut files) = self.files.write() {
            files.clear();
        }
    }
}

fn lock_error(path: &ArtifactPath) -> ApplicationError {
    ApplicationError::StoreError {
        path: path.to_string(),
        reason: "memory store lock poisoned".into(),
    }
}

impl ArtifactStore for MemoryFilesystem {
    fn read(&self, path: &ArtifactPath) -> GocleanResult<Option<String>> {
        let files = self.files.read().map_err(|_| lock_error(path))?;
        Ok(files.get(path.as_str()).cloned())
    }

    fn write(&self, path: &ArtifactPath, content: &str) -> GocleanResult<()> {
        let mut files = self.files.write().map_err(|_| lock_error(path))?;
        files.insert(path.to_string(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &ArtifactPath) -> bool {
        self.files
            .read()
            .map(|files| files.contains_key(path.as_str()))
            .unwrap_or(false)
    }
}
