//! In-process doubles shared by service tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{application::ports::ArtifactStore, domain::ArtifactPath, error::GocleanResult};

#[derive(Debug, Default)]
pub struct FakeStore {
    files: Mutex<BTreeMap<String, String>>,
    writes: AtomicUsize,
}

impl FakeStore {
    pub fn insert(&self, path: &str, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_string());
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        self.files.lock().unwrap().keys().cloned().collect()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl ArtifactStore for FakeStore {
    fn read(&self, path: &ArtifactPath) -> GocleanResult<Option<String>> {
        Ok(self.get(path.as_str()))
    }

    fn write(&self, path: &ArtifactPath, content: &str) -> GocleanResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.insert(path.as_str(), content);
        Ok(())
    }

    fn exists(&self, path: &ArtifactPath) -> bool {
        self.get(path.as_str()).is_some()
    }
}
