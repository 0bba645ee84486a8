//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `goclean-adapters` crate provides implementations.

use std::fmt;
use std::path::PathBuf;

use serde_json::Value;

use crate::domain::ArtifactPath;
use crate::error::GocleanResult;

/// Port for the generated-file set.
///
/// The filesystem is the only persistent state, modelled as a key-value
/// store keyed by project-relative path. Every operation is a whole-file
/// read or write; there is no locking.
///
/// Implemented by:
/// - `goclean_adapters::filesystem::LocalFilesystem` (production)
/// - `goclean_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactStore: Send + Sync {
    /// Full content of `path`, or `None` if it does not exist.
    fn read(&self, path: &ArtifactPath) -> GocleanResult<Option<String>>;

    /// Replace `path` with `content`, creating parent directories.
    ///
    /// Implementations must never leave a partially written file behind.
    fn write(&self, path: &ArtifactPath, content: &str) -> GocleanResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &ArtifactPath) -> bool;
}

/// Where a template body came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    /// Embedded in the binary.
    Builtin,
    /// User override loaded from the given file.
    Custom(PathBuf),
}

impl fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("built-in"),
            Self::Custom(path) => write!(f, "custom ({})", path.display()),
        }
    }
}

/// Port for template rendering.
///
/// Implemented by:
/// - `goclean_adapters::renderer::HandlebarsRenderer`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render the template registered under the logical `name`
    /// (`domain/entity`, `dto/entity`, ...).
    ///
    /// An undefined variable or helper is an error, never blank output.
    fn render(&self, name: &str, context: &Value) -> GocleanResult<String>;

    /// Origin of the template registered under `name`, if any.
    fn origin(&self, name: &str) -> Option<TemplateOrigin>;

    /// All registered logical names, sorted.
    fn names(&self) -> Vec<String>;
}
