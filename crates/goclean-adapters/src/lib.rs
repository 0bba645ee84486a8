//! Infrastructure adapters for goclean.
//!
//! This crate implements the ports defined in `goclean-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod filesystem;
pub mod renderer;
pub mod template_loader;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::HandlebarsRenderer;
pub use template_loader::{CustomTemplate, MaterializeReport, TemplateDirectory};
