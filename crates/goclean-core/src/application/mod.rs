//! Application layer for goclean.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerateService, MergeWriter)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! generation rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    GenerateRequest, GenerateService, GenerationPlan, GenerationReport, MergeWriter,
    PlannedFailure, ReportEntry, WriteOutcome,
};

// Re-export port traits (for adapter implementation)
pub use ports::{ArtifactStore, TemplateOrigin, TemplateRenderer};

pub use error::ApplicationError;
