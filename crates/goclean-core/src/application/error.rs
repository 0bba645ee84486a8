//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Descriptor and naming errors are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A template could not be rendered.
    #[error("Template '{template}' failed to render: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// No template is registered under a logical name.
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// Artifact store operation failed.
    #[error("Store error at {path}: {reason}")]
    StoreError { path: String, reason: String },

    /// Go module path could not be resolved.
    #[error("Cannot determine the Go module path: {reason}")]
    ModuleUnresolved { reason: String },

    /// Request rejected before any work was done.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// One entity in a batch failed; earlier entities stay written.
    #[error("Batch stopped at entity '{entity}' ({completed} completed): {reason}")]
    BatchAborted {
        entity: String,
        completed: usize,
        reason: String,
    },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RenderingFailed { template, .. } => vec![
                format!("Check the template '{template}' for undefined variables or helpers"),
                "Run: goclean templates list to see where each template comes from".into(),
            ],
            Self::TemplateNotFound { name } => vec![
                format!("No built-in or custom template is named '{name}'"),
                "Run: goclean templates list".into(),
            ],
            Self::StoreError { path, .. } => vec![
                format!("Failed to access: {path}"),
                "Check that you have write permissions".into(),
            ],
            Self::ModuleUnresolved { .. } => vec![
                "Pass --module github.com/you/project".into(),
                "Or run inside a Go project that has a go.mod file".into(),
                "Or set [generation] module in goclean.toml".into(),
            ],
            Self::InvalidRequest(_) => vec!["Run: goclean entity --help".into()],
            Self::BatchAborted { completed, .. } => vec![
                format!("{completed} entities were generated before the failure"),
                "Fix the failing entry and re-run; finished entities are skipped or re-written idempotently".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::RenderingFailed { .. } | Self::StoreError { .. } => ErrorCategory::Internal,
            Self::ModuleUnresolved { .. } => ErrorCategory::Configuration,
            Self::InvalidRequest(_) | Self::BatchAborted { .. } => ErrorCategory::Validation,
        }
    }
}
