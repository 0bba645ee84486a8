// ============================================================================
// domain/error.rs - FIELD DSL AND ENTITY ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reported once, logged once)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
///
/// Positions are 1-based indexes of the offending comma-separated token in
/// the field descriptor.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Syntax Errors
    // ========================================================================
    #[error("invalid field declaration at token {position} ('{token}'): {reason}")]
    InvalidFieldDeclaration {
        position: usize,
        token: String,
        reason: String,
    },

    #[error("field '{name}' at token {position} collides with system-managed field '{reserved}'")]
    ReservedFieldName {
        position: usize,
        name: String,
        reserved: &'static str,
    },

    #[error("field '{name}' at token {position} is declared more than once")]
    DuplicateField { position: usize, name: String },

    // ========================================================================
    // Type Errors
    // ========================================================================
    #[error("unsupported type '{token}' at token {position}")]
    UnsupportedType {
        position: usize,
        token: String,
        suggestions: Vec<String>,
    },

    // ========================================================================
    // Entity Errors
    // ========================================================================
    #[error("invalid entity name '{name}': {reason}")]
    InvalidEntityName { name: String, reason: String },

    #[error("invalid Go module path '{path}': {reason}")]
    InvalidModulePath { path: String, reason: String },

    #[error("invalid artifact path '{path}': {reason}")]
    InvalidArtifactPath { path: String, reason: String },

    #[error("unknown {kind} '{value}' (expected one of: {expected})")]
    UnknownOption {
        kind: &'static str,
        value: String,
        expected: String,
    },
}

impl DomainError {
    /// 1-based token position for descriptor errors.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::InvalidFieldDeclaration { position, .. }
            | Self::ReservedFieldName { position, .. }
            | Self::DuplicateField { position, .. }
            | Self::UnsupportedType { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// The offending piece of user input.
    pub fn offending_input(&self) -> &str {
        match self {
            Self::InvalidFieldDeclaration { token, .. } | Self::UnsupportedType { token, .. } => {
                token
            }
            Self::ReservedFieldName { name, .. }
            | Self::DuplicateField { name, .. }
            | Self::InvalidEntityName { name, .. } => name,
            Self::InvalidModulePath { path, .. } | Self::InvalidArtifactPath { path, .. } => path,
            Self::UnknownOption { value, .. } => value,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidFieldDeclaration { .. } => vec![
                "Declare fields as comma-separated name:type pairs".into(),
                "Example: --fields \"name:string,price:float64,email:string\"".into(),
            ],
            Self::ReservedFieldName { reserved, .. } => vec![
                format!("'{reserved}' is generated automatically; remove it from --fields"),
                "Use --timestamps / --soft-delete to control system fields".into(),
            ],
            Self::DuplicateField { name, .. } => {
                vec![format!("Remove the repeated declaration of '{name}'")]
            }
            Self::UnsupportedType { suggestions, .. } => {
                let mut out = Vec::new();
                if !suggestions.is_empty() {
                    out.push(format!("Did you mean: {}?", suggestions.join(", ")));
                }
                out.push(format!(
                    "Supported types: {}",
                    crate::domain::types::type_names().join(", ")
                ));
                out.push("Type names are case-sensitive".into());
                out
            }
            Self::InvalidEntityName { .. } => vec![
                "Entity names must start with a letter".into(),
                "Use letters, digits, '_' or '-' (e.g. Product, order_item)".into(),
            ],
            Self::InvalidModulePath { .. } => vec![
                "Pass the Go module path with --module (e.g. github.com/acme/shop)".into(),
                "Or run goclean inside a directory containing go.mod".into(),
            ],
            Self::InvalidArtifactPath { .. } => vec![
                "Generated paths must stay inside the project directory".into(),
            ],
            Self::UnknownOption { kind, expected, .. } => {
                vec![format!("Valid {kind} values: {expected}")]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidFieldDeclaration { .. }
            | Self::ReservedFieldName { .. }
            | Self::DuplicateField { .. } => ErrorCategory::Syntax,
            Self::UnsupportedType { .. } => ErrorCategory::UnsupportedType,
            Self::InvalidEntityName { .. }
            | Self::InvalidModulePath { .. }
            | Self::InvalidArtifactPath { .. }
            | Self::UnknownOption { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Syntax,
    UnsupportedType,
    Validation,
}
