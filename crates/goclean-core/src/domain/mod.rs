// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for goclean.
//!
//! Pure logic only: descriptor parsing, classification, naming, procedural
//! emitters and the merge state machine. Templates and files are reached
//! through ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Deterministic**: Same descriptor + flags always yield the same text
//!
// Public API - what the world sees
pub mod artifact;
pub mod classifier;
pub mod codegen;
pub mod entity;
pub mod error;
pub mod field;
pub mod flags;
pub mod merge;
pub mod naming;
pub mod types;

// Re-exports for convenience
pub use artifact::{
    ArtifactKind, ArtifactPath, ArtifactSource, GeneratedArtifact, MergeBlock, MergeLayout,
    template_names,
};
pub use classifier::{Cardinality, FieldPlan, SearchMethod, classify, classify_all};
pub use entity::{
    EntityModel, EntityName, ModelField, ValidationCheck, module_from_go_mod, validate_module_path,
};
pub use error::{DomainError, ErrorCategory};
pub use field::{Field, FieldList, SystemField, SystemFieldKind, parse_fields};
pub use flags::{FileNaming, GenerationFlags, Layer};
pub use merge::{MergeDecision, reconcile};
pub use types::{FieldType, TYPE_REGISTRY, TypeDef};

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Descriptor → model pipeline
    // ========================================================================

    #[test]
    fn scenario_descriptor_yields_classified_model() {
        let fields = parse_fields("name:string,price:float64,email:string").unwrap();
        let flags = GenerationFlags::default();
        assert_eq!(fields.total_len(&flags), 4);

        let plans = classify_all(&fields);
        let email = plans.iter().find(|p| p.name == "Email").unwrap();
        assert!(email.searchable && email.unique);
        let price = plans.iter().find(|p| p.name == "Price").unwrap();
        assert!(!price.searchable);
    }

    #[test]
    fn malformed_descriptor_points_at_first_token() {
        let err = parse_fields("name,price:float64").unwrap_err();
        assert_eq!(err.position(), Some(1));
        assert_eq!(err.category(), ErrorCategory::Syntax);
    }

    #[test]
    fn naming_examples() {
        assert_eq!(naming::to_snake("UserID"), "user_id");
        assert_eq!(naming::to_plural("Category"), "Categories");
        assert_eq!(naming::to_singular("Categories"), "Category");
        assert_eq!(naming::to_kebab(&naming::to_pascal("user_name")), "user-name");
    }
}
