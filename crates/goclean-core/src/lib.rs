//! goclean Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for goclean, a
//! generator of Clean-Architecture Go code, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           goclean-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │     (GenerateService, MergeWriter)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (ArtifactStore, TemplateRenderer)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     goclean-adapters (Infrastructure)   │
//! │ (LocalFilesystem, HandlebarsRenderer)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (field DSL, classifier, emitters,      │
//! │   merge state machine)                  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use goclean_core::prelude::*;
//!
//! let service = GenerateService::new(renderer, store);
//! let request = GenerateRequest::new("Product", "name:string,price:float64,email:string");
//! let report = service.generate(&request)?;
//! for entry in &report.entries {
//!     println!("{} {}", entry.outcome, entry.path);
//! }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateRequest, GenerateService, GenerationPlan, GenerationReport, ReportEntry,
        WriteOutcome,
        ports::{ArtifactStore, TemplateOrigin, TemplateRenderer},
    };
    pub use crate::domain::{
        ArtifactPath, EntityModel, EntityName, Field, FieldList, FieldType, FileNaming,
        GenerationFlags, Layer, parse_fields,
    };
    pub use crate::error::{GocleanError, GocleanResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
