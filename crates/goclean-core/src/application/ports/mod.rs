//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `goclean-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ArtifactStore`: Whole-file reads and writes keyed by relative path
//!   - `TemplateRenderer`: Named template rendering
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{ArtifactStore, TemplateOrigin, TemplateRenderer};

#[cfg(test)]
pub use output::{MockArtifactStore, MockTemplateRenderer};
