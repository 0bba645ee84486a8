//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate the layers for one entity".

pub mod generate_service;
pub mod merge_writer;
pub mod report;

pub use generate_service::{GenerateRequest, GenerateService, GenerationPlan, PlannedFailure};
pub use merge_writer::MergeWriter;
pub use report::{GenerationReport, ReportEntry, WriteOutcome};

#[cfg(test)]
pub(crate) mod test_support;
