//! Command handlers, one module per subcommand.

pub mod batch;
pub mod completions;
pub mod config;
pub mod entity;
pub mod fields;
pub mod templates;
