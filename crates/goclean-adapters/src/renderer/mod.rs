//! Template rendering adapters.

mod engine;
mod helpers;

pub use engine::HandlebarsRenderer;
