//! Artifact store adapters.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;

pub(crate) use local::{atomic_write, map_io_error};
