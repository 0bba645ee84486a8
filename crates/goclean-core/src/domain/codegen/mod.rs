//! Procedural emitters for variable-shape Go declarations.
//!
//! Fixed-shape files (entity structs, handlers) come from templates. The
//! declarations that shared files accumulate are built here, line by line,
//! so their merge markers and layouts stay in one place.

pub mod declarations;
pub mod imports;
pub mod writer;

pub use declarations::{
    errors_block, messages_block, repository_interface_block, usecase_interface_block,
};
pub use imports::ImportSet;
pub use writer::GoWriter;
