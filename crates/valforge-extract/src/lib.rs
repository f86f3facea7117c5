//! Source front end for valforge.
//!
//! Reads Rust source files, finds structs whose fields carry
//! `#[validate("...")]` and turns them into [`valforge_model::ValidationRecord`]s
//! for the compiler. Field types are classified from the parsed type, so
//! qualified paths and wrappers are recognised without name resolution.

pub mod discovery;
pub mod error;
pub mod source;

pub use discovery::list_source_files;
pub use error::{ExtractError, Result};
pub use source::{extract_file, extract_package, extract_source, module_namespace};
