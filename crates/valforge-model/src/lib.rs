pub mod diagnostics;
pub mod error;
pub mod ident;
pub mod ir;
pub mod kind;
pub mod options;
pub mod record;
pub mod tag;

pub use diagnostics::{CompilerError, CompilerErrors, ErrorKind};
pub use error::{ModelError, Result};
pub use ident::is_identifier;
pub use ir::{IrDocument, IrField, IrRecord};
pub use kind::{FieldType, TypeKind, TypeSet, Wrapper};
pub use options::GenerateOptions;
pub use record::{ValidationField, ValidationRecord};
pub use tag::{parse_tag, to_snake_case};
