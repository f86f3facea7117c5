pub mod builder;
pub mod error;
pub mod generate;
pub mod pipeline;
pub mod registry;
pub mod rules;
pub mod typecheck;

pub use builder::CodeBuilder;
pub use error::{CompileError, Result};
pub use generate::{GeneratedUnit, Generator};
pub use pipeline::{check, compile};
pub use registry::RuleRegistry;
pub use rules::{EmitContext, FieldLookup, Rule, builtin_rules};
pub use typecheck::TypeChecker;
