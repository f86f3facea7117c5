use thiserror::Error;
use valforge_model::{CompilerError, CompilerErrors, ModelError};

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("no records with validation rules found")]
    NothingToValidate,
    #[error("{0}")]
    Diagnostics(CompilerErrors),
    #[error("{0}")]
    Registration(CompilerError),
    #[error(transparent)]
    Options(#[from] ModelError),
    #[error("rule '{rule}' on {record}.{field} is not registered")]
    UnregisteredRule {
        record: String,
        field: String,
        rule: String,
    },
    #[error("rule '{rule}' on field '{field}' has invalid parameter '{param}'")]
    InvalidParam {
        field: String,
        rule: String,
        param: String,
    },
}

impl CompileError {
    /// Diagnostics carried by this error, if any.
    pub fn diagnostics(&self) -> Option<&CompilerErrors> {
        match self {
            Self::Diagnostics(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<CompilerErrors> for CompileError {
    fn from(errors: CompilerErrors) -> Self {
        Self::Diagnostics(errors)
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;
