use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("rule '{rule}' is declared more than once on field '{field}'")]
    DuplicateRule { field: String, rule: String },
    #[error("malformed rule token '{token}' on field '{field}'")]
    MalformedToken { field: String, token: String },
    #[error("field '{field}' is declared more than once in record '{record}'")]
    DuplicateField { record: String, field: String },
    #[error("invalid {option} '{value}'")]
    InvalidOption { option: &'static str, value: String },
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
