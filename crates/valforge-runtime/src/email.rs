use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("invalid email format")]
    InvalidFormat,
}

/// Check that `value` looks like `local@domain.tld`.
pub fn validate_email(value: &str) -> Result<(), EmailError> {
    if value.is_empty() {
        return Err(EmailError::Empty);
    }
    if !EMAIL_REGEX.is_match(value) {
        return Err(EmailError::InvalidFormat);
    }
    Ok(())
}
