//! Support types called by generated `validate` methods.
//!
//! Generated code creates a [`ValidationError`], records one [`FieldError`]
//! per failed check and finishes with [`ValidationError::into_result`].

pub mod email;
pub mod error;

pub use email::{EmailError, validate_email};
pub use error::{FieldError, ValidationError};
