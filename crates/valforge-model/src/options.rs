//! Options for code generation.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ident::is_identifier;

/// Crate path generated code uses for `ValidationError` and helpers.
pub const DEFAULT_RUNTIME_CRATE: &str = "valforge_runtime";

/// Name of the generated validation method.
pub const DEFAULT_METHOD_NAME: &str = "validate";

/// Options controlling the generated source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Path of the runtime support crate, as written in generated code.
    pub runtime_crate: String,
    /// Name of the generated method on every record.
    pub method_name: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            method_name: DEFAULT_METHOD_NAME.to_string(),
        }
    }
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runtime_crate(mut self, runtime_crate: impl Into<String>) -> Self {
        self.runtime_crate = runtime_crate.into();
        self
    }

    pub fn with_method_name(mut self, method_name: impl Into<String>) -> Self {
        self.method_name = method_name.into();
        self
    }

    /// Reject values that cannot be written into generated code.
    pub fn ensure_valid(&self) -> Result<()> {
        if !is_identifier(&self.method_name) {
            return Err(ModelError::InvalidOption {
                option: "method name",
                value: self.method_name.clone(),
            });
        }
        let runtime_path = syn::parse_str::<syn::Path>(&self.runtime_crate)
            .is_ok_and(|path| path.segments.iter().all(|segment| segment.arguments.is_none()));
        if !runtime_path {
            return Err(ModelError::InvalidOption {
                option: "runtime crate",
                value: self.runtime_crate.clone(),
            });
        }
        Ok(())
    }
}
