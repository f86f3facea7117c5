use std::path::PathBuf;

use valforge_model::CompilerErrors;

#[derive(Debug)]
pub struct GenerateResult {
    pub input: PathBuf,
    pub units: Vec<UnitSummary>,
    pub diagnostics: CompilerErrors,
    pub to_stdout: bool,
}

impl GenerateResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

#[derive(Debug)]
pub struct UnitSummary {
    pub namespace: String,
    pub records: Vec<String>,
    pub dependencies: Vec<String>,
    /// None when printed to stdout.
    pub path: Option<PathBuf>,
}

#[derive(Debug)]
pub struct CheckResult {
    pub input: PathBuf,
    pub records: usize,
    pub rules: usize,
    pub diagnostics: CompilerErrors,
}

impl CheckResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}
