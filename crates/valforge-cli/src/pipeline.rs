//! Input loading and output placement for the CLI.
//!
//! Records come from a JSON IR document, a Rust source file or a directory
//! of Rust source files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};
use valforge_core::GeneratedUnit;
use valforge_extract::{extract_file, extract_package};
use valforge_model::{IrDocument, ValidationRecord};

/// Suffix of every generated file.
pub const OUTPUT_SUFFIX: &str = "_validation.gen.rs";

/// File name for a single-namespace package result.
pub const PACKAGE_OUTPUT: &str = "validation.gen.rs";

/// Where annotated records are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// JSON IR document.
    Ir(PathBuf),
    /// One Rust source file.
    File(PathBuf),
    /// Every Rust source file of a directory.
    Package(PathBuf),
}

impl InputSource {
    pub fn path(&self) -> &Path {
        match self {
            Self::Ir(path) | Self::File(path) | Self::Package(path) => path,
        }
    }

    /// Directory generated files go to by default.
    fn default_dir(&self) -> PathBuf {
        match self {
            Self::Package(dir) => dir.clone(),
            Self::Ir(path) | Self::File(path) => path.parent().map(Path::to_path_buf).unwrap_or_default(),
        }
    }

    /// File name for a single-namespace result.
    fn single_output_name(&self, unit: &GeneratedUnit) -> String {
        match self {
            Self::Package(_) => PACKAGE_OUTPUT.to_string(),
            Self::Ir(path) | Self::File(path) => {
                let stem = path
                    .file_stem()
                    .map(|stem| file_component(&stem.to_string_lossy()))
                    .filter(|stem| !stem.is_empty())
                    .unwrap_or_else(|| file_component(&unit.namespace));
                format!("{stem}{OUTPUT_SUFFIX}")
            }
        }
    }
}

/// Load compiler records from any input source.
pub fn load_input(source: &InputSource) -> Result<Vec<ValidationRecord>> {
    match source {
        InputSource::Ir(path) => load_records(path),
        InputSource::File(path) => {
            extract_file(path).with_context(|| format!("extract records from {}", path.display()))
        }
        InputSource::Package(dir) => {
            extract_package(dir).with_context(|| format!("extract records from package {}", dir.display()))
        }
    }
}

/// Parse an IR document from JSON text.
pub fn parse_document(text: &str) -> Result<IrDocument> {
    serde_json::from_str(text).context("parse IR document")
}

/// Read an IR file and convert it into compiler records.
pub fn load_records(path: &Path) -> Result<Vec<ValidationRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read IR file {}", path.display()))?;
    let document = parse_document(&text)?;
    let records = document
        .into_records()
        .with_context(|| format!("convert IR records from {}", path.display()))?;
    info!(
        path = %path.display(),
        records = records.len(),
        "loaded IR"
    );
    Ok(records)
}

/// Where generated units are written.
#[derive(Debug, Clone, Default)]
pub struct OutputTarget {
    /// Exact file for a single-namespace result.
    pub output: Option<PathBuf>,
    /// Directory for generated files (default: beside the input).
    pub out_dir: Option<PathBuf>,
}

/// Decide the output path of every unit, in unit order.
///
/// One unit goes to `output`, to `<input stem>_validation.gen.rs` or, for a
/// package, to `validation.gen.rs` inside the package. Several units go to
/// `<namespace>_validation.gen.rs` each.
pub fn plan_outputs(input: &InputSource, units: &[GeneratedUnit], target: &OutputTarget) -> Result<Vec<PathBuf>> {
    let dir = target.out_dir.clone().unwrap_or_else(|| input.default_dir());

    if let [unit] = units {
        if let Some(output) = &target.output {
            return Ok(vec![output.clone()]);
        }
        return Ok(vec![dir.join(input.single_output_name(unit))]);
    }

    if target.output.is_some() {
        bail!(
            "--output needs a single namespace but the input has {}; use --out-dir instead",
            units.len()
        );
    }
    Ok(units
        .iter()
        .map(|unit| dir.join(format!("{}{OUTPUT_SUFFIX}", file_component(&unit.namespace))))
        .collect())
}

/// Write one generated unit, creating parent directories as needed.
pub fn write_unit(path: &Path, unit: &GeneratedUnit) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    fs::write(path, &unit.source).with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), namespace = %unit.namespace, "wrote unit");
    Ok(())
}

/// Make a namespace or stem safe to use in a file name.
fn file_component(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect()
}
