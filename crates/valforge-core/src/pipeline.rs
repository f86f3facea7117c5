//! Two-phase compile pipeline: type check, then generate.

use tracing::{info, info_span};
use valforge_model::{CompilerErrors, GenerateOptions, ValidationRecord};

use crate::error::{CompileError, Result};
use crate::generate::{GeneratedUnit, Generator};
use crate::registry::RuleRegistry;
use crate::typecheck::TypeChecker;

/// Run only the type checker over the annotated records.
pub fn check(records: &[ValidationRecord], registry: &RuleRegistry) -> Result<CompilerErrors> {
    if !records.iter().any(ValidationRecord::has_rules) {
        return Err(CompileError::NothingToValidate);
    }

    let _span = info_span!("typecheck", records = records.len()).entered();
    let errors = TypeChecker::new(registry).check_all(records);
    info!(diagnostics = errors.len(), "type check finished");
    Ok(errors)
}

/// Compile records into one generated unit per namespace.
///
/// Invalid options fail with [`CompileError::Options`]. Any diagnostic
/// from the type checker halts the pipeline before generation and is
/// returned as [`CompileError::Diagnostics`].
pub fn compile(
    records: &[ValidationRecord],
    registry: &RuleRegistry,
    options: &GenerateOptions,
) -> Result<Vec<GeneratedUnit>> {
    options.ensure_valid()?;
    let errors = check(records, registry)?;
    if errors.has_errors() {
        return Err(CompileError::Diagnostics(errors));
    }

    let _span = info_span!("generate").entered();
    let units = Generator::new(registry, options.clone()).generate(records)?;
    info!(units = units.len(), "generation finished");
    Ok(units)
}
