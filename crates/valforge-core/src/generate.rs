//! Source generation.
//!
//! Records are grouped by namespace and each namespace becomes one
//! [`GeneratedUnit`] holding an `impl` block per record. Output depends only
//! on the input records and the registry, so identical input yields
//! byte-identical source.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, warn};
use valforge_model::{GenerateOptions, ValidationField, ValidationRecord};

use crate::builder::CodeBuilder;
use crate::error::{CompileError, Result};
use crate::registry::RuleRegistry;
use crate::rules::{EmitContext, Rule, host_ident};

/// First line of every generated unit.
pub const HEADER: &str = "// Code generated by valforge. DO NOT EDIT.";

/// Generated source for one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub namespace: String,
    pub source: String,
    /// Items imported at the top of the unit, sorted.
    pub dependencies: Vec<String>,
    /// Records that received a validation method, in input order.
    pub records: Vec<String>,
}

pub struct Generator<'r> {
    registry: &'r RuleRegistry,
    options: GenerateOptions,
}

impl<'r> Generator<'r> {
    pub fn new(registry: &'r RuleRegistry, options: GenerateOptions) -> Self {
        Self { registry, options }
    }

    /// Generate one unit per namespace, sorted by namespace.
    ///
    /// Records without annotated fields are skipped; fails with
    /// [`CompileError::NothingToValidate`] when none remain.
    pub fn generate(&self, records: &[ValidationRecord]) -> Result<Vec<GeneratedUnit>> {
        let mut by_namespace: BTreeMap<&str, Vec<&ValidationRecord>> = BTreeMap::new();
        for record in records {
            if !record.has_rules() {
                warn!(record = %record.name, "skipping record without validation rules");
                continue;
            }
            by_namespace
                .entry(record.namespace.as_str())
                .or_default()
                .push(record);
        }

        if by_namespace.is_empty() {
            return Err(CompileError::NothingToValidate);
        }

        by_namespace
            .into_iter()
            .map(|(namespace, group)| self.generate_unit(namespace, &group))
            .collect()
    }

    /// Generate the unit for a single namespace.
    pub fn generate_unit(&self, namespace: &str, records: &[&ValidationRecord]) -> Result<GeneratedUnit> {
        let dependencies: Vec<String> = self
            .registry
            .required_dependencies(records.iter().flat_map(|record| record.fields.iter()))
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut out = CodeBuilder::new();
        out.line(HEADER);
        out.line_fmt(format_args!("// Namespace: {namespace}"));
        if !dependencies.is_empty() {
            out.newline();
            for dependency in &dependencies {
                out.line_fmt(format_args!("use {dependency};"));
            }
        }

        let mut names = Vec::with_capacity(records.len());
        for record in records {
            out.newline();
            self.emit_record(&mut out, record)?;
            names.push(record.name.clone());
        }

        Ok(GeneratedUnit {
            namespace: namespace.to_string(),
            source: out.into_string(),
            dependencies,
            records: names,
        })
    }

    fn emit_record(&self, out: &mut CodeBuilder, record: &ValidationRecord) -> Result<()> {
        let runtime = self.options.runtime_crate.as_str();
        let ctx = EmitContext {
            record_name: &record.name,
            runtime_crate: runtime,
        };

        out.line_fmt(format_args!("impl {} {{", host_ident(&record.name)));
        out.indent();
        out.line("/// Validates every annotated field and collects all failures.");
        out.line_fmt(format_args!(
            "pub fn {}(&self) -> Result<(), {runtime}::ValidationError> {{",
            host_ident(&self.options.method_name)
        ));
        out.indent();
        out.line_fmt(format_args!("let mut verr = {runtime}::ValidationError::new();"));

        for field in record.fields.iter().filter(|field| field.has_rules()) {
            out.newline();
            for rule in self.rules_for_field(record, field)? {
                debug!(record = %record.name, field = %field.name, rule = rule.name(), "emitting rule");
                rule.emit(out, field, &ctx)?;
            }
        }

        out.newline();
        out.line("verr.into_result()");
        out.dedent();
        out.line("}");
        out.dedent();
        out.line("}");
        Ok(())
    }

    /// Distinct rules declared on a field, ordered by (priority, name).
    fn rules_for_field(
        &self,
        record: &ValidationRecord,
        field: &ValidationField,
    ) -> Result<Vec<&'r Arc<dyn Rule>>> {
        let mut seen = BTreeSet::new();
        let mut rules = Vec::new();
        for keyword in field.rules.keys() {
            let rule = self
                .registry
                .lookup(keyword)
                .ok_or_else(|| CompileError::UnregisteredRule {
                    record: record.name.clone(),
                    field: field.name.clone(),
                    rule: keyword.clone(),
                })?;
            if seen.insert(rule.name()) {
                rules.push(rule);
            }
        }
        rules.sort_by_key(|rule| (rule.priority(), rule.name()));
        Ok(rules)
    }
}
