//! Static checks run before any code is generated.
//!
//! Record and field names must be usable as identifiers in generated code.
//! For every declared rule the checker then verifies, in order, that the
//! rule exists, that it supports the field type and that its parameter is
//! acceptable. Diagnostics are collected across all records.

use tracing::debug;
use valforge_model::{
    CompilerError, CompilerErrors, ErrorKind, ValidationField, ValidationRecord, is_identifier,
};

use crate::registry::RuleRegistry;
use crate::rules::FieldLookup;

pub struct TypeChecker<'r> {
    registry: &'r RuleRegistry,
}

impl<'r> TypeChecker<'r> {
    pub fn new(registry: &'r RuleRegistry) -> Self {
        Self { registry }
    }

    /// Check every field of one record.
    pub fn check_record(&self, record: &ValidationRecord) -> CompilerErrors {
        let siblings: FieldLookup<'_> = record
            .fields
            .iter()
            .map(|field| (field.name.as_str(), field))
            .collect();

        let mut errors = CompilerErrors::new();
        check_names(record, &mut errors);
        for field in record.fields.iter().filter(|field| is_identifier(&field.name)) {
            self.check_field(record, field, &siblings, &mut errors);
        }
        errors
    }

    /// Check all records, keeping diagnostics in record order.
    pub fn check_all(&self, records: &[ValidationRecord]) -> CompilerErrors {
        let mut errors = CompilerErrors::new();
        for record in records {
            errors.extend(self.check_record(record));
        }
        errors
    }

    fn check_field(
        &self,
        record: &ValidationRecord,
        field: &ValidationField,
        siblings: &FieldLookup<'_>,
        errors: &mut CompilerErrors,
    ) {
        for (keyword, param) in &field.rules {
            let Some(rule) = self.registry.lookup(keyword) else {
                errors.add(
                    CompilerError::new(
                        ErrorKind::Missing,
                        format!("unknown validation rule '{keyword}'"),
                    )
                    .at(&record.name, &field.name, keyword),
                );
                continue;
            };

            if !rule.supports(&field.field_type) {
                errors.add(
                    CompilerError::new(
                        ErrorKind::Incompatible,
                        format!(
                            "rule '{keyword}' is not compatible with type '{}'",
                            field.field_type
                        ),
                    )
                    .at(&record.name, &field.name, keyword),
                );
                continue;
            }

            if let Err(error) = rule.check_param(keyword, param, field, siblings) {
                errors.add(error.at(&record.name, &field.name, keyword));
                continue;
            }

            debug!(record = %record.name, field = %field.name, rule = %keyword, "rule accepted");
        }
    }
}

/// Report names that cannot be written into generated code.
fn check_names(record: &ValidationRecord, errors: &mut CompilerErrors) {
    if !is_identifier(&record.name) {
        errors.add(
            CompilerError::new(
                ErrorKind::Invalid,
                format!("record name '{}' is not a valid identifier", record.name),
            )
            .at(&record.name, "", ""),
        );
    }
    if record.namespace.chars().any(char::is_control) {
        errors.add(
            CompilerError::new(
                ErrorKind::Invalid,
                format!("namespace {:?} contains control characters", record.namespace),
            )
            .at(&record.name, "", ""),
        );
    }
    for field in &record.fields {
        if !is_identifier(&field.name) {
            errors.add(
                CompilerError::new(
                    ErrorKind::Invalid,
                    format!("field name '{}' is not a valid identifier", field.name),
                )
                .at(&record.name, &field.name, ""),
            );
        }
    }
}
