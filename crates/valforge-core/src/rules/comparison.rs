//! Integer thresholds and plain field equality.

use valforge_model::{CompilerError, ErrorKind, TypeSet, ValidationField};

use super::{EmitContext, FieldLookup, Rule, emit_guard, field_access, parse_threshold};
use crate::builder::CodeBuilder;
use crate::error::{CompileError, Result};

fn check_threshold(
    keyword: &str,
    param: &str,
    field: &ValidationField,
) -> std::result::Result<(), CompilerError> {
    if param.is_empty() {
        return Err(CompilerError::new(
            ErrorKind::Invalid,
            format!("rule '{keyword}' requires a numeric value"),
        ));
    }
    let Some((min, max)) = field.field_type.kind.integer_range() else {
        return Err(CompilerError::new(
            ErrorKind::Incompatible,
            format!("rule '{keyword}' can only be used with integer types"),
        ));
    };
    let Some(value) = parse_threshold(param) else {
        return Err(CompilerError::new(
            ErrorKind::Invalid,
            format!("rule '{keyword}' value must be a valid integer"),
        ));
    };
    if value < min || value > max {
        return Err(CompilerError::new(
            ErrorKind::Invalid,
            format!(
                "rule '{keyword}' value {value} is out of range for type '{}'",
                field.field_type.kind
            ),
        ));
    }
    // Bounds at the edge of the range make the guard a constant comparison.
    let satisfied_by = match keyword {
        "gt" if value == max => Some("no"),
        "lt" if value == min => Some("no"),
        "gte" if value == min => Some("every"),
        "lte" if value == max => Some("every"),
        _ => None,
    };
    if let Some(quantity) = satisfied_by {
        return Err(CompilerError::new(
            ErrorKind::Invalid,
            format!(
                "rule '{keyword}' value {value} is satisfied by {quantity} value of type '{}'",
                field.field_type.kind
            ),
        ));
    }
    Ok(())
}

/// Emit `<field> <op> N` for `keyword` when the field declares it.
fn emit_threshold(
    out: &mut CodeBuilder,
    field: &ValidationField,
    keyword: &str,
    op: &str,
    phrase: &str,
) -> Result<()> {
    let Some(param) = field.rule_param(keyword) else {
        return Ok(());
    };
    let value = parse_threshold(param).ok_or_else(|| CompileError::InvalidParam {
        field: field.name.clone(),
        rule: keyword.to_string(),
        param: param.to_string(),
    })?;
    let condition = format!("{} {op} {value}", field_access(&field.name));
    let message = format!("{} must be {phrase} {value}", field.external_name);
    emit_guard(out, field, &condition, &message);
    Ok(())
}

/// `gt=N` and its alias `gte=N`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreaterThanRule;

impl Rule for GreaterThanRule {
    fn name(&self) -> &'static str {
        "gt"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["gte"]
    }

    fn description(&self) -> &'static str {
        "integer must be greater than (gt) or at least (gte) N"
    }

    fn priority(&self) -> u8 {
        3
    }

    fn supported_kinds(&self) -> TypeSet {
        TypeSet::INTEGER
    }

    fn check_param(
        &self,
        keyword: &str,
        param: &str,
        field: &ValidationField,
        _siblings: &FieldLookup<'_>,
    ) -> std::result::Result<(), CompilerError> {
        check_threshold(keyword, param, field)
    }

    fn emit(&self, out: &mut CodeBuilder, field: &ValidationField, _ctx: &EmitContext<'_>) -> Result<()> {
        emit_threshold(out, field, "gt", "<=", "greater than")?;
        emit_threshold(out, field, "gte", "<", "greater than or equal to")
    }
}

/// `lt=N` and its alias `lte=N`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LessThanRule;

impl Rule for LessThanRule {
    fn name(&self) -> &'static str {
        "lt"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["lte"]
    }

    fn description(&self) -> &'static str {
        "integer must be less than (lt) or at most (lte) N"
    }

    fn priority(&self) -> u8 {
        3
    }

    fn supported_kinds(&self) -> TypeSet {
        TypeSet::INTEGER
    }

    fn check_param(
        &self,
        keyword: &str,
        param: &str,
        field: &ValidationField,
        _siblings: &FieldLookup<'_>,
    ) -> std::result::Result<(), CompilerError> {
        check_threshold(keyword, param, field)
    }

    fn emit(&self, out: &mut CodeBuilder, field: &ValidationField, _ctx: &EmitContext<'_>) -> Result<()> {
        emit_threshold(out, field, "lt", ">=", "less than")?;
        emit_threshold(out, field, "lte", ">", "less than or equal to")
    }
}

/// `eqfield=Other`: the field must equal a sibling of the same type.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualFieldRule;

impl Rule for EqualFieldRule {
    fn name(&self) -> &'static str {
        "eqfield"
    }

    fn description(&self) -> &'static str {
        "value must equal the named sibling field"
    }

    fn priority(&self) -> u8 {
        5
    }

    fn supported_kinds(&self) -> TypeSet {
        TypeSet::PRIMITIVE
    }

    fn check_param(
        &self,
        _keyword: &str,
        param: &str,
        field: &ValidationField,
        siblings: &FieldLookup<'_>,
    ) -> std::result::Result<(), CompilerError> {
        if param.is_empty() {
            return Err(CompilerError::new(
                ErrorKind::Invalid,
                "eqfield rule requires a field name",
            ));
        }
        let Some(target) = siblings.get(param) else {
            return Err(CompilerError::new(
                ErrorKind::Missing,
                format!("eqfield references unknown field '{param}'"),
            ));
        };
        if field.field_type != target.field_type {
            return Err(CompilerError::new(
                ErrorKind::Incompatible,
                format!(
                    "eqfield field types must match: '{}' vs '{}'",
                    field.field_type, target.field_type
                ),
            ));
        }
        Ok(())
    }

    fn emit(&self, out: &mut CodeBuilder, field: &ValidationField, _ctx: &EmitContext<'_>) -> Result<()> {
        let Some(target) = field.rule_param("eqfield") else {
            return Ok(());
        };
        let condition = format!("{} != {}", field_access(&field.name), field_access(target));
        let message = format!("{} must match {target}", field.external_name);
        emit_guard(out, field, &condition, &message);
        Ok(())
    }
}
