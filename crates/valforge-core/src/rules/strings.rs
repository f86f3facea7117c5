//! Character-length rules for string fields.
//!
//! Lengths count Unicode scalar values (`chars().count()`), not bytes.

use valforge_model::{CompilerError, ErrorKind, TypeSet, ValidationField};

use super::{EmitContext, FieldLookup, Rule, emit_guard, field_access, parse_length};
use crate::builder::CodeBuilder;
use crate::error::{CompileError, Result};

fn check_length(keyword: &str, param: &str) -> std::result::Result<(), CompilerError> {
    if param.is_empty() {
        return Err(CompilerError::new(
            ErrorKind::Invalid,
            format!("rule '{keyword}' requires a numeric value"),
        ));
    }
    if parse_length(param).is_none() {
        return Err(CompilerError::new(
            ErrorKind::Invalid,
            format!("rule '{keyword}' value must be a non-negative integer"),
        ));
    }
    Ok(())
}

/// Emit `chars().count() <op> N` for `keyword` when the field declares it.
fn emit_length(
    out: &mut CodeBuilder,
    field: &ValidationField,
    keyword: &str,
    op: &str,
    phrase: &str,
) -> Result<()> {
    let Some(param) = field.rule_param(keyword) else {
        return Ok(());
    };
    let limit = parse_length(param).ok_or_else(|| CompileError::InvalidParam {
        field: field.name.clone(),
        rule: keyword.to_string(),
        param: param.to_string(),
    })?;
    let condition = format!("{}.chars().count() {op} {limit}", field_access(&field.name));
    let message = format!("{} must be {phrase} {limit} characters", field.external_name);
    emit_guard(out, field, &condition, &message);
    Ok(())
}

/// `minlen=N`
#[derive(Debug, Clone, Copy, Default)]
pub struct MinLenRule;

impl Rule for MinLenRule {
    fn name(&self) -> &'static str {
        "minlen"
    }

    fn description(&self) -> &'static str {
        "string must have at least N characters"
    }

    fn priority(&self) -> u8 {
        2
    }

    fn supported_kinds(&self) -> TypeSet {
        TypeSet::STRING
    }

    fn check_param(
        &self,
        keyword: &str,
        param: &str,
        _field: &ValidationField,
        _siblings: &FieldLookup<'_>,
    ) -> std::result::Result<(), CompilerError> {
        check_length(keyword, param)
    }

    fn emit(&self, out: &mut CodeBuilder, field: &ValidationField, _ctx: &EmitContext<'_>) -> Result<()> {
        emit_length(out, field, "minlen", "<", "at least")
    }
}

/// `maxlen=N`
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxLenRule;

impl Rule for MaxLenRule {
    fn name(&self) -> &'static str {
        "maxlen"
    }

    fn description(&self) -> &'static str {
        "string must have at most N characters"
    }

    fn priority(&self) -> u8 {
        2
    }

    fn supported_kinds(&self) -> TypeSet {
        TypeSet::STRING
    }

    fn check_param(
        &self,
        keyword: &str,
        param: &str,
        _field: &ValidationField,
        _siblings: &FieldLookup<'_>,
    ) -> std::result::Result<(), CompilerError> {
        check_length(keyword, param)
    }

    fn emit(&self, out: &mut CodeBuilder, field: &ValidationField, _ctx: &EmitContext<'_>) -> Result<()> {
        emit_length(out, field, "maxlen", ">", "at most")
    }
}

/// `len=N`
#[derive(Debug, Clone, Copy, Default)]
pub struct LenRule;

impl Rule for LenRule {
    fn name(&self) -> &'static str {
        "len"
    }

    fn description(&self) -> &'static str {
        "string must have exactly N characters"
    }

    fn priority(&self) -> u8 {
        2
    }

    fn supported_kinds(&self) -> TypeSet {
        TypeSet::STRING
    }

    fn check_param(
        &self,
        keyword: &str,
        param: &str,
        _field: &ValidationField,
        _siblings: &FieldLookup<'_>,
    ) -> std::result::Result<(), CompilerError> {
        check_length(keyword, param)
    }

    fn emit(&self, out: &mut CodeBuilder, field: &ValidationField, _ctx: &EmitContext<'_>) -> Result<()> {
        emit_length(out, field, "len", "!=", "exactly")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valforge_model::FieldType;

    fn ctx() -> EmitContext<'static> {
        EmitContext {
            record_name: "User",
            runtime_crate: "valforge_runtime",
        }
    }

    #[test]
    fn emits_canonical_length() {
        let field = ValidationField::new("Pin", FieldType::classify("String")).with_rule("len", "+04");
        let mut out = CodeBuilder::new();
        LenRule.emit(&mut out, &field, &ctx()).unwrap();
        assert_eq!(
            out.as_str(),
            "if self.Pin.chars().count() != 4 {\n    verr.add_field_error(\"pin\", \"pin must be exactly 4 characters\", &self.Pin);\n}\n"
        );
    }

    #[test]
    fn skips_when_keyword_absent() {
        let field = ValidationField::new("Pin", FieldType::classify("String")).with_rule("minlen", "2");
        let mut out = CodeBuilder::new();
        MaxLenRule.emit(&mut out, &field, &ctx()).unwrap();
        assert!(out.as_str().is_empty());
    }

    #[test]
    fn length_param_messages() {
        let err = check_length("minlen", "").unwrap_err();
        assert_eq!(err.message, "rule 'minlen' requires a numeric value");
        let err = check_length("len", "-3").unwrap_err();
        assert_eq!(err.message, "rule 'len' value must be a non-negative integer");
        assert!(check_length("maxlen", "32").is_ok());
    }
}
