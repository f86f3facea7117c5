use valforge_model::{CompilerError, ErrorKind, TypeKind, TypeSet, ValidationField};

use super::{EmitContext, FieldLookup, Rule, emit_guard, field_access};
use crate::builder::CodeBuilder;
use crate::error::Result;

/// `eqfieldsecure=Other`: constant-time string equality, for secrets such
/// as password confirmation.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualFieldSecureRule;

impl Rule for EqualFieldSecureRule {
    fn name(&self) -> &'static str {
        "eqfieldsecure"
    }

    fn description(&self) -> &'static str {
        "string must equal the named sibling (constant-time compare)"
    }

    fn priority(&self) -> u8 {
        5
    }

    fn supported_kinds(&self) -> TypeSet {
        TypeSet::STRING
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["subtle::ConstantTimeEq"]
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
                "eqfieldsecure rule requires a field name",
            ));
        }
        let Some(target) = siblings.get(param) else {
            return Err(CompilerError::new(
                ErrorKind::Missing,
                format!("eqfieldsecure references unknown field '{param}'"),
            ));
        };
        let plain_string = |field: &ValidationField| {
            field.field_type.kind == TypeKind::String && !field.field_type.is_wrapped()
        };
        if !plain_string(field) || !plain_string(target) {
            return Err(CompilerError::new(
                ErrorKind::Incompatible,
                "eqfieldsecure can only be used with string fields",
            ));
        }
        Ok(())
    }

    fn emit(&self, out: &mut CodeBuilder, field: &ValidationField, _ctx: &EmitContext<'_>) -> Result<()> {
        let Some(target) = field.rule_param("eqfieldsecure") else {
            return Ok(());
        };
        let condition = format!(
            "!bool::from({}.as_bytes().ct_eq({}.as_bytes()))",
            field_access(&field.name),
            field_access(target)
        );
        let message = format!("{} must match {target}", field.external_name);
        emit_guard(out, field, &condition, &message);
        Ok(())
    }
}
