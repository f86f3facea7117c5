use valforge_model::{TypeKind, TypeSet, ValidationField};

use super::{EmitContext, Rule, emit_guard, field_access};
use crate::builder::CodeBuilder;
use crate::error::Result;

/// `required`: strings must be non-empty, integers non-zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredRule;

impl Rule for RequiredRule {
    fn name(&self) -> &'static str {
        "required"
    }

    fn description(&self) -> &'static str {
        "value must be non-empty (strings) or non-zero (integers)"
    }

    fn priority(&self) -> u8 {
        1
    }

    fn supported_kinds(&self) -> TypeSet {
        TypeSet::STRING_AND_INTEGER
    }

    fn emit(&self, out: &mut CodeBuilder, field: &ValidationField, _ctx: &EmitContext<'_>) -> Result<()> {
        let access = field_access(&field.name);
        let condition = match field.field_type.kind {
            TypeKind::String => format!("{access}.is_empty()"),
            kind if kind.is_integer() => format!("{access} == 0"),
            _ => return Ok(()),
        };
        let message = format!("{} is required", field.external_name);
        emit_guard(out, field, &condition, &message);
        Ok(())
    }
}
