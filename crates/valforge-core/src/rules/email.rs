use valforge_model::{TypeSet, ValidationField};

use super::{EmitContext, Rule, field_access};
use crate::builder::CodeBuilder;
use crate::error::Result;

/// `email`: delegates to the runtime's `validate_email` and reports its
/// error message verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailRule;

impl Rule for EmailRule {
    fn name(&self) -> &'static str {
        "email"
    }

    fn description(&self) -> &'static str {
        "string must be a well-formed email address"
    }

    fn priority(&self) -> u8 {
        2
    }

    fn supported_kinds(&self) -> TypeSet {
        TypeSet::STRING
    }

    fn emit(&self, out: &mut CodeBuilder, field: &ValidationField, ctx: &EmitContext<'_>) -> Result<()> {
        let access = field_access(&field.name);
        out.line_fmt(format_args!(
            "if let Err(err) = {}::validate_email(&{access}) {{",
            ctx.runtime_crate
        ));
        out.indent();
        out.line_fmt(format_args!(
            "verr.add_field_error({:?}, err.to_string(), &{access});",
            field.external_name
        ));
        out.dedent();
        out.line("}");
        Ok(())
    }
}
