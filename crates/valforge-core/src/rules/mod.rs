//! Validation rules.
//!
//! Every annotation keyword maps to a [`Rule`]. A rule declares which field
//! types it accepts, checks its own parameter and emits the guard code for
//! a field. The type checker and generator only talk to rules through this
//! trait, so adding a rule means adding a type here and listing it in
//! [`builtin_rules`].
//!
//! # Built-in rules
//!
//! | Rule | Aliases | Priority | Types |
//! |------|---------|----------|-------|
//! | `required` | | 1 | string, integers |
//! | `minlen`, `maxlen`, `len` | | 2 | string |
//! | `email` | | 2 | string |
//! | `gt` | `gte` | 3 | integers |
//! | `lt` | `lte` | 3 | integers |
//! | `eqfield` | | 5 | all primitives |
//! | `eqfieldsecure` | | 5 | string |

mod comparison;
mod email;
mod required;
mod secure;
mod strings;

use std::collections::BTreeMap;
use std::sync::Arc;

use valforge_model::{CompilerError, FieldType, TypeSet, ValidationField};

use crate::builder::CodeBuilder;
use crate::error::Result;

pub use comparison::{EqualFieldRule, GreaterThanRule, LessThanRule};
pub use email::EmailRule;
pub use required::RequiredRule;
pub use secure::EqualFieldSecureRule;
pub use strings::{LenRule, MaxLenRule, MinLenRule};

/// Fields of one record indexed by host identifier.
pub type FieldLookup<'a> = BTreeMap<&'a str, &'a ValidationField>;

/// Values available to a rule while emitting code.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    /// Record whose `validate` method is being generated.
    pub record_name: &'a str,
    /// Crate path of the runtime helpers.
    pub runtime_crate: &'a str,
}

/// A validation rule keyed by one or more annotation keywords.
pub trait Rule: Send + Sync {
    /// Canonical keyword.
    fn name(&self) -> &'static str;

    /// Additional keywords handled by the same rule.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Short human-readable summary for rule listings.
    fn description(&self) -> &'static str;

    /// Emission order within a field; lower runs first.
    fn priority(&self) -> u8;

    fn supported_kinds(&self) -> TypeSet;

    /// Whether the rule can generate code for the field type.
    ///
    /// Wrapped types (`Option<T>`, `Vec<T>`, ...) are never supported by
    /// default.
    fn supports(&self, field_type: &FieldType) -> bool {
        !field_type.is_wrapped() && self.supported_kinds().contains(field_type.kind)
    }

    /// Items the generated unit must `use` when this rule is present.
    fn dependencies(&self) -> &'static [&'static str] {
        &[]
    }

    /// Validate the parameter of `keyword` on `field`.
    ///
    /// Only called once [`Rule::supports`] accepted the field type. The
    /// returned diagnostic carries kind and message; the checker fills in
    /// the location.
    fn check_param(
        &self,
        _keyword: &str,
        _param: &str,
        _field: &ValidationField,
        _siblings: &FieldLookup<'_>,
    ) -> std::result::Result<(), CompilerError> {
        Ok(())
    }

    /// Emit one guard per keyword of this rule declared on the field.
    fn emit(&self, out: &mut CodeBuilder, field: &ValidationField, ctx: &EmitContext<'_>) -> Result<()>;

    /// Canonical name followed by the aliases.
    fn keywords(&self) -> Vec<&'static str> {
        let mut keywords = vec![self.name()];
        keywords.extend_from_slice(self.aliases());
        keywords
    }
}

/// The built-in rule set in registration order.
pub fn builtin_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(RequiredRule),
        Arc::new(MinLenRule),
        Arc::new(MaxLenRule),
        Arc::new(LenRule),
        Arc::new(EmailRule),
        Arc::new(GreaterThanRule),
        Arc::new(LessThanRule),
        Arc::new(EqualFieldRule),
        Arc::new(EqualFieldSecureRule),
    ]
}

/// Strict and reserved keywords that need a raw identifier.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn",
    "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield",
];

/// A record or field name as written in generated code.
///
/// Names must already have passed [`valforge_model::is_identifier`].
pub(crate) fn host_ident(name: &str) -> String {
    if KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// `self.<field>` with a raw identifier where needed.
pub(crate) fn field_access(name: &str) -> String {
    format!("self.{}", host_ident(name))
}

/// Emit `if <condition> { verr.add_field_error(..) }` for `field`.
pub(crate) fn emit_guard(out: &mut CodeBuilder, field: &ValidationField, condition: &str, message: &str) {
    out.line_fmt(format_args!("if {condition} {{"));
    out.indent();
    out.line_fmt(format_args!(
        "verr.add_field_error({:?}, {:?}, &{});",
        field.external_name,
        message,
        field_access(&field.name)
    ));
    out.dedent();
    out.line("}");
}

/// Parse a signed base-10 threshold.
pub(crate) fn parse_threshold(param: &str) -> Option<i128> {
    let value: i64 = param.parse().ok()?;
    Some(i128::from(value))
}

/// Parse a non-negative base-10 length.
pub(crate) fn parse_length(param: &str) -> Option<u64> {
    let value: i64 = param.parse().ok()?;
    u64::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use valforge_model::TypeKind;

    #[test]
    fn threshold_parsing() {
        assert_eq!(parse_threshold("18"), Some(18));
        assert_eq!(parse_threshold("-5"), Some(-5));
        assert_eq!(parse_threshold("+7"), Some(7));
        assert_eq!(parse_threshold("1.5"), None);
        assert_eq!(parse_threshold("0x10"), None);
        assert_eq!(parse_threshold(" 3"), None);
        assert_eq!(parse_threshold(""), None);
    }

    #[test]
    fn length_parsing() {
        assert_eq!(parse_length("0"), Some(0));
        assert_eq!(parse_length("6"), Some(6));
        assert_eq!(parse_length("-1"), None);
        assert_eq!(parse_length("six"), None);
    }

    #[test]
    fn raw_identifiers_for_keywords() {
        assert_eq!(field_access("Name"), "self.Name");
        assert_eq!(field_access("type"), "self.r#type");
        assert_eq!(field_access("box"), "self.r#box");
        assert_eq!(field_access("yield"), "self.r#yield");
        assert_eq!(host_ident("Match"), "Match");
    }

    #[test]
    fn every_keyword_is_accepted_as_identifier() {
        for keyword in KEYWORDS {
            assert!(valforge_model::is_identifier(keyword), "{keyword}");
        }
    }

    #[test]
    fn default_supports_rejects_wrapped() {
        let rule = RequiredRule;
        assert!(rule.supports(&FieldType::plain(TypeKind::String)));
        assert!(!rule.supports(&FieldType::pointer(TypeKind::String)));
        assert!(!rule.supports(&FieldType::collection(TypeKind::Int32)));
        assert!(!rule.supports(&FieldType::plain(TypeKind::Struct)));
    }

    #[test]
    fn builtin_keywords_are_distinct() {
        let mut seen = std::collections::BTreeSet::new();
        for rule in builtin_rules() {
            for keyword in rule.keywords() {
                assert!(seen.insert(keyword), "keyword {keyword} listed twice");
            }
        }
        assert_eq!(seen.len(), 11);
    }
}
