//! Validation annotation grammar.
//!
//! A tag is a comma separated list of tokens. Each token is either a bare
//! rule name (`required`) or `name=value`, split at the first `=`; the value
//! is kept verbatim. Surrounding whitespace is trimmed and empty tokens are
//! skipped.

use std::collections::BTreeMap;

use crate::error::{ModelError, Result};

/// Parse a validation tag into rule name → raw parameter.
///
/// A rule without a value maps to the empty string.
pub fn parse_tag(field: &str, tag: &str) -> Result<BTreeMap<String, String>> {
    let mut rules = BTreeMap::new();

    for token in tag.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let (name, value) = token.split_once('=').unwrap_or((token, ""));
        if name.is_empty() {
            return Err(ModelError::MalformedToken {
                field: field.to_string(),
                token: token.to_string(),
            });
        }
        if rules.insert(name.to_string(), value.to_string()).is_some() {
            return Err(ModelError::DuplicateRule {
                field: field.to_string(),
                rule: name.to_string(),
            });
        }
    }

    Ok(rules)
}

/// Derive the external name of a field from its identifier.
///
/// Every uppercase ASCII letter after the first character starts a new
/// `_`-separated word; the result is lowercased.
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (idx, ch) in name.chars().enumerate() {
        if idx > 0 && ch.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(ch);
    }
    out.to_lowercase()
}
