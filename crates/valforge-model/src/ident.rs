//! Identifier checks for names that end up in generated code.

use syn::Ident;

/// Returns true when `name` can be used as a record or field name.
///
/// Keywords are accepted since they can be written as raw identifiers;
/// `self`, `Self`, `super`, `crate` and `_` cannot and are rejected, as
/// are names already carrying the `r#` prefix.
pub fn is_identifier(name: &str) -> bool {
    if name.is_empty() || name.starts_with("r#") {
        return false;
    }
    syn::parse_str::<Ident>(&format!("r#{name}")).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_keyword_names() {
        for name in ["Name", "pwd_1", "_private", "type", "box", "yield", "gen", "Größe"] {
            assert!(is_identifier(name), "{name}");
        }
    }

    #[test]
    fn rejects_non_identifiers() {
        for name in [
            "",
            "first-name",
            "x.is_empty() || true",
            "1st",
            "a b",
            "self",
            "Self",
            "super",
            "crate",
            "_",
            "r#type",
        ] {
            assert!(!is_identifier(name), "{name:?}");
        }
    }
}
