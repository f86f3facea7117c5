//! Record extraction from parsed Rust items.
//!
//! A field takes part in validation when it carries
//! `#[validate("rule,rule=param")]` (or `#[validate = "..."]`). The external
//! name reported in messages comes from `#[serde(rename = "...")]`, falling
//! back to the snake-cased field name. Records inside inline modules get the
//! module path appended to their namespace; `#[cfg(test)]` modules are
//! skipped.

use std::fs;
use std::path::Path;

use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr, ExprLit, Fields, Item, ItemStruct, Lit, LitStr, Meta, Token};
use tracing::{debug, info, warn};
use valforge_model::{FieldType, ValidationField, ValidationRecord};

use crate::discovery::list_source_files;
use crate::error::{ExtractError, Result};

/// Namespace used when a path has no usable module name.
const ROOT_NAMESPACE: &str = "crate";

/// Extract annotated records from Rust source text.
pub fn extract_source(source: &str, namespace: &str) -> Result<Vec<ValidationRecord>> {
    let file = syn::parse_file(source)?;
    let mut records = Vec::new();
    collect_items(&file.items, namespace, &mut records)?;
    Ok(records)
}

/// Extract annotated records from one source file.
///
/// The namespace is the file's module name, see [`module_namespace`].
pub fn extract_file(path: &Path) -> Result<Vec<ValidationRecord>> {
    let records = extract_path(path, &module_namespace(path))?;
    info!(path = %path.display(), records = records.len(), "extracted records");
    Ok(records)
}

/// Extract annotated records from every source file of a directory.
///
/// All files share the directory name as namespace. Files are read in
/// filename order and generated validation files are skipped.
pub fn extract_package(dir: &Path) -> Result<Vec<ValidationRecord>> {
    let files = list_source_files(dir)?;
    if files.is_empty() {
        return Err(ExtractError::NoSourceFiles {
            path: dir.to_path_buf(),
        });
    }

    let namespace = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| ROOT_NAMESPACE.to_string());

    let mut records = Vec::new();
    for path in &files {
        records.extend(extract_path(path, &namespace)?);
    }
    info!(
        path = %dir.display(),
        files = files.len(),
        records = records.len(),
        "extracted package"
    );
    Ok(records)
}

/// Module name of a source file.
///
/// `mod.rs` takes its directory name; `lib.rs` and `main.rs` are the crate
/// root.
pub fn module_namespace(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.as_str() {
        "lib" | "main" | "" => ROOT_NAMESPACE.to_string(),
        "mod" => path
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| ROOT_NAMESPACE.to_string()),
        _ => stem,
    }
}

fn extract_path(path: &Path, namespace: &str) -> Result<Vec<ValidationRecord>> {
    let source = fs::read_to_string(path).map_err(|source| ExtractError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let file = syn::parse_file(&source).map_err(|source| ExtractError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    collect_items(&file.items, namespace, &mut records)?;
    debug!(path = %path.display(), records = records.len(), "scanned source file");
    Ok(records)
}

fn collect_items(items: &[Item], namespace: &str, records: &mut Vec<ValidationRecord>) -> Result<()> {
    for item in items {
        match item {
            Item::Struct(item) => {
                if let Some(record) = record_from_struct(item, namespace)? {
                    records.push(record);
                }
            }
            Item::Mod(module) if !is_test_only(&module.attrs) => {
                if let Some((_, content)) = &module.content {
                    let name = module.ident.unraw().to_string();
                    let nested = if namespace.is_empty() {
                        name
                    } else {
                        format!("{namespace}::{name}")
                    };
                    collect_items(content, &nested, records)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn record_from_struct(item: &ItemStruct, namespace: &str) -> Result<Option<ValidationRecord>> {
    let record_name = item.ident.unraw().to_string();
    let Fields::Named(fields) = &item.fields else {
        if item.fields.iter().any(|field| has_attribute(&field.attrs, "validate")) {
            warn!(record = %record_name, "skipping #[validate] on a tuple struct");
        }
        return Ok(None);
    };

    let mut record = ValidationRecord::new(record_name.as_str(), namespace);
    let mut annotated = false;
    for field in &fields.named {
        let Some(ident) = &field.ident else {
            continue;
        };
        let field_name = ident.unraw().to_string();
        let attribute_error = |attribute: &'static str, err: syn::Error| ExtractError::Attribute {
            record: record_name.clone(),
            field: field_name.clone(),
            attribute,
            message: err.to_string(),
        };

        let Some(tag) = validate_tag(&field.attrs).map_err(|err| attribute_error("validate", err))? else {
            continue;
        };
        annotated = true;

        let mut validation = ValidationField::with_tag(field_name.as_str(), FieldType::from_syn(&field.ty), &tag)?;
        if let Some(external) = serde_rename(&field.attrs).map_err(|err| attribute_error("serde", err))? {
            validation.external_name = external;
        }
        if validation.has_rules() {
            record.fields.push(validation);
        }
    }

    if !annotated {
        return Ok(None);
    }
    if !item.generics.params.is_empty() {
        return Err(ExtractError::GenericRecord { record: record_name });
    }
    if record.fields.is_empty() {
        debug!(record = %record.name, "record has only empty validation tags");
        return Ok(None);
    }
    Ok(Some(record))
}

fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

/// `#[cfg(test)]` exactly.
fn is_test_only(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path().is_ident("cfg") && attr.parse_args::<syn::Path>().is_ok_and(|path| path.is_ident("test"))
    })
}

/// Raw tag of the field's `#[validate]` attribute, if any.
fn validate_tag(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut tag = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("validate")) {
        if tag.is_some() {
            return Err(syn::Error::new_spanned(attr, "declared more than once"));
        }
        let value = match &attr.meta {
            Meta::List(_) => attr.parse_args::<LitStr>()?.value(),
            Meta::NameValue(name_value) => match &name_value.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(value),
                    ..
                }) => value.value(),
                other => return Err(syn::Error::new_spanned(other, "expected a string literal")),
            },
            Meta::Path(path) => {
                return Err(syn::Error::new_spanned(path, "expected a rule list such as #[validate(\"required\")]"));
            }
        };
        tag = Some(value);
    }
    Ok(tag)
}

/// External name from `#[serde(rename = "..")]` or `rename(serialize = "..")`.
fn serde_rename(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut rename = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("rename") {
                return skip_meta_value(&meta);
            }
            if meta.input.peek(Token![=]) {
                let name: LitStr = meta.value()?.parse()?;
                rename = Some(name.value());
                return Ok(());
            }
            meta.parse_nested_meta(|inner| {
                let name: LitStr = inner.value()?.parse()?;
                if inner.path.is_ident("serialize") {
                    rename = Some(name.value());
                }
                Ok(())
            })
        })?;
    }
    Ok(rename.filter(|name| !name.is_empty()))
}

/// Consume `= value` or a parenthesised list after a serde option we ignore.
fn skip_meta_value(meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|nested| skip_meta_value(&nested))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use valforge_model::TypeKind;

    fn extract(source: &str) -> Vec<ValidationRecord> {
        extract_source(source, "users").unwrap()
    }

    #[test]
    fn reads_validate_and_serde_rename() {
        let records = extract(
            r#"
            #[derive(Debug, Serialize)]
            pub struct User {
                #[validate("required")]
                pub name: String,
                #[serde(default, skip_serializing_if = "Option::is_none", rename = "years")]
                #[validate("gte=18")]
                pub age: i32,
                #[serde(rename(serialize = "mail", deserialize = "email_address"))]
                #[validate = "email"]
                pub email: std::string::String,
                pub nickname: Option<String>,
            }
            "#,
        );
        assert_eq!(records.len(), 1);
        let user = &records[0];
        assert_eq!(user.name, "User");
        assert_eq!(user.namespace, "users");
        let summary: Vec<_> = user
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.external_name.as_str(), f.field_type.kind))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("name", "name", TypeKind::String),
                ("age", "years", TypeKind::Int32),
                ("email", "mail", TypeKind::String),
            ]
        );
        assert_eq!(user.fields[1].rule_param("gte"), Some("18"));
    }

    #[test]
    fn default_external_name_is_snake_case() {
        let records = extract(
            r#"
            struct Login {
                #[validate("minlen=6")]
                PassWord: String,
            }
            "#,
        );
        assert_eq!(records[0].fields[0].external_name, "pass_word");
    }

    #[test]
    fn raw_identifiers_are_unrawed() {
        let records = extract(
            r#"
            struct r#Match {
                #[validate("required")]
                r#type: String,
            }
            "#,
        );
        assert_eq!(records[0].name, "Match");
        assert_eq!(records[0].fields[0].name, "type");
    }

    #[test]
    fn skips_unannotated_tuple_and_test_items() {
        let records = extract(
            r#"
            struct Plain { name: String }
            struct Wrapper(#[validate("required")] String);
            struct Empty { #[validate("")] name: String }
            #[cfg(test)]
            mod tests {
                struct Fixture { #[validate("required")] name: String }
            }
            "#,
        );
        assert!(records.is_empty());
    }

    #[test]
    fn inline_modules_extend_namespace() {
        let records = extract(
            r#"
            mod admin {
                pub mod audit {
                    pub struct Entry { #[validate("required")] pub note: String }
                }
            }
            "#,
        );
        assert_eq!(records[0].namespace, "users::admin::audit");
    }

    #[test]
    fn generic_records_are_rejected() {
        let err = extract_source(
            "struct Page<'a> { #[validate(\"required\")] title: &'a str }",
            "users",
        )
        .unwrap_err();
        assert!(matches!(err, ExtractError::GenericRecord { ref record } if record == "Page"));
    }

    #[test]
    fn malformed_attributes() {
        let err = extract_source("struct A { #[validate] name: String }", "users").unwrap_err();
        assert!(matches!(err, ExtractError::Attribute { attribute: "validate", .. }));

        let err = extract_source(
            "struct A { #[validate(\"required\")] #[validate(\"email\")] name: String }",
            "users",
        )
        .unwrap_err();
        assert!(err.to_string().contains("declared more than once"));

        let err = extract_source("struct A { #[validate(\"required,required\")] name: String }", "users")
            .unwrap_err();
        assert!(matches!(err, ExtractError::Model(_)));

        let err = extract_source("struct A {", "users").unwrap_err();
        assert!(matches!(err, ExtractError::Syntax(_)));
    }

    #[test]
    fn module_namespaces() {
        assert_eq!(module_namespace(Path::new("src/users.rs")), "users");
        assert_eq!(module_namespace(Path::new("src/admin/mod.rs")), "admin");
        assert_eq!(module_namespace(Path::new("src/lib.rs")), "crate");
        assert_eq!(module_namespace(Path::new("main.rs")), "crate");
    }
}
