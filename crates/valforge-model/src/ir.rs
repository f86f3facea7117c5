//! Serialized intermediate representation.
//!
//! Extractors written in any language can hand the compiler a document
//! listing records, field types and raw validation tags; Rust sources are
//! read directly by `valforge-extract`. Fields without a tag and records
//! without annotated fields are dropped during conversion.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::record::{ValidationField, ValidationRecord};

/// Top-level IR document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrDocument {
    /// Namespace applied to records that do not set their own.
    pub namespace: String,
    #[serde(default)]
    pub records: Vec<IrRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub fields: Vec<IrField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_name: Option<String>,
    #[serde(default)]
    pub validate: String,
}

impl IrDocument {
    /// Convert into compiler records, parsing every validation tag.
    pub fn into_records(self) -> Result<Vec<ValidationRecord>> {
        let mut records = Vec::with_capacity(self.records.len());

        for ir_record in self.records {
            if ir_record.name.trim().is_empty() {
                return Err(ModelError::Message("record name must not be empty".to_string()));
            }
            let namespace = ir_record
                .namespace
                .filter(|ns| !ns.trim().is_empty())
                .unwrap_or_else(|| self.namespace.clone());
            let mut record = ValidationRecord::new(ir_record.name, namespace);
            let mut seen = BTreeSet::new();

            for ir_field in ir_record.fields {
                if !seen.insert(ir_field.name.clone()) {
                    return Err(ModelError::DuplicateField {
                        record: record.name.clone(),
                        field: ir_field.name,
                    });
                }
                if ir_field.validate.trim().is_empty() {
                    continue;
                }
                let mut field =
                    ValidationField::from_tag(ir_field.name, &ir_field.type_name, &ir_field.validate)?;
                if let Some(external) = ir_field.external_name.filter(|name| !name.is_empty()) {
                    field.external_name = external;
                }
                if field.has_rules() {
                    record.fields.push(field);
                }
            }

            if !record.fields.is_empty() {
                records.push(record);
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::TypeKind;

    fn document() -> IrDocument {
        IrDocument {
            namespace: "users".to_string(),
            records: vec![
                IrRecord {
                    name: "User".to_string(),
                    namespace: None,
                    fields: vec![
                        IrField {
                            name: "Age".to_string(),
                            type_name: "i32".to_string(),
                            external_name: None,
                            validate: "gte=18".to_string(),
                        },
                        IrField {
                            name: "Nickname".to_string(),
                            type_name: "String".to_string(),
                            external_name: Some("nick".to_string()),
                            validate: String::new(),
                        },
                    ],
                },
                IrRecord {
                    name: "Empty".to_string(),
                    namespace: Some("other".to_string()),
                    fields: vec![],
                },
            ],
        }
    }

    #[test]
    fn drops_untagged_fields_and_empty_records() {
        let records = document().into_records().unwrap();
        assert_eq!(records.len(), 1);
        let user = &records[0];
        assert_eq!(user.namespace, "users");
        assert_eq!(user.fields.len(), 1);
        assert_eq!(user.fields[0].external_name, "age");
        assert_eq!(user.fields[0].field_type.kind, TypeKind::Int32);
    }

    #[test]
    fn rejects_duplicate_field_names() {
        let mut doc = document();
        let dup = doc.records[0].fields[0].clone();
        doc.records[0].fields.push(dup);
        let err = doc.into_records().unwrap_err();
        assert!(matches!(err, ModelError::DuplicateField { .. }));
    }

    #[test]
    fn record_namespace_override() {
        let mut doc = document();
        doc.records[0].namespace = Some("accounts".to_string());
        let records = doc.into_records().unwrap();
        assert_eq!(records[0].namespace, "accounts");
    }
}
