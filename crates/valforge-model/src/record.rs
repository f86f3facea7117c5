//! Records and fields handed to the compiler.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::kind::FieldType;
use crate::tag::{parse_tag, to_snake_case};

/// One annotated field of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationField {
    /// Identifier in the host record; unique within the record.
    pub name: String,
    pub field_type: FieldType,
    /// Name reported in validation messages.
    pub external_name: String,
    /// Rule name → raw parameter; the empty string means no parameter.
    pub rules: BTreeMap<String, String>,
}

impl ValidationField {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        let external_name = to_snake_case(&name);
        Self {
            name,
            field_type,
            external_name,
            rules: BTreeMap::new(),
        }
    }

    /// Build a field from a type token and a raw validation tag.
    pub fn from_tag(name: impl Into<String>, type_token: &str, tag: &str) -> Result<Self> {
        Self::with_tag(name, FieldType::classify(type_token), tag)
    }

    /// Build a field from an already classified type and a raw tag.
    pub fn with_tag(name: impl Into<String>, field_type: FieldType, tag: &str) -> Result<Self> {
        let name = name.into();
        let rules = parse_tag(&name, tag)?;
        let mut field = Self::new(name, field_type);
        field.rules = rules;
        Ok(field)
    }

    pub fn with_external_name(mut self, external_name: impl Into<String>) -> Self {
        self.external_name = external_name.into();
        self
    }

    pub fn with_rule(mut self, rule: impl Into<String>, param: impl Into<String>) -> Self {
        self.rules.insert(rule.into(), param.into());
        self
    }

    pub fn has_rules(&self) -> bool {
        !self.rules.is_empty()
    }

    /// Raw parameter of a rule, if the rule is declared.
    pub fn rule_param(&self, rule: &str) -> Option<&str> {
        self.rules.get(rule).map(String::as_str)
    }
}

/// A record type with its annotated fields in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub name: String,
    pub namespace: String,
    pub fields: Vec<ValidationField>,
}

impl ValidationRecord {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: ValidationField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&ValidationField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns true when at least one field carries a rule.
    pub fn has_rules(&self) -> bool {
        self.fields.iter().any(ValidationField::has_rules)
    }

    /// Number of rule declarations across all fields.
    pub fn rule_count(&self) -> usize {
        self.fields.iter().map(|field| field.rules.len()).sum()
    }
}
