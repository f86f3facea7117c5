//! Integration tests for validation code generation.

use valforge_core::{CompileError, RuleRegistry, compile};
use valforge_model::{
    ErrorKind, GenerateOptions, IrDocument, IrField, IrRecord, ValidationField, ValidationRecord,
};

fn field(name: &str, type_token: &str, tag: &str) -> ValidationField {
    ValidationField::from_tag(name, type_token, tag).unwrap()
}

fn user_record() -> ValidationRecord {
    ValidationRecord::new("User", "users")
        .with_field(field("Name", "String", "required"))
        .with_field(field("Age", "i32", "gte=18"))
        .with_field(field("Pwd1", "String", "minlen=6"))
        .with_field(field("Pwd2", "String", "eqfieldsecure=Pwd1"))
        .with_field(field("Email", "String", "email"))
        .with_field(field("Color", "String", "required"))
}

fn account_record() -> ValidationRecord {
    ValidationRecord::new("Account", "accounts")
        .with_field(field("Username", "String", "required,minlen=3,maxlen=32"))
        .with_field(field("Pin", "String", "len=4"))
        .with_field(field("Age", "u8", "required,gte=13,lt=130"))
        .with_field(field("Score", "i64", "gt=-10,gte=-5,lt=100,lte=99"))
        .with_field(field("Score2", "i64", "eqfield=Score"))
}

#[test]
fn user_record_matches_fixture() {
    let registry = RuleRegistry::with_builtins().unwrap();
    let units = compile(&[user_record()], &registry, &GenerateOptions::default()).unwrap();

    assert_eq!(units.len(), 1);
    let unit = &units[0];
    assert_eq!(unit.namespace, "users");
    assert_eq!(unit.dependencies, vec!["subtle::ConstantTimeEq".to_string()]);
    assert_eq!(unit.records, vec!["User".to_string()]);
    assert_eq!(unit.source, include_str!("fixtures/user_validation.gen.rs"));
}

#[test]
fn account_record_snapshot() {
    let registry = RuleRegistry::with_builtins().unwrap();
    let units = compile(&[account_record()], &registry, &GenerateOptions::default()).unwrap();
    assert!(units[0].dependencies.is_empty());
    let source = &units[0].source;
    assert_eq!(source, include_str!("fixtures/account_validation.gen.rs"));
    insta::assert_snapshot!("account_record", source);
}

#[test]
fn unknown_rule_blocks_generation() {
    let registry = RuleRegistry::with_builtins().unwrap();
    let record = ValidationRecord::new("User", "users").with_field(field("Name", "String", "foo"));

    let err = compile(&[record], &registry, &GenerateOptions::default()).unwrap_err();
    let diagnostics = err.diagnostics().expect("diagnostics");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.count_of(ErrorKind::Missing), 1);
    assert_eq!(err.to_string(), "unknown validation rule 'foo'");
}

#[test]
fn all_diagnostics_are_reported() {
    let registry = RuleRegistry::with_builtins().unwrap();
    let records = vec![
        ValidationRecord::new("User", "users")
            .with_field(field("Name", "String", "gt=3"))
            .with_field(field("Pwd2", "String", "eqfieldsecure=Missing")),
        ValidationRecord::new("Order", "shop").with_field(field("Qty", "u8", "lte=300")),
    ];

    let err = compile(&records, &registry, &GenerateOptions::default()).unwrap_err();
    let diagnostics = err.diagnostics().expect("diagnostics");
    let messages: Vec<_> = diagnostics.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "rule 'gt' is not compatible with type 'string'",
            "eqfieldsecure references unknown field 'Missing'",
            "rule 'lte' value 300 is out of range for type 'uint8'",
        ]
    );
    assert_eq!(
        err.to_string(),
        "rule 'gt' is not compatible with type 'string' (and more)"
    );
}

#[test]
fn no_annotated_records() {
    let registry = RuleRegistry::with_builtins().unwrap();
    let record = ValidationRecord::new("Plain", "users")
        .with_field(ValidationField::new("Name", "String".into()));

    let err = compile(&[record], &registry, &GenerateOptions::default()).unwrap_err();
    assert!(matches!(err, CompileError::NothingToValidate));
    assert_eq!(err.to_string(), "no records with validation rules found");

    let err = compile(&[], &registry, &GenerateOptions::default()).unwrap_err();
    assert!(matches!(err, CompileError::NothingToValidate));
}

#[test]
fn reserved_keyword_fields_use_raw_identifiers() {
    let registry = RuleRegistry::with_builtins().unwrap();
    let record = ValidationRecord::new("type", "users")
        .with_field(field("box", "String", "required"))
        .with_field(field("yield", "u32", "lte=10"));

    let units = compile(&[record], &registry, &GenerateOptions::default()).unwrap();
    let source = &units[0].source;
    assert!(source.contains("impl r#type {"));
    assert!(source.contains("if self.r#box.is_empty() {"));
    assert!(source.contains("if self.r#yield > 10 {"));
    assert!(!source.contains("self.box"));
}

#[test]
fn names_that_are_not_identifiers_block_generation() {
    let registry = RuleRegistry::with_builtins().unwrap();
    let record = ValidationRecord::new("User", "users")
        .with_field(field("first-name", "String", "required"))
        .with_field(ValidationField::new("x.is_empty() || true", "String".into()).with_rule("required", ""))
        .with_field(field("crate", "String", "required"));

    let err = compile(&[record], &registry, &GenerateOptions::default()).unwrap_err();
    let diagnostics = err.diagnostics().expect("diagnostics");
    assert_eq!(diagnostics.len(), 3);
    assert_eq!(diagnostics.count_of(ErrorKind::Invalid), 3);
    assert_eq!(
        err.to_string(),
        "field name 'first-name' is not a valid identifier (and more)"
    );
}

#[test]
fn invalid_options_are_rejected_before_checking() {
    let registry = RuleRegistry::with_builtins().unwrap();
    let options = GenerateOptions::new().with_method_name("validate(); evil");
    let err = compile(&[user_record()], &registry, &options).unwrap_err();
    assert!(matches!(err, CompileError::Options(_)));
    assert_eq!(err.to_string(), "invalid method name 'validate(); evil'");
}

fn ir_field(name: &str, type_name: &str, validate: &str) -> IrField {
    IrField {
        name: name.to_string(),
        type_name: type_name.to_string(),
        external_name: None,
        validate: validate.to_string(),
    }
}

#[test]
fn eqfield_target_without_tag_is_unknown() {
    let registry = RuleRegistry::with_builtins().unwrap();
    let document = IrDocument {
        namespace: "users".to_string(),
        records: vec![IrRecord {
            name: "User".to_string(),
            namespace: None,
            fields: vec![
                ir_field("Pwd1", "String", ""),
                ir_field("Pwd2", "String", "eqfieldsecure=Pwd1"),
                ir_field("Total", "i32", ""),
                ir_field("Check", "i32", "eqfield=Total"),
            ],
        }],
    };

    let records = document.into_records().unwrap();
    assert_eq!(records[0].fields.len(), 2);

    let err = compile(&records, &registry, &GenerateOptions::default()).unwrap_err();
    let diagnostics = err.diagnostics().expect("diagnostics");
    assert_eq!(diagnostics.count_of(ErrorKind::Missing), 2);
    let messages: Vec<_> = diagnostics.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "eqfieldsecure references unknown field 'Pwd1'",
            "eqfield references unknown field 'Total'",
        ]
    );
}

#[test]
fn eqfield_target_with_tag_is_accepted() {
    let registry = RuleRegistry::with_builtins().unwrap();
    let record = ValidationRecord::new("User", "users")
        .with_field(field("Total", "i32", "required"))
        .with_field(field("Check", "i32", "eqfield=Total"));

    let units = compile(&[record], &registry, &GenerateOptions::default()).unwrap();
    assert!(units[0].source.contains("if self.Check != self.Total {"));
}
