use valforge_model::{FieldType, IrDocument, ModelError, TypeKind};

const USER_IR: &str = r#"{
  "namespace": "users",
  "records": [
    {
      "name": "User",
      "fields": [
        { "name": "Name", "type": "String", "validate": "required" },
        { "name": "Age", "type": "i32", "external_name": "years", "validate": "gte=18" },
        { "name": "Tags", "type": "Vec<String>", "validate": "required" },
        { "name": "Internal", "type": "u64" }
      ]
    },
    {
      "name": "Audit",
      "namespace": "audit",
      "fields": [
        { "name": "Note", "type": "&'a str", "validate": " maxlen=200 , " }
      ]
    }
  ]
}"#;

#[test]
fn ir_document_from_json() {
    let doc: IrDocument = serde_json::from_str(USER_IR).expect("parse IR");
    let records = doc.into_records().expect("convert IR");

    assert_eq!(records.len(), 2);
    let user = &records[0];
    assert_eq!(user.name, "User");
    assert_eq!(user.namespace, "users");
    let names: Vec<_> = user.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Name", "Age", "Tags"]);
    assert_eq!(user.fields[1].external_name, "years");
    assert_eq!(user.fields[2].field_type, FieldType::collection(TypeKind::String));

    let audit = &records[1];
    assert_eq!(audit.namespace, "audit");
    assert_eq!(audit.fields[0].field_type, FieldType::plain(TypeKind::String));
    assert_eq!(audit.fields[0].rule_param("maxlen"), Some("200"));
}

#[test]
fn ir_document_reports_bad_tags() {
    let json = r#"{
      "namespace": "users",
      "records": [
        { "name": "User", "fields": [
          { "name": "Name", "type": "String", "validate": "required,required" }
        ] }
      ]
    }"#;
    let doc: IrDocument = serde_json::from_str(json).expect("parse IR");
    let err = doc.into_records().expect_err("duplicate rule must fail");
    assert!(matches!(err, ModelError::DuplicateRule { .. }));
    assert_eq!(
        err.to_string(),
        "rule 'required' is declared more than once on field 'Name'"
    );
}
