// Code generated by valforge. DO NOT EDIT.
// Namespace: users

use subtle::ConstantTimeEq;

impl User {
    /// Validates every annotated field and collects all failures.
    pub fn validate(&self) -> Result<(), valforge_runtime::ValidationError> {
        let mut verr = valforge_runtime::ValidationError::new();

        if self.Name.is_empty() {
            verr.add_field_error("name", "name is required", &self.Name);
        }

        if self.Age < 18 {
            verr.add_field_error("age", "age must be greater than or equal to 18", &self.Age);
        }

        if self.Pwd1.chars().count() < 6 {
            verr.add_field_error("pwd1", "pwd1 must be at least 6 characters", &self.Pwd1);
        }

        if !bool::from(self.Pwd2.as_bytes().ct_eq(self.Pwd1.as_bytes())) {
            verr.add_field_error("pwd2", "pwd2 must match Pwd1", &self.Pwd2);
        }

        if let Err(err) = valforge_runtime::validate_email(&self.Email) {
            verr.add_field_error("email", err.to_string(), &self.Email);
        }

        if self.Color.is_empty() {
            verr.add_field_error("color", "color is required", &self.Color);
        }

        verr.into_result()
    }
}
