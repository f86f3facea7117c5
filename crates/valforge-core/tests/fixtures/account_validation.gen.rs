// Code generated by valforge. DO NOT EDIT.
// Namespace: accounts

impl Account {
    /// Validates every annotated field and collects all failures.
    pub fn validate(&self) -> Result<(), valforge_runtime::ValidationError> {
        let mut verr = valforge_runtime::ValidationError::new();

        if self.Username.is_empty() {
            verr.add_field_error("username", "username is required", &self.Username);
        }
        if self.Username.chars().count() > 32 {
            verr.add_field_error("username", "username must be at most 32 characters", &self.Username);
        }
        if self.Username.chars().count() < 3 {
            verr.add_field_error("username", "username must be at least 3 characters", &self.Username);
        }

        if self.Pin.chars().count() != 4 {
            verr.add_field_error("pin", "pin must be exactly 4 characters", &self.Pin);
        }

        if self.Age == 0 {
            verr.add_field_error("age", "age is required", &self.Age);
        }
        if self.Age < 13 {
            verr.add_field_error("age", "age must be greater than or equal to 13", &self.Age);
        }
        if self.Age >= 130 {
            verr.add_field_error("age", "age must be less than 130", &self.Age);
        }

        if self.Score <= -10 {
            verr.add_field_error("score", "score must be greater than -10", &self.Score);
        }
        if self.Score < -5 {
            verr.add_field_error("score", "score must be greater than or equal to -5", &self.Score);
        }
        if self.Score >= 100 {
            verr.add_field_error("score", "score must be less than 100", &self.Score);
        }
        if self.Score > 99 {
            verr.add_field_error("score", "score must be less than or equal to 99", &self.Score);
        }

        if self.Score2 != self.Score {
            verr.add_field_error("score2", "score2 must match Score", &self.Score2);
        }

        verr.into_result()
    }
}
