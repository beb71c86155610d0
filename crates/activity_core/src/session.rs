use shared::error::ValidationError;

/// Name and email captured before an activity run. Lives as long as the
/// controller's session and is dropped by `ActivityController::end_session`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    name: String,
    email: String,
}

impl SessionIdentity {
    /// Trims both fields and lowercases the email. Empty input is refused.
    pub fn capture(name: &str, email: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        let email = email.trim().to_lowercase();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if email.is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        Ok(Self {
            name: name.to_string(),
            email,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
