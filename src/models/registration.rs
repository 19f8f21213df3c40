use crate::validation::error_bag::ErrorBag;
use crate::validation::rules::FieldSource;
use serde::{Deserialize, Serialize};

pub const SAVED_MESSAGE: &str = "User saved successfully";

/// A stored row of the `user_forms` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRegistration {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// PHC-format Argon2id hash, never the plaintext
    pub password: String,
    /// Unix timestamp
    pub created_at: i64,
    /// Unix timestamp
    pub updated_at: i64,
}

/// Fields needed to insert a new registration
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Body of `POST /submit-form`
///
/// Every field is optional so that a missing field is reported as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Submission after trimming; empty values become `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl SubmitRequest {
    /// Trim name and email, keep the password verbatim
    ///
    /// A password of only whitespace still counts as missing.
    pub fn normalized(self) -> RegistrationInput {
        RegistrationInput {
            name: non_blank(self.name.map(|v| v.trim().to_string())),
            email: non_blank(self.email.map(|v| v.trim().to_string())),
            password: non_blank(self.password),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl FieldSource for RegistrationInput {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => self.name.as_deref(),
            "email" => self.email.as_deref(),
            "password" => self.password.as_deref(),
            _ => None,
        }
    }
}

/// Field values held by the client form controller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SavedResponse {
    pub status: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RejectedResponse {
    pub status: bool,
    pub errors: ErrorBag,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_trims_name_and_email() {
        let request = SubmitRequest {
            name: Some("  Alice \t".to_string()),
            email: Some(" a@b.com ".to_string()),
            password: Some(" Abcdefg1! ".to_string()),
        };

        let input = request.normalized();
        assert_eq!(input.name.as_deref(), Some("Alice"));
        assert_eq!(input.email.as_deref(), Some("a@b.com"));
        // Passwords keep their whitespace
        assert_eq!(input.password.as_deref(), Some(" Abcdefg1! "));
    }

    #[test]
    fn test_normalized_blank_becomes_none() {
        let request = SubmitRequest {
            name: Some("   ".to_string()),
            email: Some(String::new()),
            password: None,
        };

        assert_eq!(request.normalized(), RegistrationInput::default());
    }

    #[test]
    fn test_normalized_whitespace_password_is_missing() {
        let request = SubmitRequest {
            name: None,
            email: None,
            password: Some("        ".to_string()),
        };

        assert!(request.normalized().password.is_none());
    }

    #[test]
    fn test_submit_request_missing_and_null_fields() {
        let request: SubmitRequest =
            serde_json::from_str(r#"{"name": null, "password": "x"}"#).unwrap();

        assert!(request.name.is_none());
        assert!(request.email.is_none());
        assert_eq!(request.password.as_deref(), Some("x"));
    }

    #[test]
    fn test_field_source_lookup() {
        let input = RegistrationInput {
            name: Some("Alice".to_string()),
            email: None,
            password: Some("secret".to_string()),
        };

        assert_eq!(input.field("name"), Some("Alice"));
        assert_eq!(input.field("email"), None);
        assert_eq!(input.field("password"), Some("secret"));
        assert_eq!(input.field("unknown"), None);
    }
}
