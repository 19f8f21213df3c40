use crate::client::api::{FormClient, SubmitOutcome};
use crate::models::registration::RegistrationForm;
use crate::validation::error_bag::ErrorBag;
use anyhow::Result;
use tracing::warn;

pub const GENERIC_FAILURE: &str = "Something went wrong, please try again";

/// Local state behind the registration form
///
/// Mirrors what the page shows: the three inputs, the per-field errors from
/// the last submission, and at most one banner message.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    pub form: RegistrationForm,
    pub errors: ErrorBag,
    pub success_message: Option<String>,
    pub failure_message: Option<String>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit the current fields: exactly one request, no retries
    pub async fn submit(&mut self, client: &FormClient) {
        self.reset_feedback();
        let result = client.submit(&self.form).await;
        self.apply(result);
    }

    /// Fold the result of a submission into the state
    pub fn apply(&mut self, result: Result<SubmitOutcome>) {
        self.reset_feedback();

        match result {
            Ok(SubmitOutcome::Saved { message }) => {
                self.success_message = Some(message);
                self.form = RegistrationForm::default();
            }
            Ok(SubmitOutcome::Rejected(errors)) => {
                self.errors = errors;
            }
            Err(e) => {
                warn!(error = %e, "Form submission failed");
                self.failure_message = Some(GENERIC_FAILURE.to_string());
            }
        }
    }

    /// The error shown under a field (only the first one is displayed)
    pub fn first_error(&self, field: &str) -> Option<&str> {
        self.errors.first(field)
    }

    fn reset_feedback(&mut self) {
        self.errors.clear();
        self.success_message = None;
        self.failure_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::routes::build_router;
    use crate::testing::create_test_state;
    use anyhow::anyhow;

    fn filled(name: &str, email: &str, password: &str) -> FormController {
        FormController {
            form: RegistrationForm {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            },
            ..FormController::default()
        }
    }

    #[test]
    fn test_apply_saved_clears_fields() {
        let mut controller = filled("Alice", "a@b.com", "Abcdefg1!");
        controller.errors.add("name", "stale");

        controller.apply(Ok(SubmitOutcome::Saved {
            message: "User saved successfully".to_string(),
        }));

        assert_eq!(controller.success_message.as_deref(), Some("User saved successfully"));
        assert_eq!(controller.form, RegistrationForm::default());
        assert!(controller.errors.is_empty());
        assert!(controller.failure_message.is_none());
    }

    #[test]
    fn test_apply_rejected_replaces_errors() {
        let mut controller = filled("Al", "a@b.com", "Abcdefg1!");
        controller.errors.add("password", "stale");
        controller.success_message = Some("old".to_string());

        let mut errors = ErrorBag::new();
        errors.add("name", "Name must be at least 3 characters");
        controller.apply(Ok(SubmitOutcome::Rejected(errors)));

        assert_eq!(controller.first_error("name"), Some("Name must be at least 3 characters"));
        assert_eq!(controller.first_error("password"), None);
        assert!(controller.success_message.is_none());
        // Fields stay so the user can fix them
        assert_eq!(controller.form.name, "Al");
    }

    #[test]
    fn test_apply_failure_sets_generic_message() {
        let mut controller = filled("Alice", "a@b.com", "Abcdefg1!");

        controller.apply(Err(anyhow!("connection refused")));

        assert_eq!(controller.failure_message.as_deref(), Some(GENERIC_FAILURE));
        assert!(controller.errors.is_empty());
        assert_eq!(controller.form.name, "Alice");
    }

    async fn spawn_server() -> (tempfile::TempDir, String) {
        let (dir, state) = create_test_state().await;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, build_router(state)).await.unwrap();
        });

        (dir, format!("http://{}", addr))
    }

    #[tokio::test]
    async fn test_submit_against_server() {
        let (_dir, base_url) = spawn_server().await;
        let client = FormClient::connect(base_url).await.unwrap();
        assert_eq!(client.csrf_token().len(), 64);

        let mut controller = filled("Al", "not-an-email", "weak");
        controller.submit(&client).await;

        assert!(controller.first_error("name").is_some());
        assert_eq!(controller.first_error("email"), Some("Enter a valid email"));
        assert_eq!(
            controller.first_error("password"),
            Some("Password must be at least 8 characters")
        );
        assert!(controller.success_message.is_none());

        controller.form = RegistrationForm {
            name: "Alice".to_string(),
            email: "a@b.com".to_string(),
            password: "Abcdefg1!".to_string(),
        };
        controller.submit(&client).await;

        assert_eq!(controller.success_message.as_deref(), Some("User saved successfully"));
        assert!(controller.errors.is_empty());
        assert_eq!(controller.form, RegistrationForm::default());
    }

    #[tokio::test]
    async fn test_submit_with_bad_token_is_generic_failure() {
        let (_dir, base_url) = spawn_server().await;
        let client = FormClient::with_token(base_url, "forged").unwrap();

        let mut controller = filled("Alice", "a@b.com", "Abcdefg1!");
        controller.submit(&client).await;

        assert_eq!(controller.failure_message.as_deref(), Some(GENERIC_FAILURE));
        assert!(controller.errors.is_empty());
        assert!(controller.success_message.is_none());
    }
}
