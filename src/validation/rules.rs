use crate::core::config::ValidationConfig;
use crate::validation::error_bag::ErrorBag;
use validator::ValidateEmail;

/// Characters that satisfy the password special-character rule
pub const SPECIAL_CHARACTERS: &[char] = &['@', '$', '!', '%', '*', '#', '?', '&'];

const PASSWORD_COMPLEXITY_MESSAGE: &str =
    "Password must contain at least 1 uppercase, 1 lowercase, and 1 special character";

/// Anything the rule table can read field values from
pub trait FieldSource {
    /// `None` when the field is missing or empty
    fn field(&self, name: &str) -> Option<&str>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Required,
    /// Minimum length in characters
    MinLength(usize),
    Email,
    ContainsLowercase,
    ContainsUppercase,
    ContainsAnyOf(&'static [char]),
}

impl Rule {
    /// Only `Required` looks at a missing value; every other rule passes on it.
    pub fn passes(&self, value: Option<&str>) -> bool {
        match (self, value) {
            (Rule::Required, value) => value.is_some_and(|v| !v.is_empty()),
            (_, None) => true,
            (Rule::MinLength(min), Some(v)) => v.chars().count() >= *min,
            (Rule::Email, Some(v)) => v.validate_email(),
            (Rule::ContainsLowercase, Some(v)) => v.chars().any(|c| c.is_ascii_lowercase()),
            (Rule::ContainsUppercase, Some(v)) => v.chars().any(|c| c.is_ascii_uppercase()),
            (Rule::ContainsAnyOf(set), Some(v)) => v.chars().any(|c| set.contains(&c)),
        }
    }
}

/// Ordered rules for one field, each with the message emitted on failure
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: Vec<(Rule, String)>,
}

/// Field rules evaluated in order
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct RuleTable {
    fields: Vec<FieldRules>,
}

impl RuleTable {
    pub fn new(fields: Vec<FieldRules>) -> Self {
        Self { fields }
    }

    /// Rules for the registration form
    pub fn registration(config: &ValidationConfig) -> Self {
        Self::new(vec![
            FieldRules {
                field: "name",
                rules: vec![
                    (Rule::Required, "Name is required".to_string()),
                    (
                        Rule::MinLength(config.name_min_length),
                        format!("Name must be at least {} characters", config.name_min_length),
                    ),
                ],
            },
            FieldRules {
                field: "email",
                rules: vec![
                    (Rule::Required, "Email is required".to_string()),
                    (Rule::Email, "Enter a valid email".to_string()),
                ],
            },
            FieldRules {
                field: "password",
                rules: vec![
                    (Rule::Required, "Password is required".to_string()),
                    (
                        Rule::MinLength(config.password_min_length),
                        format!(
                            "Password must be at least {} characters",
                            config.password_min_length
                        ),
                    ),
                    (Rule::ContainsLowercase, PASSWORD_COMPLEXITY_MESSAGE.to_string()),
                    (Rule::ContainsUppercase, PASSWORD_COMPLEXITY_MESSAGE.to_string()),
                    (
                        Rule::ContainsAnyOf(SPECIAL_CHARACTERS),
                        PASSWORD_COMPLEXITY_MESSAGE.to_string(),
                    ),
                ],
            },
        ])
    }

    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }

    /// Run every rule of every field and collect the failures
    pub fn validate(&self, input: &impl FieldSource) -> Result<(), ErrorBag> {
        let mut errors = ErrorBag::new();

        for field_rules in &self.fields {
            let value = input.field(field_rules.field);

            for (rule, message) in &field_rules.rules {
                if !rule.passes(value) {
                    errors.add(field_rules.field, message.as_str());
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::registration::RegistrationInput;

    fn input(name: &str, email: &str, password: &str) -> RegistrationInput {
        let some = |v: &str| (!v.is_empty()).then(|| v.to_string());
        RegistrationInput {
            name: some(name),
            email: some(email),
            password: some(password),
        }
    }

    fn table() -> RuleTable {
        RuleTable::registration(&ValidationConfig::default())
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(table().validate(&input("Alice", "a@b.com", "Abcdefg1!")).is_ok());
    }

    #[test]
    fn test_short_name() {
        let errors = table().validate(&input("Al", "a@b.com", "Abcdefg1!")).unwrap_err();

        assert_eq!(errors.field_names(), vec!["name"]);
        assert_eq!(errors.first("name"), Some("Name must be at least 3 characters"));
    }

    #[test]
    fn test_name_length_counts_characters() {
        // Three characters, six bytes
        assert!(table().validate(&input("Åsé", "a@b.com", "Abcdefg1!")).is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let errors = table()
            .validate(&input("Alice", "not-an-email", "Abcdefg1!"))
            .unwrap_err();

        assert_eq!(errors.field_names(), vec!["email"]);
        assert_eq!(errors.first("email"), Some("Enter a valid email"));
    }

    #[test]
    fn test_weak_password_reports_every_reason_once() {
        let errors = table().validate(&input("Alice", "a@b.com", "weak")).unwrap_err();

        assert_eq!(
            errors.get("password").unwrap(),
            &[
                "Password must be at least 8 characters".to_string(),
                PASSWORD_COMPLEXITY_MESSAGE.to_string(),
            ]
        );
    }

    #[test]
    fn test_password_missing_each_class() {
        let table = table();
        for password in ["ABCDEFG1!", "abcdefg1!", "Abcdefgh1"] {
            let errors = table.validate(&input("Alice", "a@b.com", password)).unwrap_err();
            assert_eq!(
                errors.get("password").unwrap(),
                &[PASSWORD_COMPLEXITY_MESSAGE.to_string()],
                "password {:?}",
                password
            );
        }
    }

    #[test]
    fn test_every_special_character_is_accepted() {
        let table = table();
        for special in SPECIAL_CHARACTERS {
            let password = format!("Abcdefg1{}", special);
            assert!(table.validate(&input("Alice", "a@b.com", &password)).is_ok());
        }
    }

    #[test]
    fn test_other_symbols_are_not_special() {
        let errors = table().validate(&input("Alice", "a@b.com", "Abcdefg1^")).unwrap_err();
        assert!(errors.has("password"));
    }

    #[test]
    fn test_missing_fields_only_report_required() {
        let errors = table().validate(&RegistrationInput::default()).unwrap_err();

        assert_eq!(errors.get("name").unwrap(), &["Name is required".to_string()]);
        assert_eq!(errors.get("email").unwrap(), &["Email is required".to_string()]);
        assert_eq!(errors.get("password").unwrap(), &["Password is required".to_string()]);
    }

    #[test]
    fn test_all_fields_fail_together() {
        let errors = table().validate(&input("Al", "nope", "weak")).unwrap_err();
        assert_eq!(errors.field_names(), vec!["email", "name", "password"]);
    }

    #[test]
    fn test_configured_minimums() {
        let table = RuleTable::registration(&ValidationConfig {
            name_min_length: 5,
            password_min_length: 12,
        });

        let errors = table.validate(&input("Alic", "a@b.com", "Abcdefg1!")).unwrap_err();
        assert_eq!(errors.first("name"), Some("Name must be at least 5 characters"));
        assert_eq!(errors.first("password"), Some("Password must be at least 12 characters"));
    }

    #[test]
    fn test_rule_passes_on_missing_value() {
        assert!(!Rule::Required.passes(None));
        assert!(!Rule::Required.passes(Some("")));
        assert!(Rule::MinLength(3).passes(None));
        assert!(Rule::Email.passes(None));
    }
}
