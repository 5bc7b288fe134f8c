//! Client-side validation for the auth form.
//!
//! The web client renders one form switched between login, registration and
//! password-recovery modes; validation runs before any request is issued and
//! short-circuits with a user-facing message. Messages are kept in
//! Portuguese, matching the product copy.

use thiserror::Error;

use crate::models::RegisterData;

/// Minimum password length accepted at registration
const MIN_PASSWORD_LENGTH: usize = 8;

/// Which variant of the auth form is being submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Login,
    Register,
    ForgotPassword,
}

/// Validation failure; the Display string is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Todos os campos obrigatórios devem ser preenchidos")]
    MissingFields,

    #[error("As senhas não coincidem")]
    PasswordMismatch,

    #[error("A senha deve ter pelo menos 8 caracteres")]
    PasswordTooShort,

    #[error("A senha deve conter pelo menos uma letra maiúscula")]
    PasswordNeedsUppercase,

    #[error("A senha deve conter pelo menos uma letra minúscula")]
    PasswordNeedsLowercase,

    #[error("A senha deve conter pelo menos um número")]
    PasswordNeedsDigit,

    #[error("Email inválido")]
    InvalidEmail,
}

/// Input state for the auth form.
///
/// `email` doubles as the username field in login mode; `confirm_password`,
/// `first_name` and `last_name` only matter at registration.
#[derive(Debug, Clone)]
pub struct AuthForm {
    pub mode: FormMode,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
}

impl AuthForm {
    pub fn new(mode: FormMode) -> Self {
        Self {
            mode,
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    /// Run the client-side checks for the current mode.
    ///
    /// Checks run in the order the web client applied them: required
    /// fields, password confirmation, password strength, email shape.
    pub fn validate(&self) -> Result<(), FormError> {
        match self.mode {
            FormMode::Login => {
                if self.email.is_empty() || self.password.is_empty() {
                    return Err(FormError::MissingFields);
                }
                Ok(())
            }
            FormMode::Register => {
                if self.email.is_empty()
                    || self.password.is_empty()
                    || self.confirm_password.is_empty()
                {
                    return Err(FormError::MissingFields);
                }
                if self.password != self.confirm_password {
                    return Err(FormError::PasswordMismatch);
                }
                check_password_strength(&self.password)?;
                if !is_valid_email(&self.email) {
                    return Err(FormError::InvalidEmail);
                }
                Ok(())
            }
            FormMode::ForgotPassword => {
                if self.email.is_empty() {
                    return Err(FormError::MissingFields);
                }
                if !is_valid_email(&self.email) {
                    return Err(FormError::InvalidEmail);
                }
                Ok(())
            }
        }
    }

    /// Build the registration payload from a validated form.
    ///
    /// Empty name fields are sent as null; the server decides everything
    /// else (new accounts are active, unverified and unprivileged).
    pub fn register_data(&self) -> RegisterData {
        RegisterData {
            email: self.email.clone(),
            password: self.password.clone(),
            first_name: non_empty(&self.first_name),
            last_name: non_empty(&self.last_name),
            is_active: true,
            is_verified: false,
            is_superuser: false,
        }
    }
}

/// Password complexity rules applied at registration and password reset.
pub fn check_password_strength(password: &str) -> Result<(), FormError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(FormError::PasswordTooShort);
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(FormError::PasswordNeedsUppercase);
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        return Err(FormError::PasswordNeedsLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(FormError::PasswordNeedsDigit);
    }
    Ok(())
}

/// Checks used by the standalone password-reset screen: confirmation match
/// plus the registration complexity rules.
pub fn validate_password_reset(new_password: &str, confirm: &str) -> Result<(), FormError> {
    if new_password.is_empty() || confirm.is_empty() {
        return Err(FormError::MissingFields);
    }
    if new_password != confirm {
        return Err(FormError::PasswordMismatch);
    }
    check_password_strength(new_password)
}

/// Validate that a string looks like an email address.
/// Mirrors the web client's check: non-empty local part, one '@', and a
/// dotted domain with no whitespace anywhere.
pub fn is_valid_email(s: &str) -> bool {
    let mut parts = s.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !local.contains(char::is_whitespace)
                && !domain.contains(char::is_whitespace)
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
        }
        _ => false,
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form() -> AuthForm {
        let mut form = AuthForm::new(FormMode::Register);
        form.email = "a@b.com".to_string();
        form.password = "Secret123".to_string();
        form.confirm_password = "Secret123".to_string();
        form
    }

    #[test]
    fn test_register_password_mismatch() {
        let mut form = register_form();
        form.confirm_password = "Different123".to_string();

        let err = form.validate().expect_err("mismatch must fail validation");
        assert_eq!(err, FormError::PasswordMismatch);
        assert_eq!(err.to_string(), "As senhas não coincidem");
    }

    #[test]
    fn test_register_missing_fields_checked_first() {
        let mut form = register_form();
        form.confirm_password = String::new();

        // Required-field check wins over the mismatch check
        assert_eq!(form.validate(), Err(FormError::MissingFields));
    }

    #[test]
    fn test_register_password_strength_order() {
        let mut form = register_form();

        form.password = "Ab1".to_string();
        form.confirm_password = form.password.clone();
        assert_eq!(form.validate(), Err(FormError::PasswordTooShort));

        form.password = "secret123".to_string();
        form.confirm_password = form.password.clone();
        assert_eq!(form.validate(), Err(FormError::PasswordNeedsUppercase));

        form.password = "SECRET123".to_string();
        form.confirm_password = form.password.clone();
        assert_eq!(form.validate(), Err(FormError::PasswordNeedsLowercase));

        form.password = "Secretpassword".to_string();
        form.confirm_password = form.password.clone();
        assert_eq!(form.validate(), Err(FormError::PasswordNeedsDigit));
    }

    #[test]
    fn test_register_rejects_bad_email() {
        let mut form = register_form();
        form.email = "not-an-email".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidEmail));
    }

    #[test]
    fn test_register_valid_form_passes() {
        assert_eq!(register_form().validate(), Ok(()));
    }

    #[test]
    fn test_login_skips_strength_rules() {
        let mut form = AuthForm::new(FormMode::Login);
        form.email = "a@b.com".to_string();
        // Weaker than the registration rules allow; login does not care
        form.password = "Secret1".to_string();
        assert_eq!(form.validate(), Ok(()));

        form.password = String::new();
        assert_eq!(form.validate(), Err(FormError::MissingFields));
    }

    #[test]
    fn test_forgot_password_requires_valid_email() {
        let mut form = AuthForm::new(FormMode::ForgotPassword);
        assert_eq!(form.validate(), Err(FormError::MissingFields));

        form.email = "user@".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidEmail));

        form.email = "user@example.com".to_string();
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.example.org"));

        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plain"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@example."));
        assert!(!is_valid_email("user@exa mple.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn test_register_data_maps_empty_names_to_null() {
        let mut form = register_form();
        form.first_name = "  ".to_string();
        form.last_name = "Silva".to_string();

        let data = form.register_data();
        assert_eq!(data.first_name, None);
        assert_eq!(data.last_name.as_deref(), Some("Silva"));
        assert!(data.is_active);
        assert!(!data.is_verified);
        assert!(!data.is_superuser);
    }

    #[test]
    fn test_validate_password_reset() {
        assert_eq!(
            validate_password_reset("Secret123", "Secret124"),
            Err(FormError::PasswordMismatch)
        );
        assert_eq!(
            validate_password_reset("short1A", "short1A"),
            Err(FormError::PasswordTooShort)
        );
        assert_eq!(validate_password_reset("Secret123", "Secret123"), Ok(()));
    }
}
