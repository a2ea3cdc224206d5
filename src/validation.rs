//! Field-local form validation
//!
//! Each check targets one named field and fails with a
//! [`ProspectError::Validation`] carrying the field name and a French
//! message, matching what the forms display. Validation always runs before
//! any network call, so a rejected form never reaches the API.

use regex::Regex;

use crate::error::{ProspectError, Result};

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

/// Minimum password length accepted by every password field
pub const PASSWORD_MIN_LEN: usize = 8;

/// Validate an email address field.
///
/// # Errors
///
/// Returns a validation error for the `email` field when the value is empty
/// or not a plausible address.
///
/// # Examples
///
/// ```
/// use prospect::validation::validate_email;
///
/// assert!(validate_email("jean.dubois@example.com").is_ok());
/// assert!(validate_email("pas-un-email").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ProspectError::validation("email", "L'email est requis").into());
    }
    let pattern = Regex::new(EMAIL_PATTERN)?;
    if !pattern.is_match(email) {
        return Err(ProspectError::validation("email", "Adresse email invalide").into());
    }
    Ok(())
}

/// Validate the login password field (required, minimum length).
pub fn validate_login_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(
            ProspectError::validation("mot_de_passe", "Le mot de passe est requis").into(),
        );
    }
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(ProspectError::validation(
            "mot_de_passe",
            "Le mot de passe doit contenir au moins 8 caractères",
        )
        .into());
    }
    Ok(())
}

/// Validate the login form as a whole.
///
/// # Errors
///
/// Returns the first failing field check, email before password.
pub fn validate_login(email: &str, password: &str) -> Result<()> {
    validate_email(email)?;
    validate_login_password(password)?;
    Ok(())
}

/// Validate a new password against the full strength rules.
///
/// The new password must be at least eight characters and contain a
/// lowercase letter, an uppercase letter, a digit and a special character.
pub fn validate_new_password(password: &str) -> Result<()> {
    let field = "nouveau_mot_de_passe";
    if password.is_empty() {
        return Err(
            ProspectError::validation(field, "Le nouveau mot de passe est requis").into(),
        );
    }
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(ProspectError::validation(
            field,
            "Le mot de passe doit contenir au moins 8 caractères",
        )
        .into());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(ProspectError::validation(
            field,
            "Le mot de passe doit contenir au moins une lettre minuscule",
        )
        .into());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ProspectError::validation(
            field,
            "Le mot de passe doit contenir au moins une lettre majuscule",
        )
        .into());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ProspectError::validation(
            field,
            "Le mot de passe doit contenir au moins un chiffre",
        )
        .into());
    }
    if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        return Err(ProspectError::validation(
            field,
            "Le mot de passe doit contenir au moins un caractère spécial",
        )
        .into());
    }
    Ok(())
}

/// Validate the change-password form.
///
/// Checks run field by field: current password required, new password
/// strength, then confirmation presence and match.
///
/// # Errors
///
/// Returns the first failing field check as a [`ProspectError::Validation`].
pub fn validate_change_password(current: &str, new: &str, confirm: &str) -> Result<()> {
    if current.is_empty() {
        return Err(ProspectError::validation(
            "ancien_mot_de_passe",
            "Le mot de passe actuel est requis",
        )
        .into());
    }
    validate_new_password(new)?;
    if confirm.is_empty() {
        return Err(ProspectError::validation(
            "confirmation",
            "La confirmation du mot de passe est requise",
        )
        .into());
    }
    if new != confirm {
        return Err(ProspectError::validation(
            "confirmation",
            "Les mots de passe doivent correspondre",
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_message(result: Result<()>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn test_valid_email_accepted() {
        assert!(validate_email("jean.dubois@example.com").is_ok());
        assert!(validate_email("a+b@sub.domain.fr").is_ok());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let message = validation_message(validate_email("not-an-email"));
        assert!(message.contains("email"));
        assert!(message.contains("Adresse email invalide"));

        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("spaces in@example.com").is_err());
    }

    #[test]
    fn test_empty_email_rejected() {
        let message = validation_message(validate_email(""));
        assert!(message.contains("L'email est requis"));
        assert!(validate_email("   ").is_err());
    }

    #[test]
    fn test_login_password_minimum_length() {
        let message = validation_message(validate_login_password("court"));
        assert!(message.contains("au moins 8 caractères"));
        assert!(validate_login_password("assez-long-123").is_ok());
    }

    #[test]
    fn test_login_password_required() {
        let message = validation_message(validate_login_password(""));
        assert!(message.contains("Le mot de passe est requis"));
    }

    #[test]
    fn test_login_checks_email_before_password() {
        let message = validation_message(validate_login("bad", "short"));
        assert!(message.contains("Adresse email invalide"));
    }

    #[test]
    fn test_new_password_strength_rules() {
        assert!(validate_new_password("Valide#123").is_ok());

        let message = validation_message(validate_new_password("MAJUSCULE#1"));
        assert!(message.contains("lettre minuscule"));

        let message = validation_message(validate_new_password("minuscule#1"));
        assert!(message.contains("lettre majuscule"));

        let message = validation_message(validate_new_password("SansChiffre#"));
        assert!(message.contains("chiffre"));

        let message = validation_message(validate_new_password("SansSpecial1"));
        assert!(message.contains("caractère spécial"));
    }

    #[test]
    fn test_new_password_length_counts_characters() {
        // 7 characters, 9 bytes: must fail on length, not on byte count
        let message = validation_message(validate_new_password("Éà#1Ab2"));
        assert!(message.contains("au moins 8 caractères"));
        assert!(validate_new_password("Éà#1Ab2c").is_ok());
    }

    #[test]
    fn test_change_password_requires_current() {
        let message = validation_message(validate_change_password("", "Valide#123", "Valide#123"));
        assert!(message.contains("Le mot de passe actuel est requis"));
    }

    #[test]
    fn test_change_password_requires_confirmation() {
        let message =
            validation_message(validate_change_password("ancien", "Valide#123", ""));
        assert!(message.contains("La confirmation du mot de passe est requise"));
    }

    #[test]
    fn test_change_password_confirmation_must_match() {
        let message =
            validation_message(validate_change_password("ancien", "Valide#123", "Valide#124"));
        assert!(message.contains("doivent correspondre"));
    }

    #[test]
    fn test_change_password_accepts_matching_strong_password() {
        assert!(validate_change_password("ancien", "Valide#123", "Valide#123").is_ok());
    }
}
