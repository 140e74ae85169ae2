use validator::ValidateEmail;

use crate::error::ApiError;

/// Account types a visitor can register as.
pub const VALID_ACCOUNT_TYPES: &[&str] = &["parent", "institution", "student"];

/// Validate email format using the validator crate
pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if email.is_empty() {
        return Err(ApiError::Validation("Email cannot be empty".to_string()));
    }

    if !email.validate_email() {
        return Err(ApiError::Validation("Invalid email format".to_string()));
    }

    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < 8 {
        return Err(ApiError::Validation(
            "Password must be at least 8 characters long".to_string(),
        ));
    }

    if password.len() > 128 {
        return Err(ApiError::Validation(
            "Password must be at most 128 characters long".to_string(),
        ));
    }

    // Require at least one letter and one number
    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_number = password.chars().any(|c| c.is_numeric());

    if !has_letter || !has_number {
        return Err(ApiError::Validation(
            "Password must contain at least one letter and one number".to_string(),
        ));
    }

    Ok(())
}

/// Validate the account type discriminator
pub fn validate_account_type(account_type: &str) -> Result<(), ApiError> {
    if !VALID_ACCOUNT_TYPES.contains(&account_type) {
        return Err(ApiError::Validation(format!(
            "Invalid account type: '{}'. Must be one of parent, institution, student",
            account_type
        )));
    }

    Ok(())
}
