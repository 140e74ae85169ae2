use crate::error::ApiError;

/// School-year labels the platform serves, kindergarten through 5th grade.
pub const VALID_GRADES: &[&str] = &["K", "1st", "2nd", "3rd", "4th", "5th"];

const MAX_COMMENT_LENGTH: usize = 2000;

/// Validate a grade label from a request path or payload.
///
/// # Examples
/// ```
/// use gp_api::validation::validate_grade;
///
/// assert!(validate_grade("K").is_ok());
/// assert!(validate_grade("13th").is_err());
/// ```
pub fn validate_grade(grade: &str) -> Result<(), ApiError> {
    if grade.is_empty() {
        return Err(ApiError::Validation("Grade cannot be empty".to_string()));
    }

    if !VALID_GRADES.contains(&grade) {
        return Err(ApiError::Validation(format!(
            "Invalid grade: '{}'. Must be one of K, 1st, 2nd, 3rd, 4th, 5th",
            grade
        )));
    }

    Ok(())
}

/// Validate a comment body before it is appended to a game's thread.
pub fn validate_comment(body: &str) -> Result<(), ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::Validation(
            "Comment cannot be empty".to_string(),
        ));
    }

    if body.len() > MAX_COMMENT_LENGTH {
        return Err(ApiError::Validation(format!(
            "Comment must be at most {} characters long",
            MAX_COMMENT_LENGTH
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_grade() {
        // Valid grades
        assert!(validate_grade("K").is_ok());
        assert!(validate_grade("1st").is_ok());
        assert!(validate_grade("5th").is_ok());

        // Invalid grades
        assert!(validate_grade("").is_err());
        assert!(validate_grade("k").is_err()); // Case sensitive
        assert!(validate_grade("6th").is_err());
        assert!(validate_grade("first").is_err());
    }

    #[test]
    fn test_validate_comment() {
        assert!(validate_comment("Great game!").is_ok());
        assert!(validate_comment("").is_err());
        assert!(validate_comment("   ").is_err());
        assert!(validate_comment(&"a".repeat(2001)).is_err());
        assert!(validate_comment(&"a".repeat(2000)).is_ok());
    }
}
