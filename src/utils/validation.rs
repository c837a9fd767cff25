//! Centralized request validation.

/// Maximum target name length in characters
pub const MAX_NAME_LENGTH: usize = 20;

/// Minimum target name length in characters
pub const MIN_NAME_LENGTH: usize = 1;

/// Validation error types for target names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Name must be between {MIN_NAME_LENGTH} and {MAX_NAME_LENGTH} characters")]
    NameTooLong,
    #[error("Name contains control characters")]
    InvalidCharacters,
}

impl ValidationError {
    /// Short machine-readable identifier used in error responses
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::NameTooLong => "name_too_long",
            Self::InvalidCharacters => "invalid_characters",
        }
    }
}

/// Validate a target name before it is handed to the search.
///
/// Returns the trimmed name. Length is counted in characters, not bytes.
///
/// # Errors
///
/// Returns `ValidationError::EmptyName` if the name is blank,
/// `ValidationError::NameTooLong` if it exceeds [`MAX_NAME_LENGTH`], or
/// `ValidationError::InvalidCharacters` if it contains control characters.
///
/// # Examples
///
/// ```
/// use sticker_solver::utils::validation::{validate_name, ValidationError};
///
/// assert_eq!(validate_name("  NaVi "), Ok("NaVi".to_string()));
/// assert_eq!(validate_name("   "), Err(ValidationError::EmptyName));
/// ```
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }

    if trimmed.chars().any(char::is_control) {
        return Err(ValidationError::InvalidCharacters);
    }

    Ok(trimmed.to_string())
}
