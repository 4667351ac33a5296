//! Input validation utilities

use crate::error::{AppError, AppResult};
use crate::models::FIELD_DELIMITER;

const MAX_USERNAME_LENGTH: usize = 64;

/// Name of the credential file's table; a user with this name would overwrite it
const RESERVED_USERNAME: &str = "creds";

/// Validate username
///
/// Usernames double as watchlist file names and record keys.
pub fn validate_username(username: &str) -> AppResult<()> {
    if username.trim().is_empty() {
        return Err(AppError::InvalidInput("Username is required".to_string()));
    }

    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "Username must be at most {} characters long",
            MAX_USERNAME_LENGTH
        )));
    }

    if username.starts_with('.') {
        return Err(AppError::InvalidInput(
            "Username cannot start with a dot".to_string(),
        ));
    }

    if username
        .chars()
        .any(|c| c == FIELD_DELIMITER || c == '/' || c == '\\' || c == ':' || c.is_control())
    {
        return Err(AppError::InvalidInput(
            "Username cannot contain '|', '/', '\\', ':' or control characters".to_string(),
        ));
    }

    if username.eq_ignore_ascii_case(RESERVED_USERNAME) {
        return Err(AppError::InvalidInput(format!(
            "Username '{}' is reserved",
            username
        )));
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.is_empty() {
        return Err(AppError::InvalidInput("Password is required".to_string()));
    }

    if password.contains(['\n', '\r']) {
        return Err(AppError::InvalidInput(
            "Password cannot contain line breaks".to_string(),
        ));
    }

    Ok(())
}
