use crate::{
    error::{AppError, AppResult},
    services::validation::{validate_password, validate_username},
    store::{CredentialStore, WatchlistStore},
};

/// Result of checking a username/password pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated,
    /// No such user; the caller offers registration
    UnknownUser,
    WrongPassword,
}

/// Checks credentials against the credential store
pub fn login(
    credentials: &CredentialStore,
    username: &str,
    password: &str,
) -> AppResult<LoginOutcome> {
    let outcome = match credentials.find_user(username)? {
        None => LoginOutcome::UnknownUser,
        Some(stored) if stored == password => LoginOutcome::Authenticated,
        Some(_) => LoginOutcome::WrongPassword,
    };

    tracing::info!(username = %username, outcome = ?outcome, "Login attempt");
    Ok(outcome)
}

/// Registers a new user with an empty watchlist
///
/// The username is claimed and the credential written in one step, so of two
/// concurrent registrations for the same name only one succeeds. If the
/// watchlist cannot be created afterwards the credential is withdrawn again.
pub fn register(
    credentials: &CredentialStore,
    watchlists: &WatchlistStore,
    username: &str,
    password: &str,
) -> AppResult<()> {
    validate_username(username)?;
    validate_password(password)?;

    if !credentials.add_new_user(username, password)? {
        return Err(AppError::Conflict(format!(
            "User {} already exists",
            username
        )));
    }

    if let Err(e) = watchlists.create(username) {
        if let Err(rollback) = credentials.remove_user(username) {
            tracing::error!(
                username = %username,
                error = %rollback,
                "Failed to roll back credential"
            );
        }
        return Err(e);
    }

    Ok(())
}
