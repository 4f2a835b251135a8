use actix_session::Session;

use crate::errors::AppError;

const USER_ID_KEY: &str = "user_id";
const USERNAME_KEY: &str = "username";

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>(USER_ID_KEY).unwrap_or(None)
}

/// The logged-in user's id, or 401 when the session carries none.
pub fn require_user_id(session: &Session) -> Result<i64, AppError> {
    get_user_id(session).ok_or(AppError::Unauthenticated)
}

/// Start an authenticated session. The old session id is renewed to avoid fixation.
pub fn log_in(session: &Session, user_id: i64, username: &str) -> Result<(), AppError> {
    session.renew();
    session
        .insert(USER_ID_KEY, user_id)
        .map_err(|e| AppError::Session(format!("Failed to store session: {e}")))?;
    session
        .insert(USERNAME_KEY, username)
        .map_err(|e| AppError::Session(format!("Failed to store session: {e}")))?;
    Ok(())
}

pub fn log_out(session: &Session) {
    session.purge();
}
