use std::sync::Arc;

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::SessionToken;

/// Resolves a session cookie value to its user
pub struct GetCurrentUserUseCase {
  auth_service: Arc<AuthService>,
}

impl GetCurrentUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// # Errors
  /// Returns `AuthError::InvalidSession` for a malformed, unknown or expired
  /// token, and for users who are no longer approved.
  pub async fn execute(&self, session_token: &str) -> Result<User, AuthError> {
    let token = SessionToken::from_string(session_token).map_err(|_| AuthError::InvalidSession)?;

    self.auth_service.validate_session(token).await
  }
}
