use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::{AuthError, FieldErrors};
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password, SessionToken, ValueObjectError};

/// Command for logging in a user
#[derive(Debug, Clone, Default)]
pub struct LoginUserCommand {
  pub email: String,
  pub password: String,
  /// Use the long-lived session lifetime
  pub remember_me: bool,
}

/// Response after successful user login
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
  pub user: User,
  /// Goes into the session cookie; only its hash is stored
  pub session_token: SessionToken,
  pub expires_at: DateTime<Utc>,
}

/// Use case for logging in a user
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the user login use case
  ///
  /// # Errors
  /// - `AuthError::InvalidForm` when email or password is blank
  /// - `AuthError::InvalidCredentials` for a malformed or unknown email, or a wrong password
  /// - `AuthError::PendingApproval` when the account has not been approved
  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, AuthError> {
    let mut errors = FieldErrors::new();
    if command.email.trim().is_empty() {
      errors.add("email", ValueObjectError::Required.to_string());
    }
    if command.password.is_empty() {
      errors.add("password", ValueObjectError::Required.to_string());
    }
    if !errors.is_empty() {
      return Err(AuthError::InvalidForm(errors));
    }

    // Anything that cannot be an address cannot match an account
    let email = Email::new(command.email).map_err(|_| AuthError::InvalidCredentials)?;
    let password = Password::new(command.password).map_err(|_| AuthError::InvalidCredentials)?;

    let (user, session, session_token) = self
      .auth_service
      .login(email, password, command.remember_me)
      .await?;

    tracing::info!(user_id = %user.id, remember_me = command.remember_me, "User logged in");

    Ok(LoginUserResponse {
      user,
      session_token,
      expires_at: session.expires_at,
    })
  }
}
