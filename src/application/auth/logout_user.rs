use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::SessionToken;

/// Use case for logging out a user
pub struct LogoutUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LogoutUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Deletes the session behind `session_token`
  ///
  /// # Errors
  /// Returns `AuthError::InvalidSession` if the token is malformed or unknown
  pub async fn execute(&self, session_token: &str) -> Result<(), AuthError> {
    let token = SessionToken::from_string(session_token).map_err(|_| AuthError::InvalidSession)?;

    self.auth_service.logout(token).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::auth::{LoginUserCommand, LoginUserUseCase};
  use crate::application::testing::TestServices;

  #[tokio::test]
  async fn test_logout_deletes_session() {
    let services = TestServices::new();
    services.user("alice", "a@x.com", "pw1", true).await;
    let login = LoginUserUseCase::new(services.auth.clone())
      .execute(LoginUserCommand {
        email: "a@x.com".to_string(),
        password: "pw1".to_string(),
        remember_me: false,
      })
      .await
      .unwrap();
    let use_case = LogoutUserUseCase::new(services.auth.clone());

    use_case.execute(login.session_token.as_str()).await.unwrap();

    assert!(services.sessions.is_empty().await);
    assert!(matches!(
      use_case.execute(login.session_token.as_str()).await,
      Err(AuthError::InvalidSession)
    ));
  }
}
