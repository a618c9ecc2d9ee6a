use std::sync::Arc;

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password, Username};

/// Administrator credentials supplied through configuration
#[derive(Clone)]
pub struct BootstrapAdminCommand {
  pub username: String,
  pub email: String,
  pub password: String,
}

/// Ensures an administrator exists at startup
pub struct BootstrapAdminUseCase {
  auth_service: Arc<AuthService>,
}

impl BootstrapAdminUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Returns the created admin, or `None` when the email is already registered
  pub async fn execute(&self, command: BootstrapAdminCommand) -> Result<Option<User>, AuthError> {
    let username = Username::new(command.username)?;
    let email = Email::new(command.email)?;
    let password = Password::new(command.password)?;

    self
      .auth_service
      .bootstrap_admin(username, email, password)
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::testing::TestServices;

  fn command() -> BootstrapAdminCommand {
    BootstrapAdminCommand {
      username: "root".to_string(),
      email: "Root@Example.com".to_string(),
      password: "changeme".to_string(),
    }
  }

  #[tokio::test]
  async fn test_creates_admin_once() {
    let services = TestServices::new();
    let use_case = BootstrapAdminUseCase::new(services.auth.clone());

    let admin = use_case.execute(command()).await.unwrap().unwrap();
    assert!(admin.is_admin);
    assert!(admin.is_approved);
    assert_eq!(admin.email, "root@example.com");

    assert!(use_case.execute(command()).await.unwrap().is_none());
    assert!(services.notifier.sent().is_empty());
  }

  #[tokio::test]
  async fn test_rejects_invalid_email() {
    let services = TestServices::new();
    let use_case = BootstrapAdminUseCase::new(services.auth.clone());

    let result = use_case
      .execute(BootstrapAdminCommand {
        email: "root".to_string(),
        ..command()
      })
      .await;

    assert!(matches!(result, Err(AuthError::ValueObject(_))));
  }
}
