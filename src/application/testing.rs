use std::sync::Arc;

use crate::domain::approval::ApprovalService;
use crate::domain::auth::ports::UserRepository;
use crate::domain::auth::{AuthService, AuthServiceConfig, Email, Password, User, Username};
use crate::domain::notification::{MessageCatalog, NotificationService};
use crate::infrastructure::notification::RecordingNotifier;
use crate::infrastructure::persistence::memory::{
  InMemorySessionRepository, InMemoryUserRepository,
};
use crate::infrastructure::security::Argon2PasswordHasher;

/// Services wired to in-memory stores and a recording notifier
pub(crate) struct TestServices {
  pub auth: Arc<AuthService>,
  pub approval: Arc<ApprovalService>,
  pub users: Arc<InMemoryUserRepository>,
  pub sessions: Arc<InMemorySessionRepository>,
  pub notifier: Arc<RecordingNotifier>,
}

impl TestServices {
  pub fn new() -> Self {
    Self::with_notifier(RecordingNotifier::new())
  }

  pub fn with_notifier(notifier: RecordingNotifier) -> Self {
    let users = Arc::new(InMemoryUserRepository::new());
    let sessions = Arc::new(InMemorySessionRepository::new());
    let notifier = Arc::new(notifier);
    let notifications = Arc::new(NotificationService::new(
      notifier.clone(),
      MessageCatalog::default(),
    ));
    // Cheap parameters keep the test suite fast
    let hasher = Arc::new(Argon2PasswordHasher::with_params(1024, 1, 1).unwrap());

    let auth = Arc::new(AuthService::new(
      users.clone(),
      sessions.clone(),
      hasher,
      notifications.clone(),
      AuthServiceConfig::default(),
    ));
    let approval = Arc::new(ApprovalService::new(
      users.clone(),
      sessions.clone(),
      notifications,
    ));

    Self {
      auth,
      approval,
      users,
      sessions,
      notifier,
    }
  }

  /// Registers a regular account, approved when `approved` is set
  pub async fn user(&self, username: &str, email: &str, password: &str, approved: bool) -> User {
    let mut user = self
      .auth
      .register(
        Username::new(username).unwrap(),
        Email::new(email).unwrap(),
        Password::new(password).unwrap(),
      )
      .await
      .unwrap();

    if approved {
      user.approve();
      user = self.users.update(user).await.unwrap();
    }
    user
  }

  pub async fn admin(&self, username: &str, email: &str, password: &str) -> User {
    self
      .auth
      .bootstrap_admin(
        Username::new(username).unwrap(),
        Email::new(email).unwrap(),
        Password::new(password).unwrap(),
      )
      .await
      .unwrap()
      .unwrap()
  }
}
