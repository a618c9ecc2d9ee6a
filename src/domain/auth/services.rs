use chrono::Duration;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::entities::{Session, User};
use super::errors::{AuthError, FieldErrors, RepositoryError};
use super::ports::{PasswordHasher, SessionRepository, UserRepository};
use super::value_objects::{Email, Password, PasswordHash, SessionToken, Username};
use crate::domain::notification::NotificationService;

const DUPLICATE_EMAIL_MESSAGE: &str = "Please use a different email address.";
const DUPLICATE_USERNAME_MESSAGE: &str = "Please use a different username.";
// Verified against when the email is unknown so both failures cost one hash check
const DUMMY_PASSWORD: &str = "gatehouse-unknown-account";

/// Session lifetimes for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
  pub session_ttl_seconds: i64,
  pub remember_me_ttl_seconds: i64,
}

impl Default for AuthServiceConfig {
  fn default() -> Self {
    Self {
      session_ttl_seconds: 24 * 60 * 60,
      remember_me_ttl_seconds: 30 * 24 * 60 * 60,
    }
  }
}

/// Authentication service implementing registration, login and sessions
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  session_repo: Arc<dyn SessionRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  notifications: Arc<NotificationService>,
  config: AuthServiceConfig,
  dummy_hash: OnceCell<PasswordHash>,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    notifications: Arc<NotificationService>,
    config: AuthServiceConfig,
  ) -> Self {
    Self {
      user_repo,
      session_repo,
      password_hasher,
      notifications,
      config,
      dummy_hash: OnceCell::new(),
    }
  }

  /// Registers a new, unapproved user and sends the welcome email
  ///
  /// # Errors
  /// Returns `AuthError::InvalidForm` when the email or username is taken.
  /// A failed welcome email is logged and does not undo the registration.
  pub async fn register(
    &self,
    username: Username,
    email: Email,
    password: Password,
  ) -> Result<User, AuthError> {
    let conflicts = self
      .registration_conflicts(Some(&username), Some(&email))
      .await?;

    if !conflicts.is_empty() {
      return Err(AuthError::InvalidForm(conflicts));
    }

    let password_hash = self.password_hasher.hash(&password).await?;

    let user = User::new(
      username.into_inner(),
      email.into_inner(),
      password_hash.into_inner(),
    );

    // A concurrent registration can still trip the unique constraints
    let created_user = match self.user_repo.create(user).await {
      Ok(user) => user,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(constraint))) => {
        return Err(AuthError::InvalidForm(duplicate_key_errors(&constraint)));
      }
      Err(e) => return Err(e),
    };

    tracing::info!(user_id = %created_user.id, "Registered new user pending approval");

    self.notifications.notify_registered(&created_user).await;

    Ok(created_user)
  }

  /// Reports which of the given identifiers already belong to an account
  pub async fn registration_conflicts(
    &self,
    username: Option<&Username>,
    email: Option<&Email>,
  ) -> Result<FieldErrors, AuthError> {
    let mut conflicts = FieldErrors::new();

    if let Some(email) = email {
      if self.user_repo.find_by_email(email).await?.is_some() {
        conflicts.add("email", DUPLICATE_EMAIL_MESSAGE);
      }
    }

    if let Some(username) = username {
      if self.user_repo.find_by_username(username).await?.is_some() {
        conflicts.add("username", DUPLICATE_USERNAME_MESSAGE);
      }
    }

    Ok(conflicts)
  }

  /// Authenticates a user and creates a new session
  ///
  /// # Errors
  /// - `AuthError::InvalidCredentials` for an unknown email or a wrong password
  /// - `AuthError::PendingApproval` when the credentials match an unapproved account
  pub async fn login(
    &self,
    email: Email,
    password: Password,
    remember_me: bool,
  ) -> Result<(User, Session, SessionToken), AuthError> {
    let Some(user) = self.user_repo.find_by_email(&email).await? else {
      self.verify_against_dummy(&password).await;
      return Err(AuthError::InvalidCredentials);
    };

    let password_hash = PasswordHash::from_hash(user.password_hash.as_str())?;

    if !self.password_hasher.verify(&password, &password_hash).await? {
      return Err(AuthError::InvalidCredentials);
    }

    if !user.is_approved {
      tracing::info!(user_id = %user.id, "Login refused, account pending approval");
      return Err(AuthError::PendingApproval);
    }

    let session_token = SessionToken::generate();

    let duration = if remember_me {
      Duration::seconds(self.config.remember_me_ttl_seconds)
    } else {
      Duration::seconds(self.config.session_ttl_seconds)
    };

    let session = Session::with_duration(user.id, session_token.hash().into_inner(), duration);
    let created_session = self.session_repo.create(session).await?;

    Ok((user, created_session, session_token))
  }

  /// Spends one hash verification on an unknown email
  ///
  /// The dummy hash is made by the configured hasher on first use, so its
  /// cost parameters match those of stored accounts.
  async fn verify_against_dummy(&self, password: &Password) {
    let dummy = self
      .dummy_hash
      .get_or_try_init(|| async {
        let dummy = Password::new(DUMMY_PASSWORD).map_err(AuthError::from)?;
        self.password_hasher.hash(&dummy).await
      })
      .await;

    match dummy {
      Ok(hash) => {
        if let Err(e) = self.password_hasher.verify(password, hash).await {
          tracing::warn!("Dummy password check failed: {}", e);
        }
      }
      Err(e) => tracing::warn!("Could not prepare dummy password hash: {}", e),
    }
  }

  /// Logs out a user by invalidating their session token
  ///
  /// # Errors
  /// Returns `AuthError::InvalidSession` if session not found
  pub async fn logout(&self, token: SessionToken) -> Result<(), AuthError> {
    let token_hash = token.hash();

    let session = self
      .session_repo
      .find_by_token_hash(token_hash.as_str())
      .await?
      .ok_or(AuthError::InvalidSession)?;

    self.session_repo.delete(session.id).await?;

    Ok(())
  }

  /// Validates a session token and returns the associated user
  ///
  /// Expired sessions are removed. Sessions of users who are no longer
  /// approved are rejected.
  pub async fn validate_session(&self, token: SessionToken) -> Result<User, AuthError> {
    let token_hash = token.hash();

    let session = self
      .session_repo
      .find_by_token_hash(token_hash.as_str())
      .await?
      .ok_or(AuthError::InvalidSession)?;

    if session.is_expired() {
      self.session_repo.delete(session.id).await?;
      return Err(AuthError::InvalidSession);
    }

    let user = self
      .user_repo
      .find_by_id(session.user_id)
      .await?
      .ok_or(AuthError::InvalidSession)?;

    if !user.is_approved {
      return Err(AuthError::InvalidSession);
    }

    Ok(user)
  }

  /// Creates an approved admin account unless the email is already registered
  ///
  /// Returns the new admin, or `None` when an account already exists.
  pub async fn bootstrap_admin(
    &self,
    username: Username,
    email: Email,
    password: Password,
  ) -> Result<Option<User>, AuthError> {
    if let Some(existing) = self.user_repo.find_by_email(&email).await? {
      if !existing.is_admin {
        tracing::warn!(
          user_id = %existing.id,
          "Bootstrap admin email belongs to a non-admin account; leaving it unchanged"
        );
      }
      return Ok(None);
    }

    let password_hash = self.password_hasher.hash(&password).await?;
    let admin = User::new_admin(
      username.into_inner(),
      email.into_inner(),
      password_hash.into_inner(),
    );

    let created = self.user_repo.create(admin).await?;
    tracing::info!(user_id = %created.id, "Created bootstrap admin account");

    Ok(Some(created))
  }
}

fn duplicate_key_errors(constraint: &str) -> FieldErrors {
  if constraint.contains("username") {
    FieldErrors::single("username", DUPLICATE_USERNAME_MESSAGE)
  } else {
    FieldErrors::single("email", DUPLICATE_EMAIL_MESSAGE)
  }
}
