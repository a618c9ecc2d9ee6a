use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// User entity representing a registered account
#[derive(Clone, Serialize)]
pub struct User {
  /// Unique identifier for the user
  pub id: Uuid,
  /// Display name (unique)
  pub username: String,
  /// User's email address (unique, lower-cased)
  pub email: String,
  /// Argon2id PHC string; never serialized
  #[serde(skip_serializing)]
  pub password_hash: String,
  /// Whether the user may moderate other accounts
  pub is_admin: bool,
  /// Whether the user may log in
  pub is_approved: bool,
  /// Timestamp when the user was created
  pub created_at: DateTime<Utc>,
  /// Timestamp when the user was last updated
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Creates a new, unapproved, non-admin user
  pub fn new(username: String, email: String, password_hash: String) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      username,
      email,
      password_hash,
      is_admin: false,
      is_approved: false,
      created_at: now,
      updated_at: now,
    }
  }

  /// Creates an approved administrator account
  pub fn new_admin(username: String, email: String, password_hash: String) -> Self {
    let mut user = Self::new(username, email, password_hash);
    user.is_admin = true;
    user.is_approved = true;
    user
  }

  /// Creates a user from database fields (for reconstruction)
  #[allow(clippy::too_many_arguments)]
  pub fn from_db(
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    is_admin: bool,
    is_approved: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      username,
      email,
      password_hash,
      is_admin,
      is_approved,
      created_at,
      updated_at,
    }
  }

  /// Grants login access
  pub fn approve(&mut self) {
    self.is_approved = true;
    self.updated_at = Utc::now();
  }

  /// Revokes login access
  pub fn suspend(&mut self) {
    self.is_approved = false;
    self.updated_at = Utc::now();
  }
}

// Keep the hash out of logs
impl fmt::Debug for User {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("User")
      .field("id", &self.id)
      .field("username", &self.username)
      .field("email", &self.email)
      .field("is_admin", &self.is_admin)
      .field("is_approved", &self.is_approved)
      .finish_non_exhaustive()
  }
}

/// Session entity representing a logged-in browser
#[derive(Debug, Clone)]
pub struct Session {
  /// Unique identifier for the session
  pub id: Uuid,
  /// Reference to the user who owns this session
  pub user_id: Uuid,
  /// SHA-256 hash of the cookie token
  pub token_hash: String,
  /// Timestamp when the session expires
  pub expires_at: DateTime<Utc>,
  /// Timestamp when the session was created
  pub created_at: DateTime<Utc>,
}

impl Session {
  /// Creates a session that expires after `duration`
  pub fn with_duration(user_id: Uuid, token_hash: String, duration: Duration) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      user_id,
      token_hash,
      expires_at: now + duration,
      created_at: now,
    }
  }

  /// Creates a session from database fields (for reconstruction)
  pub fn from_db(
    id: Uuid,
    user_id: Uuid,
    token_hash: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      user_id,
      token_hash,
      expires_at,
      created_at,
    }
  }

  /// Checks if the session has expired
  pub fn is_expired(&self) -> bool {
    self.expires_at <= Utc::now()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_user() -> User {
    User::new(
      "alice".to_string(),
      "a@x.com".to_string(),
      "hashed_password".to_string(),
    )
  }

  #[test]
  fn test_user_creation_defaults() {
    let user = sample_user();

    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "a@x.com");
    assert!(!user.is_admin);
    assert!(!user.is_approved);
  }

  #[test]
  fn test_admin_creation() {
    let admin = User::new_admin(
      "root".to_string(),
      "root@x.com".to_string(),
      "hashed_password".to_string(),
    );

    assert!(admin.is_admin);
    assert!(admin.is_approved);
  }

  #[test]
  fn test_approve_and_suspend_toggle_flag() {
    let mut user = sample_user();
    let created = user.updated_at;

    user.approve();
    assert!(user.is_approved);
    assert!(user.updated_at >= created);

    user.suspend();
    assert!(!user.is_approved);
  }

  #[test]
  fn test_debug_and_serialize_hide_password_hash() {
    let user = sample_user();

    assert!(!format!("{:?}", user).contains("hashed_password"));

    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password_hash").is_none());
    assert_eq!(json["username"], "alice");
  }

  #[test]
  fn test_session_expiration() {
    let user_id = Uuid::new_v4();
    let live = Session::with_duration(user_id, "hash".to_string(), Duration::hours(1));
    let stale = Session::with_duration(user_id, "hash".to_string(), Duration::seconds(-10));

    assert!(!live.is_expired());
    assert!(stale.is_expired());
  }
}
