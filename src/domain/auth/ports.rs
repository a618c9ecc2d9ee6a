use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Session, User};
use super::errors::AuthError;
use super::value_objects::{Email, Password, PasswordHash, Username};

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Creates a new user in the repository
  async fn create(&self, user: User) -> Result<User, AuthError>;

  /// Finds a user by their unique identifier
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;

  /// Finds a user by their email address
  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;

  /// Finds a user by their username
  async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError>;

  /// Persists the mutable flags of an existing user
  async fn update(&self, user: User) -> Result<User, AuthError>;

  /// Lists every user ordered by username
  async fn list_all(&self) -> Result<Vec<User>, AuthError>;

  /// Counts stored users
  async fn count(&self) -> Result<i64, AuthError>;
}

/// Repository trait for session persistence operations
#[async_trait]
pub trait SessionRepository: Send + Sync {
  /// Creates a new session in the repository
  async fn create(&self, session: Session) -> Result<Session, AuthError>;

  /// Finds a session by its token hash
  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError>;

  /// Deletes a specific session
  async fn delete(&self, session_id: Uuid) -> Result<(), AuthError>;

  /// Deletes all sessions for a specific user, returning how many were removed
  async fn delete_all_for_user(&self, user_id: Uuid) -> Result<u64, AuthError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  /// Verifies a plain text password against a hashed password
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError>;
}
