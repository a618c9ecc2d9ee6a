use argon2::PasswordHash as Argon2PasswordHash;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use validator::ValidateEmail;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ValueObjectError {
  #[error("Invalid email address.")]
  InvalidEmail(String),

  #[error("Email must be at most {max} characters.")]
  EmailTooLong { max: usize },

  #[error("This field is required.")]
  Required,

  #[error("Username must be at most {max} characters.")]
  UsernameTooLong { max: usize },

  #[error("Password is too long (maximum {max} characters)")]
  PasswordTooLong { max: usize },

  #[error("Invalid password hash format")]
  InvalidPasswordHash,

  #[error("Invalid token format")]
  InvalidToken,
}

// ============================================================================
// Email Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Matches the `email` column width
  pub const MAX_LENGTH: usize = 120;

  /// Creates a new Email after validation
  pub fn new(email: impl Into<String>) -> Result<Self, ValueObjectError> {
    let email = email.into();
    let email = email.trim();

    if email.is_empty() {
      return Err(ValueObjectError::Required);
    }

    if !email.validate_email() {
      return Err(ValueObjectError::InvalidEmail(email.to_string()));
    }

    if email.len() > Self::MAX_LENGTH {
      return Err(ValueObjectError::EmailTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    // Normalize to lowercase
    Ok(Self(email.to_lowercase()))
  }

  /// Returns the email as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// Username Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
  /// Matches the `username` column width
  pub const MAX_LENGTH: usize = 64;

  pub fn new(username: impl Into<String>) -> Result<Self, ValueObjectError> {
    let username = username.into();
    let username = username.trim();

    if username.is_empty() {
      return Err(ValueObjectError::Required);
    }

    if username.chars().count() > Self::MAX_LENGTH {
      return Err(ValueObjectError::UsernameTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    Ok(Self(username.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Username {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

/// Plain-text password, wiped from memory on drop.
///
/// Only presence and an upper bound are enforced. Any non-empty secret
/// is accepted, so strength rules stay a registration-form concern.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
  const MAX_LENGTH: usize = 128;

  /// Creates a new Password after validation
  pub fn new(password: impl Into<String>) -> Result<Self, ValueObjectError> {
    let password = password.into();

    if password.is_empty() {
      return Err(ValueObjectError::Required);
    }

    if password.len() > Self::MAX_LENGTH {
      return Err(ValueObjectError::PasswordTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    Ok(Self(password))
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

// Implement Debug without exposing the password
impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// ============================================================================
// PasswordHash Value Object (Argon2id Hash)
// ============================================================================

#[derive(Clone, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
  /// Creates a new PasswordHash from an existing PHC hash string
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValueObjectError> {
    let hash = hash.into();

    Argon2PasswordHash::new(&hash).map_err(|_| ValueObjectError::InvalidPasswordHash)?;

    Ok(Self(hash))
  }

  /// Returns the hash as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Debug for PasswordHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("PasswordHash(***)")
  }
}

// ============================================================================
// SessionToken Value Object (Random Secure Token)
// ============================================================================

#[derive(Clone)]
pub struct SessionToken(String);

impl SessionToken {
  const TOKEN_LENGTH: usize = 32; // 32 bytes = 256 bits

  /// Generates a new random session token
  pub fn generate() -> Self {
    use rand::Rng;

    let token: [u8; Self::TOKEN_LENGTH] = rand::rngs::OsRng.sample(rand::distributions::Standard);

    Self(hex::encode(token))
  }

  /// Creates a SessionToken from an existing token string
  pub fn from_string(token: impl Into<String>) -> Result<Self, ValueObjectError> {
    let token = token.into();

    if token.len() != Self::TOKEN_LENGTH * 2 {
      return Err(ValueObjectError::InvalidToken);
    }

    if !token.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(ValueObjectError::InvalidToken);
    }

    Ok(Self(token))
  }

  /// Creates a hash of this token for storage
  pub fn hash(&self) -> TokenHash {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(self.0.as_bytes());
    let result = hasher.finalize();

    TokenHash(hex::encode(result))
  }

  /// Returns the token as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

// Implement Debug without exposing the token
impl fmt::Debug for SessionToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("SessionToken(***)")
  }
}

// ============================================================================
// TokenHash Value Object (SHA-256 Hash of Token)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHash(String);

impl TokenHash {
  /// Verifies a token against this hash
  pub fn verify(&self, token: &SessionToken) -> bool {
    self.0 == token.hash().0
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for TokenHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
