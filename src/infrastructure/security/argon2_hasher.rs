use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;

use crate::domain::auth::errors::{AuthError, HashError};
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::{Password, PasswordHash};

/// Memory cost in KiB (19 MiB)
const MEMORY_COST: u32 = 19456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;

/// Argon2id password hasher
///
/// Hashing and verification are CPU bound, so both run on the blocking pool
/// instead of stalling an actix worker.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
  params: Params,
}

impl Argon2PasswordHasher {
  pub fn new() -> Result<Self, AuthError> {
    Self::with_params(MEMORY_COST, TIME_COST, PARALLELISM)
  }

  /// Custom cost parameters, mainly for cheaper hashing in tests
  pub fn with_params(memory_cost: u32, time_cost: u32, parallelism: u32) -> Result<Self, AuthError> {
    let params = Params::new(memory_cost, time_cost, parallelism, Some(32)).map_err(|e| {
      HashError::HashingFailed(format!("Invalid Argon2 params: {}", e))
    })?;

    Ok(Self { params })
  }

  fn argon2(&self) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError> {
    let argon2 = self.argon2();
    let password = password.clone();

    let encoded = tokio::task::spawn_blocking(move || {
      let salt = SaltString::generate(&mut rand::rngs::OsRng);
      argon2
        .hash_password(password.as_str().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| HashError::HashingFailed(e.to_string()))
    })
    .await
    .map_err(|e| HashError::HashingFailed(format!("Hashing task failed: {}", e)))??;

    Ok(PasswordHash::from_hash(encoded)?)
  }

  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError> {
    let argon2 = self.argon2();
    let password = password.clone();
    let encoded = hashed_password.as_str().to_string();

    let verified = tokio::task::spawn_blocking(move || {
      let parsed = Argon2PasswordHash::new(&encoded)
        .map_err(|e| HashError::VerificationFailed(format!("Invalid hash format: {}", e)))?;

      // verify_password compares in constant time
      match argon2.verify_password(password.as_str().as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(HashError::VerificationFailed(e.to_string())),
      }
    })
    .await
    .map_err(|e| HashError::VerificationFailed(format!("Verification task failed: {}", e)))??;

    Ok(verified)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_hash_is_argon2id_phc_string() {
    let hasher = Argon2PasswordHasher::new().unwrap();
    let password = Password::new("s3cret").unwrap();

    let hash = hasher.hash(&password).await.unwrap();

    assert!(hash.as_str().starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
    assert!(!hash.as_str().contains("s3cret"));
  }

  #[tokio::test]
  async fn test_verify_matches_only_original_password() {
    let hasher = Argon2PasswordHasher::new().unwrap();
    let password = Password::new("pw1").unwrap();
    let hash = hasher.hash(&password).await.unwrap();

    assert!(hasher.verify(&password, &hash).await.unwrap());
    assert!(
      !hasher
        .verify(&Password::new("pw2").unwrap(), &hash)
        .await
        .unwrap()
    );
  }

  #[tokio::test]
  async fn test_same_password_gets_fresh_salt() {
    let hasher = Argon2PasswordHasher::with_params(1024, 1, 1).unwrap();
    let password = Password::new("repeat").unwrap();

    let first = hasher.hash(&password).await.unwrap();
    let second = hasher.hash(&password).await.unwrap();

    assert_ne!(first.as_str(), second.as_str());
    assert!(hasher.verify(&password, &first).await.unwrap());
    assert!(hasher.verify(&password, &second).await.unwrap());
  }

  #[test]
  fn test_rejects_invalid_params() {
    assert!(Argon2PasswordHasher::with_params(0, 0, 0).is_err());
  }
}
