use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::auth::entities::Session;
use crate::domain::auth::errors::{AuthError, RepositoryError};
use crate::domain::auth::ports::SessionRepository;

/// In-memory implementation of the SessionRepository trait
#[derive(Default)]
pub struct InMemorySessionRepository {
  sessions: RwLock<HashMap<Uuid, Session>>,
}

impl InMemorySessionRepository {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of stored sessions, expired ones included
  pub async fn len(&self) -> usize {
    self.sessions.read().await.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.len().await == 0
  }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
  async fn create(&self, session: Session) -> Result<Session, AuthError> {
    let mut sessions = self.sessions.write().await;

    if sessions
      .values()
      .any(|s| s.token_hash == session.token_hash)
    {
      return Err(RepositoryError::DuplicateKey("sessions_token_hash_key".to_string()).into());
    }

    sessions.insert(session.id, session.clone());
    Ok(session)
  }

  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError> {
    let sessions = self.sessions.read().await;
    Ok(
      sessions
        .values()
        .find(|s| s.token_hash == token_hash)
        .cloned(),
    )
  }

  async fn delete(&self, session_id: Uuid) -> Result<(), AuthError> {
    match self.sessions.write().await.remove(&session_id) {
      Some(_) => Ok(()),
      None => Err(RepositoryError::NotFound.into()),
    }
  }

  async fn delete_all_for_user(&self, user_id: Uuid) -> Result<u64, AuthError> {
    let mut sessions = self.sessions.write().await;
    let before = sessions.len();
    sessions.retain(|_, s| s.user_id != user_id);
    Ok((before - sessions.len()) as u64)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  #[tokio::test]
  async fn test_session_lifecycle() {
    let repo = InMemorySessionRepository::new();
    let user_id = Uuid::new_v4();
    let session = Session::with_duration(user_id, "hash_a".to_string(), Duration::hours(1));

    repo.create(session.clone()).await.unwrap();
    let found = repo.find_by_token_hash("hash_a").await.unwrap();
    assert_eq!(found.map(|s| s.id), Some(session.id));

    repo.delete(session.id).await.unwrap();
    assert!(repo.is_empty().await);
    assert!(matches!(
      repo.delete(session.id).await,
      Err(AuthError::Repository(RepositoryError::NotFound))
    ));
  }

  #[tokio::test]
  async fn test_delete_all_for_user_leaves_others() {
    let repo = InMemorySessionRepository::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    for (i, owner) in [alice, alice, bob].into_iter().enumerate() {
      repo
        .create(Session::with_duration(
          owner,
          format!("hash_{}", i),
          Duration::hours(1),
        ))
        .await
        .unwrap();
    }

    assert_eq!(repo.delete_all_for_user(alice).await.unwrap(), 2);
    assert_eq!(repo.len().await, 1);
  }
}
