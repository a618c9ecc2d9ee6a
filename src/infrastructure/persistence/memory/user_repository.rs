use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::auth::{
  entities::User,
  errors::{AuthError, RepositoryError},
  ports::UserRepository,
  value_objects::{Email, Username},
};

/// In-memory implementation of the UserRepository trait
#[derive(Default)]
pub struct InMemoryUserRepository {
  users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

fn check_unique(users: &HashMap<Uuid, User>, candidate: &User) -> Result<(), AuthError> {
  for other in users.values().filter(|u| u.id != candidate.id) {
    if other.email == candidate.email {
      return Err(RepositoryError::DuplicateKey("users_email_key".to_string()).into());
    }
    if other.username == candidate.username {
      return Err(RepositoryError::DuplicateKey("users_username_key".to_string()).into());
    }
  }
  Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let mut users = self.users.write().await;

    if users.contains_key(&user.id) {
      return Err(RepositoryError::DuplicateKey("users_pkey".to_string()).into());
    }
    check_unique(&users, &user)?;

    users.insert(user.id, user.clone());
    Ok(user)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    Ok(self.users.read().await.get(&id).cloned())
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let users = self.users.read().await;
    Ok(users.values().find(|u| u.email == email.as_str()).cloned())
  }

  async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
    let users = self.users.read().await;
    Ok(
      users
        .values()
        .find(|u| u.username == username.as_str())
        .cloned(),
    )
  }

  async fn update(&self, user: User) -> Result<User, AuthError> {
    let mut users = self.users.write().await;

    let stored = users
      .get_mut(&user.id)
      .ok_or(AuthError::Repository(RepositoryError::NotFound))?;

    // Only the mutable columns change, mirroring the SQL UPDATE
    stored.is_admin = user.is_admin;
    stored.is_approved = user.is_approved;
    stored.updated_at = user.updated_at;

    Ok(stored.clone())
  }

  async fn list_all(&self) -> Result<Vec<User>, AuthError> {
    let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
    users.sort_by(|a, b| a.username.cmp(&b.username));
    Ok(users)
  }

  async fn count(&self) -> Result<i64, AuthError> {
    Ok(self.users.read().await.len() as i64)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn user(username: &str, email: &str) -> User {
    User::new(username.to_string(), email.to_string(), "hash".to_string())
  }

  #[tokio::test]
  async fn test_create_and_find() {
    let repo = InMemoryUserRepository::new();
    let created = repo.create(user("alice", "a@x.com")).await.unwrap();

    let by_email = repo
      .find_by_email(&Email::new("a@x.com").unwrap())
      .await
      .unwrap();
    let by_name = repo
      .find_by_username(&Username::new("alice").unwrap())
      .await
      .unwrap();

    assert_eq!(by_email.map(|u| u.id), Some(created.id));
    assert_eq!(by_name.map(|u| u.id), Some(created.id));
    assert_eq!(repo.count().await.unwrap(), 1);
  }

  #[tokio::test]
  async fn test_unique_constraints() {
    let repo = InMemoryUserRepository::new();
    repo.create(user("alice", "a@x.com")).await.unwrap();

    let same_email = repo.create(user("bob", "a@x.com")).await;
    let same_name = repo.create(user("alice", "b@x.com")).await;

    assert!(matches!(
      same_email,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(ref c))) if c == "users_email_key"
    ));
    assert!(matches!(
      same_name,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(ref c))) if c == "users_username_key"
    ));
    assert_eq!(repo.count().await.unwrap(), 1);
  }

  #[tokio::test]
  async fn test_update_only_touches_flags() {
    let repo = InMemoryUserRepository::new();
    let created = repo.create(user("alice", "a@x.com")).await.unwrap();

    let mut changed = created.clone();
    changed.approve();
    changed.username = "mallory".to_string();

    let updated = repo.update(changed).await.unwrap();

    assert!(updated.is_approved);
    assert_eq!(updated.username, "alice");
  }

  #[tokio::test]
  async fn test_update_unknown_user() {
    let repo = InMemoryUserRepository::new();
    let result = repo.update(user("ghost", "g@x.com")).await;

    assert!(matches!(
      result,
      Err(AuthError::Repository(RepositoryError::NotFound))
    ));
  }
}
