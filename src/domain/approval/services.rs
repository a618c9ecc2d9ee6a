use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::{SessionRepository, UserRepository};
use crate::domain::notification::NotificationService;

/// Approval workflow: admins toggle whether an account may log in
///
/// Both transitions are idempotent on state but not deduplicated: every
/// call persists and notifies, even when the flag does not change.
pub struct ApprovalService {
  user_repo: Arc<dyn UserRepository>,
  session_repo: Arc<dyn SessionRepository>,
  notifications: Arc<NotificationService>,
}

impl ApprovalService {
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    notifications: Arc<NotificationService>,
  ) -> Self {
    Self {
      user_repo,
      session_repo,
      notifications,
    }
  }

  /// Lists all accounts for the admin overview
  pub async fn list_users(&self, actor: &User) -> Result<Vec<User>, AuthError> {
    ensure_admin(actor)?;
    self.user_repo.list_all().await
  }

  /// Grants login access and sends the approval email
  ///
  /// # Errors
  /// - `AuthError::PermissionDenied` if `actor` is not an admin (nothing changes)
  /// - `AuthError::UserNotFound` if `user_id` is unknown
  pub async fn approve(&self, actor: &User, user_id: Uuid) -> Result<User, AuthError> {
    ensure_admin(actor)?;

    let mut user = self.load(user_id).await?;
    user.approve();
    let user = self.user_repo.update(user).await?;

    tracing::info!(admin_id = %actor.id, user_id = %user.id, "User approved");

    self.notifications.notify_approved(&user).await;

    Ok(user)
  }

  /// Revokes login access, ends the user's sessions and sends the suspension email
  ///
  /// A failed session cleanup is logged and does not stop the notification;
  /// leftover sessions are already rejected because the user is unapproved.
  ///
  /// # Errors
  /// Same as [`ApprovalService::approve`].
  pub async fn suspend(&self, actor: &User, user_id: Uuid) -> Result<User, AuthError> {
    ensure_admin(actor)?;

    let mut user = self.load(user_id).await?;
    user.suspend();
    let user = self.user_repo.update(user).await?;

    match self.session_repo.delete_all_for_user(user.id).await {
      Ok(ended) => tracing::info!(
        admin_id = %actor.id,
        user_id = %user.id,
        sessions_ended = ended,
        "User suspended"
      ),
      Err(e) => tracing::error!(
        admin_id = %actor.id,
        user_id = %user.id,
        "User suspended but sessions were not deleted: {}",
        e
      ),
    }

    self.notifications.notify_suspended(&user).await;

    Ok(user)
  }

  async fn load(&self, user_id: Uuid) -> Result<User, AuthError> {
    self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AuthError::UserNotFound)
  }
}

fn ensure_admin(actor: &User) -> Result<(), AuthError> {
  if actor.is_admin {
    Ok(())
  } else {
    tracing::warn!(user_id = %actor.id, "Non-admin attempted an admin action");
    Err(AuthError::PermissionDenied)
  }
}
