use std::sync::Arc;
use uuid::Uuid;

use crate::domain::approval::ApprovalService;
use crate::domain::auth::entities::User;
use crate::domain::auth::errors::AuthError;

/// Use case for approving a pending account
pub struct ApproveUserUseCase {
  approval_service: Arc<ApprovalService>,
}

impl ApproveUserUseCase {
  pub fn new(approval_service: Arc<ApprovalService>) -> Self {
    Self { approval_service }
  }

  /// Approves `user_id` on behalf of `actor`
  ///
  /// # Errors
  /// - `AuthError::PermissionDenied` if `actor` is not an admin
  /// - `AuthError::UserNotFound` if no account has that id
  pub async fn execute(&self, actor: &User, user_id: Uuid) -> Result<User, AuthError> {
    self.approval_service.approve(actor, user_id).await
  }
}
