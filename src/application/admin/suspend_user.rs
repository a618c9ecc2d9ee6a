use std::sync::Arc;
use uuid::Uuid;

use crate::domain::approval::ApprovalService;
use crate::domain::auth::entities::User;
use crate::domain::auth::errors::AuthError;

/// Use case for suspending an account
pub struct SuspendUserUseCase {
  approval_service: Arc<ApprovalService>,
}

impl SuspendUserUseCase {
  pub fn new(approval_service: Arc<ApprovalService>) -> Self {
    Self { approval_service }
  }

  /// Suspends `user_id` on behalf of `actor`, ending the user's sessions
  ///
  /// # Errors
  /// Same as [`super::ApproveUserUseCase::execute`].
  pub async fn execute(&self, actor: &User, user_id: Uuid) -> Result<User, AuthError> {
    self.approval_service.suspend(actor, user_id).await
  }
}
