use std::sync::Arc;

use crate::domain::approval::ApprovalService;
use crate::domain::auth::entities::User;
use crate::domain::auth::errors::AuthError;

/// Loads every account for the admin page, ordered by username
pub struct ListUsersUseCase {
  approval_service: Arc<ApprovalService>,
}

impl ListUsersUseCase {
  pub fn new(approval_service: Arc<ApprovalService>) -> Self {
    Self { approval_service }
  }

  pub async fn execute(&self, actor: &User) -> Result<Vec<User>, AuthError> {
    self.approval_service.list_users(actor).await
  }
}
