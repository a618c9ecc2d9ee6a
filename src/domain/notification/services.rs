use std::sync::Arc;

use super::entities::Notification;
use super::messages::MessageCatalog;
use super::ports::Notifier;
use crate::domain::auth::entities::User;

/// Dispatches lifecycle emails with fire-and-forget semantics.
///
/// A failed delivery is logged and reported as `false`; it never becomes an
/// error for the workflow that triggered it.
pub struct NotificationService {
  notifier: Arc<dyn Notifier>,
  catalog: MessageCatalog,
}

impl NotificationService {
  pub fn new(notifier: Arc<dyn Notifier>, catalog: MessageCatalog) -> Self {
    Self { notifier, catalog }
  }

  /// Sends the welcome message after registration
  pub async fn notify_registered(&self, user: &User) -> bool {
    self.dispatch(self.catalog.welcome(&user.email)).await
  }

  /// Sends the approval message
  pub async fn notify_approved(&self, user: &User) -> bool {
    self.dispatch(self.catalog.approved(&user.email)).await
  }

  /// Sends the suspension message
  pub async fn notify_suspended(&self, user: &User) -> bool {
    self.dispatch(self.catalog.suspended(&user.email)).await
  }

  async fn dispatch(&self, notification: Notification) -> bool {
    match self.notifier.send(&notification).await {
      Ok(()) => {
        tracing::info!(
          kind = %notification.kind,
          "Email sent successfully to {}",
          notification.recipient_list()
        );
        true
      }
      Err(e) => {
        tracing::error!(
          kind = %notification.kind,
          error = %e,
          "Failed to send email to {}",
          notification.recipient_list()
        );
        false
      }
    }
  }
}
