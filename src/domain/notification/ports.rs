use async_trait::async_trait;

use super::entities::Notification;
use super::errors::NotificationError;

/// Outbound email transport
///
/// One call is one delivery attempt. Implementations do not retry or queue;
/// callers decide what a failure means.
#[async_trait]
pub trait Notifier: Send + Sync {
  async fn send(&self, notification: &Notification) -> Result<(), NotificationError>;
}
