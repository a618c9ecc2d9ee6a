use async_trait::async_trait;

use crate::domain::notification::{Notification, NotificationError, Notifier};

/// Notifier used when no SMTP relay is configured.
/// Writes the message to the log and reports success.
pub struct LogNotifier;

impl LogNotifier {
  pub fn new() -> Self {
    Self
  }
}

impl Default for LogNotifier {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl Notifier for LogNotifier {
  async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
    if notification.recipients.is_empty() {
      return Err(NotificationError::NoRecipients);
    }

    tracing::info!(
      kind = %notification.kind,
      subject = %notification.subject,
      "LogNotifier: SMTP not configured, not delivering mail to {}",
      notification.recipient_list()
    );
    tracing::debug!("LogNotifier body:\n{}", notification.body);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::notification::NotificationKind;

  #[tokio::test]
  async fn test_log_notifier_accepts_message() {
    let notification = Notification::new(
      NotificationKind::Welcome,
      "Hi",
      "Body",
      vec!["a@x.com".to_string()],
    );

    assert!(LogNotifier::new().send(&notification).await.is_ok());
  }

  #[tokio::test]
  async fn test_log_notifier_requires_recipient() {
    let notification = Notification::new(NotificationKind::Welcome, "Hi", "Body", vec![]);

    assert!(matches!(
      LogNotifier::new().send(&notification).await,
      Err(NotificationError::NoRecipients)
    ));
  }
}
