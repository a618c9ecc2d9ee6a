use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::domain::notification::{Notification, NotificationError, Notifier};

/// Keeps every delivered notification in memory.
///
/// A notifier built with [`RecordingNotifier::failing`] rejects every
/// attempt with a transport error but still counts it.
#[derive(Default)]
pub struct RecordingNotifier {
  sent: Mutex<Vec<Notification>>,
  attempts: AtomicUsize,
  fail: bool,
}

impl RecordingNotifier {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn failing() -> Self {
    Self {
      fail: true,
      ..Self::default()
    }
  }

  /// Successfully delivered notifications, oldest first
  pub fn sent(&self) -> Vec<Notification> {
    self
      .sent
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }

  /// Every send call, failed ones included
  pub fn attempts(&self) -> usize {
    self.attempts.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl Notifier for RecordingNotifier {
  async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
    self.attempts.fetch_add(1, Ordering::SeqCst);

    if self.fail {
      return Err(NotificationError::Transport(
        "connection refused".to_string(),
      ));
    }

    self
      .sent
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .push(notification.clone());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::notification::NotificationKind;

  fn notification() -> Notification {
    Notification::new(
      NotificationKind::Approved,
      "Subject",
      "Body",
      vec!["a@x.com".to_string()],
    )
  }

  #[tokio::test]
  async fn test_records_sent_messages() {
    let notifier = RecordingNotifier::new();

    notifier.send(&notification()).await.unwrap();

    assert_eq!(notifier.attempts(), 1);
    assert_eq!(notifier.sent(), vec![notification()]);
  }

  #[tokio::test]
  async fn test_failing_mode_counts_but_keeps_nothing() {
    let notifier = RecordingNotifier::failing();

    assert!(notifier.send(&notification()).await.is_err());
    assert_eq!(notifier.attempts(), 1);
    assert!(notifier.sent().is_empty());
  }
}
