use serde::Serialize;
use std::fmt;

/// Lifecycle event that triggered a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
  Welcome,
  Approved,
  Suspended,
}

impl fmt::Display for NotificationKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Welcome => write!(f, "welcome"),
      Self::Approved => write!(f, "approved"),
      Self::Suspended => write!(f, "suspended"),
    }
  }
}

/// A plain-text message addressed to one or more recipients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
  pub kind: NotificationKind,
  pub subject: String,
  pub body: String,
  pub recipients: Vec<String>,
}

impl Notification {
  pub fn new(
    kind: NotificationKind,
    subject: impl Into<String>,
    body: impl Into<String>,
    recipients: Vec<String>,
  ) -> Self {
    Self {
      kind,
      subject: subject.into(),
      body: body.into(),
      recipients,
    }
  }

  /// Recipients joined for log lines and the `To` summary
  pub fn recipient_list(&self) -> String {
    self.recipients.join(", ")
  }
}
