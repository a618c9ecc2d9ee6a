use super::entities::{Notification, NotificationKind};

const WELCOME_SUBJECT: &str = "Welcome to Our App!";
const WELCOME_BODY: &str = "Thank you for registering! Your account is currently pending approval. \
We appreciate your patience and look forward to having you on board soon.";

const APPROVED_SUBJECT: &str = "Your Account Has Been Approved!";
const APPROVED_BODY: &str = "Congratulations! 🎉\nYour account has been approved! \
You can now log in and start making things happen. 🚀\n\n\
We truly appreciate your trust in our platform. Welcome aboard!";

const SUSPENDED_SUBJECT: &str = "Your Account Has Been Suspended";
const SUSPENDED_BODY: &str = "We regret to inform you that your account has been suspended. \
If you believe this is a mistake or have any questions, please contact our support team for assistance.";

/// Builds lifecycle messages with a shared sign-off
#[derive(Debug, Clone)]
pub struct MessageCatalog {
  signature: String,
}

impl MessageCatalog {
  pub fn new(signature: impl Into<String>) -> Self {
    Self {
      signature: signature.into(),
    }
  }

  pub fn welcome(&self, recipient: &str) -> Notification {
    self.build(NotificationKind::Welcome, WELCOME_SUBJECT, WELCOME_BODY, recipient)
  }

  pub fn approved(&self, recipient: &str) -> Notification {
    self.build(
      NotificationKind::Approved,
      APPROVED_SUBJECT,
      APPROVED_BODY,
      recipient,
    )
  }

  pub fn suspended(&self, recipient: &str) -> Notification {
    self.build(
      NotificationKind::Suspended,
      SUSPENDED_SUBJECT,
      SUSPENDED_BODY,
      recipient,
    )
  }

  fn build(
    &self,
    kind: NotificationKind,
    subject: &str,
    body: &str,
    recipient: &str,
  ) -> Notification {
    let closing = match kind {
      NotificationKind::Approved => "Warm regards",
      NotificationKind::Welcome | NotificationKind::Suspended => "Best regards",
    };

    Notification::new(
      kind,
      subject,
      format!("{}\n\n{},\n{}", body, closing, self.signature),
      vec![recipient.to_string()],
    )
  }
}

impl Default for MessageCatalog {
  fn default() -> Self {
    Self::new("The Team")
  }
}
