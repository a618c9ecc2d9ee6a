use thiserror::Error;

/// Failure of a single delivery attempt
#[derive(Debug, Error)]
pub enum NotificationError {
  #[error("Notification has no recipients")]
  NoRecipients,

  #[error("Invalid address {address}: {reason}")]
  InvalidAddress { address: String, reason: String },

  #[error("Failed to build message: {0}")]
  MessageBuild(String),

  #[error("Recipients refused by server: {0}")]
  RecipientsRefused(String),

  #[error("Transport failure: {0}")]
  Transport(String),
}
