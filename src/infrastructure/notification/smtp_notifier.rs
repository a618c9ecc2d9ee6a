use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

use crate::domain::notification::{Notification, NotificationError, Notifier};
use crate::infrastructure::config::SmtpConfig;

/// Hands a fully built message to the wire
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
  async fn send(&self, message: Message) -> Result<(), NotificationError>;
}

#[async_trait]
impl Mailer for AsyncSmtpTransport<Tokio1Executor> {
  async fn send(&self, message: Message) -> Result<(), NotificationError> {
    AsyncTransport::send(self, message)
      .await
      .map(|_response| ())
      .map_err(|e| {
        if e.is_permanent() {
          NotificationError::RecipientsRefused(e.to_string())
        } else {
          NotificationError::Transport(e.to_string())
        }
      })
  }
}

/// Plain-text mail over an authenticated STARTTLS relay
pub struct SmtpNotifier {
  mailer: Box<dyn Mailer>,
  from: Mailbox,
}

impl SmtpNotifier {
  pub fn new(config: &SmtpConfig) -> Result<Self, NotificationError> {
    let credentials = Credentials::new(config.username.clone(), config.password.clone());

    let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
      .map_err(|e| NotificationError::Transport(e.to_string()))?
      .port(config.port)
      .credentials(credentials)
      .timeout(config.timeout_seconds.map(Duration::from_secs))
      .build();

    tracing::info!(
      "SMTP notifier relaying through {}:{} as {}",
      config.host,
      config.port,
      config.from
    );

    Self::with_mailer(Box::new(transport), &config.from)
  }

  pub fn with_mailer(mailer: Box<dyn Mailer>, from: &str) -> Result<Self, NotificationError> {
    Ok(Self {
      mailer,
      from: parse_mailbox(from)?,
    })
  }

  fn build_message(&self, notification: &Notification) -> Result<Message, NotificationError> {
    if notification.recipients.is_empty() {
      return Err(NotificationError::NoRecipients);
    }

    let mut builder = Message::builder()
      .from(self.from.clone())
      .subject(notification.subject.clone())
      .header(ContentType::TEXT_PLAIN);

    for recipient in &notification.recipients {
      builder = builder.to(parse_mailbox(recipient)?);
    }

    builder
      .body(notification.body.clone())
      .map_err(|e| NotificationError::MessageBuild(e.to_string()))
  }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotificationError> {
  address
    .parse::<Mailbox>()
    .map_err(|e| NotificationError::InvalidAddress {
      address: address.to_string(),
      reason: e.to_string(),
    })
}

#[async_trait]
impl Notifier for SmtpNotifier {
  async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
    let message = self.build_message(notification)?;
    self.mailer.send(message).await
  }
}
