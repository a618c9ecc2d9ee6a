//! One-shot messages carried across a redirect
//!
//! Messages live in an actix-session backed by a private (encrypted and
//! authenticated) cookie named `flash`. The first page render that reads
//! them purges the session, which expires the cookie.

use actix_session::{SessionExt, SessionMiddleware, storage::CookieSessionStore};
use actix_web::HttpRequest;
use actix_web::cookie::{Key, SameSite};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const FLASH_COOKIE: &str = "flash";
const FLASH_KEY: &str = "messages";

/// `Key::derive_from` rejects shorter master secrets
pub const MIN_SECRET_LENGTH: usize = 32;

#[derive(Debug, Error)]
#[error("Cookie secret must be at least 32 bytes, got {0}")]
pub struct CookieSecretTooShort(pub usize);

/// Bootstrap-style alert category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
  Success,
  Info,
  Warning,
  Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
  pub level: FlashLevel,
  pub message: String,
}

impl FlashMessage {
  pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
    Self {
      level,
      message: message.into(),
    }
  }

  pub fn success(message: impl Into<String>) -> Self {
    Self::new(FlashLevel::Success, message)
  }

  pub fn warning(message: impl Into<String>) -> Self {
    Self::new(FlashLevel::Warning, message)
  }

  pub fn danger(message: impl Into<String>) -> Self {
    Self::new(FlashLevel::Danger, message)
  }
}

/// Key for the flash cookie; random when no secret is configured
pub fn cookie_key(secret: Option<&str>) -> Result<Key, CookieSecretTooShort> {
  match secret {
    Some(secret) if secret.len() < MIN_SECRET_LENGTH => Err(CookieSecretTooShort(secret.len())),
    Some(secret) => Ok(Key::derive_from(secret.as_bytes())),
    None => {
      tracing::warn!("No cookie secret configured; using a temporary key");
      Ok(Key::generate())
    }
  }
}

/// Session middleware that stores flash messages
pub fn flash_middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
  SessionMiddleware::builder(CookieSessionStore::default(), key)
    .cookie_name(FLASH_COOKIE.to_string())
    .cookie_path("/".to_string())
    .cookie_secure(secure)
    .cookie_http_only(true)
    .cookie_same_site(SameSite::Lax)
    .build()
}

/// Queues `message` for the next rendered page
///
/// Without the flash middleware mounted the message is silently dropped.
pub fn push_flash(req: &HttpRequest, message: FlashMessage) {
  let session = req.get_session();
  let mut messages = match session.get::<Vec<FlashMessage>>(FLASH_KEY) {
    Ok(messages) => messages.unwrap_or_default(),
    Err(e) => {
      tracing::warn!("Discarding unreadable flash messages: {}", e);
      Vec::new()
    }
  };
  messages.push(message);

  if let Err(e) = session.insert(FLASH_KEY, messages) {
    tracing::warn!("Failed to store flash message: {}", e);
  }
}

/// Messages queued by earlier responses; reading them expires the cookie
pub fn take_flashes(req: &HttpRequest) -> Vec<FlashMessage> {
  let session = req.get_session();
  let messages = match session.get::<Vec<FlashMessage>>(FLASH_KEY) {
    Ok(messages) => messages.unwrap_or_default(),
    Err(e) => {
      tracing::warn!("Discarding unreadable flash messages: {}", e);
      Vec::new()
    }
  };

  if !messages.is_empty() {
    session.purge();
  }
  messages
}
