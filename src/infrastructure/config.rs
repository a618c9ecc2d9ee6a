use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::fmt;

fn default_db_connect_timeout() -> u64 {
  5
}

fn default_db_acquire_timeout() -> u64 {
  3
}

fn default_session_ttl() -> i64 {
  24 * 60 * 60
}

fn default_remember_me_ttl() -> i64 {
  30 * 24 * 60 * 60
}

fn default_smtp_host() -> String {
  "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
  587
}

fn default_signature() -> String {
  "The Team".to_string()
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub database: DatabaseConfig,
  #[serde(default)]
  pub security: SecurityConfig,
  #[serde(default)]
  pub smtp: Option<SmtpConfig>,
  #[serde(default)]
  pub notifications: NotificationsConfig,
  #[serde(default)]
  pub admin: Option<AdminConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  pub url: String,
  pub max_connections: u32,
  #[serde(default = "default_db_connect_timeout")]
  pub connect_timeout_seconds: u64,
  #[serde(default = "default_db_acquire_timeout")]
  pub acquire_timeout_seconds: u64,
}

/// Session cookie settings
#[derive(Clone, Deserialize)]
pub struct SecurityConfig {
  #[serde(default = "default_session_ttl")]
  pub session_ttl_seconds: i64,
  #[serde(default = "default_remember_me_ttl")]
  pub remember_me_ttl_seconds: i64,
  /// Marks the session cookie `Secure`; enable behind TLS
  #[serde(default)]
  pub secure_cookies: bool,
  /// Master secret (at least 32 bytes) for the flash-message cookie.
  /// A random key is used when unset, so pending messages do not survive
  /// a restart.
  #[serde(default)]
  pub cookie_secret: Option<String>,
}

impl Default for SecurityConfig {
  fn default() -> Self {
    Self {
      session_ttl_seconds: default_session_ttl(),
      remember_me_ttl_seconds: default_remember_me_ttl(),
      secure_cookies: false,
      cookie_secret: None,
    }
  }
}

impl fmt::Debug for SecurityConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SecurityConfig")
      .field("session_ttl_seconds", &self.session_ttl_seconds)
      .field("remember_me_ttl_seconds", &self.remember_me_ttl_seconds)
      .field("secure_cookies", &self.secure_cookies)
      .field("cookie_secret", &self.cookie_secret.as_ref().map(|_| "***"))
      .finish()
  }
}

/// Outgoing mail relay. When absent, messages are only logged.
#[derive(Clone, Deserialize)]
pub struct SmtpConfig {
  #[serde(default = "default_smtp_host")]
  pub host: String,
  #[serde(default = "default_smtp_port")]
  pub port: u16,
  pub username: String,
  pub password: String,
  pub from: String,
  #[serde(default)]
  pub timeout_seconds: Option<u64>,
}

impl fmt::Debug for SmtpConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SmtpConfig")
      .field("host", &self.host)
      .field("port", &self.port)
      .field("username", &self.username)
      .field("password", &"***")
      .field("from", &self.from)
      .field("timeout_seconds", &self.timeout_seconds)
      .finish()
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationsConfig {
  #[serde(default = "default_signature")]
  pub signature: String,
}

impl Default for NotificationsConfig {
  fn default() -> Self {
    Self {
      signature: default_signature(),
    }
  }
}

/// Administrator account created at startup when its email is unknown
#[derive(Clone, Deserialize)]
pub struct AdminConfig {
  pub username: String,
  pub email: String,
  pub password: String,
}

impl fmt::Debug for AdminConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AdminConfig")
      .field("username", &self.username)
      .field("email", &self.email)
      .field("password", &"***")
      .finish()
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Sources, later ones overriding earlier ones:
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with the GATEHOUSE_ prefix, e.g.
  ///    `GATEHOUSE_SERVER__PORT=8080` or `GATEHOUSE_SMTP__PASSWORD=...`
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("GATEHOUSE")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}
