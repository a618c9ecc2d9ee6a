//! Transactional email sent on account lifecycle events

pub mod entities;
pub mod errors;
pub mod messages;
pub mod ports;
pub mod services;

pub use entities::{Notification, NotificationKind};
pub use errors::NotificationError;
pub use messages::MessageCatalog;
pub use ports::Notifier;
pub use services::NotificationService;
