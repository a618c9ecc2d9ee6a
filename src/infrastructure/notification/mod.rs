mod log_notifier;
#[cfg(test)]
mod recording_notifier;
mod smtp_notifier;

pub use log_notifier::LogNotifier;
#[cfg(test)]
pub(crate) use recording_notifier::RecordingNotifier;
pub use smtp_notifier::{Mailer, SmtpNotifier};
