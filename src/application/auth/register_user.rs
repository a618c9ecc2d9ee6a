use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::{AuthError, FieldErrors};
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password, Username};

const REQUIRED_MESSAGE: &str = "This field is required.";
const PASSWORD_MISMATCH_MESSAGE: &str = "Field must be equal to password.";
const INVALID_CHOICE_MESSAGE: &str = "Not a valid choice.";

/// How the applicant prefers to be reached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
  #[default]
  Email,
  Phone,
}

impl FromStr for ContactMethod {
  type Err = ();

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "email" => Ok(Self::Email),
      "phone" => Ok(Self::Phone),
      _ => Err(()),
    }
  }
}

impl fmt::Display for ContactMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Email => write!(f, "email"),
      Self::Phone => write!(f, "phone"),
    }
  }
}

/// Raw registration form input
#[derive(Debug, Clone, Default)]
pub struct RegisterUserCommand {
  pub username: String,
  pub email: String,
  pub password: String,
  pub password_confirmation: String,
  pub phone_number: Option<String>,
  pub occupation: Option<String>,
  pub preferred_contact_method: String,
  pub reason_for_interest: Option<String>,
  pub agree_terms: bool,
}

/// Validates the registration form and creates a pending account
///
/// Every problem with the submission, including an email or username that
/// is already taken, comes back at once as `AuthError::InvalidForm`.
/// Profile answers (phone, occupation, contact method, reason) are checked
/// but not stored.
pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, command: RegisterUserCommand) -> Result<User, AuthError> {
    let mut errors = FieldErrors::new();

    let username = Username::new(command.username)
      .map_err(|e| errors.add("username", e.to_string()))
      .ok();
    let email = Email::new(command.email)
      .map_err(|e| errors.add("email", e.to_string()))
      .ok();
    let password = Password::new(command.password.as_str())
      .map_err(|e| errors.add("password", e.to_string()))
      .ok();

    if command.password_confirmation.is_empty() {
      errors.add("password_confirmation", REQUIRED_MESSAGE);
    } else if password.is_some() && command.password_confirmation != command.password {
      errors.add("password_confirmation", PASSWORD_MISMATCH_MESSAGE);
    }

    let contact_method = match command.preferred_contact_method.trim() {
      "" => {
        errors.add("preferred_contact_method", REQUIRED_MESSAGE);
        None
      }
      value => value
        .parse::<ContactMethod>()
        .map_err(|_| errors.add("preferred_contact_method", INVALID_CHOICE_MESSAGE))
        .ok(),
    };

    if !command.agree_terms {
      errors.add("agree_terms", REQUIRED_MESSAGE);
    }

    let conflicts = self
      .auth_service
      .registration_conflicts(username.as_ref(), email.as_ref())
      .await?;
    for field in ["email", "username"] {
      for message in conflicts.get(field).unwrap_or_default() {
        errors.add(field, message.clone());
      }
    }

    let (Some(username), Some(email), Some(password), Some(contact_method)) =
      (username, email, password, contact_method)
    else {
      return Err(AuthError::InvalidForm(errors));
    };
    if !errors.is_empty() {
      return Err(AuthError::InvalidForm(errors));
    }

    tracing::debug!(
      preferred_contact_method = %contact_method,
      has_phone = non_blank(command.phone_number.as_deref()),
      has_occupation = non_blank(command.occupation.as_deref()),
      has_reason = non_blank(command.reason_for_interest.as_deref()),
      "Registration profile accepted"
    );

    self.auth_service.register(username, email, password).await
  }
}

fn non_blank(value: Option<&str>) -> bool {
  value.is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::testing::TestServices;
  use crate::domain::notification::NotificationKind;
  use crate::infrastructure::notification::RecordingNotifier;

  fn command() -> RegisterUserCommand {
    RegisterUserCommand {
      username: "alice".to_string(),
      email: "a@x.com".to_string(),
      password: "pw1".to_string(),
      password_confirmation: "pw1".to_string(),
      preferred_contact_method: "email".to_string(),
      agree_terms: true,
      ..RegisterUserCommand::default()
    }
  }

  fn form_errors(result: Result<User, AuthError>) -> FieldErrors {
    match result {
      Err(AuthError::InvalidForm(errors)) => errors,
      other => panic!("Expected InvalidForm, got {:?}", other),
    }
  }

  #[tokio::test]
  async fn test_register_valid_form() {
    let services = TestServices::new();
    let use_case = RegisterUserUseCase::new(services.auth.clone());

    let user = use_case.execute(command()).await.unwrap();

    assert_eq!(user.username, "alice");
    assert!(!user.is_approved);
    assert_eq!(services.notifier.sent()[0].kind, NotificationKind::Welcome);
  }

  #[tokio::test]
  async fn test_profile_fields_are_optional_but_contact_method_is_checked() {
    let services = TestServices::new();
    let use_case = RegisterUserUseCase::new(services.auth.clone());

    let result = use_case
      .execute(RegisterUserCommand {
        phone_number: Some("+1 555 0100".to_string()),
        preferred_contact_method: "pigeon".to_string(),
        ..command()
      })
      .await;

    let errors = form_errors(result);
    assert_eq!(
      errors.get("preferred_contact_method"),
      Some(&[INVALID_CHOICE_MESSAGE.to_string()][..])
    );
    assert!(services.notifier.sent().is_empty());
  }

  #[tokio::test]
  async fn test_all_problems_reported_together() {
    let services = TestServices::new();
    let use_case = RegisterUserUseCase::new(services.auth.clone());

    let result = use_case
      .execute(RegisterUserCommand {
        username: "  ".to_string(),
        email: "not-an-email".to_string(),
        password: "pw1".to_string(),
        password_confirmation: "pw2".to_string(),
        preferred_contact_method: String::new(),
        agree_terms: false,
        ..RegisterUserCommand::default()
      })
      .await;

    let errors = form_errors(result);
    for field in [
      "username",
      "email",
      "password_confirmation",
      "preferred_contact_method",
      "agree_terms",
    ] {
      assert!(errors.contains(field), "missing error for {}", field);
    }
    assert!(!errors.contains("password"));
    assert_eq!(
      errors.get("password_confirmation"),
      Some(&[PASSWORD_MISMATCH_MESSAGE.to_string()][..])
    );
  }

  #[tokio::test]
  async fn test_taken_email_reported_with_other_errors() {
    let services = TestServices::new();
    let use_case = RegisterUserUseCase::new(services.auth.clone());
    use_case.execute(command()).await.unwrap();

    let result = use_case
      .execute(RegisterUserCommand {
        username: "alice2".to_string(),
        email: "A@X.COM".to_string(),
        agree_terms: false,
        ..command()
      })
      .await;

    let errors = form_errors(result);
    assert_eq!(
      errors.get("email"),
      Some(&["Please use a different email address.".to_string()][..])
    );
    assert!(errors.contains("agree_terms"));
    assert_eq!(services.notifier.sent().len(), 1);
  }

  #[tokio::test]
  async fn test_taken_username() {
    let services = TestServices::new();
    let use_case = RegisterUserUseCase::new(services.auth.clone());
    use_case.execute(command()).await.unwrap();

    let result = use_case
      .execute(RegisterUserCommand {
        email: "other@x.com".to_string(),
        ..command()
      })
      .await;

    let errors = form_errors(result);
    assert_eq!(
      errors.get("username"),
      Some(&["Please use a different username.".to_string()][..])
    );
  }

  #[tokio::test]
  async fn test_failed_welcome_email_keeps_account() {
    let services = TestServices::with_notifier(RecordingNotifier::failing());
    let use_case = RegisterUserUseCase::new(services.auth.clone());

    let user = use_case.execute(command()).await.unwrap();

    assert_eq!(services.notifier.attempts(), 1);
    let stored = crate::domain::auth::ports::UserRepository::find_by_id(
      services.users.as_ref(),
      user.id,
    )
    .await
    .unwrap();
    assert!(stored.is_some());
  }

  #[test]
  fn test_contact_method_parsing() {
    assert_eq!("email".parse::<ContactMethod>(), Ok(ContactMethod::Email));
    assert_eq!("phone".parse::<ContactMethod>(), Ok(ContactMethod::Phone));
    assert!("fax".parse::<ContactMethod>().is_err());
    assert_eq!(ContactMethod::default().to_string(), "email");
  }
}
