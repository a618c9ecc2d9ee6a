use serde::{Deserialize, Serialize};

use crate::application::auth::{LoginUserCommand, RegisterUserCommand};

/// HTML checkboxes send "on" (or any value) when ticked and nothing otherwise
fn checked(value: &Option<String>) -> bool {
  value.as_deref().is_some_and(|v| !v.is_empty())
}

fn non_empty(value: &str) -> Option<String> {
  let trimmed = value.trim();
  (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn default_contact_method() -> String {
  "email".to_string()
}

/// Login form fields
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginFormData {
  pub email: String,
  pub password: String,
  pub remember_me: Option<String>,
}

impl LoginFormData {
  pub fn to_command(&self) -> LoginUserCommand {
    LoginUserCommand {
      email: self.email.clone(),
      password: self.password.clone(),
      remember_me: checked(&self.remember_me),
    }
  }

  /// Values echoed back into the form; the password never is
  pub fn echo(&self) -> serde_json::Value {
    serde_json::json!({
      "email": self.email,
      "remember_me": checked(&self.remember_me),
    })
  }
}

/// Registration form fields
#[derive(Deserialize, Serialize)]
#[serde(default)]
pub struct RegisterFormData {
  pub username: String,
  pub email: String,
  pub phone_number: String,
  #[serde(skip_serializing)]
  pub password: String,
  #[serde(skip_serializing)]
  pub password_confirmation: String,
  pub occupation: String,
  pub preferred_contact_method: String,
  pub reason_for_interest: String,
  pub agree_terms: Option<String>,
}

impl Default for RegisterFormData {
  fn default() -> Self {
    Self {
      username: String::new(),
      email: String::new(),
      phone_number: String::new(),
      password: String::new(),
      password_confirmation: String::new(),
      occupation: String::new(),
      preferred_contact_method: default_contact_method(),
      reason_for_interest: String::new(),
      agree_terms: None,
    }
  }
}

impl RegisterFormData {
  pub fn to_command(&self) -> RegisterUserCommand {
    RegisterUserCommand {
      username: self.username.clone(),
      email: self.email.clone(),
      password: self.password.clone(),
      password_confirmation: self.password_confirmation.clone(),
      phone_number: non_empty(&self.phone_number),
      occupation: non_empty(&self.occupation),
      preferred_contact_method: self.preferred_contact_method.clone(),
      reason_for_interest: non_empty(&self.reason_for_interest),
      agree_terms: checked(&self.agree_terms),
    }
  }
}

/// `?next=` target after login
#[derive(Debug, Deserialize, Default)]
pub struct NextQuery {
  pub next: Option<String>,
}

/// Accepts only same-site paths so `next` cannot bounce the user elsewhere
pub fn safe_next(next: Option<&str>) -> Option<&str> {
  let next = next?;

  let local = next.starts_with('/')
    && !next.starts_with("//")
    && !next.starts_with("/\\")
    && !next.chars().any(|c| c.is_control());

  local.then_some(next)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_safe_next() {
    assert_eq!(safe_next(Some("/admin")), Some("/admin"));
    assert_eq!(safe_next(Some("/?tab=1")), Some("/?tab=1"));
    assert_eq!(safe_next(Some("https://evil.example/")), None);
    assert_eq!(safe_next(Some("//evil.example/")), None);
    assert_eq!(safe_next(Some("/\\evil.example")), None);
    assert_eq!(safe_next(Some("admin")), None);
    assert_eq!(safe_next(None), None);
  }

  #[test]
  fn test_register_form_maps_checkbox_and_blanks() {
    let form: RegisterFormData = serde_urlencoded::from_str(
      "username=bob&email=b%40x.com&password=pw&password_confirmation=pw&occupation=+&agree_terms=on",
    )
    .unwrap();

    let command = form.to_command();

    assert!(command.agree_terms);
    assert_eq!(command.preferred_contact_method, "email");
    assert_eq!(command.occupation, None);
    assert_eq!(command.phone_number, None);
  }

  #[test]
  fn test_register_echo_hides_passwords() {
    let form = RegisterFormData {
      password: "secret".to_string(),
      password_confirmation: "secret".to_string(),
      ..RegisterFormData::default()
    };

    let json = serde_json::to_string(&form).unwrap();

    assert!(!json.contains("secret"));
  }

  #[test]
  fn test_login_form_without_checkbox() {
    let form: LoginFormData = serde_urlencoded::from_str("email=a%40x.com&password=pw").unwrap();

    assert!(!form.to_command().remember_me);
    assert_eq!(form.echo()["email"], "a@x.com");
  }
}
