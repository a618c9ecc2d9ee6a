use actix_web::{
  HttpRequest, HttpResponse,
  cookie::{Cookie, SameSite, time::OffsetDateTime},
  http::StatusCode,
  web,
};
use std::sync::Arc;

use super::{current_user, redirect, redirect_with_flash, render_page};
use crate::adapters::http::dtos::{LoginFormData, NextQuery, RegisterFormData, safe_next};
use crate::adapters::http::errors::WebError;
use crate::adapters::http::flash::FlashMessage;
use crate::adapters::http::middleware::{SESSION_COOKIE, session_removal_cookie};
use crate::adapters::http::templates::TemplateEngine;
use crate::application::auth::{
  LoginUserResponse, LoginUserUseCase, LogoutUserUseCase, RegisterUserUseCase,
};
use crate::domain::auth::errors::{AuthError, FieldErrors};

const REGISTERED_MESSAGE: &str = "Registration successful. Please wait for admin approval.";

/// Session cookie attributes
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieSettings {
  /// Send the cookie over HTTPS only
  pub secure: bool,
}

impl CookieSettings {
  /// Remember-me logins get a persistent cookie that expires with the
  /// session; other logins get a browser-session cookie.
  fn session_cookie(&self, login: &LoginUserResponse, remember_me: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, login.session_token.as_str().to_string())
      .path("/")
      .http_only(true)
      .secure(self.secure)
      .same_site(SameSite::Lax)
      .finish();

    if remember_me {
      match OffsetDateTime::from_unix_timestamp(login.expires_at.timestamp()) {
        Ok(expires) => cookie.set_expires(expires),
        Err(e) => tracing::warn!("Session expiry out of cookie range: {}", e),
      }
    }

    cookie
  }
}

/// Handle login form submission
pub async fn login_submit(
  req: HttpRequest,
  query: web::Query<NextQuery>,
  form: web::Form<LoginFormData>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
  templates: web::Data<TemplateEngine>,
  cookies: web::Data<CookieSettings>,
) -> Result<HttpResponse, WebError> {
  if current_user(&req).is_some() {
    return Ok(redirect("/"));
  }

  let command = form.to_command();
  let remember_me = command.remember_me;
  let next = safe_next(query.next.as_deref());

  let (errors, flash) = match use_case.execute(command).await {
    Ok(login) => {
      let cookie = cookies.session_cookie(&login, remember_me);
      return Ok(
        HttpResponse::Found()
          .cookie(cookie)
          .insert_header(("Location", next.unwrap_or("/")))
          .finish(),
      );
    }
    Err(AuthError::PendingApproval) => {
      return Ok(redirect_with_flash(
        &req,
        "/login",
        FlashMessage::warning(AuthError::PendingApproval.to_string()),
      ));
    }
    Err(AuthError::InvalidCredentials) => (
      FieldErrors::new(),
      vec![FlashMessage::danger(AuthError::InvalidCredentials.to_string())],
    ),
    Err(AuthError::InvalidForm(errors)) => (errors, Vec::new()),
    Err(e) => return Err(e.into()),
  };

  let mut context = tera::Context::new();
  context.insert("title", "Sign In");
  context.insert("form", &form.echo());
  context.insert("errors", &errors);
  context.insert("next", &next);

  render_page(
    &req,
    &templates,
    "pages/login.html.tera",
    context,
    StatusCode::OK,
    flash,
  )
}

/// Handle registration form submission
pub async fn register_submit(
  req: HttpRequest,
  form: web::Form<RegisterFormData>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, WebError> {
  if current_user(&req).is_some() {
    return Ok(redirect("/"));
  }

  let errors = match use_case.execute(form.to_command()).await {
    Ok(user) => {
      tracing::info!(user_id = %user.id, "Registration submitted");
      return Ok(redirect_with_flash(
        &req,
        "/login",
        FlashMessage::success(REGISTERED_MESSAGE),
      ));
    }
    Err(AuthError::InvalidForm(errors)) => errors,
    Err(e) => return Err(e.into()),
  };

  let mut context = tera::Context::new();
  context.insert("title", "Register");
  context.insert("form", &form.into_inner());
  context.insert("errors", &errors);

  render_page(
    &req,
    &templates,
    "pages/register.html.tera",
    context,
    StatusCode::OK,
    Vec::new(),
  )
}

/// Handle logout; a missing or stale session is not an error
pub async fn logout(
  req: HttpRequest,
  use_case: web::Data<Arc<LogoutUserUseCase>>,
) -> Result<HttpResponse, WebError> {
  if let Some(cookie) = req.cookie(SESSION_COOKIE) {
    match use_case.execute(cookie.value()).await {
      Ok(()) => tracing::debug!("Session ended"),
      Err(AuthError::InvalidSession) => tracing::debug!("Logout without a live session"),
      Err(e) => tracing::warn!("Failed to delete session on logout: {}", e),
    }
  }

  let mut response = redirect("/");
  if let Err(e) = response.add_cookie(&session_removal_cookie()) {
    tracing::warn!("Failed to clear session cookie: {}", e);
  }
  Ok(response)
}
