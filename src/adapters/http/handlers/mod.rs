pub mod admin;
pub mod pages;
pub mod web_auth;

use actix_web::{HttpMessage, HttpRequest, HttpResponse, http::StatusCode};

use crate::adapters::http::{
  errors::WebError,
  flash::{self, FlashMessage},
  templates::TemplateEngine,
};
use crate::domain::auth::entities::User;

/// User attached by `WebAuthMiddleware`, if any
pub fn current_user(req: &HttpRequest) -> Option<User> {
  req.extensions().get::<User>().cloned()
}

/// User attached by `WebAuthMiddleware` in required mode
pub fn get_user(req: &HttpRequest) -> Result<User, WebError> {
  current_user(req).ok_or_else(|| {
    WebError::Internal(format!(
      "No session user for {}; is WebAuthMiddleware mounted?",
      req.path()
    ))
  })
}

/// Renders `template` inside the shared layout
///
/// Pending flash messages are shown (together with `extra_flashes`) and
/// then dropped from the flash session.
pub fn render_page(
  req: &HttpRequest,
  templates: &TemplateEngine,
  template: &str,
  mut context: tera::Context,
  status: StatusCode,
  extra_flashes: Vec<FlashMessage>,
) -> Result<HttpResponse, WebError> {
  let mut flashes = flash::take_flashes(req);
  flashes.extend(extra_flashes);

  context.insert("flashes", &flashes);
  context.insert("current_user", &current_user(req));

  let html = templates.render(template, &context)?;

  Ok(
    HttpResponse::build(status)
      .content_type("text/html; charset=utf-8")
      .body(html),
  )
}

/// 302 to `location`, queueing one flash message for the next page
pub fn redirect_with_flash(
  req: &HttpRequest,
  location: &str,
  message: FlashMessage,
) -> HttpResponse {
  flash::push_flash(req, message);
  redirect(location)
}

pub fn redirect(location: &str) -> HttpResponse {
  HttpResponse::Found()
    .insert_header(("Location", location))
    .finish()
}
