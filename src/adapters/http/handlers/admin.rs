use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use std::sync::Arc;
use uuid::Uuid;

use super::pages::not_found;
use super::{get_user, redirect_with_flash, render_page};
use crate::adapters::http::errors::WebError;
use crate::adapters::http::flash::FlashMessage;
use crate::adapters::http::templates::TemplateEngine;
use crate::application::admin::{ApproveUserUseCase, ListUsersUseCase, SuspendUserUseCase};
use crate::domain::auth::entities::User;
use crate::domain::auth::errors::AuthError;

const PAGE_DENIED_MESSAGE: &str = "You do not have permission to access this page.";

/// Render the user list (admins only)
pub async fn admin_page(
  req: HttpRequest,
  use_case: web::Data<Arc<ListUsersUseCase>>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, WebError> {
  let actor = get_user(&req)?;

  let users = match use_case.execute(&actor).await {
    Ok(users) => users,
    Err(AuthError::PermissionDenied) => {
      tracing::warn!(user_id = %actor.id, "Non-admin tried to open the admin page");
      return Ok(redirect_with_flash(
        &req,
        "/",
        FlashMessage::danger(PAGE_DENIED_MESSAGE),
      ));
    }
    Err(e) => return Err(e.into()),
  };

  let mut context = tera::Context::new();
  context.insert("title", "Admin");
  context.insert("users", &users);

  render_page(
    &req,
    &templates,
    "pages/admin.html.tera",
    context,
    StatusCode::OK,
    Vec::new(),
  )
}

/// GET /approve/{id}
pub async fn approve_user(
  req: HttpRequest,
  path: web::Path<String>,
  use_case: web::Data<Arc<ApproveUserUseCase>>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, WebError> {
  let actor = get_user(&req)?;
  let Ok(user_id) = Uuid::parse_str(&path) else {
    return not_found(&req, &templates);
  };

  let outcome = use_case.execute(&actor, user_id).await;
  transition_response(&req, &templates, outcome, |username| {
    FlashMessage::success(format!("User {} has been approved.", username))
  })
}

/// GET /suspend/{id}
pub async fn suspend_user(
  req: HttpRequest,
  path: web::Path<String>,
  use_case: web::Data<Arc<SuspendUserUseCase>>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, WebError> {
  let actor = get_user(&req)?;
  let Ok(user_id) = Uuid::parse_str(&path) else {
    return not_found(&req, &templates);
  };

  let outcome = use_case.execute(&actor, user_id).await;
  transition_response(&req, &templates, outcome, |username| {
    FlashMessage::warning(format!("User {} has been suspended.", username))
  })
}

fn transition_response(
  req: &HttpRequest,
  templates: &TemplateEngine,
  outcome: Result<User, AuthError>,
  success: impl FnOnce(&str) -> FlashMessage,
) -> Result<HttpResponse, WebError> {
  match outcome {
    Ok(user) => Ok(redirect_with_flash(req, "/admin", success(&user.username))),
    Err(AuthError::PermissionDenied) => Ok(redirect_with_flash(
      req,
      "/",
      FlashMessage::danger(AuthError::PermissionDenied.to_string()),
    )),
    Err(AuthError::UserNotFound) => not_found(req, templates),
    Err(e) => Err(e.into()),
  }
}
