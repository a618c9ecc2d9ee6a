use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};

use super::{current_user, get_user, redirect, render_page};
use crate::adapters::http::dtos::{NextQuery, RegisterFormData, safe_next};
use crate::adapters::http::errors::WebError;
use crate::adapters::http::templates::TemplateEngine;
use crate::domain::auth::errors::FieldErrors;

/// Render login page
pub async fn login_page(
  req: HttpRequest,
  query: web::Query<NextQuery>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, WebError> {
  if current_user(&req).is_some() {
    return Ok(redirect("/"));
  }

  let mut context = tera::Context::new();
  context.insert("title", "Sign In");
  context.insert("form", &serde_json::json!({}));
  context.insert("errors", &FieldErrors::new());
  context.insert("next", &safe_next(query.next.as_deref()));

  render_page(
    &req,
    &templates,
    "pages/login.html.tera",
    context,
    StatusCode::OK,
    Vec::new(),
  )
}

/// Render registration page
pub async fn register_page(
  req: HttpRequest,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, WebError> {
  if current_user(&req).is_some() {
    return Ok(redirect("/"));
  }

  let mut context = tera::Context::new();
  context.insert("title", "Register");
  context.insert("form", &RegisterFormData::default());
  context.insert("errors", &FieldErrors::new());

  render_page(
    &req,
    &templates,
    "pages/register.html.tera",
    context,
    StatusCode::OK,
    Vec::new(),
  )
}

/// Render dashboard page (authenticated)
pub async fn dashboard_page(
  req: HttpRequest,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, WebError> {
  let user = get_user(&req)?;

  let mut context = tera::Context::new();
  context.insert("title", "Dashboard");
  context.insert("user", &user);

  render_page(
    &req,
    &templates,
    "pages/dashboard.html.tera",
    context,
    StatusCode::OK,
    Vec::new(),
  )
}

/// 404 page, also used as the default service
pub async fn not_found_page(
  req: HttpRequest,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, WebError> {
  not_found(&req, &templates)
}

pub fn not_found(req: &HttpRequest, templates: &TemplateEngine) -> Result<HttpResponse, WebError> {
  let mut context = tera::Context::new();
  context.insert("title", "Not Found");

  render_page(
    req,
    templates,
    "pages/not_found.html.tera",
    context,
    StatusCode::NOT_FOUND,
    Vec::new(),
  )
}

/// Liveness probe
pub async fn health() -> HttpResponse {
  HttpResponse::Ok().content_type("text/plain").body("OK")
}

