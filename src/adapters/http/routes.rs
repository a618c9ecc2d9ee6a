use actix_web::web;
use std::sync::Arc;

use crate::application::admin::{ApproveUserUseCase, ListUsersUseCase, SuspendUserUseCase};
use crate::application::auth::{
  GetCurrentUserUseCase, LoginUserUseCase, LogoutUserUseCase, RegisterUserUseCase,
};

use super::handlers::web_auth::CookieSettings;
use super::handlers::{admin, pages, web_auth};
use super::middleware::WebAuthMiddleware;
use super::templates::TemplateEngine;

/// Everything the web routes need, built once in `main`
pub struct WebRouteDependencies {
  pub templates: TemplateEngine,
  pub cookies: CookieSettings,
  pub current_user: Arc<GetCurrentUserUseCase>,
  pub register: Arc<RegisterUserUseCase>,
  pub login: Arc<LoginUserUseCase>,
  pub logout: Arc<LogoutUserUseCase>,
  pub list_users: Arc<ListUsersUseCase>,
  pub approve_user: Arc<ApproveUserUseCase>,
  pub suspend_user: Arc<SuspendUserUseCase>,
}

/// Configure web UI routes
///
/// # Routes
///
/// - GET /health - liveness probe
/// - GET, POST /login - sign-in form (signed-in users are sent to /)
/// - GET, POST /register - registration form (signed-in users are sent to /)
/// - GET /logout - end the session
/// - GET / - dashboard (session required)
/// - GET /admin - user list (admin)
/// - GET /approve/{id}, GET /suspend/{id} - approval transitions (admin)
///
/// Anonymous requests to session-only routes are redirected to
/// `/login?next=<path>`.
pub fn configure_web_routes(cfg: &mut web::ServiceConfig, deps: WebRouteDependencies) {
  let current_user = deps.current_user;

  cfg
    .app_data(web::Data::new(deps.templates))
    .app_data(web::Data::new(deps.cookies))
    .app_data(web::Data::new(deps.register))
    .app_data(web::Data::new(deps.login))
    .app_data(web::Data::new(deps.logout))
    .app_data(web::Data::new(deps.list_users))
    .app_data(web::Data::new(deps.approve_user))
    .app_data(web::Data::new(deps.suspend_user));

  // Public routes
  cfg
    .route("/health", web::get().to(pages::health))
    .route("/logout", web::get().to(web_auth::logout))
    .service(
      web::resource("/login")
        .wrap(WebAuthMiddleware::optional(current_user.clone()))
        .route(web::get().to(pages::login_page))
        .route(web::post().to(web_auth::login_submit)),
    )
    .service(
      web::resource("/register")
        .wrap(WebAuthMiddleware::optional(current_user.clone()))
        .route(web::get().to(pages::register_page))
        .route(web::post().to(web_auth::register_submit)),
    );

  // Session required
  cfg
    .service(
      web::resource("/")
        .wrap(WebAuthMiddleware::required(current_user.clone()))
        .route(web::get().to(pages::dashboard_page)),
    )
    .service(
      web::resource("/admin")
        .wrap(WebAuthMiddleware::required(current_user.clone()))
        .route(web::get().to(admin::admin_page)),
    )
    .service(
      web::resource("/approve/{id}")
        .wrap(WebAuthMiddleware::required(current_user.clone()))
        .route(web::get().to(admin::approve_user)),
    )
    .service(
      web::resource("/suspend/{id}")
        .wrap(WebAuthMiddleware::required(current_user))
        .route(web::get().to(admin::suspend_user)),
    );
}
