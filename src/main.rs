use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gatehouse::{
  adapters::http::{
    CookieSettings, RequestIdMiddleware, TemplateEngine, WebRouteDependencies,
    configure_web_routes,
    flash::{cookie_key, flash_middleware},
    handlers::pages,
  },
  application::admin::{ApproveUserUseCase, ListUsersUseCase, SuspendUserUseCase},
  application::auth::{
    BootstrapAdminCommand, BootstrapAdminUseCase, GetCurrentUserUseCase, LoginUserUseCase,
    LogoutUserUseCase, RegisterUserUseCase,
  },
  domain::approval::ApprovalService,
  domain::auth::services::{AuthService, AuthServiceConfig},
  domain::notification::{MessageCatalog, NotificationService, ports::Notifier},
  infrastructure::{
    config::Config,
    notification::{LogNotifier, SmtpNotifier},
    persistence::postgres::{PostgresSessionRepository, PostgresUserRepository},
    security::Argon2PasswordHasher,
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gatehouse=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting Gatehouse");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database");
  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .with_context(|| {
    format!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    )
  })?
  .context("Could not connect to database")?;
  tracing::info!("Database connection pool created");

  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .context("Failed to run database migrations")?;
  tracing::info!("Database migrations completed");

  // Initialize repositories
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let session_repo = Arc::new(PostgresSessionRepository::new(db_pool.clone()));

  let password_hasher =
    Arc::new(Argon2PasswordHasher::new().context("Failed to create password hasher")?);

  // Email goes to the log when no SMTP relay is configured
  let notifier: Arc<dyn Notifier> = match &config.smtp {
    Some(smtp) => Arc::new(SmtpNotifier::new(smtp).context("Failed to set up SMTP notifier")?),
    None => {
      tracing::warn!("No [smtp] section configured; notifications will only be logged");
      Arc::new(LogNotifier::new())
    }
  };
  let notifications = Arc::new(NotificationService::new(
    notifier,
    MessageCatalog::new(config.notifications.signature.clone()),
  ));

  // Initialize domain services
  let auth_config = AuthServiceConfig {
    session_ttl_seconds: config.security.session_ttl_seconds,
    remember_me_ttl_seconds: config.security.remember_me_ttl_seconds,
  };
  let auth_service = Arc::new(AuthService::new(
    user_repo.clone(),
    session_repo.clone(),
    password_hasher,
    notifications.clone(),
    auth_config,
  ));
  let approval_service = Arc::new(ApprovalService::new(
    user_repo,
    session_repo,
    notifications,
  ));

  if let Some(admin) = &config.admin {
    let bootstrap = BootstrapAdminUseCase::new(auth_service.clone());
    let created = bootstrap
      .execute(BootstrapAdminCommand {
        username: admin.username.clone(),
        email: admin.email.clone(),
        password: admin.password.clone(),
      })
      .await
      .context("Failed to bootstrap administrator")?;
    match created {
      Some(user) => tracing::info!(user_id = %user.id, "Administrator account created"),
      None => tracing::debug!("Administrator account already present"),
    }
  }

  // Initialize use cases
  let current_user_use_case = Arc::new(GetCurrentUserUseCase::new(auth_service.clone()));
  let register_use_case = Arc::new(RegisterUserUseCase::new(auth_service.clone()));
  let login_use_case = Arc::new(LoginUserUseCase::new(auth_service.clone()));
  let logout_use_case = Arc::new(LogoutUserUseCase::new(auth_service));
  let list_users_use_case = Arc::new(ListUsersUseCase::new(approval_service.clone()));
  let approve_user_use_case = Arc::new(ApproveUserUseCase::new(approval_service.clone()));
  let suspend_user_use_case = Arc::new(SuspendUserUseCase::new(approval_service));

  let templates = TemplateEngine::new().context("Failed to load templates")?;
  let cookies = CookieSettings {
    secure: config.security.secure_cookies,
  };
  let flash_key = cookie_key(config.security.cookie_secret.as_deref())
    .context("Invalid security.cookie_secret")?;

  let server_host = config.server.host.clone();
  let server_port = config.server.port;
  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    let deps = WebRouteDependencies {
      templates: templates.clone(),
      cookies,
      current_user: current_user_use_case.clone(),
      register: register_use_case.clone(),
      login: login_use_case.clone(),
      logout: logout_use_case.clone(),
      list_users: list_users_use_case.clone(),
      approve_user: approve_user_use_case.clone(),
      suspend_user: suspend_user_use_case.clone(),
    };

    App::new()
      .wrap(flash_middleware(flash_key.clone(), cookies.secure))
      .wrap(Logger::default())
      .wrap(RequestIdMiddleware::new())
      .configure(|cfg| configure_web_routes(cfg, deps))
      .default_service(web::to(pages::not_found_page))
  })
  .bind((server_host.as_str(), server_port))
  .with_context(|| format!("Failed to bind {}:{}", server_host, server_port))?
  .run()
  .await
  .context("HTTP server failed")?;

  Ok(())
}
