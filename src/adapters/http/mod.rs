pub mod dtos;
pub mod errors;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod templates;

pub use errors::WebError;
pub use handlers::web_auth::CookieSettings;
pub use middleware::{RequestId, RequestIdExt, RequestIdMiddleware, WebAuthMiddleware};
pub use routes::{WebRouteDependencies, configure_web_routes};
pub use templates::TemplateEngine;
