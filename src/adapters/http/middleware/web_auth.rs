use actix_web::{
  Error, HttpMessage, HttpResponse,
  body::EitherBody,
  cookie::Cookie,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{future::ready, rc::Rc, sync::Arc};

use crate::application::auth::GetCurrentUserUseCase;
use crate::domain::auth::errors::AuthError;

pub const SESSION_COOKIE: &str = "session_token";

/// Resolves the session cookie and stores the `User` in request extensions
///
/// In `required` mode an anonymous request is redirected to
/// `/login?next=<original path>`. In `optional` mode it passes through
/// without a user, which lets the login and register pages bounce visitors
/// who are already signed in.
pub struct WebAuthMiddleware {
  current_user: Arc<GetCurrentUserUseCase>,
  required: bool,
}

impl WebAuthMiddleware {
  pub fn required(current_user: Arc<GetCurrentUserUseCase>) -> Self {
    Self {
      current_user,
      required: true,
    }
  }

  pub fn optional(current_user: Arc<GetCurrentUserUseCase>) -> Self {
    Self {
      current_user,
      required: false,
    }
  }
}

impl<S, B> Transform<S, ServiceRequest> for WebAuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type InitError = ();
  type Transform = WebAuthMiddlewareService<S>;
  type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(WebAuthMiddlewareService {
      service: Rc::new(service),
      current_user: self.current_user.clone(),
      required: self.required,
    }))
  }
}

pub struct WebAuthMiddlewareService<S> {
  service: Rc<S>,
  current_user: Arc<GetCurrentUserUseCase>,
  required: bool,
}

impl<S, B> Service<ServiceRequest> for WebAuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());

    let current_user = self.current_user.clone();
    let service = Rc::clone(&self.service);
    let required = self.required;

    Box::pin(async move {
      let user = match token.as_deref() {
        Some(token) => match current_user.execute(token).await {
          Ok(user) => Some(user),
          Err(AuthError::InvalidSession) => {
            tracing::debug!("Ignoring stale session cookie on {}", req.path());
            None
          }
          Err(e) => return Err(actix_web::error::ErrorInternalServerError(e)),
        },
        None => None,
      };
      let stale_cookie = token.is_some() && user.is_none();

      match user {
        Some(user) => {
          req.extensions_mut().insert(user);
          let res = service.call(req).await?;
          Ok(res.map_into_left_body())
        }
        None if required => {
          let mut response = HttpResponse::Found();
          response.insert_header(("Location", login_redirect(&req)));
          if stale_cookie {
            response.cookie(session_removal_cookie());
          }
          Ok(req.into_response(response.finish()).map_into_right_body())
        }
        None => {
          let mut res = service.call(req).await?;
          if stale_cookie {
            if let Err(e) = res.response_mut().add_cookie(&session_removal_cookie()) {
              tracing::warn!("Failed to clear stale session cookie: {}", e);
            }
          }
          Ok(res.map_into_left_body())
        }
      }
    })
  }
}

/// Expires the session cookie in the browser
pub fn session_removal_cookie() -> Cookie<'static> {
  let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
  cookie.make_removal();
  cookie
}

fn login_redirect(req: &ServiceRequest) -> String {
  let next = match req.query_string() {
    "" => req.path().to_string(),
    query => format!("{}?{}", req.path(), query),
  };

  match serde_urlencoded::to_string([("next", next.as_str())]) {
    Ok(query) => format!("/login?{}", query),
    Err(_) => "/login".to_string(),
  }
}
