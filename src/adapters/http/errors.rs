use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::domain::auth::errors::AuthError;

/// Failure of a page handler that is not a normal form or flash outcome
#[derive(Debug)]
pub enum WebError {
  /// Unknown route or record (404)
  NotFound,

  /// Anything else (500); the detail is logged, never rendered
  Internal(String),
}

impl fmt::Display for WebError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      WebError::NotFound => write!(f, "Not found"),
      WebError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for WebError {
  fn status_code(&self) -> StatusCode {
    match self {
      WebError::NotFound => StatusCode::NOT_FOUND,
      WebError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let message = match self {
      WebError::NotFound => "404 Not Found",
      WebError::Internal(msg) => {
        tracing::error!("Internal error: {}", msg);
        "500 Internal Server Error"
      }
    };

    HttpResponse::build(self.status_code())
      .content_type(ContentType::plaintext())
      .body(message)
  }
}

impl From<AuthError> for WebError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::UserNotFound => WebError::NotFound,
      other => WebError::Internal(other.to_string()),
    }
  }
}

impl From<tera::Error> for WebError {
  fn from(error: tera::Error) -> Self {
    // tera nests the useful part of the message in its source chain
    let mut message = error.to_string();
    let mut source = std::error::Error::source(&error);
    while let Some(inner) = source {
      message.push_str(": ");
      message.push_str(&inner.to_string());
      source = inner.source();
    }
    WebError::Internal(format!("Template error: {}", message))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::errors::RepositoryError;

  #[test]
  fn test_web_error_status_codes() {
    assert_eq!(WebError::NotFound.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
      WebError::Internal("boom".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_auth_error_conversion() {
    assert!(matches!(
      WebError::from(AuthError::UserNotFound),
      WebError::NotFound
    ));
    assert!(matches!(
      WebError::from(AuthError::Repository(RepositoryError::ConnectionFailed(
        "down".to_string()
      ))),
      WebError::Internal(_)
    ));
  }

  #[actix_web::test]
  async fn test_internal_detail_is_not_rendered() {
    let response = WebError::Internal("password=hunter2".to_string()).error_response();
    let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();

    assert_eq!(body, "500 Internal Server Error");
  }
}
