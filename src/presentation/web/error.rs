// src/presentation/web/error.rs
use crate::application::error::ApplicationError;
use crate::domain::errors::DomainError;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use super::pages::{Layout, error_message};
use super::session::login_url;

/// Failure of a browser request. Login-required failures become a redirect;
/// everything else renders a small HTML page.
#[derive(Debug)]
pub enum WebError {
    LoginRequired { next: String },
    Page { status: StatusCode, message: String },
}

impl WebError {
    /// Translate an application error raised while serving `path`.
    pub fn from_app(err: ApplicationError, path: &str) -> Self {
        let (status, message) = match err {
            ApplicationError::Unauthorized(_) => {
                return Self::LoginRequired {
                    next: path.to_string(),
                };
            }
            ApplicationError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApplicationError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApplicationError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApplicationError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApplicationError::Infrastructure(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApplicationError::Domain(err) => {
                let status = match &err {
                    DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                    DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                    DomainError::Conflict(_)
                    | DomainError::SlugConflict(_)
                    | DomainError::SlugAssignmentExhausted { .. } => StatusCode::CONFLICT,
                    DomainError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
        };
        Self::Page { status, message }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Page {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::LoginRequired { next } => Redirect::to(&login_url(&next)).into_response(),
            WebError::Page { status, message } => {
                if status.is_server_error() {
                    tracing::error!(status = %status, message = %message, "page failed");
                }
                // Internal details stay in the log.
                let shown = if status.is_server_error() {
                    "Something went wrong."
                } else {
                    message.as_str()
                };
                let heading = status.canonical_reason().unwrap_or("Error");
                let layout = Layout {
                    title: heading,
                    user: None,
                    notice: None,
                };
                (status, Html(layout.render(&error_message(heading, shown)))).into_response()
            }
        }
    }
}

pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn unauthorized_redirects_to_login_with_next() {
        let response = WebError::from_app(ApplicationError::unauthorized("x"), "/articles/new")
            .into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/login?next=%2Farticles%2Fnew"
        );
    }

    #[test]
    fn forbidden_renders_a_403_page() {
        let response =
            WebError::from_app(ApplicationError::forbidden("not yours"), "/x").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
