// src/presentation/web/session.rs
use crate::{application::dto::AuthenticatedUser, presentation::http::state::HttpState};
use axum::{Extension, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cookie::{CookieBuilder, time::Duration};
use std::convert::Infallible;

pub const SESSION_COOKIE: &str = "inkpost_session";
pub const NOTICE_COOKIE: &str = "inkpost_notice";

/// The user behind the session cookie. Missing, expired and forged cookies all
/// yield an anonymous visitor.
#[derive(Debug, Clone)]
pub struct WebUser(pub Option<AuthenticatedUser>);

impl<S: Send + Sync> FromRequestParts<S> for WebUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = cookie_value(parts, SESSION_COOKIE) else {
            return Ok(Self(None));
        };
        let Ok(Extension(app_state)) =
            Extension::<HttpState>::from_request_parts(parts, state).await
        else {
            return Ok(Self(None));
        };

        match app_state.services.authenticate(&token).await {
            Ok(user) => Ok(Self(Some(user))),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring invalid session cookie");
                Ok(Self(None))
            }
        }
    }
}

/// One-shot message carried across a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Created,
    Updated,
    Deleted,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::Created => "Article created.",
            Notice::Updated => "Article updated.",
            Notice::Deleted => "Article deleted.",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Notice::Created => "created",
            Notice::Updated => "updated",
            Notice::Deleted => "deleted",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "created" => Some(Notice::Created),
            "updated" => Some(Notice::Updated),
            "deleted" => Some(Notice::Deleted),
            _ => None,
        }
    }

    pub fn cookie(self) -> Cookie<'static> {
        site_cookie(NOTICE_COOKIE, self.key()).build()
    }
}

/// Read the notice the previous response left, clearing it so it shows once.
pub fn take_notice(jar: CookieJar) -> (CookieJar, Option<Notice>) {
    match jar
        .get(NOTICE_COOKIE)
        .and_then(|cookie| Notice::from_key(cookie.value()))
    {
        Some(notice) => (jar.add(removal_cookie(NOTICE_COOKIE)), Some(notice)),
        None => (jar, None),
    }
}

fn cookie_value(parts: &Parts, name: &str) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(name)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
}

fn site_cookie(
    name: &'static str,
    value: impl Into<String>,
) -> CookieBuilder<'static> {
    Cookie::build((name, value.into()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
}

/// The browser session: the access token, living as long as the token does.
pub fn session_cookie(
    token: impl Into<String>,
    max_age_secs: i64,
    secure: bool,
) -> Cookie<'static> {
    site_cookie(SESSION_COOKIE, token)
        .secure(secure)
        .max_age(Duration::seconds(max_age_secs))
        .build()
}

/// A cookie that makes the browser drop `name` immediately.
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = site_cookie(name, "").build();
    cookie.make_removal();
    cookie
}

/// Accept only local absolute paths as a post-login destination.
pub fn safe_next(next: Option<&str>) -> String {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}

/// `/login?next=<path>` with the path form-encoded.
pub fn login_url(next: &str) -> String {
    match serde_urlencoded::to_string([("next", next)]) {
        Ok(query) => format!("/login?{query}"),
        Err(_) => "/login".to_string(),
    }
}
