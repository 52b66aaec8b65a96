// src/presentation/web/handlers.rs
use crate::application::{
    commands::{
        articles::{CreateArticleCommand, DeleteArticleCommand, UpdateArticleCommand},
        users::LoginUserCommand,
    },
    dto::AuthenticatedUser,
    error::ApplicationError,
    queries::articles::{DEFAULT_PAGE_SIZE, GetArticleBySlugQuery, ListArticlesQuery},
};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Form,
    extract::{
        Path, Query,
        rejection::{FormRejection, QueryRejection},
    },
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::error::{WebError, WebResult};
use super::pages::{self, ArticleFormView, Layout};
use super::session::{
    Notice, SESSION_COOKIE, WebUser, removal_cookie, safe_next, session_cookie, take_notice,
};

#[derive(Debug, Default, Deserialize)]
pub struct IndexParams {
    pub q: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArticleForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NextParams {
    pub next: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub next: Option<String>,
}

fn render(
    status: StatusCode,
    title: &str,
    user: Option<&AuthenticatedUser>,
    notice: Option<Notice>,
    content: &str,
) -> Response {
    let layout = Layout {
        title,
        user,
        notice,
    };
    (status, Html(layout.render(content))).into_response()
}

fn redirect_with_notice(jar: CookieJar, to: &str, notice: Notice) -> Response {
    (jar.add(notice.cookie()), Redirect::to(to)).into_response()
}

fn article_path(slug: &str) -> String {
    format!("/articles/{slug}")
}

pub async fn index(
    Extension(state): Extension<HttpState>,
    WebUser(user): WebUser,
    jar: CookieJar,
    params: Result<Query<IndexParams>, QueryRejection>,
) -> WebResult<Response> {
    let Query(params) = params.map_err(|err| WebError::bad_request(err.body_text()))?;
    let search = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string);

    let page = state
        .services
        .article_queries
        .list_articles(ListArticlesQuery {
            page: params.page,
            page_size: Some(DEFAULT_PAGE_SIZE),
            search: search.clone(),
        })
        .await
        .map_err(|err| WebError::from_app(err, "/"))?;

    let (jar, notice) = take_notice(jar);
    let content = pages::article_list(&page, search.as_deref());
    let page = render(StatusCode::OK, "Articles", user.as_ref(), notice, &content);
    Ok((jar, page).into_response())
}

pub async fn article_detail(
    Extension(state): Extension<HttpState>,
    WebUser(user): WebUser,
    jar: CookieJar,
    Path(slug): Path<String>,
) -> WebResult<Response> {
    let path = article_path(&slug);
    let detail = state
        .services
        .article_queries
        .get_article_detail(user.as_ref(), GetArticleBySlugQuery { slug })
        .await
        .map_err(|err| WebError::from_app(err, &path))?;

    let (jar, notice) = take_notice(jar);
    let content = pages::article_detail(&detail);
    let page = render(
        StatusCode::OK,
        &detail.article.title,
        user.as_ref(),
        notice,
        &content,
    );
    Ok((jar, page).into_response())
}

pub async fn new_article_form(WebUser(user): WebUser) -> WebResult<Response> {
    let Some(user) = user else {
        return Err(WebError::LoginRequired {
            next: "/articles/new".into(),
        });
    };
    let content = pages::article_form(&ArticleFormView {
        heading: "New article",
        action: "/articles/new",
        ..Default::default()
    });
    Ok(render(StatusCode::OK, "New article", Some(&user), None, &content))
}

pub async fn create_article(
    Extension(state): Extension<HttpState>,
    WebUser(user): WebUser,
    jar: CookieJar,
    form: Result<Form<ArticleForm>, FormRejection>,
) -> WebResult<Response> {
    let Form(form) = form.map_err(|err| WebError::bad_request(err.body_text()))?;
    let result = state
        .services
        .article_commands
        .create_article(
            user.as_ref(),
            CreateArticleCommand {
                title: form.title.clone(),
                body: form.body.clone(),
            },
        )
        .await;

    match result {
        Ok(article) => Ok(redirect_with_notice(
            jar,
            &article_path(&article.slug),
            Notice::Created,
        )),
        Err(err) => match err.validation_message().map(str::to_owned) {
            Some(message) => {
                let content = pages::article_form(&ArticleFormView {
                    heading: "New article",
                    action: "/articles/new",
                    title: &form.title,
                    body: &form.body,
                    error: Some(&message),
                });
                Ok(render(
                    StatusCode::BAD_REQUEST,
                    "New article",
                    user.as_ref(),
                    None,
                    &content,
                ))
            }
            None => Err(WebError::from_app(err, "/articles/new")),
        },
    }
}

pub async fn edit_article_form(
    Extension(state): Extension<HttpState>,
    WebUser(user): WebUser,
    Path(slug): Path<String>,
) -> WebResult<Response> {
    let path = format!("/articles/{slug}/edit");
    let article = state
        .services
        .article_queries
        .get_article_for_edit(user.as_ref(), GetArticleBySlugQuery { slug })
        .await
        .map_err(|err| WebError::from_app(err, &path))?;

    let content = pages::article_form(&ArticleFormView {
        heading: "Edit article",
        action: &path,
        title: &article.title,
        body: &article.body,
        error: None,
    });
    Ok(render(StatusCode::OK, "Edit article", user.as_ref(), None, &content))
}

pub async fn update_article(
    Extension(state): Extension<HttpState>,
    WebUser(user): WebUser,
    jar: CookieJar,
    Path(slug): Path<String>,
    form: Result<Form<ArticleForm>, FormRejection>,
) -> WebResult<Response> {
    let path = format!("/articles/{slug}/edit");
    let Form(form) = form.map_err(|err| WebError::bad_request(err.body_text()))?;
    let result = state
        .services
        .article_commands
        .update_article(
            user.as_ref(),
            UpdateArticleCommand {
                slug,
                title: Some(form.title.clone()),
                body: Some(form.body.clone()),
            },
        )
        .await;

    match result {
        Ok(article) => Ok(redirect_with_notice(
            jar,
            &article_path(&article.slug),
            Notice::Updated,
        )),
        Err(err) => match err.validation_message().map(str::to_owned) {
            Some(message) => {
                let content = pages::article_form(&ArticleFormView {
                    heading: "Edit article",
                    action: &path,
                    title: &form.title,
                    body: &form.body,
                    error: Some(&message),
                });
                Ok(render(
                    StatusCode::BAD_REQUEST,
                    "Edit article",
                    user.as_ref(),
                    None,
                    &content,
                ))
            }
            None => Err(WebError::from_app(err, &path)),
        },
    }
}

pub async fn delete_article_form(
    Extension(state): Extension<HttpState>,
    WebUser(user): WebUser,
    Path(slug): Path<String>,
) -> WebResult<Response> {
    let path = format!("/articles/{slug}/delete");
    let article = state
        .services
        .article_queries
        .get_article_for_edit(user.as_ref(), GetArticleBySlugQuery { slug })
        .await
        .map_err(|err| WebError::from_app(err, &path))?;

    let content = pages::delete_confirmation(&article);
    Ok(render(StatusCode::OK, "Delete article", user.as_ref(), None, &content))
}

pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    WebUser(user): WebUser,
    jar: CookieJar,
    Path(slug): Path<String>,
) -> WebResult<Response> {
    let path = format!("/articles/{slug}/delete");
    state
        .services
        .article_commands
        .delete_article(user.as_ref(), DeleteArticleCommand { slug })
        .await
        .map_err(|err| WebError::from_app(err, &path))?;

    Ok(redirect_with_notice(jar, "/", Notice::Deleted))
}

pub async fn login_form(
    WebUser(user): WebUser,
    Query(params): Query<NextParams>,
) -> Response {
    let next = safe_next(params.next.as_deref());
    if user.is_some() {
        return Redirect::to(&next).into_response();
    }
    let content = pages::login_form(&next, "", None);
    render(StatusCode::OK, "Log in", None, None, &content)
}

pub async fn login(
    Extension(state): Extension<HttpState>,
    jar: CookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> WebResult<Response> {
    let Form(form) = form.map_err(|err| WebError::bad_request(err.body_text()))?;
    let next = safe_next(form.next.as_deref());

    let result = state
        .services
        .user_commands
        .login(LoginUserCommand {
            username: form.username.clone(),
            password: form.password,
        })
        .await;

    match result {
        Ok(login) => {
            let cookie =
                session_cookie(login.token.token, login.token.expires_in, state.cookie_secure);
            Ok((jar.add(cookie), Redirect::to(&next)).into_response())
        }
        Err(ApplicationError::Unauthorized(_)) => {
            let content = pages::login_form(
                &next,
                &form.username,
                Some("Please enter a correct username and password."),
            );
            Ok(render(StatusCode::OK, "Log in", None, None, &content))
        }
        Err(ApplicationError::Forbidden(_)) => {
            let content =
                pages::login_form(&next, &form.username, Some("This account is inactive."));
            Ok(render(StatusCode::OK, "Log in", None, None, &content))
        }
        Err(err) => Err(WebError::from_app(err, "/login")),
    }
}

pub async fn logout(jar: CookieJar) -> Response {
    (jar.add(removal_cookie(SESSION_COOKIE)), Redirect::to("/")).into_response()
}
