// src/presentation/http/controllers/articles.rs
use crate::application::{
    commands::articles::{CreateArticleCommand, DeleteArticleCommand, UpdateArticleCommand},
    dto::{ArticleDto, AuthenticatedUser},
    queries::articles::{GetArticleBySlugQuery, ListArticlesQuery},
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, MaybeAuthenticated};
use crate::presentation::http::openapi::ArticleListResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{
        Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArticleListParams {
    /// Case-insensitive title filter.
    pub q: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Defaults to 10, capped at 100.
    pub page_size: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    pub title: String,
    pub body: String,
}

/// Full replacement of the editable fields.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateArticleRequest {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PatchArticleRequest {
    pub title: Option<String>,
    pub body: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/articles",
    operation_id = "ArticleList",
    tag = "articles",
    params(
        ArticleListParams,
        ("X-Request-ID" = Option<String>, Header, description = "Correlation id echoed on the response")
    ),
    responses(
        (status = 200, description = "Page of articles", body = ArticleListResponse),
        (status = 400, description = "Malformed query", body = ErrorResponse)
    )
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    params: Result<Query<ArticleListParams>, QueryRejection>,
) -> HttpResult<Json<ArticleListResponse>> {
    let Query(params) = params?;
    let page = state
        .services
        .article_queries
        .list_articles(ListArticlesQuery {
            page: params.page,
            page_size: params.page_size,
            search: params.q,
        })
        .await
        .into_http()?;

    Ok(Json(page.into()))
}

#[utoipa::path(
    post,
    path = "/api/articles",
    operation_id = "ArticleCreate",
    tag = "articles",
    request_body = CreateArticleRequest,
    params(
        ("X-Request-ID" = Option<String>, Header, description = "Correlation id echoed on the response")
    ),
    responses(
        (status = 201, description = "Article created", body = ArticleDto),
        (status = 400, description = "Invalid title or body", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 409, description = "No unique slug could be stored", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    payload: Result<Json<CreateArticleRequest>, JsonRejection>,
) -> HttpResult<(StatusCode, Json<ArticleDto>)> {
    let Json(payload) = payload?;
    let command = CreateArticleCommand {
        title: payload.title,
        body: payload.body,
    };

    let article = state
        .services
        .article_commands
        .create_article(Some(&actor), command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(article)))
}

#[utoipa::path(
    get,
    path = "/api/articles/{slug}",
    operation_id = "ArticleRetrieve",
    tag = "articles",
    params(
        ("slug" = String, Path, description = "Article slug"),
        ("X-Request-ID" = Option<String>, Header, description = "Correlation id echoed on the response")
    ),
    responses(
        (status = 200, description = "Article", body = ArticleDto),
        (status = 404, description = "No article with this slug", body = ErrorResponse)
    )
)]
pub async fn get_article(
    Extension(state): Extension<HttpState>,
    MaybeAuthenticated(actor): MaybeAuthenticated,
    Path(slug): Path<String>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_article_by_slug(actor.as_ref(), GetArticleBySlugQuery { slug })
        .await
        .into_http()
        .map(Json)
}

async fn apply_update(
    state: &HttpState,
    actor: &AuthenticatedUser,
    command: UpdateArticleCommand,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands
        .update_article(Some(actor), command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/articles/{slug}",
    operation_id = "ArticleUpdate",
    tag = "articles",
    request_body = UpdateArticleRequest,
    params(
        ("slug" = String, Path, description = "Article slug"),
        ("X-Request-ID" = Option<String>, Header, description = "Correlation id echoed on the response")
    ),
    responses(
        (status = 200, description = "Article updated; the slug is unchanged", body = ArticleDto),
        (status = 400, description = "Invalid title or body", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
        (status = 404, description = "No article with this slug", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_article(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(slug): Path<String>,
    payload: Result<Json<UpdateArticleRequest>, JsonRejection>,
) -> HttpResult<Json<ArticleDto>> {
    let Json(payload) = payload?;
    let command = UpdateArticleCommand {
        slug,
        title: Some(payload.title),
        body: Some(payload.body),
    };
    apply_update(&state, &actor, command).await
}

#[utoipa::path(
    patch,
    path = "/api/articles/{slug}",
    operation_id = "ArticlePartialUpdate",
    tag = "articles",
    request_body = PatchArticleRequest,
    params(
        ("slug" = String, Path, description = "Article slug"),
        ("X-Request-ID" = Option<String>, Header, description = "Correlation id echoed on the response")
    ),
    responses(
        (status = 200, description = "Article updated; the slug is unchanged", body = ArticleDto),
        (status = 400, description = "Invalid title or body", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
        (status = 404, description = "No article with this slug", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn partial_update_article(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(slug): Path<String>,
    payload: Result<Json<PatchArticleRequest>, JsonRejection>,
) -> HttpResult<Json<ArticleDto>> {
    let Json(payload) = payload?;
    let command = UpdateArticleCommand {
        slug,
        title: payload.title,
        body: payload.body,
    };
    apply_update(&state, &actor, command).await
}

#[utoipa::path(
    delete,
    path = "/api/articles/{slug}",
    operation_id = "ArticleDelete",
    tag = "articles",
    params(
        ("slug" = String, Path, description = "Article slug"),
        ("X-Request-ID" = Option<String>, Header, description = "Correlation id echoed on the response")
    ),
    responses(
        (status = 204, description = "Article deleted"),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
        (status = 404, description = "No article with this slug", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(slug): Path<String>,
) -> HttpResult<StatusCode> {
    state
        .services
        .article_commands
        .delete_article(Some(&actor), DeleteArticleCommand { slug })
        .await
        .into_http()?;

    Ok(StatusCode::NO_CONTENT)
}
