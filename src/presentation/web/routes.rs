// src/presentation/web/routes.rs
use axum::{
    Router,
    routing::{get, post},
};

use super::handlers;

pub fn web_router() -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/articles/new",
            get(handlers::new_article_form).post(handlers::create_article),
        )
        .route("/articles/{slug}", get(handlers::article_detail))
        .route(
            "/articles/{slug}/edit",
            get(handlers::edit_article_form).post(handlers::update_article),
        )
        .route(
            "/articles/{slug}/delete",
            get(handlers::delete_article_form).post(handlers::delete_article),
        )
        .route("/login", get(handlers::login_form).post(handlers::login))
        .route("/logout", post(handlers::logout))
}
