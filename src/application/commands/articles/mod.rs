// src/application/commands/articles/mod.rs
pub(crate) mod access;
mod create;
mod delete;
mod service;
mod update;

pub use create::{CreateArticleCommand, MAX_INSERT_ATTEMPTS};
pub use delete::DeleteArticleCommand;
pub use service::ArticleCommandService;
pub use update::UpdateArticleCommand;
