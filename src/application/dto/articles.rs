use crate::domain::article::Article;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

/// Public representation of an article. `owner` is the owner's username.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleDto {
    pub title: String,
    pub slug: String,
    pub body: String,
    pub owner: String,
    #[serde(skip)]
    pub owner_id: i64,
    #[serde(with = "serde_time")]
    pub created: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated: DateTime<Utc>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            title: article.title.into(),
            slug: article.slug.into(),
            body: article.body.into(),
            owner: article.owner.username.into(),
            owner_id: article.owner.id.into(),
            created: article.created_at,
            updated: article.updated_at,
        }
    }
}
