// src/domain/article/entity.rs
use crate::domain::article::value_objects::{ArticleBody, ArticleId, ArticleSlug, ArticleTitle};
use crate::domain::user::{UserId, Username};
use chrono::{DateTime, Utc};

/// The user recorded as having created an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleOwner {
    pub id: UserId,
    pub username: Username,
}

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub owner: ArticleOwner,
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub body: ArticleBody,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner.id == user_id
    }

    /// Replace the editable content. The slug and owner are left untouched and
    /// `updated_at` never moves before `created_at`.
    pub fn set_content(&mut self, title: ArticleTitle, body: ArticleBody, now: DateTime<Utc>) {
        self.title = title;
        self.body = body;
        self.updated_at = now.max(self.created_at);
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub owner_id: UserId,
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub body: ArticleBody,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewArticle {
    pub fn new(
        owner_id: UserId,
        title: ArticleTitle,
        slug: ArticleSlug,
        body: ArticleBody,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            owner_id,
            title,
            slug,
            body,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: ArticleId,
    pub title: Option<ArticleTitle>,
    pub body: Option<ArticleBody>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleUpdate {
    pub fn new(id: ArticleId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            body: None,
            updated_at,
        }
    }

    pub fn with_title(mut self, title: ArticleTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_body(mut self, body: ArticleBody) -> Self {
        self.body = Some(body);
        self
    }
}

impl From<&Article> for ArticleUpdate {
    fn from(article: &Article) -> Self {
        ArticleUpdate::new(article.id, article.updated_at)
            .with_title(article.title.clone())
            .with_body(article.body.clone())
    }
}
