// src/infrastructure/repositories/memory.rs
//! Process-local store used when no database is configured and by tests.
//! It enforces the same uniqueness rules as the Postgres schema.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::article::{
    Article, ArticleId, ArticleOwner, ArticleReadRepository, ArticleSlug, ArticleUpdate,
    ArticleWriteRepository, NewArticle,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{NewUser, User, UserId, UserRepository, Username};

#[derive(Default)]
struct State {
    next_user_id: i64,
    next_article_id: i64,
    users: BTreeMap<i64, User>,
    articles: BTreeMap<i64, Article>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> DomainResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| DomainError::Persistence("in-memory store lock poisoned".into()))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut state = self.state()?;
        if state
            .users
            .values()
            .any(|user| user.username == new_user.username)
        {
            return Err(DomainError::Conflict("username already exists".into()));
        }

        state.next_user_id += 1;
        let user = User {
            id: UserId::new(state.next_user_id)?,
            username: new_user.username,
            password_hash: new_user.password_hash,
            is_active: new_user.is_active,
            created_at: new_user.created_at,
        };
        let key = state.next_user_id;
        state.users.insert(key, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        let state = self.state()?;
        Ok(state
            .users
            .values()
            .find(|user| &user.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.state()?.users.get(&i64::from(id)).cloned())
    }
}

#[async_trait]
impl ArticleWriteRepository for InMemoryStore {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let mut state = self.state()?;
        if state.articles.values().any(|a| a.slug == article.slug) {
            return Err(DomainError::SlugConflict(article.slug.to_string()));
        }
        let owner = state
            .users
            .get(&i64::from(article.owner_id))
            .map(|user| ArticleOwner {
                id: user.id,
                username: user.username.clone(),
            })
            .ok_or_else(|| DomainError::NotFound("owner not found".into()))?;

        state.next_article_id += 1;
        let stored = Article {
            id: ArticleId::new(state.next_article_id)?,
            owner,
            title: article.title,
            slug: article.slug,
            body: article.body,
            created_at: article.created_at,
            updated_at: article.updated_at,
        };
        let key = state.next_article_id;
        state.articles.insert(key, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let mut state = self.state()?;
        let article = state
            .articles
            .get_mut(&i64::from(update.id))
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;

        if let Some(title) = update.title {
            article.title = title;
        }
        if let Some(body) = update.body {
            article.body = body;
        }
        article.updated_at = update.updated_at.max(article.created_at);
        Ok(article.clone())
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        self.state()?
            .articles
            .remove(&i64::from(id))
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("article not found".into()))
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryStore {
    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        let state = self.state()?;
        Ok(state.articles.values().find(|a| &a.slug == slug).cloned())
    }

    async fn slug_exists(&self, slug: &ArticleSlug) -> DomainResult<bool> {
        Ok(self.state()?.articles.values().any(|a| &a.slug == slug))
    }

    async fn list_page(
        &self,
        limit: u32,
        offset: u64,
        search: Option<&str>,
    ) -> DomainResult<(Vec<Article>, u64)> {
        let needle = search.map(str::to_lowercase);
        let state = self.state()?;

        let mut matching: Vec<&Article> = state
            .articles
            .values()
            .filter(|a| match &needle {
                Some(needle) => a.title.as_str().to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| i64::from(b.id).cmp(&i64::from(a.id)))
        });

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(limit as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }
}
