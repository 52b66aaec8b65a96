// tests/support/mocks/store.rs
use async_trait::async_trait;
use inkpost::domain::article::{
    Article, ArticleId, ArticleReadRepository, ArticleSlug, ArticleUpdate,
    ArticleWriteRepository, NewArticle,
};
use inkpost::domain::errors::DomainResult;
use inkpost::infrastructure::repositories::InMemoryStore;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Answers the first `stale` slug checks with "free", as if another writer
/// claimed the slug after the check. Inserts still see the real state.
pub struct StaleReadStore {
    inner: Arc<InMemoryStore>,
    stale: AtomicUsize,
    inserts: AtomicUsize,
}

impl StaleReadStore {
    pub fn new(inner: Arc<InMemoryStore>, stale: usize) -> Self {
        Self {
            inner,
            stale: AtomicUsize::new(stale),
            inserts: AtomicUsize::new(0),
        }
    }

    pub fn always_stale(inner: Arc<InMemoryStore>) -> Self {
        Self::new(inner, usize::MAX)
    }

    pub fn insert_attempts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArticleWriteRepository for StaleReadStore {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(article).await
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        self.inner.update(update).await
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        self.inner.delete(id).await
    }
}

#[async_trait]
impl ArticleReadRepository for StaleReadStore {
    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        self.inner.find_by_slug(slug).await
    }

    async fn slug_exists(&self, slug: &ArticleSlug) -> DomainResult<bool> {
        let stale = self
            .stale
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| match left {
                0 => None,
                usize::MAX => Some(usize::MAX),
                n => Some(n - 1),
            })
            .is_ok();
        if stale {
            Ok(false)
        } else {
            self.inner.slug_exists(slug).await
        }
    }

    async fn list_page(
        &self,
        limit: u32,
        offset: u64,
        search: Option<&str>,
    ) -> DomainResult<(Vec<Article>, u64)> {
        self.inner.list_page(limit, offset, search).await
    }
}
