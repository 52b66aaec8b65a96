// src/domain/article/services/mod.rs
use std::future::Future;
use std::sync::Arc;

use crate::domain::article::repository::ArticleReadRepository;
use crate::domain::article::slug::{MAX_CANDIDATES, bounded_base, candidates, is_reserved};
use crate::domain::article::value_objects::{ArticleSlug, ArticleTitle};
use crate::domain::errors::{DomainError, DomainResult};

/// Turns free text into lowercase, hyphen-separated ASCII.
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}

/// Derive a slug for `title` that `exists` reports as free.
///
/// Candidates are `base`, `base-2`, `base-3`, … and are checked one at a time,
/// so `exists` sees the store as it is at each step. Errors from `exists` are
/// returned unchanged.
pub async fn assign_slug<F, Fut>(
    title: &ArticleTitle,
    generator: &dyn SlugGenerator,
    mut exists: F,
) -> DomainResult<ArticleSlug>
where
    F: FnMut(ArticleSlug) -> Fut,
    Fut: Future<Output = DomainResult<bool>>,
{
    let base = bounded_base(&generator.slugify(title.as_str()));

    for candidate in candidates(&base) {
        if is_reserved(&candidate) {
            continue;
        }
        let slug = ArticleSlug::new(candidate)?;
        if !exists(slug.clone()).await? {
            return Ok(slug);
        }
    }

    Err(DomainError::SlugAssignmentExhausted {
        base,
        attempts: MAX_CANDIDATES,
    })
}

/// Domain service responsible for producing unique slugs for articles.
pub struct ArticleSlugService {
    read_repo: Arc<dyn ArticleReadRepository>,
    generator: Arc<dyn SlugGenerator>,
}

impl ArticleSlugService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        generator: Arc<dyn SlugGenerator>,
    ) -> Self {
        Self {
            read_repo,
            generator,
        }
    }

    /// Best-effort pre-check against the live store. The unique constraint on
    /// insert remains authoritative.
    pub async fn generate_unique_slug(&self, title: &ArticleTitle) -> DomainResult<ArticleSlug> {
        let repo = Arc::clone(&self.read_repo);
        assign_slug(title, self.generator.as_ref(), move |candidate| {
            let repo = Arc::clone(&repo);
            async move { repo.slug_exists(&candidate).await }
        })
        .await
    }
}
