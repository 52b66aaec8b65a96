use super::ArticleQueryService;
use crate::{
    application::{
        commands::articles::access::{ensure_allowed, ensure_authenticated},
        dto::{ArticleDto, AuthenticatedUser, auth::principal_of},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{Article, ArticleSlug, policy},
};

pub struct GetArticleBySlugQuery {
    pub slug: String,
}

/// An article together with what the viewer may do with it.
#[derive(Debug, Clone)]
pub struct ArticleDetail {
    pub article: ArticleDto,
    pub can_edit: bool,
}

impl ArticleQueryService {
    pub async fn get_article_by_slug(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: GetArticleBySlugQuery,
    ) -> ApplicationResult<ArticleDto> {
        Ok(self.get_article_detail(actor, query).await?.article)
    }

    pub async fn get_article_detail(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: GetArticleBySlugQuery,
    ) -> ApplicationResult<ArticleDetail> {
        let principal = principal_of(actor);
        let article = self.find(&query.slug).await?;
        if !policy::can_read(&article, principal) {
            return Err(ApplicationError::not_found("article not found"));
        }

        let can_edit = policy::can_write(&article, principal);
        Ok(ArticleDetail {
            article: article.into(),
            can_edit,
        })
    }

    /// Load an article for an edit or delete form. Applies the same checks as
    /// the corresponding command so a form is never shown to someone who
    /// could not submit it.
    pub async fn get_article_for_edit(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: GetArticleBySlugQuery,
    ) -> ApplicationResult<ArticleDto> {
        let principal = principal_of(actor);
        ensure_authenticated(principal, "edit articles")?;
        let article = self.find(&query.slug).await?;
        ensure_allowed(policy::decide_write(&article, principal), "edit")?;
        Ok(article.into())
    }

    async fn find(&self, slug: &str) -> ApplicationResult<Article> {
        let slug =
            ArticleSlug::new(slug).map_err(|_| ApplicationError::not_found("article not found"))?;
        self.read_repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))
    }
}
