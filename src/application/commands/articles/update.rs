use super::{
    ArticleCommandService,
    access::{ensure_allowed, ensure_authenticated},
};
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser, auth::principal_of},
        error::ApplicationResult,
    },
    domain::article::{ArticleBody, ArticleTitle, ArticleUpdate, policy},
};

/// Edit the title and/or body of the article at `slug`. Fields left as `None`
/// keep their current value. The slug itself never changes.
pub struct UpdateArticleCommand {
    pub slug: String,
    pub title: Option<String>,
    pub body: Option<String>,
}

impl ArticleCommandService {
    pub async fn update_article(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let principal = principal_of(actor);
        ensure_authenticated(principal, "update articles")?;

        let mut article = self.load_by_slug(&command.slug).await?;
        ensure_allowed(policy::decide_write(&article, principal), "update")?;

        let title = command.title.map(ArticleTitle::new).transpose()?;
        let body = command.body.map(ArticleBody::new).transpose()?;
        if title.is_none() && body.is_none() {
            return Ok(article.into());
        }

        let title = title.unwrap_or_else(|| article.title.clone());
        let body = body.unwrap_or_else(|| article.body.clone());
        article.set_content(title, body, self.clock.now());

        let updated = self.write_repo.update(ArticleUpdate::from(&article)).await?;
        tracing::debug!(
            article_id = i64::from(updated.id),
            slug = %updated.slug,
            "article updated"
        );
        Ok(updated.into())
    }
}
