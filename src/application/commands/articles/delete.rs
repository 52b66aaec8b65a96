// src/application/commands/articles/delete.rs
use super::{
    ArticleCommandService,
    access::{ensure_allowed, ensure_authenticated},
};
use crate::{
    application::{
        dto::{AuthenticatedUser, auth::principal_of},
        error::ApplicationResult,
    },
    domain::article::policy,
};

pub struct DeleteArticleCommand {
    pub slug: String,
}

impl ArticleCommandService {
    pub async fn delete_article(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: DeleteArticleCommand,
    ) -> ApplicationResult<()> {
        let principal = principal_of(actor);
        ensure_authenticated(principal, "delete articles")?;

        let article = self.load_by_slug(&command.slug).await?;
        ensure_allowed(policy::decide_write(&article, principal), "delete")?;

        self.write_repo.delete(article.id).await?;
        tracing::info!(article_id = i64::from(article.id), slug = %article.slug, "article deleted");
        Ok(())
    }
}
