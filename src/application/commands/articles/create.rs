// src/application/commands/articles/create.rs
use super::{ArticleCommandService, access::ensure_allowed};
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser, auth::principal_of},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleBody, ArticleTitle, NewArticle, policy},
        errors::DomainError,
    },
};

/// How many times an insert is attempted when the store reports that the
/// freshly assigned slug was taken in the meantime.
pub const MAX_INSERT_ATTEMPTS: usize = 3;

pub struct CreateArticleCommand {
    pub title: String,
    pub body: String,
}

impl ArticleCommandService {
    pub async fn create_article(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let principal = principal_of(actor);
        ensure_allowed(policy::decide_create(principal), "create articles")?;
        let Some(owner_id) = principal.user_id() else {
            return Err(ApplicationError::unauthorized(
                "authentication required to create articles",
            ));
        };

        let title = ArticleTitle::new(command.title)?;
        let body = ArticleBody::new(command.body)?;
        let now = self.clock.now();

        let mut last_slug = None;
        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let slug = self.slug_service.generate_unique_slug(&title).await?;
            let new_article = NewArticle::new(owner_id, title.clone(), slug, body.clone(), now);

            match self.write_repo.insert(new_article).await {
                Ok(created) => {
                    tracing::info!(
                        article_id = i64::from(created.id),
                        slug = %created.slug,
                        owner_id = i64::from(owner_id),
                        "article created"
                    );
                    return Ok(created.into());
                }
                Err(DomainError::SlugConflict(taken)) => {
                    tracing::warn!(
                        slug = %taken,
                        attempt,
                        "slug claimed concurrently; reassigning"
                    );
                    last_slug = Some(taken);
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(ApplicationError::conflict(format!(
            "could not store a unique slug after {MAX_INSERT_ATTEMPTS} attempts (last tried '{}')",
            last_slug.unwrap_or_default()
        )))
    }
}
