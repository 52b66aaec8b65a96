// tests/slug_retry.rs
//! Slug assignment when the pre-insert check races with another writer.
use std::sync::Arc;

use inkpost::application::{
    commands::articles::{ArticleCommandService, CreateArticleCommand, MAX_INSERT_ATTEMPTS},
    error::ApplicationError,
};
use inkpost::domain::article::services::ArticleSlugService;
use inkpost::infrastructure::{repositories::InMemoryStore, util::DefaultSlugGenerator};

mod support;
use support::{StaleReadStore, SteppingClock, alice, bob};

fn commands(store: Arc<StaleReadStore>) -> ArticleCommandService {
    let slug_service = Arc::new(ArticleSlugService::new(
        store.clone(),
        Arc::new(DefaultSlugGenerator),
    ));
    ArticleCommandService::new(
        store.clone(),
        store,
        slug_service,
        Arc::new(SteppingClock::default()),
    )
}

fn command(title: &str) -> CreateArticleCommand {
    CreateArticleCommand {
        title: title.into(),
        body: "body".into(),
    }
}

async fn store_with_my_first() -> Arc<InMemoryStore> {
    let inner = support::seeded_store().await;
    let direct = commands(Arc::new(StaleReadStore::new(inner.clone(), 0)));
    let first = direct
        .create_article(Some(&alice()), command("My First"))
        .await
        .expect("first article");
    assert_eq!(first.slug, "my-first");
    inner
}

#[tokio::test]
async fn conflicting_insert_is_retried_with_a_fresh_slug() {
    let inner = store_with_my_first().await;
    let store = Arc::new(StaleReadStore::new(inner, 1));
    let service = commands(store.clone());

    let created = service
        .create_article(Some(&bob()), command("My First"))
        .await
        .expect("retry succeeds");

    assert_eq!(created.slug, "my-first-2");
    assert_eq!(created.owner, "bob");
    assert_eq!(store.insert_attempts(), 2);
}

#[tokio::test]
async fn persistent_conflicts_give_up_with_a_conflict() {
    let inner = store_with_my_first().await;
    let store = Arc::new(StaleReadStore::always_stale(inner.clone()));
    let service = commands(store.clone());

    let err = service
        .create_article(Some(&bob()), command("My First"))
        .await
        .expect_err("every attempt collides");

    assert!(matches!(err, ApplicationError::Conflict(_)), "got {err:?}");
    assert_eq!(store.insert_attempts(), MAX_INSERT_ATTEMPTS);

    let (articles, total) = {
        use inkpost::domain::article::ArticleReadRepository;
        inner.list_page(10, 0, None).await.expect("list")
    };
    assert_eq!(total, 1);
    assert_eq!(articles[0].owner.username.as_str(), "alice");
}

#[tokio::test]
async fn anonymous_create_never_reaches_the_store() {
    let inner = support::seeded_store().await;
    let store = Arc::new(StaleReadStore::new(inner, 0));
    let service = commands(store.clone());

    let err = service
        .create_article(None, command("Anything"))
        .await
        .expect_err("anonymous");
    assert!(matches!(err, ApplicationError::Unauthorized(_)));
    assert_eq!(store.insert_attempts(), 0);
}
