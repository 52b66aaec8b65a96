mod get_by_slug;
mod list;
mod service;

pub use get_by_slug::{ArticleDetail, GetArticleBySlugQuery};
pub use list::{DEFAULT_PAGE_SIZE, ListArticlesQuery, MAX_PAGE_SIZE};
pub use service::ArticleQueryService;
