use super::ArticleQueryService;
use crate::application::{
    dto::{ArticleDto, PaginatedResult},
    error::ApplicationResult,
};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Default)]
pub struct ListArticlesQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
}

impl ListArticlesQuery {
    /// Clamp paging to `page >= 1` and `1 <= page_size <= MAX_PAGE_SIZE`.
    fn normalized(&self) -> (u32, u32) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = match self.page_size {
            None | Some(0) => DEFAULT_PAGE_SIZE,
            Some(size) => size.min(MAX_PAGE_SIZE),
        };
        (page, page_size)
    }

    fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

impl ArticleQueryService {
    /// Newest first. Pages past the end come back empty rather than failing.
    pub async fn list_articles(
        &self,
        query: ListArticlesQuery,
    ) -> ApplicationResult<PaginatedResult<ArticleDto>> {
        let (page, page_size) = query.normalized();
        let offset = u64::from(page - 1) * u64::from(page_size);

        let (records, total) = self
            .read_repo
            .list_page(page_size, offset, query.search_term())
            .await?;

        let results = records.into_iter().map(Into::into).collect();
        Ok(PaginatedResult::new(results, total, page, page_size))
    }
}
