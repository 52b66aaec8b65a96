use serde::Serialize;

/// Page-number pagination envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct PaginatedResult<T> {
    pub count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub results: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub fn new(results: Vec<T>, count: u64, page: u32, page_size: u32) -> Self {
        let total_pages = if count == 0 || page_size == 0 {
            0
        } else {
            u32::try_from((count - 1) / u64::from(page_size) + 1).unwrap_or(u32::MAX)
        };
        Self {
            count,
            page,
            page_size,
            total_pages,
            results,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
