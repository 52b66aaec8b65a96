pub mod articles;
pub mod auth;
pub mod pagination;
pub mod serde_time;
pub mod users;

pub use articles::ArticleDto;
pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use pagination::PaginatedResult;
pub use users::UserDto;
