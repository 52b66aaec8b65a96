pub mod entity;
pub mod policy;
pub mod repository;
pub mod services;
pub mod slug;
pub mod value_objects;

pub use entity::{Article, ArticleOwner, ArticleUpdate, NewArticle};
pub use policy::{Decision, Principal};
pub use repository::{ArticleReadRepository, ArticleWriteRepository};
pub use value_objects::{ArticleBody, ArticleId, ArticleSlug, ArticleTitle};
