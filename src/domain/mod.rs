pub mod article;
pub mod category;

pub use article::{Article, ArticlePage, ArticleSource};
pub use category::Category;
