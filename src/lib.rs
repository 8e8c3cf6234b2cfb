//! Turns the loosely structured text of an article-search service into
//! ranked article records, and keeps a small SQLite library of the ones the
//! user saves.

pub mod article;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod input;
pub mod parser;

pub use article::{ArticleDraft, ArticleRecord, SavedArticle, SearchEntry, Stats};
pub use error::{CuratorError, Result};
pub use parser::{infer_tags, parse_articles, parse_payload, split_tags, ParseOutcome};
