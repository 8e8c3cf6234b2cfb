use serde::Serialize;

use crate::error::{CuratorError, Result};
use crate::parser::split_tags;

const SUMMARY_TITLE_PREFIX: &str = "Resumen: ";
const SUMMARY_TITLE_CHARS: usize = 50;
const SUMMARY_FALLBACK_TAG: &str = "resumen";

/// One article parsed out of a search payload.
///
/// `id` is the block's position in the payload, so it changes whenever the
/// payload does. Every field except `raw_text` is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRecord {
    pub id: usize,
    pub title: String,
    pub summary: String,
    pub concepts: String,
    pub level: String,
    pub tags: Vec<String>,
    pub raw_text: String,
}

/// The part of an article that gets persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleDraft {
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub url: Option<String>,
}

impl ArticleDraft {
    /// Save-flow draft for a parsed article, with `extra_tags` (comma
    /// separated, as typed by the user) appended to the article's own tags.
    pub fn from_record(record: &ArticleRecord, extra_tags: &str) -> Self {
        let mut tags = record.tags.clone();
        tags.extend(split_tags(extra_tags));
        ArticleDraft {
            title: record.title.clone(),
            summary: record.summary.clone(),
            tags,
            url: None,
        }
    }

    /// Draft for a generated summary of `source`. `raw_tags` is the user's
    /// edited tag string; when it holds no tags the summary is tagged
    /// "resumen".
    pub fn from_summary(source: &str, summary: &str, raw_tags: &str) -> Result<Self> {
        if summary.trim().is_empty() {
            return Err(CuratorError::EmptySummary);
        }
        let head: String = source.chars().take(SUMMARY_TITLE_CHARS).collect();
        let mut tags = split_tags(raw_tags);
        if tags.is_empty() {
            tags.push(SUMMARY_FALLBACK_TAG.to_string());
        }
        Ok(ArticleDraft {
            title: format!("{}{}...", SUMMARY_TITLE_PREFIX, head),
            summary: summary.to_string(),
            tags,
            url: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedArticle {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub url: Option<String>,
    pub saved_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEntry {
    pub query: String,
    pub result_count: usize,
    pub searched_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_searches: usize,
    pub total_saved: usize,
    pub unique_tags: usize,
}
