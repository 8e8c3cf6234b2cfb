pub mod fields;
pub mod rank;
pub mod segment;
pub mod tags;

use tracing::debug;

use crate::article::ArticleRecord;
use segment::ArticleCandidate;

pub use fields::extract_record;
pub use rank::{level_rank, rank_articles};
pub use segment::split_candidates;
pub use tags::{infer_tags, split_tags};

/// Default block-start literal in search payloads.
pub const DEFAULT_DELIMITER: &str = "ARTÍCULO";

/// Result of parsing one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome<'a> {
    /// Ranked articles, easiest first.
    Articles(Vec<ArticleRecord>),
    /// No delimiter found; show the payload as-is.
    Unstructured(&'a str),
}

impl ParseOutcome<'_> {
    pub fn articles(&self) -> &[ArticleRecord] {
        match self {
            ParseOutcome::Articles(a) => a,
            ParseOutcome::Unstructured(_) => &[],
        }
    }
}

/// Three-pass pipeline: payload → candidates → records → ranked records.
pub fn parse_articles(payload: &str, delimiter: &str) -> Vec<ArticleRecord> {
    let candidates = split_candidates(payload, delimiter);
    let records = extract_all(&candidates);
    debug!(candidates = candidates.len(), "extracted article records");
    rank_articles(records)
}

/// Like [`parse_articles`], but says when nothing structured was found so the
/// caller can fall back to the raw payload.
pub fn parse_payload<'a>(payload: &'a str, delimiter: &str) -> ParseOutcome<'a> {
    let articles = parse_articles(payload, delimiter);
    if articles.is_empty() {
        ParseOutcome::Unstructured(payload)
    } else {
        ParseOutcome::Articles(articles)
    }
}

/// The record with positional id `id`, for showing its full raw text.
pub fn find_article(records: &[ArticleRecord], id: usize) -> Option<&ArticleRecord> {
    records.iter().find(|r| r.id == id)
}

#[cfg(feature = "rayon")]
fn extract_all(candidates: &[ArticleCandidate<'_>]) -> Vec<ArticleRecord> {
    use rayon::prelude::*;

    candidates.par_iter().map(extract_record).collect()
}

#[cfg(not(feature = "rayon"))]
fn extract_all(candidates: &[ArticleCandidate<'_>]) -> Vec<ArticleRecord> {
    candidates.iter().map(extract_record).collect()
}

// ── Tests ──
