use std::sync::LazyLock;

use regex::Regex;

use super::segment::ArticleCandidate;
use super::tags::split_tags;
use crate::article::ArticleRecord;

pub const TITLE_MARKER: &str = "Título:";
pub const DESCRIPTION_MARKER: &str = "Descripción:";
pub const CONCEPTS_MARKER: &str = "Conceptos:";
pub const LEVEL_MARKER: &str = "Nivel:";
pub const TAGS_MARKER: &str = "Etiquetas:";

pub const UNTITLED: &str = "Sin título";
pub const NO_DESCRIPTION: &str = "Sin descripción";
pub const DEFAULT_LEVEL: &str = super::rank::INTERMEDIATE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Concepts,
    Level,
    Tags,
}

/// Where a field's capture stops.
#[derive(Debug, Clone, Copy)]
pub enum Boundary {
    /// Rest of the marker's line.
    EndOfLine,
    /// Across lines, up to the closest of these markers or end of input.
    NextMarker(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    pub marker: &'static str,
    pub boundary: Boundary,
}

pub const RULES: [FieldRule; 5] = [
    FieldRule {
        field: Field::Title,
        marker: TITLE_MARKER,
        boundary: Boundary::EndOfLine,
    },
    FieldRule {
        field: Field::Description,
        marker: DESCRIPTION_MARKER,
        boundary: Boundary::NextMarker(&[CONCEPTS_MARKER, LEVEL_MARKER]),
    },
    FieldRule {
        field: Field::Concepts,
        marker: CONCEPTS_MARKER,
        boundary: Boundary::EndOfLine,
    },
    FieldRule {
        field: Field::Level,
        marker: LEVEL_MARKER,
        boundary: Boundary::EndOfLine,
    },
    FieldRule {
        field: Field::Tags,
        marker: TAGS_MARKER,
        boundary: Boundary::EndOfLine,
    },
];

impl FieldRule {
    fn pattern(&self) -> String {
        let marker = regex::escape(self.marker);
        match self.boundary {
            Boundary::EndOfLine => format!(r"{}[ \t]*(.*)", marker),
            Boundary::NextMarker(stops) => {
                let stops: Vec<String> = stops.iter().map(|s| regex::escape(s)).collect();
                format!(r"(?s){}(.*?)(?:{}|\z)", marker, stops.join("|"))
            }
        }
    }
}

static COMPILED: LazyLock<Vec<(Field, Regex)>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|rule| (rule.field, Regex::new(&rule.pattern()).unwrap()))
        .collect()
});

/// First match of `field`'s rule in `text`, trimmed. `None` when the marker
/// is absent.
pub fn capture(field: Field, text: &str) -> Option<&str> {
    let (_, re) = COMPILED.iter().find(|(f, _)| *f == field)?;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Build the record for one candidate. Every field falls back to a default,
/// so this never fails. A marker with a blank value still yields an empty
/// title or summary; the placeholders only stand in for a missing marker.
pub fn extract_record(candidate: &ArticleCandidate<'_>) -> ArticleRecord {
    let text = candidate.text;

    let title = capture(Field::Title, text).unwrap_or(UNTITLED);
    let summary = capture(Field::Description, text).unwrap_or(NO_DESCRIPTION);
    let concepts = capture(Field::Concepts, text).unwrap_or_default();
    let level = capture(Field::Level, text)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_LEVEL);
    let tags = capture(Field::Tags, text).map(split_tags).unwrap_or_default();

    ArticleRecord {
        id: candidate.index,
        title: title.to_string(),
        summary: summary.to_string(),
        concepts: concepts.to_string(),
        level: level.to_string(),
        tags,
        raw_text: text.to_string(),
    }
}
