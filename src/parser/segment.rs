/// One delimiter-bounded slice of a payload, not yet checked for fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleCandidate<'a> {
    /// Position in the split sequence; becomes the article's id.
    pub index: usize,
    pub text: &'a str,
}

/// Split `payload` on every occurrence of `delimiter`, dropping whatever
/// precedes the first one. Trailing and empty slices are kept.
///
/// A payload without the delimiter yields no candidates. An empty delimiter
/// never anchors a block either.
pub fn split_candidates<'a>(payload: &'a str, delimiter: &str) -> Vec<ArticleCandidate<'a>> {
    if delimiter.is_empty() {
        return Vec::new();
    }

    payload
        .split(delimiter)
        .skip(1)
        .enumerate()
        .map(|(index, text)| ArticleCandidate { index, text })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELIM: &str = "ARTÍCULO";

    #[test]
    fn no_delimiter_no_candidates() {
        assert!(split_candidates("just some prose", DELIM).is_empty());
        assert!(split_candidates("", DELIM).is_empty());
    }

    #[test]
    fn one_candidate_per_occurrence() {
        let payload = "intro ARTÍCULO 1: a ARTÍCULO 2: b ARTÍCULO 3: c";
        let c = split_candidates(payload, DELIM);
        assert_eq!(c.len(), 3);
        assert_eq!(c[0].text, " 1: a ");
        assert_eq!(c[2].text, " 3: c");
        let idx: Vec<usize> = c.iter().map(|x| x.index).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn preamble_dropped() {
        let c = split_candidates("preambleARTÍCULOx", DELIM);
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].text, "x");
    }

    #[test]
    fn trailing_delimiter_keeps_empty_slice() {
        let c = split_candidates("ARTÍCULO a\nARTÍCULO", DELIM);
        assert_eq!(c.len(), 2);
        assert_eq!(c[1].text, "");
    }

    #[test]
    fn adjacent_delimiters() {
        let c = split_candidates("ARTÍCULOARTÍCULO  ", DELIM);
        assert_eq!(c.len(), 2);
        assert_eq!(c[0].text, "");
        assert_eq!(c[1].text, "  ");
    }

    #[test]
    fn empty_delimiter() {
        assert!(split_candidates("anything", "").is_empty());
    }
}
