use crate::article::ArticleRecord;

pub const BEGINNER: &str = "Principiante";
pub const INTERMEDIATE: &str = "Intermedio";
pub const ADVANCED: &str = "Avanzado";

const LEVEL_RANKS: [(&str, u8); 3] = [(BEGINNER, 1), (INTERMEDIATE, 2), (ADVANCED, 3)];

/// Sort position of a difficulty level. Unknown levels rank with
/// "Intermedio"; the level string itself is left alone.
pub fn level_rank(level: &str) -> u8 {
    LEVEL_RANKS
        .iter()
        .find(|(name, _)| *name == level)
        .map(|(_, rank)| *rank)
        .unwrap_or(2)
}

/// Order records from easiest to hardest. Equal ranks keep their input order.
pub fn rank_articles(mut records: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
    // sort_by_key is stable
    records.sort_by_key(|r| level_rank(&r.level));
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: usize, level: &str) -> ArticleRecord {
        ArticleRecord {
            id,
            title: format!("t{}", id),
            summary: String::new(),
            concepts: String::new(),
            level: level.to_string(),
            tags: Vec::new(),
            raw_text: String::new(),
        }
    }

    fn ids(records: &[ArticleRecord]) -> Vec<usize> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn ranks() {
        assert_eq!(level_rank(BEGINNER), 1);
        assert_eq!(level_rank(INTERMEDIATE), 2);
        assert_eq!(level_rank(ADVANCED), 3);
        assert_eq!(level_rank("Experto"), 2);
        assert_eq!(level_rank(""), 2);
        // exact match only
        assert_eq!(level_rank("avanzado"), 2);
    }

    #[test]
    fn stable_within_rank() {
        let out = rank_articles(vec![rec(0, ADVANCED), rec(1, INTERMEDIATE), rec(2, ADVANCED)]);
        assert_eq!(ids(&out), vec![1, 0, 2]);
    }

    #[test]
    fn unknown_sorts_with_intermediate() {
        let out = rank_articles(vec![
            rec(0, ADVANCED),
            rec(1, "Experto"),
            rec(2, INTERMEDIATE),
            rec(3, BEGINNER),
        ]);
        assert_eq!(ids(&out), vec![3, 1, 2, 0]);
        assert_eq!(out[1].level, "Experto");
    }

    #[test]
    fn empty_input() {
        assert!(rank_articles(Vec::new()).is_empty());
    }

    #[test]
    fn repeated_ranking_is_deterministic() {
        let input = vec![rec(0, BEGINNER), rec(1, "x"), rec(2, "y"), rec(3, BEGINNER)];
        let once = rank_articles(input.clone());
        let twice = rank_articles(once.clone());
        assert_eq!(ids(&once), vec![0, 3, 1, 2]);
        assert_eq!(once, twice);
    }
}
