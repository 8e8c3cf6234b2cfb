use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::article::{ArticleDraft, SavedArticle, SearchEntry, Stats};
use crate::error::{CuratorError, Result};

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS articles (
            id         INTEGER PRIMARY KEY,
            title      TEXT NOT NULL,
            summary    TEXT NOT NULL,
            tags       TEXT NOT NULL DEFAULT '[]',
            url        TEXT,
            saved_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tags (
            id         INTEGER PRIMARY KEY,
            name       TEXT UNIQUE NOT NULL
        );

        CREATE TABLE IF NOT EXISTS searches (
            id           INTEGER PRIMARY KEY,
            query        TEXT NOT NULL,
            result_count INTEGER NOT NULL,
            searched_at  TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}

fn now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

// ── Articles ──

pub fn save_article(conn: &Connection, draft: &ArticleDraft) -> Result<i64> {
    let tags_json = serde_json::to_string(&draft.tags)?;
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO articles (title, summary, tags, url, saved_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![draft.title, draft.summary, tags_json, draft.url, now()],
    )?;
    let id = tx.last_insert_rowid();
    {
        let mut stmt = tx.prepare("INSERT OR IGNORE INTO tags (name) VALUES (?1)")?;
        for tag in &draft.tags {
            stmt.execute(params![tag])?;
        }
    }
    tx.commit()?;
    info!(id, title = %draft.title, tags = draft.tags.len(), "saved article");
    Ok(id)
}

fn row_to_article(row: &rusqlite::Row<'_>) -> rusqlite::Result<(SavedArticle, String)> {
    Ok((
        SavedArticle {
            id: row.get(0)?,
            title: row.get(1)?,
            summary: row.get(2)?,
            tags: Vec::new(),
            url: row.get(4)?,
            saved_at: row.get(5)?,
        },
        row.get(3)?,
    ))
}

fn with_tags((mut article, tags_json): (SavedArticle, String)) -> Result<SavedArticle> {
    article.tags = serde_json::from_str(&tags_json)?;
    Ok(article)
}

pub fn list_articles(conn: &Connection) -> Result<Vec<SavedArticle>> {
    let mut stmt =
        conn.prepare("SELECT id, title, summary, tags, url, saved_at FROM articles ORDER BY id")?;
    let rows = stmt
        .query_map([], row_to_article)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    rows.into_iter().map(with_tags).collect()
}

pub fn get_article(conn: &Connection, id: i64) -> Result<SavedArticle> {
    let row = conn
        .query_row(
            "SELECT id, title, summary, tags, url, saved_at FROM articles WHERE id = ?1",
            params![id],
            row_to_article,
        )
        .optional()?
        .ok_or(CuratorError::ArticleNotFound(id))?;
    with_tags(row)
}

/// Saved articles carrying `tag`, compared case-insensitively.
pub fn articles_by_tag(conn: &Connection, tag: &str) -> Result<Vec<SavedArticle>> {
    let wanted = tag.to_lowercase();
    Ok(list_articles(conn)?
        .into_iter()
        .filter(|a| a.tags.iter().any(|t| t.to_lowercase() == wanted))
        .collect())
}

pub fn delete_article(conn: &Connection, id: i64) -> Result<()> {
    let n = conn.execute("DELETE FROM articles WHERE id = ?1", params![id])?;
    if n == 0 {
        return Err(CuratorError::ArticleNotFound(id));
    }
    debug!(id, "deleted article");
    Ok(())
}

/// Every tag ever saved, in first-seen order. Deleting an article keeps its
/// tags.
pub fn list_tags(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM tags ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;
    Ok(rows)
}

// ── Search history ──

pub fn record_search(conn: &Connection, query: &str, result_count: usize) -> Result<()> {
    conn.execute(
        "INSERT INTO searches (query, result_count, searched_at) VALUES (?1, ?2, ?3)",
        params![query, result_count as i64, now()],
    )?;
    debug!(query, result_count, "recorded search");
    Ok(())
}

/// The last `limit` searches, oldest first.
pub fn recent_searches(conn: &Connection, limit: usize) -> Result<Vec<SearchEntry>> {
    let mut stmt = conn.prepare(
        "SELECT query, result_count, searched_at FROM (
             SELECT id, query, result_count, searched_at FROM searches ORDER BY id DESC LIMIT ?1
         ) ORDER BY id",
    )?;
    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(SearchEntry {
                query: row.get(0)?,
                result_count: row.get::<_, i64>(1)? as usize,
                searched_at: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Remove the search at 0-based `index` of the full history, oldest first.
pub fn delete_search(conn: &Connection, index: usize) -> Result<()> {
    let id: Option<i64> = conn
        .query_row(
            "SELECT id FROM searches ORDER BY id LIMIT 1 OFFSET ?1",
            params![index as i64],
            |row| row.get(0),
        )
        .optional()?;
    let id = id.ok_or(CuratorError::HistoryIndex(index))?;
    conn.execute("DELETE FROM searches WHERE id = ?1", params![id])?;
    Ok(())
}

pub fn clear_history(conn: &Connection) -> Result<usize> {
    let n = conn.execute("DELETE FROM searches", [])?;
    info!(removed = n, "cleared search history");
    Ok(n)
}

pub fn stats(conn: &Connection) -> Result<Stats> {
    let count = |sql: &str| -> Result<usize> {
        let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
        Ok(n as usize)
    };
    Ok(Stats {
        total_searches: count("SELECT COUNT(*) FROM searches")?,
        total_saved: count("SELECT COUNT(*) FROM articles")?,
        unique_tags: count("SELECT COUNT(*) FROM tags")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mem() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn draft(title: &str, tags: &[&str]) -> ArticleDraft {
        ArticleDraft {
            title: title.to_string(),
            summary: format!("resumen de {}", title),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            url: None,
        }
    }

    #[test]
    fn save_and_list() {
        let conn = mem();
        let a = save_article(&conn, &draft("A", &["rust", "async"])).unwrap();
        let b = save_article(&conn, &draft("B", &["rust", "sql"])).unwrap();
        assert!(b > a);

        let all = list_articles(&conn).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "A");
        assert_eq!(all[0].tags, vec!["rust", "async"]);
        assert!(!all[0].saved_at.is_empty());

        assert_eq!(list_tags(&conn).unwrap(), vec!["rust", "async", "sql"]);
        assert_eq!(get_article(&conn, b).unwrap().summary, "resumen de B");
    }

    #[test]
    fn by_tag_ignores_case() {
        let conn = mem();
        save_article(&conn, &draft("A", &["Rust"])).unwrap();
        save_article(&conn, &draft("B", &["sql"])).unwrap();
        let hits = articles_by_tag(&conn, "rUST").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "A");
        assert!(articles_by_tag(&conn, "ru").unwrap().is_empty());
    }

    #[test]
    fn delete_missing_article() {
        let conn = mem();
        let id = save_article(&conn, &draft("A", &[])).unwrap();
        delete_article(&conn, id).unwrap();
        assert!(list_articles(&conn).unwrap().is_empty());
        assert!(matches!(
            delete_article(&conn, id),
            Err(CuratorError::ArticleNotFound(_))
        ));
        assert!(matches!(get_article(&conn, id), Err(CuratorError::ArticleNotFound(_))));
    }

    #[test]
    fn history_window_and_delete() {
        let conn = mem();
        for (i, q) in ["rust", "sql", "wasm", "go"].iter().enumerate() {
            record_search(&conn, q, i).unwrap();
        }
        let recent = recent_searches(&conn, 2).unwrap();
        let queries: Vec<&str> = recent.iter().map(|s| s.query.as_str()).collect();
        assert_eq!(queries, vec!["wasm", "go"]);
        assert_eq!(recent[1].result_count, 3);

        delete_search(&conn, 1).unwrap();
        let all = recent_searches(&conn, 10).unwrap();
        let queries: Vec<&str> = all.iter().map(|s| s.query.as_str()).collect();
        assert_eq!(queries, vec!["rust", "wasm", "go"]);

        assert!(matches!(delete_search(&conn, 3), Err(CuratorError::HistoryIndex(3))));
        assert_eq!(clear_history(&conn).unwrap(), 3);
        assert!(recent_searches(&conn, 10).unwrap().is_empty());
    }

    #[test]
    fn stats_counts() {
        let conn = mem();
        save_article(&conn, &draft("A", &["x", "y"])).unwrap();
        save_article(&conn, &draft("B", &["y"])).unwrap();
        record_search(&conn, "q", 5).unwrap();
        assert_eq!(
            stats(&conn).unwrap(),
            Stats {
                total_searches: 1,
                total_saved: 2,
                unique_tags: 2,
            }
        );
    }

    #[test]
    fn connect_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/curator.sqlite");
        let conn = connect(&path).unwrap();
        save_article(&conn, &draft("A", &["t"])).unwrap();
        assert!(path.exists());
    }
}
