use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use tracing::info;

use article_curator::config::Settings;
use article_curator::parser::{self, ParseOutcome};
use article_curator::{db, export, input, ArticleDraft, ArticleRecord, CuratorError};

#[derive(Parser)]
#[command(name = "curator", about = "Parse, rank and keep technical article recommendations")]
struct Cli {
    /// SQLite database (overrides CURATOR_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a search payload and list its articles, easiest first
    Parse {
        /// Payload file, or "-" for stdin
        file: PathBuf,
        /// Print the records as JSON
        #[arg(long)]
        json: bool,
        /// Record the search under this topic in the history
        #[arg(short, long)]
        topic: Option<String>,
    },
    /// Print the full raw text of one parsed article
    Expand {
        file: PathBuf,
        id: usize,
    },
    /// Print the tag list found in a summary, if any
    InferTags {
        file: PathBuf,
    },
    /// Save one parsed article
    Save {
        file: PathBuf,
        id: usize,
        /// Extra tags, comma separated
        #[arg(short, long, default_value = "")]
        tags: String,
    },
    /// Save a generated summary of a source text
    SaveSummary {
        source: PathBuf,
        summary: PathBuf,
        /// Tags, comma separated (default: inferred from the summary)
        #[arg(short, long)]
        tags: Option<String>,
    },
    /// List saved articles
    List {
        /// Only articles carrying this tag
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// List every tag seen so far
    Tags,
    /// Show totals
    Stats,
    /// Show recent searches
    History {
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Delete a saved article
    Delete {
        id: i64,
    },
    /// Delete one search from the history (0 = oldest)
    Forget {
        index: usize,
    },
    /// Delete the whole search history
    ClearHistory,
    /// Export saved articles as Markdown
    Export {
        path: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load().context("loading settings")?;
    if let Some(db) = cli.db {
        settings.db_path = db;
    }
    info!(delimiter = %settings.delimiter, db = ?settings.db_path, "settings loaded");

    match cli.command {
        Commands::Parse { file, json, topic } => {
            let payload = read(&file)?;
            let outcome = parser::parse_payload(&payload, &settings.delimiter);
            if let Some(topic) = topic {
                let conn = db::connect(&settings.db_path)?;
                db::record_search(&conn, &topic, outcome.articles().len())?;
            }
            match outcome {
                ParseOutcome::Articles(articles) if json => {
                    println!("{}", serde_json::to_string_pretty(&articles)?);
                }
                ParseOutcome::Articles(articles) => print_articles(&articles),
                ParseOutcome::Unstructured(raw) => {
                    info!("no article blocks found, showing raw payload");
                    println!("{}", raw);
                }
            }
            Ok(())
        }
        Commands::Expand { file, id } => {
            let payload = read(&file)?;
            let articles = parser::parse_articles(&payload, &settings.delimiter);
            let art = parser::find_article(&articles, id)
                .ok_or(CuratorError::ArticleNotInPayload(id))?;
            println!("{}", art.raw_text);
            Ok(())
        }
        Commands::InferTags { file } => {
            let summary = read(&file)?;
            match parser::infer_tags(&summary) {
                Some(raw) => println!("{}", raw),
                None => println!("No tags found."),
            }
            Ok(())
        }
        Commands::Save { file, id, tags } => {
            let payload = read(&file)?;
            let articles = parser::parse_articles(&payload, &settings.delimiter);
            let art = parser::find_article(&articles, id)
                .ok_or(CuratorError::ArticleNotInPayload(id))?;
            let draft = ArticleDraft::from_record(art, &tags);
            let conn = db::connect(&settings.db_path)?;
            let saved_id = db::save_article(&conn, &draft)?;
            println!("Saved \"{}\" as #{} [{}]", draft.title, saved_id, draft.tags.join(", "));
            Ok(())
        }
        Commands::SaveSummary { source, summary, tags } => {
            let source = read(&source)?;
            let summary = read(&summary)?;
            let raw_tags = tags
                .or_else(|| parser::infer_tags(&summary))
                .unwrap_or_default();
            let draft = ArticleDraft::from_summary(&source, &summary, &raw_tags)?;
            let conn = db::connect(&settings.db_path)?;
            let saved_id = db::save_article(&conn, &draft)?;
            println!("Saved \"{}\" as #{} [{}]", draft.title, saved_id, draft.tags.join(", "));
            Ok(())
        }
        Commands::List { tag } => {
            let conn = db::connect(&settings.db_path)?;
            let rows = match tag.as_deref() {
                Some(t) => db::articles_by_tag(&conn, t)?,
                None => db::list_articles(&conn)?,
            };
            if rows.is_empty() {
                println!("No saved articles.");
                return Ok(());
            }
            println!("{:>4} | {:<40} | {:<19} | Tags", "#", "Title", "Saved");
            println!("{}", "-".repeat(90));
            for r in &rows {
                println!(
                    "{:>4} | {:<40} | {:<19} | {}",
                    r.id,
                    truncate(&r.title, 40),
                    r.saved_at,
                    r.tags.iter().join(", ")
                );
            }
            println!("\n{} articles", rows.len());
            Ok(())
        }
        Commands::Tags => {
            let conn = db::connect(&settings.db_path)?;
            let tags = db::list_tags(&conn)?;
            if tags.is_empty() {
                println!("No tags yet.");
            } else {
                println!("{}", tags.iter().join("\n"));
            }
            Ok(())
        }
        Commands::Stats => {
            let conn = db::connect(&settings.db_path)?;
            let s = db::stats(&conn)?;
            println!("Searches:    {}", s.total_searches);
            println!("Saved:       {}", s.total_saved);
            println!("Unique tags: {}", s.unique_tags);
            Ok(())
        }
        Commands::History { limit } => {
            let conn = db::connect(&settings.db_path)?;
            let rows = db::recent_searches(&conn, limit.unwrap_or(settings.history_limit))?;
            if rows.is_empty() {
                println!("No searches yet.");
                return Ok(());
            }
            for s in &rows {
                println!("{}  {:<40} {:>3} results", s.searched_at, truncate(&s.query, 40), s.result_count);
            }
            Ok(())
        }
        Commands::Delete { id } => {
            let conn = db::connect(&settings.db_path)?;
            db::delete_article(&conn, id)?;
            println!("Deleted article #{}", id);
            Ok(())
        }
        Commands::Forget { index } => {
            let conn = db::connect(&settings.db_path)?;
            db::delete_search(&conn, index)?;
            println!("Deleted search {}", index);
            Ok(())
        }
        Commands::ClearHistory => {
            let conn = db::connect(&settings.db_path)?;
            let n = db::clear_history(&conn)?;
            println!("Removed {} searches", n);
            Ok(())
        }
        Commands::Export { path } => {
            let conn = db::connect(&settings.db_path)?;
            let rows = db::list_articles(&conn)?;
            let path = path.unwrap_or(settings.export_path);
            export::write_markdown(&rows, &path)?;
            println!("Exported {} articles to {}", rows.len(), path.display());
            Ok(())
        }
    }
}

fn read(path: &std::path::Path) -> anyhow::Result<String> {
    input::read_text(path).with_context(|| format!("reading {}", path.display()))
}

fn print_articles(articles: &[ArticleRecord]) {
    println!("Found {} articles:\n", articles.len());
    for art in articles {
        println!("[{}] {} ({})", art.id, art.title, art.level);
        println!("    {}", art.summary.replace('\n', "\n    "));
        if !art.concepts.is_empty() {
            println!("    Conceptos: {}", art.concepts);
        }
        if !art.tags.is_empty() {
            println!("    {}", art.tags.iter().join(" · "));
        }
        println!();
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
