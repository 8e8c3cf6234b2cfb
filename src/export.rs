use std::path::Path;

use itertools::Itertools;
use tracing::info;

use crate::article::SavedArticle;
use crate::error::Result;

/// Render the saved collection as a Markdown document.
pub fn render_markdown(articles: &[SavedArticle], generated_on: &str) -> String {
    let mut out = String::new();
    out.push_str("# Mi Colección de Artículos Técnicos\n\n");
    out.push_str(&format!("*Generado el {}*\n\n", generated_on));
    out.push_str("---\n\n");

    for art in articles {
        out.push_str(&format!("## {}\n\n", art.title));
        out.push_str(&format!("**ID:** {} | **Guardado:** {}\n\n", art.id, art.saved_at));
        if let Some(url) = art.url.as_deref().filter(|u| !u.is_empty()) {
            out.push_str(&format!("**URL:** {}\n\n", url));
        }
        out.push_str(&format!("### Resumen\n\n{}\n\n", art.summary));
        out.push_str(&format!("**Etiquetas:** {}\n\n", art.tags.iter().join(", ")));
        out.push_str("---\n\n");
    }
    out
}

pub fn write_markdown(articles: &[SavedArticle], path: &Path) -> Result<()> {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    std::fs::write(path, render_markdown(articles, &today))?;
    info!(path = %path.display(), articles = articles.len(), "exported collection");
    Ok(())
}
