// src/render.rs
// =============================================================================
// Turns panel views into terminal text.
//
// Everything writes into a generic `impl Write` so the browse loop can print
// to stdout while tests print into a Vec<u8>.
// =============================================================================

use std::io::{self, Write};

use crate::github::RepoSummary;
use crate::languages::{Language, LANGUAGES};
use crate::panel::{PaginationMode, SearchSession};
use crate::panel::view::{
    PanelView, ERROR_DETAIL, ERROR_TITLE, LOADING_MESSAGE, PROMPT_MESSAGE, REDO_ACTION,
};

// Descriptions longer than this are cut with "..."
const MAX_DESCRIPTION: usize = 100;

pub fn render_view<W: Write>(out: &mut W, view: &PanelView<'_>) -> io::Result<()> {
    match view {
        PanelView::Prompt => writeln!(out, "{}", PROMPT_MESSAGE)?,
        PanelView::Loading => writeln!(out, "⏳ {}", LOADING_MESSAGE)?,
        PanelView::Error => {
            writeln!(out, "❌ {}", ERROR_TITLE)?;
            writeln!(out, "   {}", ERROR_DETAIL)?;
            writeln!(out, "   [{}] type :redo", REDO_ACTION)?;
        }
        PanelView::Empty { message } => writeln!(out, "⚠️  {}", message)?,
        PanelView::Results(repos) => {
            for repo in repos.iter() {
                render_repo(out, repo)?;
            }
            writeln!(out, "📋 {} repositor{}", repos.len(), if repos.len() == 1 { "y" } else { "ies" })?;
        }
    }
    out.flush()
}

pub fn render_repo<W: Write>(out: &mut W, repo: &RepoSummary) -> io::Result<()> {
    writeln!(
        out,
        "{}  ★ {}  ⑂ {}",
        repo.full_name, repo.star_count, repo.fork_count
    )?;
    if let Some(description) = repo.description.as_deref().filter(|d| !d.trim().is_empty()) {
        writeln!(out, "    {}", truncate(description.trim(), MAX_DESCRIPTION))?;
    }
    writeln!(out, "    {}  (by @{})", repo.url, repo.owner_login)
}

// Where the user is in the result list, shown under the results
pub fn render_footer<W: Write>(out: &mut W, session: &SearchSession) -> io::Result<()> {
    let position = match session.mode() {
        PaginationMode::AppendOnScroll => format!("pages 1-{}", session.page()),
        PaginationMode::ReplacePerPage => format!("page {}", session.page()),
    };
    let hint = if session.has_more() { " · :more for the next page" } else { "" };
    writeln!(
        out,
        "'{}' in {} · {} · {} shown{}",
        session.text().trim(),
        session.language().label,
        position,
        session.results().len(),
        hint
    )?;
    out.flush()
}

// The tab strip, with the active tab in brackets
pub fn render_tabs<W: Write>(out: &mut W, active: &Language) -> io::Result<()> {
    let tabs: Vec<String> = LANGUAGES
        .iter()
        .map(|lang| {
            if lang == active {
                format!("[{}]", lang.label)
            } else {
                lang.label.to_string()
            }
        })
        .collect();
    writeln!(out, "{}", tabs.join(" | "))?;
    out.flush()
}

// The `languages` command table
pub fn render_language_table<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{:<15} {:<15}", "LABEL", "SEARCH KEY")?;
    writeln!(out, "{}", "=".repeat(30))?;
    for lang in LANGUAGES.iter() {
        writeln!(out, "{:<15} {:<15}", lang.label, lang.search_key)?;
    }
    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}
