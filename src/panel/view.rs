// src/panel/view.rs
// =============================================================================
// What the panel shows right now. Exactly one of these at a time.
// =============================================================================

use crate::github::RepoSummary;

pub const PROMPT_MESSAGE: &str = "Write something in the search box to start finding awesome repos";
pub const LOADING_MESSAGE: &str = "Loading...";
pub const ERROR_TITLE: &str = "Ops! Something went wrong";
pub const ERROR_DETAIL: &str = "Please try again to search or reload the page!";
pub const REDO_ACTION: &str = "Redo Search";

#[derive(Debug, PartialEq, Eq)]
pub enum PanelView<'a> {
    Prompt,
    Loading,
    Error,
    Results(&'a [RepoSummary]),
    Empty { message: String },
}

impl<'a> PanelView<'a> {
    // Picks the view from (text, loading, has_error, results)
    //
    // Blank text wins over everything: it always shows the prompt.
    pub fn select(
        text: &str,
        loading: bool,
        has_error: bool,
        results: &'a [RepoSummary],
        language_label: &str,
    ) -> Self {
        if text.trim().is_empty() {
            PanelView::Prompt
        } else if has_error {
            PanelView::Error
        } else if loading {
            PanelView::Loading
        } else if results.is_empty() {
            PanelView::Empty {
                message: empty_message(text.trim(), language_label),
            }
        } else {
            PanelView::Results(results)
        }
    }
}

pub fn empty_message(text: &str, language_label: &str) -> String {
    format!("No repository found for '{}' in {}", text, language_label)
}
