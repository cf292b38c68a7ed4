// src/panel/session.rs
// =============================================================================
// The per-tab search session: query text, current page, accumulated results
// and the status the screen is drawn from.
//
// This is a plain state machine. Operations never do I/O; when one of them
// needs data it hands back a FetchRequest, and whoever drives the session
// runs it and feeds the answer into apply(). That keeps all the paging rules
// testable without a network.
//
// Status transitions:
//   Prompt  --set_query(non-empty)-->  Loading
//   Loading --apply(Ok)-->             Loaded
//   Loading --apply(Err)-->            Error
//   Loaded  --request_more-->          Loading
//   Error   --redo / set_query-->      Loading
//   any     --set_query("")/reset-->   Prompt
//
// Every issued request gets the next sequence number. Only the answer to the
// newest request is applied; older answers are stale and dropped, which is
// what keeps a slow page-1 response from overwriting a newer query.
// =============================================================================

use tracing::{debug, warn};

use crate::github::{FetchError, RepoSummary, ResultPage, SearchQuery};
use crate::languages::Language;

use super::view::PanelView;

/// How "more results" behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PaginationMode {
    /// Infinite scroll: each new page is added below the previous ones
    #[default]
    #[value(name = "append")]
    AppendOnScroll,
    /// Fixed pages: each new page replaces the list
    #[value(name = "replace")]
    ReplacePerPage,
}

impl PaginationMode {
    pub fn default_per_page(self) -> u32 {
        match self {
            PaginationMode::AppendOnScroll => 10,
            PaginationMode::ReplacePerPage => 100,
        }
    }
}

// What to do with a page once it arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Replace,
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Prompt,
    Loading,
    Loaded,
    Error,
}

/// A request the session wants executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub query: SearchQuery,
    pub page: u32,
    pub per_page: u32,
    pub mode: FetchMode,
}

/// The answer to a FetchRequest, tagged with the request's sequence number.
#[derive(Debug)]
pub struct FetchOutcome {
    pub seq: u64,
    pub result: Result<ResultPage, FetchError>,
}

pub struct SearchSession {
    language: &'static Language,
    mode: PaginationMode,
    per_page: u32,
    text: String,
    page: u32,
    results: Vec<RepoSummary>,
    status: Status,
    // Sequence number of the newest issued request
    seq: u64,
    last_request: Option<FetchRequest>,
    // False once a page comes back shorter than per_page
    has_more: bool,
}

impl SearchSession {
    pub fn new(language: &'static Language, mode: PaginationMode, per_page: u32) -> Self {
        SearchSession {
            language,
            mode,
            per_page,
            text: String::new(),
            page: 1,
            results: Vec::new(),
            status: Status::Prompt,
            seq: 0,
            last_request: None,
            has_more: false,
        }
    }

    pub fn language(&self) -> &'static Language {
        self.language
    }

    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn results(&self) -> &[RepoSummary] {
        &self.results
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn view(&self) -> PanelView<'_> {
        PanelView::select(
            &self.text,
            self.status == Status::Loading,
            self.status == Status::Error,
            &self.results,
            self.language.label,
        )
    }

    // New query text: back to page 1, and the next page replaces the list
    //
    // Empty (or blank) text never searches. It clears the list and shows the
    // prompt, and any request still in flight becomes stale.
    pub fn set_query(&mut self, text: impl Into<String>) -> Option<FetchRequest> {
        self.text = text.into();
        self.page = 1;

        if self.text.trim().is_empty() {
            self.results.clear();
            self.status = Status::Prompt;
            self.has_more = false;
            self.invalidate();
            return None;
        }

        Some(self.issue(FetchMode::Replace))
    }

    // Explicit "search" action: re-run the current text from page 1
    pub fn search_now(&mut self) -> Option<FetchRequest> {
        let text = std::mem::take(&mut self.text);
        self.set_query(text)
    }

    // The user reached the bottom of the list
    //
    // Ignored unless the last page loaded fine and was full. After an error,
    // progress stops until the query is re-triggered or redone.
    pub fn request_more(&mut self) -> Option<FetchRequest> {
        if self.status != Status::Loaded || !self.has_more || self.text.trim().is_empty() {
            return None;
        }

        self.page += 1;
        let mode = match self.mode {
            PaginationMode::AppendOnScroll => FetchMode::Append,
            PaginationMode::ReplacePerPage => FetchMode::Replace,
        };
        Some(self.issue(mode))
    }

    // Tab teardown: page 1, empty list, nothing fetched
    //
    // The query text survives so mount() can run it for the next tab.
    pub fn reset(&mut self) {
        self.page = 1;
        self.results.clear();
        self.status = Status::Prompt;
        self.has_more = false;
        self.invalidate();
    }

    pub fn switch_language(&mut self, language: &'static Language) {
        debug!(from = self.language.search_key, to = language.search_key, "switching tab");
        self.language = language;
        self.reset();
    }

    // Lifecycle hook of a freshly shown tab: load page 1 of the current text
    pub fn mount(&mut self) -> Option<FetchRequest> {
        if self.text.trim().is_empty() {
            return None;
        }
        self.page = 1;
        Some(self.issue(FetchMode::Replace))
    }

    // "Redo Search": replays the request that failed
    pub fn redo(&mut self) -> Option<FetchRequest> {
        if self.status != Status::Error {
            return None;
        }
        let last = self.last_request.clone()?;
        self.page = last.page;
        Some(self.issue(last.mode))
    }

    // Feeds a finished request back in
    //
    // Returns false when the outcome was stale and nothing changed.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        let Some(request) = self.last_request.as_ref().filter(|r| r.seq == outcome.seq) else {
            debug!(seq = outcome.seq, latest = self.seq, "dropping stale search response");
            return false;
        };
        let mode = request.mode;

        match outcome.result {
            Ok(page) => {
                debug!(page = page.page, count = page.items.len(), ?mode, "applying search page");
                self.has_more = page.items.len() as u32 >= self.per_page;
                match mode {
                    FetchMode::Replace => self.results = page.items,
                    FetchMode::Append => self.results.extend(page.items),
                }
                self.status = Status::Loaded;
            }
            Err(error) => {
                // Results stay as they were
                warn!(reason = error.reason(), query = %self.text, page = self.page, "search failed");
                self.status = Status::Error;
            }
        }
        true
    }

    fn issue(&mut self, mode: FetchMode) -> FetchRequest {
        self.seq += 1;
        self.status = Status::Loading;

        let request = FetchRequest {
            seq: self.seq,
            query: SearchQuery::new(self.text.trim(), self.language.search_key),
            page: self.page,
            per_page: self.per_page,
            mode,
        };
        self.last_request = Some(request.clone());
        request
    }

    fn invalidate(&mut self) {
        self.seq += 1;
        self.last_request = None;
    }
}
