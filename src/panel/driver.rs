// src/panel/driver.rs
// =============================================================================
// The browse event loop: stdin lines in, rendered panel out.
//
// One task owns the session. Three things can wake it up:
// 1. A line of input (text change or a ':' command)
// 2. The debouncer delivering the settled query text
// 3. A spawned fetch reporting its outcome
//
// Fetches run as separate tasks so typing is never blocked by the network.
// Their answers come back over a channel and go through SearchSession::apply,
// which drops anything stale.
// =============================================================================

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use super::debounce::Debouncer;
use super::session::{FetchOutcome, FetchRequest, SearchSession, Status};
use super::view::PanelView;
use crate::config::Settings;
use crate::github::SearchGateway;
use crate::languages::{self, Language};
use crate::render;

pub const HELP: &str = "Type to search. Commands: :search  :more  :lang <name>  :tabs  :redo  :clear  :help  :quit";

/// One line of user input, already interpreted.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Search,
    More,
    Language(String),
    Tabs,
    Redo,
    Clear,
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    pub fn parse(line: &str) -> Input {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(command) = line.strip_prefix(':') else {
            return Input::Text(line.to_string());
        };

        let (name, arg) = match command.trim().split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command.trim(), ""),
        };

        match name {
            "search" | "s" => Input::Search,
            "more" | "m" => Input::More,
            "lang" | "l" if !arg.is_empty() => Input::Language(arg.to_string()),
            "tabs" | "t" => Input::Tabs,
            "redo" | "r" => Input::Redo,
            "clear" | "c" => Input::Clear,
            "help" | "h" => Input::Help,
            "quit" | "q" => Input::Quit,
            _ => Input::Unknown(line.to_string()),
        }
    }
}

pub struct PanelDriver {
    session: SearchSession,
    gateway: Arc<dyn SearchGateway>,
    debouncer: Debouncer<String>,
    debounced: UnboundedReceiver<String>,
    // Latest typed text the debouncer has not delivered yet
    pending_text: Option<String>,
    outcomes_tx: UnboundedSender<FetchOutcome>,
    outcomes_rx: UnboundedReceiver<FetchOutcome>,
}

impl PanelDriver {
    pub fn new(
        gateway: Arc<dyn SearchGateway>,
        language: &'static Language,
        settings: &Settings,
    ) -> Self {
        let (debounce_tx, debounced) = mpsc::unbounded_channel();
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();

        PanelDriver {
            session: SearchSession::new(language, settings.mode, settings.per_page),
            gateway,
            debouncer: Debouncer::new(settings.debounce, debounce_tx),
            debounced,
            pending_text: None,
            outcomes_tx,
            outcomes_rx,
        }
    }

    // Runs until :quit, or until input ends and nothing is left in flight
    pub async fn run<R, W>(mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        let mut input_open = true;

        render::render_tabs(out, self.session.language())?;
        writeln!(out, "{}", HELP)?;
        self.render(out)?;

        loop {
            if !input_open && self.is_idle() {
                break;
            }

            tokio::select! {
                line = lines.next_line(), if input_open => {
                    match line.context("failed to read input")? {
                        Some(line) => {
                            if !self.handle_input(Input::parse(&line), out)? {
                                break;
                            }
                        }
                        None => {
                            debug!("input closed, waiting for pending searches");
                            input_open = false;
                        }
                    }
                }
                Some(text) = self.debounced.recv() => {
                    self.pending_text = None;
                    let request = self.session.set_query(text);
                    self.dispatch(request);
                    self.render(out)?;
                }
                Some(outcome) = self.outcomes_rx.recv() => {
                    if self.session.apply(outcome) {
                        self.render(out)?;
                    }
                }
            }
        }

        self.debouncer.cancel_pending();
        Ok(())
    }

    // Returns false when the user asked to quit
    fn handle_input<W: Write>(&mut self, input: Input, out: &mut W) -> Result<bool> {
        match input {
            Input::Text(text) => {
                self.pending_text = Some(text.clone());
                self.debouncer.schedule(text);
            }
            Input::Search => {
                // The search button uses what is typed, even if the debounce has not fired
                let request = match self.cancel_debounce() {
                    Some(text) => self.session.set_query(text),
                    None => self.session.search_now(),
                };
                self.dispatch(request);
                self.render(out)?;
            }
            Input::More => {
                let request = self.session.request_more();
                if request.is_some() {
                    self.dispatch(request);
                    self.render(out)?;
                } else {
                    writeln!(out, "(no more results to load)")?;
                }
            }
            Input::Language(name) => match languages::find(&name) {
                Ok(language) => self.switch_language(language, out)?,
                Err(error) => writeln!(out, "{}", error)?,
            },
            Input::Tabs => render::render_tabs(out, self.session.language())?,
            Input::Redo => {
                let request = self.session.redo();
                if request.is_some() {
                    self.dispatch(request);
                    self.render(out)?;
                } else {
                    writeln!(out, "(nothing to redo)")?;
                }
            }
            Input::Clear => {
                self.cancel_debounce();
                let request = self.session.set_query("");
                self.dispatch(request);
                self.render(out)?;
            }
            Input::Help => writeln!(out, "{}", HELP)?,
            Input::Quit => return Ok(false),
            Input::Unknown(line) => writeln!(out, "unknown command '{}'. {}", line, HELP)?,
        }
        Ok(true)
    }

    fn switch_language<W: Write>(&mut self, language: &'static Language, out: &mut W) -> Result<()> {
        info!(language = language.search_key, "switching language tab");

        let pending = self.cancel_debounce();
        self.session.switch_language(language);

        // The new tab mounts with whatever the user typed last
        let request = match pending {
            Some(text) => self.session.set_query(text),
            None => self.session.mount(),
        };
        self.dispatch(request);

        render::render_tabs(out, language)?;
        self.render(out)
    }

    // Drops the pending text, including one the timer already delivered
    fn cancel_debounce(&mut self) -> Option<String> {
        self.debouncer.cancel_pending();
        while self.debounced.try_recv().is_ok() {}
        self.pending_text.take()
    }

    fn dispatch(&self, request: Option<FetchRequest>) {
        let Some(request) = request else {
            return;
        };

        let gateway = Arc::clone(&self.gateway);
        let outcomes = self.outcomes_tx.clone();
        tokio::spawn(async move {
            let result = gateway
                .fetch(&request.query, request.page, request.per_page)
                .await;
            // The loop may already be gone after :quit
            let _ = outcomes.send(FetchOutcome {
                seq: request.seq,
                result,
            });
        });
    }

    fn is_idle(&self) -> bool {
        self.pending_text.is_none() && self.session.status() != Status::Loading
    }

    fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        let view = self.session.view();
        render::render_view(out, &view)?;
        if matches!(view, PanelView::Results(_)) {
            render::render_footer(out, &self.session)?;
        }
        Ok(())
    }
}
