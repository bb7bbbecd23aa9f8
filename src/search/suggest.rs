//! Debounced autocomplete for the search box.
//!
//! [`Autocomplete`] is the synchronous state machine:
//! `Idle → Debouncing → Fetching → {Showing, Empty, Error} → Idle`.
//! [`SuggestionDriver`] runs it against a [`SuggestionSource`], owning the
//! debounce timer and the in-flight requests.
//!
//! Every issued request carries a sequence number. A response is applied
//! only while the machine is still `Fetching` that exact number, so a slow
//! answer for an older prefix can never replace a newer one.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, warn};

use crate::config::SuggestConfig;
use crate::error::ApiError;
use crate::models::query::QueryState;
use crate::models::suggestions::Suggestion;

/// Where suggestions come from. Implemented by [`crate::api::ApiClient`].
pub trait SuggestionSource: Send + Sync + 'static {
    fn fetch_suggestions(
        &self,
        text: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Suggestion>, ApiError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestState {
    Idle,
    Debouncing,
    Fetching,
    Showing,
    Empty,
    Error,
}

/// Keys the dropdown reacts to, named as the DOM names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// What the dropdown shows right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DropdownView {
    Hidden,
    Suggestions {
        query: String,
        items: Vec<Suggestion>,
        highlighted: Option<usize>,
    },
    Empty {
        query: String,
        message: String,
        hint: String,
    },
    /// The suggestion request failed. Kept apart from `Empty` so the user can
    /// tell "nothing matches" from "could not ask".
    Unavailable { query: String, message: String },
}

/// A suggestion request the caller must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// (Re)start the debounce timer for this generation.
    Debounce { generation: u64 },
    /// Input too short; the dropdown closed.
    Closed,
}

/// Something the user agent must act on.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    View(DropdownView),
    Navigate(String),
}

/// Path of the results page for a raw query.
pub fn search_href(text: &str) -> String {
    QueryState::new(text).href("/search")
}

#[derive(Debug)]
pub struct Autocomplete {
    min_chars: usize,
    input: String,
    state: SuggestState,
    suggestions: Vec<Suggestion>,
    highlighted: Option<usize>,
    generation: u64,
    issued: u64,
    awaiting: Option<u64>,
}

impl Autocomplete {
    pub fn new(min_chars: usize) -> Self {
        Self {
            min_chars: min_chars.max(1),
            input: String::new(),
            state: SuggestState::Idle,
            suggestions: Vec::new(),
            highlighted: None,
            generation: 0,
            issued: 0,
            awaiting: None,
        }
    }

    pub fn state(&self) -> SuggestState {
        self.state
    }

    pub fn input_value(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Number of requests issued so far; the latest one has this sequence number.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    fn query_len(&self) -> usize {
        self.input.trim().chars().count()
    }

    /// Drop the pending timer and any in-flight answer.
    fn invalidate(&mut self) {
        self.generation += 1;
        self.awaiting = None;
    }

    /// A keystroke changed the input to `value`.
    pub fn input(&mut self, value: impl Into<String>) -> InputOutcome {
        self.input = value.into();
        self.invalidate();
        self.highlighted = None;

        if self.query_len() < self.min_chars {
            self.state = SuggestState::Idle;
            self.suggestions.clear();
            return InputOutcome::Closed;
        }

        self.state = SuggestState::Debouncing;
        InputOutcome::Debounce {
            generation: self.generation,
        }
    }

    /// The debounce timer for `generation` fired.
    pub fn timer_elapsed(&mut self, generation: u64) -> Option<FetchTicket> {
        if generation != self.generation || self.state != SuggestState::Debouncing {
            return None;
        }
        self.issued += 1;
        self.awaiting = Some(self.issued);
        self.state = SuggestState::Fetching;
        Some(FetchTicket {
            seq: self.issued,
            text: self.input.trim().to_string(),
        })
    }

    /// A request finished. Returns the new view, or `None` if the answer is stale.
    pub fn resolve(
        &mut self,
        seq: u64,
        result: Result<Vec<Suggestion>, ApiError>,
    ) -> Option<DropdownView> {
        if self.awaiting != Some(seq) || self.state != SuggestState::Fetching {
            debug!("Dropping stale suggestions #{seq} (latest #{})", self.issued);
            return None;
        }
        self.awaiting = None;
        self.highlighted = None;

        match result {
            Ok(items) if !items.is_empty() => {
                self.suggestions = items;
                self.state = SuggestState::Showing;
            }
            Ok(_) => {
                self.suggestions.clear();
                self.state = SuggestState::Empty;
            }
            Err(e) => {
                warn!("Failed to fetch suggestions for '{}': {e}", self.input.trim());
                self.suggestions.clear();
                self.state = SuggestState::Error;
            }
        }
        Some(self.view())
    }

    /// Close the dropdown, keeping the typed text.
    pub fn close(&mut self) -> DropdownView {
        self.invalidate();
        self.state = SuggestState::Idle;
        self.suggestions.clear();
        self.highlighted = None;
        DropdownView::Hidden
    }

    /// Navigate to the results page for suggestion `index`.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let text = self.suggestions.get(index)?.text.clone();
        self.close();
        self.input = text;
        Some(search_href(&self.input))
    }

    /// Navigate to the results page for the raw input.
    pub fn submit(&mut self) -> Option<String> {
        if self.input.trim().is_empty() {
            return None;
        }
        self.close();
        Some(search_href(&self.input))
    }

    pub fn key(&mut self, key: Key) -> Option<Update> {
        match key {
            Key::ArrowDown | Key::ArrowUp => {
                if self.suggestions.is_empty() {
                    return None;
                }
                let last = self.suggestions.len() - 1;
                self.highlighted = match (key, self.highlighted) {
                    (Key::ArrowDown, None) => Some(0),
                    (Key::ArrowDown, Some(i)) => Some((i + 1).min(last)),
                    (_, Some(0)) | (_, None) => None,
                    (_, Some(i)) => Some(i - 1),
                };
                Some(Update::View(self.view()))
            }
            Key::Enter => match self.highlighted {
                Some(i) => self.select(i).or_else(|| self.submit()).map(Update::Navigate),
                None => self.submit().map(Update::Navigate),
            },
            Key::Escape => Some(Update::View(self.close())),
        }
    }

    pub fn view(&self) -> DropdownView {
        let query = self.input.trim().to_string();
        match self.state {
            SuggestState::Idle => DropdownView::Hidden,
            SuggestState::Empty => DropdownView::Empty {
                message: format!("No suggestions for \"{query}\""),
                hint: "Press Enter to search anyway".to_string(),
                query,
            },
            SuggestState::Error => DropdownView::Unavailable {
                message: "Suggestions are unavailable right now".to_string(),
                query,
            },
            SuggestState::Debouncing | SuggestState::Fetching | SuggestState::Showing => {
                if self.suggestions.is_empty() {
                    DropdownView::Hidden
                } else {
                    DropdownView::Suggestions {
                        query,
                        items: self.suggestions.clone(),
                        highlighted: self.highlighted,
                    }
                }
            }
        }
    }
}

/// Events coming from the search box.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Input(String),
    Key(Key),
    Select(usize),
    /// Click outside the component or blur.
    Dismiss,
}

struct Completed {
    seq: u64,
    result: Result<Vec<Suggestion>, ApiError>,
}

/// Runs an [`Autocomplete`] against a live [`SuggestionSource`].
pub struct SuggestionDriver<S> {
    machine: Autocomplete,
    source: Arc<S>,
    config: SuggestConfig,
    deadline: Option<(Instant, u64)>,
    tx: mpsc::UnboundedSender<Completed>,
    rx: mpsc::UnboundedReceiver<Completed>,
}

impl<S: SuggestionSource> SuggestionDriver<S> {
    pub fn new(source: Arc<S>, config: SuggestConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            machine: Autocomplete::new(config.min_chars),
            source,
            config,
            deadline: None,
            tx,
            rx,
        }
    }

    pub fn machine(&self) -> &Autocomplete {
        &self.machine
    }

    /// Apply a UI event. Anything that depends on the network arrives later
    /// through [`next_update`](Self::next_update).
    pub fn handle(&mut self, event: UiEvent) -> Option<Update> {
        match event {
            UiEvent::Input(value) => match self.machine.input(value) {
                InputOutcome::Debounce { generation } => {
                    self.deadline = Some((Instant::now() + self.config.debounce, generation));
                    None
                }
                InputOutcome::Closed => {
                    self.deadline = None;
                    Some(Update::View(DropdownView::Hidden))
                }
            },
            UiEvent::Key(key) => {
                let update = self.machine.key(key);
                if self.machine.state() == SuggestState::Idle {
                    self.deadline = None;
                }
                update
            }
            UiEvent::Select(index) => {
                let target = self.machine.select(index)?;
                self.deadline = None;
                Some(Update::Navigate(target))
            }
            UiEvent::Dismiss => {
                self.deadline = None;
                Some(Update::View(self.machine.close()))
            }
        }
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        debug!("Fetching suggestions #{} for '{}'", ticket.seq, ticket.text);
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let limit = self.config.limit;

        tokio::spawn(async move {
            let result = source.fetch_suggestions(&ticket.text, limit).await;
            // The driver may be gone; nothing left to update then.
            let _ = tx.send(Completed {
                seq: ticket.seq,
                result,
            });
        });
    }

    /// Wait for the next view change caused by the timer or a response.
    ///
    /// Cancel-safe: suitable as a `tokio::select!` branch.
    pub async fn next_update(&mut self) -> Update {
        loop {
            let deadline = self.deadline;
            tokio::select! {
                _ = async {
                    match deadline {
                        Some((at, _)) => sleep_until(at).await,
                        None => std::future::pending::<()>().await,
                    }
                } => {
                    self.deadline = None;
                    if let Some((_, generation)) = deadline {
                        if let Some(ticket) = self.machine.timer_elapsed(generation) {
                            self.spawn_fetch(ticket);
                        }
                    }
                }
                Some(done) = self.rx.recv() => {
                    if let Some(view) = self.machine.resolve(done.seq, done.result) {
                        return Update::View(view);
                    }
                }
            }
        }
    }
}
