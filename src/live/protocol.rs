use serde::{Deserialize, Serialize};

use crate::models::suggestions::Suggestion;
use crate::search::suggest::{DropdownView, Key, UiEvent, Update};

// ── Client -> Server messages ──

/// Messages the search box sends over the suggestion socket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// The input value changed.
    Input { value: String },
    /// A key the dropdown handles was pressed.
    Key { key: Key },
    /// A suggestion was clicked.
    Select { index: usize },
    /// Click outside the component.
    Dismiss,
}

impl From<ClientMessage> for UiEvent {
    fn from(msg: ClientMessage) -> Self {
        match msg {
            ClientMessage::Input { value } => UiEvent::Input(value),
            ClientMessage::Key { key } => UiEvent::Key(key),
            ClientMessage::Select { index } => UiEvent::Select(index),
            ClientMessage::Dismiss => UiEvent::Dismiss,
        }
    }
}

// ── Server -> Client messages ──

/// Messages the server pushes to the search box.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The dropdown lists these suggestions.
    Suggestions {
        query: String,
        items: Vec<Suggestion>,
        highlighted: Option<usize>,
    },
    /// Nothing matched; offer to search anyway.
    Empty {
        query: String,
        message: String,
        hint: String,
    },
    /// Suggestions could not be fetched.
    Unavailable { query: String, message: String },
    /// The dropdown closed.
    Closed,
    /// Go to this URL.
    Navigate { url: String },
    /// The client sent something we could not understand.
    Error { message: String },
}

impl From<Update> for ServerMessage {
    fn from(update: Update) -> Self {
        match update {
            Update::Navigate(url) => ServerMessage::Navigate { url },
            Update::View(DropdownView::Hidden) => ServerMessage::Closed,
            Update::View(DropdownView::Suggestions {
                query,
                items,
                highlighted,
            }) => ServerMessage::Suggestions {
                query,
                items,
                highlighted,
            },
            Update::View(DropdownView::Empty {
                query,
                message,
                hint,
            }) => ServerMessage::Empty {
                query,
                message,
                hint,
            },
            Update::View(DropdownView::Unavailable { query, message }) => {
                ServerMessage::Unavailable { query, message }
            }
        }
    }
}
