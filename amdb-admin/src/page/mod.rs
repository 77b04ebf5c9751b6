//! Admin page controller
//!
//! A [`Page`] owns everything that lives for one page load: the document,
//! the feedback modal, both autocomplete caches and the mutation client
//! bound to the page URL. Handlers are grouped by entity:
//! - `names`: artist and anime names, reordering
//! - `line_ups`: lineups and lineup members
//! - `songs`: song artist credits
//! - `search`: artist and lineup autocompletion
//!
//! Every handler settles its own failure by reporting it to the modal, so an
//! error in one control never reaches unrelated page state.

mod line_ups;
mod names;
mod search;
mod songs;

pub use line_ups::{
    artist_input_id, hidden_artist_input_id, line_up_input_id, role_type_select_id,
};
pub use names::{NEW_NAME_INPUT, NEW_ORIGINAL_NAME_INPUT};
pub use search::{artist_dropdown_id, line_up_dropdown_id, ArtistSearch, LineUpSearch};

use amdb_common::config::ClientConfig;
use amdb_common::models::{ArtistCandidate, LineUpCandidate};
use thiserror::Error;

use crate::autocomplete::AutocompleteCache;
use crate::client::{ClientError, MutationClient};
use crate::document::{Document, DocumentError};
use crate::feedback::{FeedbackModal, FeedbackReport, Severity};

/// Handler failure
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Consistency(#[from] DocumentError),
}

impl ActionError {
    pub fn severity(&self) -> Severity {
        match self {
            ActionError::Validation(_) => Severity::Validation,
            ActionError::Client(ClientError::InvalidUrl(_)) => Severity::Consistency,
            ActionError::Client(_) => Severity::Network,
            ActionError::Consistency(_) => Severity::Consistency,
        }
    }
}

/// State of one loaded admin page
pub struct Page {
    client: MutationClient,
    pub document: Document,
    pub feedback: FeedbackModal,
    artists: AutocompleteCache<ArtistCandidate>,
    line_ups: AutocompleteCache<LineUpCandidate>,
    search_limit: u32,
    reloads: u32,
}

impl Page {
    pub fn new(client: MutationClient, search_limit: u32) -> Self {
        Self {
            client,
            document: Document::new(),
            feedback: FeedbackModal::new(),
            artists: AutocompleteCache::new(),
            line_ups: AutocompleteCache::new(),
            search_limit,
            reloads: 0,
        }
    }

    /// Open `page_path` on the configured server
    pub fn open(config: &ClientConfig, page_path: &str) -> Result<Self, ClientError> {
        let client =
            MutationClient::for_page(&config.server_url, page_path, config.request_timeout)?;
        tracing::info!(page = %client.page_url(), "Opened admin page");
        Ok(Self::new(client, config.search_limit))
    }

    pub fn client(&self) -> &MutationClient {
        &self.client
    }

    pub fn artist_cache(&self) -> &AutocompleteCache<ArtistCandidate> {
        &self.artists
    }

    pub fn line_up_cache(&self) -> &AutocompleteCache<LineUpCandidate> {
        &self.line_ups
    }

    /// Number of reloads requested since the page was opened
    pub fn reloads(&self) -> u32 {
        self.reloads
    }

    /// Close the modal; this always reloads the page
    pub fn dismiss_feedback(&mut self) {
        self.feedback.dismiss();
        self.reload();
    }

    /// Reset transient client state
    ///
    /// The server re-renders the lists; autocomplete caches and dropdowns
    /// start over empty.
    pub fn reload(&mut self) {
        self.reloads += 1;
        self.artists.clear();
        self.line_ups.clear();
        self.document.reset_transient();
        tracing::info!(page = %self.client.page_url(), "Page reload");
    }

    fn report(&mut self, err: ActionError) {
        self.feedback
            .show(FeedbackReport::error(err.severity(), err.to_string()));
    }

    fn settle<T>(&mut self, result: Result<T, ActionError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.report(err);
                None
            }
        }
    }
}

/// Trimmed value of a required input
fn required<'a>(value: &'a str, message: &str) -> Result<&'a str, ActionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ActionError::Validation(message.to_string()));
    }
    Ok(trimmed)
}

fn parse_id(value: &str, what: &str) -> Result<i64, ActionError> {
    value
        .trim()
        .parse()
        .map_err(|_| ActionError::Validation(format!("Invalid {}: {}", what, value)))
}

/// Empty means "no lineup"
fn parse_optional_id(value: &str, what: &str) -> Result<Option<i64>, ActionError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_id(value, what).map(Some)
}
