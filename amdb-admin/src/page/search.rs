//! Artist and lineup autocompletion
//!
//! Searches are split into `begin_*` (issue a token and build the request)
//! and `finish_*` (apply the response) so that overlapping searches resolve
//! by token, not by arrival order. `handle_*` runs both back to back.

use amdb_common::models::{ArtistCandidate, LineUpCandidate};
use reqwest::Url;

use super::line_ups::{artist_input_id, hidden_artist_input_id, line_up_input_id};
use super::{ActionError, Page};
use crate::autocomplete::SearchToken;
use crate::client::ClientError;
use crate::document::DocumentError;

pub fn artist_dropdown_id(element: &str) -> String {
    format!("add-artist-dropdown-{}", element)
}

pub fn line_up_dropdown_id(element: &str) -> String {
    format!("add-line-up-dropdown-{}", element)
}

/// In-flight artist search
#[derive(Debug, Clone)]
pub struct ArtistSearch {
    pub element: String,
    pub term: String,
    pub token: SearchToken,
    pub url: Url,
}

/// In-flight lineup search
#[derive(Debug, Clone)]
pub struct LineUpSearch {
    pub element: String,
    pub artist_id: i64,
    pub token: SearchToken,
    pub url: Url,
}

impl Page {
    /// Keystroke in artist search input `element`
    pub async fn handle_artist_search(&mut self, element: &str) {
        let Some(search) = self.begin_artist_search(element) else {
            return;
        };
        let result = self.client.get_json(search.url.clone()).await;
        self.finish_artist_search(&search, result);
    }

    /// Start a search for the current input value
    ///
    /// An empty input clears the selection, the cache and the dropdown and
    /// starts nothing.
    pub fn begin_artist_search(&mut self, element: &str) -> Option<ArtistSearch> {
        let term = match self.document.input(&artist_input_id(element)) {
            Ok(value) => value.trim().to_lowercase(),
            Err(e) => {
                self.report(e.into());
                return None;
            }
        };

        if term.is_empty() {
            self.clear_artist_search(element);
            return None;
        }

        let url = match self.artist_search_url(&term) {
            Ok(url) => url,
            Err(e) => {
                self.report(e.into());
                return None;
            }
        };
        let token = self.artists.begin_search();
        tracing::debug!(token = token.value(), term = %term, "Artist search started");

        Some(ArtistSearch {
            element: element.to_string(),
            term,
            token,
            url,
        })
    }

    /// Apply the response of `search`
    ///
    /// Returns false when the response was stale or failed. Only the current
    /// search may report an error.
    pub fn finish_artist_search(
        &mut self,
        search: &ArtistSearch,
        result: Result<Vec<ArtistCandidate>, ClientError>,
    ) -> bool {
        match result {
            Ok(results) => {
                if !self.artists.complete(search.token, results) {
                    return false;
                }
            }
            Err(e) => {
                if self.artists.is_current(search.token) {
                    self.report(e.into());
                }
                return false;
            }
        }

        let term = self
            .document
            .input(&artist_input_id(&search.element))
            .map(str::to_string)
            .unwrap_or_else(|_| search.term.clone());
        let options = self.artists.options(&term);
        tracing::debug!(matches = options.len(), "Artist search applied");
        self.document
            .dropdown_mut(&artist_dropdown_id(&search.element))
            .render(options);
        true
    }

    /// Search field emptied: back to the Empty state
    ///
    /// The lineups belonged to the previous artist, so they go too.
    pub fn clear_artist_search(&mut self, element: &str) {
        self.document.set_input(hidden_artist_input_id(element), "");
        self.document
            .dropdown_mut(&artist_dropdown_id(element))
            .clear();
        self.artists.clear();

        self.document.set_input(line_up_input_id(element), "");
        self.document
            .dropdown_mut(&line_up_dropdown_id(element))
            .clear();
        self.line_ups.clear();
    }

    /// Click on artist option `index`
    ///
    /// Fills the search and hidden inputs, closes the dropdown, then loads
    /// the artist's lineups.
    pub async fn select_artist(&mut self, element: &str, index: usize) -> bool {
        let result = self.try_select_artist(element, index);
        let Some(artist_id) = self.settle(result) else {
            return false;
        };
        self.fetch_line_ups(element, artist_id).await;
        true
    }

    fn try_select_artist(&mut self, element: &str, index: usize) -> Result<i64, ActionError> {
        let dropdown_id = artist_dropdown_id(element);
        let artist = self
            .document
            .dropdown(&dropdown_id)
            .and_then(|d| d.option(index))
            .and_then(|option| self.artists.find(option.value))
            .ok_or_else(|| DocumentError::ElementNotFound(format!("{}[{}]", dropdown_id, index)))?;

        let artist_id = artist.id;
        let name = artist.primary_name().to_string();

        self.document.set_input(artist_input_id(element), name);
        self.document
            .set_input(hidden_artist_input_id(element), artist_id.to_string());
        self.document.dropdown_mut(&dropdown_id).hide();

        tracing::debug!(artist_id, "Artist selected");
        Ok(artist_id)
    }

    /// Artist search input lost focus
    pub fn blur_artist_search(&mut self, element: &str) -> bool {
        self.document
            .dropdown_mut(&artist_dropdown_id(element))
            .blur()
    }

    /// Load the lineups of `artist_id` into the lineup cache
    pub async fn fetch_line_ups(&mut self, element: &str, artist_id: i64) {
        let Some(search) = self.begin_line_up_search(element, artist_id) else {
            return;
        };
        let result = self.client.get_json(search.url.clone()).await;
        self.finish_line_up_search(&search, result);
    }

    pub fn begin_line_up_search(&mut self, element: &str, artist_id: i64) -> Option<LineUpSearch> {
        let url = match self.line_up_search_url(artist_id) {
            Ok(url) => url,
            Err(e) => {
                self.report(e.into());
                return None;
            }
        };
        let token = self.line_ups.begin_search();
        tracing::debug!(token = token.value(), artist_id, "Lineup search started");

        Some(LineUpSearch {
            element: element.to_string(),
            artist_id,
            token,
            url,
        })
    }

    pub fn finish_line_up_search(
        &mut self,
        search: &LineUpSearch,
        result: Result<Vec<LineUpCandidate>, ClientError>,
    ) -> bool {
        match result {
            Ok(results) => self.line_ups.complete(search.token, results),
            Err(e) => {
                if self.line_ups.is_current(search.token) {
                    self.report(e.into());
                }
                false
            }
        }
    }

    /// Focus on lineup input `element`: offer the cached lineups
    ///
    /// Only a selected artist (hidden id set) has lineups to offer; text
    /// typed without picking an option does not count.
    pub fn handle_line_up_search(&mut self, element: &str) {
        let artist_selected = self
            .document
            .input(&hidden_artist_input_id(element))
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false);

        if !artist_selected || self.line_ups.entries().is_empty() {
            self.document.set_input(line_up_input_id(element), "");
            self.document
                .dropdown_mut(&line_up_dropdown_id(element))
                .clear();
            return;
        }

        let options = self.line_ups.options("");
        self.document
            .dropdown_mut(&line_up_dropdown_id(element))
            .render(options);
    }

    /// Click on lineup option `index`
    pub fn select_line_up(&mut self, element: &str, index: usize) -> bool {
        let dropdown_id = line_up_dropdown_id(element);
        let selected = self
            .document
            .dropdown(&dropdown_id)
            .and_then(|d| d.option(index))
            .map(|option| option.value);

        let Some(line_up_id) = selected else {
            let missing = DocumentError::ElementNotFound(format!("{}[{}]", dropdown_id, index));
            self.report(missing.into());
            return false;
        };

        self.document
            .set_input(line_up_input_id(element), line_up_id.to_string());
        self.document.dropdown_mut(&dropdown_id).hide();
        true
    }

    /// Lineup input lost focus
    pub fn blur_line_up_search(&mut self, element: &str) -> bool {
        self.document
            .dropdown_mut(&line_up_dropdown_id(element))
            .blur()
    }

    fn artist_search_url(&self, term: &str) -> Result<Url, ClientError> {
        let mut url = self.client.resolve("/autocomplete/artists")?;
        url.query_pairs_mut()
            .append_pair("limit", &self.search_limit.to_string())
            .append_pair("search", term);
        Ok(url)
    }

    fn line_up_search_url(&self, artist_id: i64) -> Result<Url, ClientError> {
        let mut url = self.client.resolve("/autocomplete/line_ups")?;
        url.query_pairs_mut()
            .append_pair("id_artist", &artist_id.to_string());
        Ok(url)
    }
}
