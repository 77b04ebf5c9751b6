//! Autocomplete cache
//!
//! One cache per entity family (artists, lineups). A search takes a
//! [`SearchToken`]; only the completion carrying the most recent token may
//! replace the cached results, so a slow earlier response can never
//! overwrite a newer one. Clearing the search invalidates every token still
//! in flight.

use amdb_common::models::{ArtistCandidate, LineUpCandidate};

use crate::document::DropdownOption;

/// Search sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchToken(u64);

impl SearchToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Empty,
    Populated,
}

/// Entity that can be offered in a dropdown
pub trait Candidate {
    fn id(&self) -> i64;

    /// Dropdown option text
    fn label(&self) -> String;

    /// Case-insensitive match; `needle` is already lowercase
    fn matches(&self, needle: &str) -> bool;
}

impl Candidate for ArtistCandidate {
    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        self.primary_name().to_string()
    }

    fn matches(&self, needle: &str) -> bool {
        self.names.iter().any(|name| name.contains(needle))
    }
}

impl Candidate for LineUpCandidate {
    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        LineUpCandidate::label(self)
    }

    fn matches(&self, needle: &str) -> bool {
        self.members
            .iter()
            .flat_map(|m| m.names.iter())
            .any(|name| name.contains(needle))
    }
}

/// Per-family search results
#[derive(Debug)]
pub struct AutocompleteCache<T> {
    entries: Vec<T>,
    latest: u64,
}

impl<T> Default for AutocompleteCache<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            latest: 0,
        }
    }
}

impl<T: Candidate> AutocompleteCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CacheState {
        if self.entries.is_empty() {
            CacheState::Empty
        } else {
            CacheState::Populated
        }
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Issue a token for a new search, superseding earlier ones
    pub fn begin_search(&mut self) -> SearchToken {
        self.latest += 1;
        SearchToken(self.latest)
    }

    /// Whether `token` is still the most recent search
    pub fn is_current(&self, token: SearchToken) -> bool {
        token.0 == self.latest
    }

    /// Store `results` if `token` is current
    ///
    /// Returns false when the completion was stale and discarded.
    pub fn complete(&mut self, token: SearchToken, results: Vec<T>) -> bool {
        if !self.is_current(token) {
            tracing::debug!(
                token = token.0,
                latest = self.latest,
                "Discarding stale autocomplete results"
            );
            return false;
        }
        self.entries = results;
        true
    }

    /// Back to Empty; in-flight searches become stale
    pub fn clear(&mut self) {
        self.latest += 1;
        self.entries.clear();
    }

    pub fn find(&self, id: i64) -> Option<&T> {
        self.entries.iter().find(|c| c.id() == id)
    }

    /// Cached candidates matching `term`; an empty term matches everything
    pub fn filter(&self, term: &str) -> Vec<&T> {
        let needle = term.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|c| needle.is_empty() || c.matches(&needle))
            .collect()
    }

    /// Dropdown options for the candidates matching `term`
    pub fn options(&self, term: &str) -> Vec<DropdownOption> {
        self.filter(term)
            .into_iter()
            .map(|c| DropdownOption {
                label: c.label(),
                value: c.id(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amdb_common::models::CandidateName;

    fn artist(id: i64, name: &str, original: Option<&str>) -> ArtistCandidate {
        ArtistCandidate {
            id,
            names: vec![CandidateName {
                artist_name: Some(name.to_string()),
                original_artist_name: original.map(str::to_string),
            }],
        }
    }

    #[test]
    fn test_filter_matches_localized_or_original() {
        let mut cache = AutocompleteCache::new();
        let token = cache.begin_search();
        cache.complete(
            token,
            vec![
                artist(1, "Yo-yo", None),
                artist(2, "Hitomi", Some("ヨーヨー")),
                artist(3, "Aimer", None),
            ],
        );

        let ids: Vec<i64> = cache.filter("YO").iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1]);

        let ids: Vec<i64> = cache.filter("ヨー").iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut cache = AutocompleteCache::new();
        let slow = cache.begin_search();
        let fast = cache.begin_search();

        assert!(cache.complete(fast, vec![artist(2, "Aimer", None)]));
        assert!(!cache.complete(slow, vec![artist(1, "Ai", None)]));

        assert_eq!(cache.entries().len(), 1);
        assert_eq!(cache.entries()[0].id, 2);
    }

    #[test]
    fn test_clear_invalidates_in_flight() {
        let mut cache = AutocompleteCache::new();
        let token = cache.begin_search();
        cache.clear();

        assert!(!cache.complete(token, vec![artist(1, "Ai", None)]));
        assert_eq!(cache.state(), CacheState::Empty);
    }

    #[test]
    fn test_options_use_primary_name() {
        let mut cache = AutocompleteCache::new();
        let token = cache.begin_search();
        cache.complete(token, vec![artist(4, "LiSA", Some("リサ"))]);

        let options = cache.options("li");
        assert_eq!(options, vec![DropdownOption { label: "LiSA".into(), value: 4 }]);
        assert_eq!(cache.state(), CacheState::Populated);
    }
}
