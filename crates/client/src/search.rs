//! College search screen state.
//!
//! [`SearchView`] holds what the search screen shows: the last query, the
//! matching cafes, a loading flag, and the map center. Searches go through a
//! [`CafeDirectory`]; blank queries are never sent.
//!
//! A search can be driven in one call with [`SearchView::search`], or split
//! into [`SearchView::begin`] and [`SearchView::finish`] when several requests
//! may be in flight. Only the response to the newest request is applied.

use std::future::Future;

use cafeconnect_core::{Cafe, GeoPoint};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::sequence::{RequestSequence, Ticket};

/// Map center before any search has produced a result (Boston).
pub const DEFAULT_MAP_CENTER: GeoPoint = GeoPoint {
    lat: 42.3601,
    lng: -71.0589,
};

/// Source of college search results.
pub trait CafeDirectory {
    /// Cafes with a nearby college containing `college`, ignoring case.
    fn cafes_near(&self, college: &str)
    -> impl Future<Output = Result<Vec<Cafe>, ClientError>> + Send;
}

impl CafeDirectory for ApiClient {
    async fn cafes_near(&self, college: &str) -> Result<Vec<Cafe>, ClientError> {
        self.search_cafes(college).await
    }
}

/// State of the college search screen.
#[derive(Debug)]
pub struct SearchView {
    query: String,
    results: Vec<Cafe>,
    loading: bool,
    searched: bool,
    map_center: GeoPoint,
    sequence: RequestSequence,
}

impl Default for SearchView {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchView {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            loading: false,
            searched: false,
            map_center: DEFAULT_MAP_CENTER,
            sequence: RequestSequence::new(),
        }
    }

    /// The query of the newest search started.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Cafes currently shown.
    #[must_use]
    pub fn results(&self) -> &[Cafe] {
        &self.results
    }

    /// Whether the newest search is still waiting for its response.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn map_center(&self) -> GeoPoint {
        self.map_center
    }

    /// Whether to show the explicit "no results" state.
    #[must_use]
    pub fn shows_no_results(&self) -> bool {
        self.searched && !self.loading && self.results.is_empty()
    }

    /// Start a search for `query`.
    ///
    /// Returns `None` and leaves the view untouched if the query is blank.
    pub fn begin(&mut self, query: &str) -> Option<Ticket> {
        if query.trim().is_empty() {
            return None;
        }
        self.query = query.to_string();
        self.loading = true;
        Some(self.sequence.issue())
    }

    /// Apply the outcome of the search started with `ticket`.
    ///
    /// Returns `false` and changes nothing if a newer search has started
    /// since. A failed search is logged and shows no results.
    pub fn finish(&mut self, ticket: Ticket, outcome: Result<Vec<Cafe>, ClientError>) -> bool {
        if !self.sequence.is_latest(ticket) {
            tracing::debug!(?ticket, "Discarding stale search response");
            return false;
        }

        self.results = outcome.unwrap_or_else(|error| {
            tracing::warn!(%error, query = %self.query, "Cafe search failed");
            Vec::new()
        });
        if let Some(first) = self.results.first() {
            self.map_center = first.location;
        }
        self.loading = false;
        self.searched = true;
        true
    }

    /// Run a search against `directory` and apply its outcome.
    ///
    /// Returns whether the view changed.
    pub async fn search<D: CafeDirectory>(&mut self, directory: &D, query: &str) -> bool {
        let Some(ticket) = self.begin(query) else {
            return false;
        };
        let outcome = directory.cafes_near(query).await;
        self.finish(ticket, outcome)
    }
}
