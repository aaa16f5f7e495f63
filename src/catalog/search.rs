//! Debounced, last-query-wins search state and the runtime lookup cache.
//!
//! Both types are plain state machines driven by the UI thread: they decide
//! when a request should go out and which replies are still wanted, while the
//! app spawns the actual futures and feeds replies back in. Time is passed in
//! as seconds so the logic does not depend on a clock.

use std::collections::HashMap;

use futures::future::{AbortHandle, AbortRegistration};

use super::{CatalogItem, Genre};
use crate::error::{CatalogError, CatalogResult};

pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search movies. Check your API key.";

/// A search that should be sent now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub query: String,
}

#[derive(Debug)]
pub struct SearchReply {
    pub generation: u64,
    pub result: CatalogResult<Vec<CatalogItem>>,
}

#[derive(Debug)]
pub struct SearchController {
    debounce_secs: f64,
    query: String,
    /// When the pending query fires
    deadline: Option<f64>,
    /// Generation of the newest request; older replies are stale
    generation: u64,
    results: Vec<CatalogItem>,
    loading: bool,
    error: Option<String>,
}

impl SearchController {
    pub fn new(debounce_secs: f64) -> Self {
        Self {
            debounce_secs,
            query: String::new(),
            deadline: None,
            generation: 0,
            results: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[CatalogItem] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Time at which [`Self::poll`] will next produce a request
    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    /// Record a keystroke. Restarts the debounce timer; a blank query clears
    /// the results and invalidates any request still in flight.
    pub fn set_query(&mut self, query: &str, now: f64) {
        self.query = query.to_owned();
        if query.trim().is_empty() {
            self.deadline = None;
            self.generation += 1;
            self.results.clear();
            self.loading = false;
            self.error = None;
        } else {
            self.deadline = Some(now + self.debounce_secs);
        }
    }

    /// Emit the pending request once the debounce period has elapsed
    pub fn poll(&mut self, now: f64) -> Option<SearchRequest> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        self.generation += 1;
        self.loading = true;
        self.error = None;
        log::debug!("Searching for {:?} (generation {})", self.query, self.generation);
        Some(SearchRequest {
            generation: self.generation,
            query: self.query.trim().to_owned(),
        })
    }

    /// Apply a reply. Returns false when it belonged to a superseded query.
    pub fn deliver(&mut self, reply: SearchReply) -> bool {
        if reply.generation != self.generation {
            log::debug!("Dropping stale search reply {}", reply.generation);
            return false;
        }
        self.loading = false;
        match reply.result {
            Ok(results) => {
                self.results = results;
                self.error = None;
            }
            Err(err) => {
                log::warn!("Movie search failed: {err}");
                self.results.clear();
                self.error = Some(SEARCH_FAILED_MESSAGE.to_owned());
            }
        }
        true
    }
}

#[derive(Debug)]
pub struct LookupReply {
    pub movie_id: u64,
    pub ticket: u64,
    pub result: CatalogResult<Option<u32>>,
}

/// Genre names and per-movie runtimes, fetched opportunistically.
///
/// Runtime lookups are abortable: [`Self::abandon_all`] cancels everything in
/// flight, and a reply whose ticket is no longer current never reaches the
/// cache.
#[derive(Debug, Default)]
pub struct LookupTracker {
    genres: HashMap<u64, String>,
    runtimes: HashMap<u64, u32>,
    in_flight: HashMap<u64, (u64, AbortHandle)>,
    next_ticket: u64,
}

impl LookupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn genres(&self) -> &HashMap<u64, String> {
        &self.genres
    }

    pub fn set_genres(&mut self, genres: Vec<Genre>) {
        self.genres = genres.into_iter().map(|g| (g.id, g.name)).collect();
    }

    pub fn runtime(&self, movie_id: u64) -> Option<u32> {
        self.runtimes.get(&movie_id).copied()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Start a lookup unless the runtime is cached or already being fetched.
    /// The registration wraps the request future in `Abortable`.
    pub fn begin(&mut self, movie_id: u64) -> Option<(u64, AbortRegistration)> {
        if self.runtimes.contains_key(&movie_id) || self.in_flight.contains_key(&movie_id) {
            return None;
        }
        self.next_ticket += 1;
        let (handle, registration) = AbortHandle::new_pair();
        self.in_flight.insert(movie_id, (self.next_ticket, handle));
        Some((self.next_ticket, registration))
    }

    /// Apply a reply. Returns true when the cache was updated.
    pub fn finish(&mut self, reply: LookupReply) -> bool {
        match self.in_flight.get(&reply.movie_id) {
            Some((ticket, _)) if *ticket == reply.ticket => {
                self.in_flight.remove(&reply.movie_id);
            }
            _ => return false,
        }
        match reply.result {
            Ok(runtime) => {
                self.runtimes.insert(reply.movie_id, runtime.unwrap_or(0));
                true
            }
            Err(CatalogError::Aborted) => false,
            Err(err) => {
                log::debug!("Runtime lookup for {} failed: {err}", reply.movie_id);
                false
            }
        }
    }

    /// Abort every lookup in flight
    pub fn abandon_all(&mut self) {
        for (_, (_, handle)) in self.in_flight.drain() {
            handle.abort();
        }
    }
}
