use std::sync::Arc;

use futures::future::Abortable;
use parking_lot::Mutex;

use super::{Genre, LookupReply, LookupTracker, SearchController, SearchReply, TmdbClient};
use crate::config::AppConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::util::spawn::spawn;

/// Replies pushed by request futures, drained by the UI thread every frame
#[derive(Default)]
struct Inbox {
    searches: Vec<SearchReply>,
    lookups: Vec<LookupReply>,
    genres: Option<CatalogResult<Vec<Genre>>>,
}

/// Owns the catalog client and wires the search/lookup state machines to
/// spawned requests. Nothing here touches the tier board.
pub struct CatalogService {
    client: TmdbClient,
    api_base: String,
    max_results: usize,
    controller: SearchController,
    lookups: LookupTracker,
    inbox: Arc<Mutex<Inbox>>,
    genres_requested: bool,
}

impl CatalogService {
    pub fn new(config: &AppConfig, api_key: &str) -> Self {
        Self {
            client: TmdbClient::new(config.api_base.clone(), api_key),
            api_base: config.api_base.clone(),
            max_results: config.max_results,
            controller: SearchController::new(config.debounce_secs()),
            lookups: LookupTracker::new(),
            inbox: Arc::default(),
            genres_requested: false,
        }
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    pub fn lookups(&self) -> &LookupTracker {
        &self.lookups
    }

    pub fn has_api_key(&self) -> bool {
        self.client.has_api_key()
    }

    /// Swap credentials. Cached genres are refetched with the new key.
    pub fn set_api_key(&mut self, api_key: &str) {
        self.client = TmdbClient::new(self.api_base.clone(), api_key);
        self.genres_requested = false;
        self.lookups.abandon_all();
        log::info!("TMDB API key updated");
    }

    pub fn set_query(&mut self, query: &str, now: f64) {
        self.controller.set_query(query, now);
        if query.trim().is_empty() {
            self.lookups.abandon_all();
        }
    }

    /// Drain replies and launch whatever became due
    pub fn update(&mut self, ctx: &egui::Context, now: f64) {
        if !self.has_api_key() {
            return;
        }
        self.drain_inbox(ctx);

        if !self.genres_requested {
            self.genres_requested = true;
            self.request_genres(ctx);
        }

        if let Some(request) = self.controller.poll(now) {
            let client = self.client.clone();
            let inbox = self.inbox.clone();
            let ctx = ctx.clone();
            let limit = self.max_results;
            spawn(async move {
                let result = client.search(&request.query, limit).await;
                inbox.lock().searches.push(SearchReply {
                    generation: request.generation,
                    result,
                });
                ctx.request_repaint();
            });
        }

        if let Some(deadline) = self.controller.deadline() {
            let wait = (deadline - now).max(0.0);
            ctx.request_repaint_after(std::time::Duration::from_secs_f64(wait));
        }
    }

    fn drain_inbox(&mut self, ctx: &egui::Context) {
        let (searches, lookups, genres) = {
            let mut inbox = self.inbox.lock();
            (
                std::mem::take(&mut inbox.searches),
                std::mem::take(&mut inbox.lookups),
                inbox.genres.take(),
            )
        };

        match genres {
            Some(Ok(genres)) => self.lookups.set_genres(genres),
            // Genre names just won't display
            Some(Err(err)) => log::debug!("Genre list unavailable: {err}"),
            None => {}
        }
        for reply in lookups {
            self.lookups.finish(reply);
        }

        let mut results_changed = false;
        for reply in searches {
            results_changed |= self.controller.deliver(reply);
        }
        if results_changed {
            self.refresh_lookups(ctx);
        }
    }

    /// Abandon lookups for the previous result list and start new ones
    fn refresh_lookups(&mut self, ctx: &egui::Context) {
        self.lookups.abandon_all();
        let ids: Vec<u64> = self.controller.results().iter().map(|item| item.id).collect();
        for movie_id in ids {
            let Some((ticket, registration)) = self.lookups.begin(movie_id) else {
                continue;
            };
            let client = self.client.clone();
            let inbox = self.inbox.clone();
            let ctx = ctx.clone();
            spawn(async move {
                let lookup = Abortable::new(async move { client.runtime(movie_id).await }, registration);
                let result = lookup.await.unwrap_or(Err(CatalogError::Aborted));
                inbox.lock().lookups.push(LookupReply {
                    movie_id,
                    ticket,
                    result,
                });
                ctx.request_repaint();
            });
        }
    }

    fn request_genres(&self, ctx: &egui::Context) {
        let client = self.client.clone();
        let inbox = self.inbox.clone();
        let ctx = ctx.clone();
        spawn(async move {
            let result = client.genres().await;
            inbox.lock().genres = Some(result);
            ctx.request_repaint();
        });
    }
}
