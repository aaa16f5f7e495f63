use futures::future::{Abortable, Aborted};

use movie_tier_list::catalog::{
    CatalogItem, Genre, LookupReply, LookupTracker, SearchController, SearchReply,
    SEARCH_FAILED_MESSAGE,
};
use movie_tier_list::error::CatalogError;

const DEBOUNCE: f64 = 0.4;

fn results(ids: &[u64]) -> Vec<CatalogItem> {
    ids.iter()
        .map(|id| CatalogItem::new(*id, format!("movie {id}")))
        .collect()
}

fn result_ids(controller: &SearchController) -> Vec<u64> {
    controller.results().iter().map(|item| item.id).collect()
}

#[test]
fn test_search_waits_for_quiet_period() {
    let mut controller = SearchController::new(DEBOUNCE);

    controller.set_query("ali", 0.0);
    assert_eq!(controller.poll(0.2), None);

    // Another keystroke restarts the timer
    controller.set_query("alie", 0.3);
    assert_eq!(controller.poll(0.6), None);

    let request = controller.poll(0.71).unwrap();
    assert_eq!(request.query, "alie");
    assert!(controller.is_loading());

    // Fired once only
    assert_eq!(controller.poll(5.0), None);
}

#[test]
fn test_query_is_trimmed() {
    let mut controller = SearchController::new(DEBOUNCE);
    controller.set_query("  heat ", 0.0);
    assert_eq!(controller.poll(1.0).unwrap().query, "heat");
}

#[test]
fn test_last_query_wins() {
    let mut controller = SearchController::new(DEBOUNCE);

    controller.set_query("star", 0.0);
    let older = controller.poll(0.5).unwrap();
    controller.set_query("star wars", 0.6);
    let newer = controller.poll(1.1).unwrap();
    assert!(newer.generation > older.generation);

    // The newer reply lands first, then the slow older one
    assert!(controller.deliver(SearchReply {
        generation: newer.generation,
        result: Ok(results(&[11, 1891])),
    }));
    assert!(!controller.deliver(SearchReply {
        generation: older.generation,
        result: Ok(results(&[1, 2, 3])),
    }));

    assert_eq!(result_ids(&controller), [11, 1891]);
    assert!(!controller.is_loading());
}

#[test]
fn test_clearing_query_drops_results_and_in_flight_reply() {
    let mut controller = SearchController::new(DEBOUNCE);
    controller.set_query("jaws", 0.0);
    let first = controller.poll(0.5).unwrap();
    controller.deliver(SearchReply {
        generation: first.generation,
        result: Ok(results(&[578])),
    });

    controller.set_query("jaws 2", 1.0);
    let second = controller.poll(1.5).unwrap();
    controller.set_query("   ", 1.6);

    assert!(controller.results().is_empty());
    assert!(!controller.is_loading());
    assert_eq!(controller.deadline(), None);
    assert!(!controller.deliver(SearchReply {
        generation: second.generation,
        result: Ok(results(&[579])),
    }));
    assert!(controller.results().is_empty());
}

#[test]
fn test_failed_search_shows_message() {
    let mut controller = SearchController::new(DEBOUNCE);
    controller.set_query("x", 0.0);
    let request = controller.poll(1.0).unwrap();

    controller.deliver(SearchReply {
        generation: request.generation,
        result: Err(CatalogError::Status {
            status: 401,
            body: "Invalid API key".to_owned(),
        }),
    });

    assert_eq!(controller.error(), Some(SEARCH_FAILED_MESSAGE));
    assert!(controller.results().is_empty());

    // The next query clears the error once it goes out
    controller.set_query("xy", 2.0);
    controller.poll(3.0).unwrap();
    assert_eq!(controller.error(), None);
}

#[test]
fn test_lookup_cache_and_tickets() {
    let mut lookups = LookupTracker::new();

    let (ticket, _registration) = lookups.begin(603).unwrap();
    // Already in flight
    assert!(lookups.begin(603).is_none());
    assert_eq!(lookups.in_flight(), 1);

    assert!(lookups.finish(LookupReply {
        movie_id: 603,
        ticket,
        result: Ok(Some(136)),
    }));
    assert_eq!(lookups.runtime(603), Some(136));
    assert_eq!(lookups.in_flight(), 0);

    // Cached
    assert!(lookups.begin(603).is_none());
}

#[test]
fn test_missing_runtime_is_cached_as_zero() {
    let mut lookups = LookupTracker::new();
    let (ticket, _registration) = lookups.begin(7).unwrap();

    lookups.finish(LookupReply {
        movie_id: 7,
        ticket,
        result: Ok(None),
    });
    assert_eq!(lookups.runtime(7), Some(0));
}

#[test]
fn test_abandoned_lookups_are_aborted_and_ignored() {
    let mut lookups = LookupTracker::new();
    let (ticket, registration) = lookups.begin(1).unwrap();
    let request = Abortable::new(async { Some(120u32) }, registration);

    lookups.abandon_all();
    assert_eq!(lookups.in_flight(), 0);
    assert_eq!(futures::executor::block_on(request), Err(Aborted));

    // A reply that raced the abort is dropped
    assert!(!lookups.finish(LookupReply {
        movie_id: 1,
        ticket,
        result: Ok(Some(120)),
    }));
    assert_eq!(lookups.runtime(1), None);

    // A fresh lookup gets a new ticket; the stale one still does not count
    let (fresh, _registration) = lookups.begin(1).unwrap();
    assert_ne!(fresh, ticket);
    assert!(!lookups.finish(LookupReply {
        movie_id: 1,
        ticket,
        result: Ok(Some(1)),
    }));
    assert_eq!(lookups.in_flight(), 1);
}

#[test]
fn test_genre_names() {
    let mut lookups = LookupTracker::new();
    lookups.set_genres(vec![
        Genre {
            id: 27,
            name: "Horror".to_owned(),
        },
        Genre {
            id: 35,
            name: "Comedy".to_owned(),
        },
    ]);

    let mut item = CatalogItem::new(1, "Shaun of the Dead");
    item.genre_ids = vec![27, 35, 99];
    assert_eq!(item.genre_label(lookups.genres()), "Horror · Comedy");
}
