use movie_tier_list::catalog::CatalogItem;
use movie_tier_list::command::{Command, Outcome};
use movie_tier_list::state::{load_collection, MemoryStore};
use movie_tier_list::tier::{
    Collection, ContainerId, DuplicatePolicy, PlacementEngine, PlacementId, SNAPSHOT_KEY,
};

// Engine over an in-memory store; the returned handle shares the store
fn engine_with(policy: DuplicatePolicy) -> (PlacementEngine, MemoryStore) {
    let store = MemoryStore::new();
    let engine = PlacementEngine::new(Box::new(store.clone()), policy);
    (engine, store)
}

fn engine() -> (PlacementEngine, MemoryStore) {
    engine_with(DuplicatePolicy::Allow)
}

fn movie(id: u64, title: &str) -> CatalogItem {
    CatalogItem::new(id, title)
}

fn tier(id: &str) -> ContainerId {
    ContainerId::new(id)
}

fn add(engine: &mut PlacementEngine, id: u64, title: &str, container: &str, index: usize) -> PlacementId {
    match engine.execute(Command::Add {
        item: movie(id, title),
        container: tier(container),
        index,
    }) {
        Outcome::Added(placement_id) => placement_id,
        other => panic!("expected Added, got {other:?}"),
    }
}

fn move_to(engine: &mut PlacementEngine, placement_id: &PlacementId, container: &str, index: usize) -> Outcome {
    engine.execute(Command::Move {
        placement_id: placement_id.clone(),
        container: tier(container),
        index,
    })
}

// Titles in a container, in order
fn titles(engine: &PlacementEngine, container: &str) -> Vec<String> {
    engine
        .collection()
        .container(&tier(container))
        .unwrap()
        .items
        .iter()
        .map(|placed| placed.item.title.clone())
        .collect()
}

#[test]
fn test_add_inserts_at_index_and_clamps() {
    let (mut engine, _) = engine();

    add(&mut engine, 1, "Alien", "S", 0);
    add(&mut engine, 2, "Brazil", "S", 0);
    add(&mut engine, 3, "Cube", "S", 99);
    add(&mut engine, 4, "Dune", "S", 1);

    assert_eq!(titles(&engine, "S"), ["Brazil", "Dune", "Alien", "Cube"]);
    assert_eq!(engine.collection().item_count(), 4);
}

#[test]
fn test_add_mints_distinct_placements_for_same_movie() {
    let (mut engine, _) = engine();

    let first = add(&mut engine, 603, "The Matrix", "S", 0);
    let second = add(&mut engine, 603, "The Matrix", "unranked", 0);

    assert_ne!(first, second);
    assert!(first.as_str().starts_with("603-"));
    assert_eq!(engine.collection().item_count(), 2);
    assert!(engine.collection().has_unique_placements());
}

#[test]
fn test_reject_policy_refuses_movie_already_placed() {
    let (mut engine, store) = engine_with(DuplicatePolicy::Reject);
    add(&mut engine, 603, "The Matrix", "S", 0);
    let writes = store.writes();

    let outcome = engine.execute(Command::Add {
        item: movie(603, "The Matrix"),
        container: tier("A"),
        index: 0,
    });

    assert_eq!(outcome, Outcome::Duplicate);
    assert!(titles(&engine, "A").is_empty());
    assert_eq!(store.writes(), writes);
}

#[test]
fn test_add_to_unknown_container_is_ignored() {
    let (mut engine, store) = engine();

    let outcome = engine.execute(Command::Add {
        item: movie(1, "Alien"),
        container: tier("Z"),
        index: 0,
    });

    assert_eq!(outcome, Outcome::Ignored);
    assert_eq!(engine.collection().item_count(), 0);
    assert_eq!(engine.revision(), 0);
    assert_eq!(store.writes(), 0);
}

#[test]
fn test_move_across_containers() {
    // S holds two movies, A holds one; the second S movie goes to the front of A
    let (mut engine, _) = engine();
    add(&mut engine, 1, "Heat", "S", 0);
    let second = add(&mut engine, 2, "Ran", "S", 1);
    add(&mut engine, 3, "Jaws", "A", 0);

    assert_eq!(move_to(&mut engine, &second, "A", 0), Outcome::Moved);

    assert_eq!(titles(&engine, "S"), ["Heat"]);
    assert_eq!(titles(&engine, "A"), ["Ran", "Jaws"]);
}

#[test]
fn test_move_across_containers_clamps_to_end() {
    let (mut engine, _) = engine();
    let heat = add(&mut engine, 1, "Heat", "S", 0);
    add(&mut engine, 2, "Jaws", "A", 0);

    assert_eq!(move_to(&mut engine, &heat, "A", 50), Outcome::Moved);
    assert_eq!(titles(&engine, "A"), ["Jaws", "Heat"]);
    assert!(titles(&engine, "S").is_empty());
}

#[test]
fn test_reorder_within_container() {
    let (mut engine, _) = engine();
    let a = add(&mut engine, 1, "a", "B", 0);
    add(&mut engine, 2, "b", "B", 1);
    add(&mut engine, 3, "c", "B", 2);

    assert_eq!(move_to(&mut engine, &a, "B", 2), Outcome::Moved);
    assert_eq!(titles(&engine, "B"), ["b", "c", "a"]);

    // Index past the end lands on the last slot of the shortened sequence
    assert_eq!(move_to(&mut engine, &a, "B", 0), Outcome::Moved);
    assert_eq!(titles(&engine, "B"), ["a", "b", "c"]);
    assert_eq!(move_to(&mut engine, &a, "B", 10), Outcome::Moved);
    assert_eq!(titles(&engine, "B"), ["b", "c", "a"]);
}

#[test]
fn test_move_onto_own_slot_writes_nothing() {
    let (mut engine, store) = engine();
    add(&mut engine, 1, "a", "C", 0);
    let b = add(&mut engine, 2, "b", "C", 1);
    let revision = engine.revision();
    let writes = store.writes();

    assert_eq!(move_to(&mut engine, &b, "C", 1), Outcome::Ignored);
    // Clamped onto its own slot as well
    assert_eq!(move_to(&mut engine, &b, "C", 7), Outcome::Ignored);

    assert_eq!(titles(&engine, "C"), ["a", "b"]);
    assert_eq!(engine.revision(), revision);
    assert_eq!(store.writes(), writes);
}

#[test]
fn test_move_with_unknown_ids_is_ignored() {
    let (mut engine, store) = engine();
    let heat = add(&mut engine, 1, "Heat", "S", 0);
    let writes = store.writes();

    assert_eq!(
        move_to(&mut engine, &PlacementId::new("missing"), "A", 0),
        Outcome::Ignored
    );
    assert_eq!(move_to(&mut engine, &heat, "nowhere", 0), Outcome::Ignored);

    // The item was not lost on the failed move
    assert_eq!(titles(&engine, "S"), ["Heat"]);
    assert_eq!(store.writes(), writes);
}

#[test]
fn test_moves_conserve_items() {
    let (mut engine, _) = engine();
    let ids: Vec<_> = (0..6)
        .map(|n| add(&mut engine, n, &format!("movie {n}"), "unranked", n as usize))
        .collect();

    let targets = ["S", "A", "S", "F", "unranked", "S"];
    for (step, id) in ids.iter().cycle().take(24).enumerate() {
        move_to(&mut engine, id, targets[step % targets.len()], step % 3);
        assert_eq!(engine.collection().item_count(), 6);
        assert!(engine.collection().has_unique_placements());
    }
    for id in &ids {
        assert!(engine.find(id).is_some());
    }
}

#[test]
fn test_remove_deletes_only_that_placement() {
    let (mut engine, store) = engine();
    let first = add(&mut engine, 7, "Se7en", "A", 0);
    let second = add(&mut engine, 7, "Se7en", "A", 1);

    let outcome = engine.execute(Command::Remove {
        placement_id: first.clone(),
    });
    assert_eq!(outcome, Outcome::Removed);
    assert!(engine.find(&first).is_none());
    assert!(engine.find(&second).is_some());

    let writes = store.writes();
    let again = engine.execute(Command::Remove { placement_id: first });
    assert_eq!(again, Outcome::Ignored);
    assert_eq!(store.writes(), writes);
}

#[test]
fn test_reset_empties_every_container_and_keeps_layout() {
    let (mut engine, _) = engine();
    add(&mut engine, 1, "Heat", "S", 0);
    add(&mut engine, 2, "Jaws", "F", 0);
    add(&mut engine, 3, "Cube", "unranked", 0);

    assert_eq!(engine.execute(Command::Reset), Outcome::Reset);

    assert_eq!(engine.collection().item_count(), 0);
    assert_eq!(engine.collection(), &Collection::default());

    // Already empty
    assert_eq!(engine.execute(Command::Reset), Outcome::Ignored);
}

#[test]
fn test_every_change_is_persisted() {
    let (mut engine, store) = engine();
    let heat = add(&mut engine, 1, "Heat", "S", 0);
    add(&mut engine, 2, "Jaws", "A", 0);
    move_to(&mut engine, &heat, "A", 1);

    let stored = load_collection(&store, SNAPSHOT_KEY, &Collection::default())
        .unwrap()
        .unwrap();
    assert_eq!(&stored, engine.collection());
    assert_eq!(store.writes(), 3);
    assert_eq!(engine.revision(), 3);
}
