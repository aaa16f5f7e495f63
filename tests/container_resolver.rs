use movie_tier_list::catalog::CatalogItem;
use movie_tier_list::command::{Command, Outcome};
use movie_tier_list::state::MemoryStore;
use movie_tier_list::tier::resolver::{resolve_raw, target_index};
use movie_tier_list::tier::{
    resolve_container, ContainerId, DuplicatePolicy, PlacementEngine, PlacementId, Target,
};

fn engine_with_items() -> (PlacementEngine, PlacementId, PlacementId) {
    let mut engine = PlacementEngine::new(Box::new(MemoryStore::new()), DuplicatePolicy::Allow);
    let mut add = |id: u64, container: &str| match engine.execute(Command::Add {
        item: CatalogItem::new(id, format!("movie {id}")),
        container: ContainerId::new(container),
        index: usize::MAX,
    }) {
        Outcome::Added(placement_id) => placement_id,
        other => panic!("expected Added, got {other:?}"),
    };
    let in_b = add(1, "B");
    let in_unranked = add(2, "unranked");
    (engine, in_b, in_unranked)
}

#[test]
fn test_container_target_resolves_to_itself() {
    let (engine, _, _) = engine_with_items();
    let collection = engine.collection();

    for id in ["S", "A", "B", "C", "D", "F", "unranked"] {
        let target = Target::Container(ContainerId::new(id));
        assert_eq!(resolve_container(collection, &target), Some(ContainerId::new(id)));
    }
}

#[test]
fn test_item_target_resolves_to_owner() {
    let (engine, in_b, in_unranked) = engine_with_items();
    let collection = engine.collection();

    assert_eq!(
        resolve_container(collection, &Target::Item(in_b)),
        Some(ContainerId::new("B"))
    );
    assert_eq!(
        resolve_container(collection, &Target::Item(in_unranked)),
        Some(ContainerId::unranked())
    );
}

#[test]
fn test_unknown_targets_resolve_to_nothing() {
    let (engine, _, _) = engine_with_items();
    let collection = engine.collection();

    assert_eq!(
        resolve_container(collection, &Target::Container(ContainerId::new("Z"))),
        None
    );
    assert_eq!(
        resolve_container(collection, &Target::Item(PlacementId::new("42-gone"))),
        None
    );
}

#[test]
fn test_removed_item_no_longer_resolves() {
    let (mut engine, in_b, _) = engine_with_items();
    engine.execute(Command::Remove {
        placement_id: in_b.clone(),
    });

    assert_eq!(resolve_container(engine.collection(), &Target::Item(in_b)), None);
}

#[test]
fn test_raw_identifiers() {
    let (engine, in_b, _) = engine_with_items();
    let collection = engine.collection();

    assert_eq!(Target::parse("tier-S"), Target::Container(ContainerId::new("S")));
    assert_eq!(Target::parse("tier-unranked").to_string(), "tier-unranked");
    assert_eq!(resolve_raw(collection, "tier-A"), Some(ContainerId::new("A")));
    assert_eq!(resolve_raw(collection, in_b.as_str()), Some(ContainerId::new("B")));
    // A bare container id without the prefix is taken as an item id
    assert_eq!(resolve_raw(collection, "A"), None);
    assert_eq!(resolve_raw(collection, "tier-"), None);
}

#[test]
fn test_target_index_points_at_item_or_end() {
    let (mut engine, in_b, _) = engine_with_items();
    let second = match engine.execute(Command::Add {
        item: CatalogItem::new(3, "movie 3"),
        container: ContainerId::new("B"),
        index: usize::MAX,
    }) {
        Outcome::Added(placement_id) => placement_id,
        other => panic!("expected Added, got {other:?}"),
    };
    let collection = engine.collection();
    let b = ContainerId::new("B");

    assert_eq!(target_index(collection, &b, &Target::Item(in_b)), 0);
    assert_eq!(target_index(collection, &b, &Target::Item(second)), 1);
    assert_eq!(target_index(collection, &b, &Target::Container(b.clone())), 2);
    assert_eq!(target_index(collection, &ContainerId::new("S"), &Target::Container(ContainerId::new("S"))), 0);
}
