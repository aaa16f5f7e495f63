use serde::{Deserialize, Serialize};

use super::{Collection, ContainerId, PlacedItem, PlacementId};
use crate::catalog::CatalogItem;
use crate::command::{Command, Outcome};
use crate::state::{load_collection, save_collection, KeyValueStore, SessionPolicy};

/// Storage key of the board snapshot
pub const SNAPSHOT_KEY: &str = "movie-tier-list";

/// Whether a catalog id may be placed more than once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Every add mints a new placement, even for a catalog id already on the board
    #[default]
    Allow,
    /// Adding a catalog id that is already placed anywhere is refused
    Reject,
}

/// Single owner and writer of the [`Collection`].
///
/// Every operation is total: bad ids, unknown containers and out-of-range
/// indices degrade to a no-op or a clamped index. Each effective mutation
/// bumps [`Self::revision`] and writes a snapshot to the store; no-ops write
/// nothing.
pub struct PlacementEngine {
    collection: Collection,
    initial: Collection,
    store: Box<dyn KeyValueStore>,
    duplicate_policy: DuplicatePolicy,
    revision: u64,
}

impl std::fmt::Debug for PlacementEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacementEngine")
            .field("items", &self.collection.item_count())
            .field("duplicate_policy", &self.duplicate_policy)
            .field("revision", &self.revision)
            .finish()
    }
}

impl PlacementEngine {
    /// Start from the default tiers with nothing placed
    pub fn new(store: Box<dyn KeyValueStore>, duplicate_policy: DuplicatePolicy) -> Self {
        Self::with_layout(Collection::default(), store, duplicate_policy)
    }

    /// Start from a custom container layout; its items are discarded
    pub fn with_layout(
        layout: Collection,
        store: Box<dyn KeyValueStore>,
        duplicate_policy: DuplicatePolicy,
    ) -> Self {
        let initial = layout.emptied();
        Self {
            collection: initial.clone(),
            initial,
            store,
            duplicate_policy,
            revision: 0,
        }
    }

    /// Build an engine and reload the stored snapshot when the session policy
    /// keeps state across restarts. Missing or broken snapshots fall back to
    /// the empty default tiers.
    pub fn restore(
        store: Box<dyn KeyValueStore>,
        duplicate_policy: DuplicatePolicy,
        session_policy: SessionPolicy,
    ) -> Self {
        let mut engine = Self::new(store, duplicate_policy);
        if session_policy == SessionPolicy::ClearOnExit {
            log::debug!("Session policy clears on exit, starting with an empty board");
            return engine;
        }

        match load_collection(engine.store.as_ref(), SNAPSHOT_KEY, &engine.initial) {
            Ok(Some(collection)) => {
                log::info!("Restored {} placed movies", collection.item_count());
                engine.collection = collection;
            }
            Ok(None) => log::debug!("No stored tier list"),
            Err(err) => log::warn!("Ignoring stored tier list: {err}"),
        }
        engine
    }

    /// Read-only view of the board
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Incremented on every effective mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    pub fn find(&self, placement_id: &PlacementId) -> Option<&PlacedItem> {
        self.collection.find(placement_id).map(|(_, _, placed)| placed)
    }

    pub fn contains_catalog_id(&self, catalog_id: u64) -> bool {
        self.collection.contains_catalog_id(catalog_id)
    }

    pub fn execute(&mut self, command: Command) -> Outcome {
        match command {
            Command::Add {
                item,
                container,
                index,
            } => self.add(item, &container, index),
            Command::Move {
                placement_id,
                container,
                index,
            } => self.move_item(&placement_id, &container, index),
            Command::Remove { placement_id } => self.remove(&placement_id),
            Command::Reset => self.reset(),
        }
    }

    /// Place a new copy of `item` at `index` (clamped) in `container`
    pub fn add(&mut self, item: CatalogItem, container: &ContainerId, index: usize) -> Outcome {
        if self.duplicate_policy == DuplicatePolicy::Reject
            && self.collection.contains_catalog_id(item.id)
        {
            log::debug!("Refusing duplicate placement of movie {}", item.id);
            return Outcome::Duplicate;
        }
        let Some(target) = self.collection.container_mut(container) else {
            log::debug!("Add into unknown container {container}");
            return Outcome::Ignored;
        };

        let placed = PlacedItem::mint(item);
        let placement_id = placed.placement_id.clone();
        let index = index.min(target.items.len());
        target.items.insert(index, placed);

        self.mark_modified();
        Outcome::Added(placement_id)
    }

    /// Move a placement to `index` in `container`.
    ///
    /// The source item is taken out before the index is applied, so for a
    /// reorder the index is clamped to the shortened sequence. Landing on the
    /// slot the item already occupies is a no-op.
    pub fn move_item(
        &mut self,
        placement_id: &PlacementId,
        container: &ContainerId,
        index: usize,
    ) -> Outcome {
        let Some((source, old_index, _)) = self.collection.find(placement_id) else {
            return Outcome::Ignored;
        };
        let source = source.clone();
        let Some(target_len) = self.collection.container(container).map(|c| c.len()) else {
            return Outcome::Ignored;
        };

        let same_container = &source == container;
        let index = if same_container {
            index.min(target_len - 1)
        } else {
            index.min(target_len)
        };
        if same_container && index == old_index {
            return Outcome::Ignored;
        }

        let Some(placed) = self
            .collection
            .container_mut(&source)
            .map(|c| c.items.remove(old_index))
        else {
            return Outcome::Ignored;
        };
        match self.collection.container_mut(container) {
            Some(target) => target.items.insert(index, placed),
            None => return Outcome::Ignored,
        }

        self.mark_modified();
        Outcome::Moved
    }

    /// Delete the placement wherever it is
    pub fn remove(&mut self, placement_id: &PlacementId) -> Outcome {
        let Some((container, index, _)) = self.collection.find(placement_id) else {
            return Outcome::Ignored;
        };
        let container = container.clone();
        if let Some(container) = self.collection.container_mut(&container) {
            container.items.remove(index);
        }

        self.mark_modified();
        Outcome::Removed
    }

    /// Empty every container, keeping ids, labels and colors
    pub fn reset(&mut self) -> Outcome {
        if self.collection == self.initial {
            return Outcome::Ignored;
        }
        self.collection = self.initial.clone();
        self.mark_modified();
        Outcome::Reset
    }

    /// Remove the stored snapshot, used when the session must not carry over
    pub fn clear_snapshot(&mut self) {
        if let Err(err) = self.store.remove(SNAPSHOT_KEY) {
            log::warn!("Failed to clear stored tier list: {err}");
        }
    }

    fn mark_modified(&mut self) {
        self.revision += 1;
        if let Err(err) = save_collection(self.store.as_mut(), SNAPSHOT_KEY, &self.collection) {
            log::warn!("Failed to persist tier list: {err}");
        }
    }
}
