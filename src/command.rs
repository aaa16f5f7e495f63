use crate::catalog::CatalogItem;
use crate::tier::{ContainerId, PlacementId};

/// Mutations the placement engine understands
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Place a new copy of a catalog item
    Add {
        item: CatalogItem,
        container: ContainerId,
        index: usize,
    },
    /// Relocate an existing placement; same-container targets reorder
    Move {
        placement_id: PlacementId,
        container: ContainerId,
        index: usize,
    },
    Remove { placement_id: PlacementId },
    /// Empty every container
    Reset,
}

/// What executing a [`Command`] did to the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(PlacementId),
    Moved,
    Removed,
    Reset,
    /// Rejected by the duplicate policy
    Duplicate,
    /// Nothing changed: unknown id/container, or a move onto the same slot
    Ignored,
}

impl Outcome {
    /// True when the collection was mutated
    pub fn changed(&self) -> bool {
        !matches!(self, Outcome::Duplicate | Outcome::Ignored)
    }
}
