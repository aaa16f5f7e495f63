mod coordinator;

pub use coordinator::{InputCoordinator, InteractionState};

use crate::catalog::CatalogItem;
use crate::tier::{Collection, PlacementId, Target};

/// Where a drag or click selection started
#[derive(Debug, Clone, PartialEq)]
pub enum DragSource {
    /// A catalog search result, not yet on the board
    Search(CatalogItem),
    /// A tile already placed in some container
    Placed(PlacementId),
}

impl DragSource {
    /// Same underlying entity: same catalog id for search results, same
    /// placement for tiles
    pub fn same_entity(&self, other: &DragSource) -> bool {
        match (self, other) {
            (Self::Search(a), Self::Search(b)) => a.id == b.id,
            (Self::Placed(a), Self::Placed(b)) => a == b,
            _ => false,
        }
    }

    /// Whether the source still exists. Search results always do.
    pub fn is_present(&self, collection: &Collection) -> bool {
        match self {
            Self::Search(_) => true,
            Self::Placed(id) => collection.find(id).is_some(),
        }
    }
}

/// What the floating drag preview shows
#[derive(Debug, Clone, PartialEq)]
pub struct DragPreview {
    pub title: String,
    pub poster_url: Option<String>,
}

impl DragPreview {
    pub fn for_source(source: &DragSource, collection: &Collection) -> Option<Self> {
        let item = match source {
            DragSource::Search(item) => item,
            DragSource::Placed(id) => &collection.find(id)?.2.item,
        };
        Some(Self {
            title: item.title.clone(),
            poster_url: item.poster_url(),
        })
    }
}

/// Discrete input the coordinator reacts to. The panels translate egui
/// responses into these.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer drag began on a search result or a tile
    DragStarted(DragSource),
    /// Pointer moved during a drag; `None` when over nothing droppable
    DragHovered(Option<Target>),
    /// Pointer released during a drag
    DragReleased(Option<Target>),
    /// Click on a search result or a tile
    SourceClicked(DragSource),
    /// Click on a container surface
    TargetClicked(Target),
    /// Click on nothing actionable
    BackgroundClicked,
    /// Escape
    Cancelled,
}
