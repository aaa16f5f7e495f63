use egui::{Pos2, Rect};

use crate::tier::{ContainerId, PlacementId, Target};

/// Droppable regions laid out during the current frame.
///
/// Panels register every container surface and every placed tile as they
/// draw them; pointer positions are then mapped back to a [`Target`]. Tiles
/// sit on top of their container, so they win over the surface beneath.
#[derive(Debug, Default, Clone)]
pub struct DropZones {
    containers: Vec<(Rect, ContainerId)>,
    items: Vec<(Rect, PlacementId)>,
}

impl DropZones {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget last frame's layout
    pub fn clear(&mut self) {
        self.containers.clear();
        self.items.clear();
    }

    pub fn register_container(&mut self, rect: Rect, id: ContainerId) {
        self.containers.push((rect, id));
    }

    pub fn register_item(&mut self, rect: Rect, id: PlacementId) {
        self.items.push((rect, id));
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty() && self.items.is_empty()
    }

    /// Topmost target under `pos`
    pub fn hit(&self, pos: Pos2) -> Option<Target> {
        let item = self
            .items
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, id)| Target::Item(id.clone()));
        item.or_else(|| {
            self.containers
                .iter()
                .rev()
                .find(|(rect, _)| rect.contains(pos))
                .map(|(_, id)| Target::Container(id.clone()))
        })
    }

    /// Rect of the container surface, for hover highlighting
    pub fn container_rect(&self, id: &ContainerId) -> Option<Rect> {
        self.containers
            .iter()
            .find(|(_, container)| container == id)
            .map(|(rect, _)| *rect)
    }

    /// Union of every registered container surface
    pub fn bounds(&self) -> Option<Rect> {
        self.containers
            .iter()
            .map(|(rect, _)| *rect)
            .reduce(|a, b| a.union(b))
    }
}
