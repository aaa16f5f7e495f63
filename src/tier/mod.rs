//! The tier board: placed items, containers and the collection that holds
//! them. Mutation goes through [`PlacementEngine`] only.

mod engine;
pub mod resolver;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;

pub use engine::{DuplicatePolicy, PlacementEngine, SNAPSHOT_KEY};
pub use resolver::{resolve_container, Target};

/// Identity of the special staging container
pub const UNRANKED_ID: &str = "unranked";

/// Unique identity of one placed instance of a catalog item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementId(String);

impl PlacementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlacementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn unranked() -> Self {
        Self::new(UNRANKED_ID)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unranked(&self) -> bool {
        self.0 == UNRANKED_ID
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog item that has been placed on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub placement_id: PlacementId,
    #[serde(flatten)]
    pub item: CatalogItem,
}

impl PlacedItem {
    /// Wrap `item` with a freshly minted placement identity
    pub fn mint(item: CatalogItem) -> Self {
        Self {
            placement_id: crate::id_generator::generate_placement_id(item.id),
            item,
        }
    }
}

/// A tier row (or the unranked staging area)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub id: ContainerId,
    pub label: String,
    /// `#RRGGBB`
    pub color: String,
    pub items: Vec<PlacedItem>,
}

impl Container {
    pub fn new(id: &str, label: &str, color: &str) -> Self {
        Self {
            id: ContainerId::new(id),
            label: label.to_owned(),
            color: color.to_owned(),
            items: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn position(&self, placement_id: &PlacementId) -> Option<usize> {
        self.items
            .iter()
            .position(|placed| &placed.placement_id == placement_id)
    }

    /// Background color as egui color, gray when the hex string is malformed
    pub fn color32(&self) -> egui::Color32 {
        parse_hex_color(&self.color).unwrap_or(egui::Color32::GRAY)
    }

    /// Black or white, whichever reads better on [`Self::color32`]
    pub fn label_text_color(&self) -> egui::Color32 {
        if is_dark(self.color32()) {
            egui::Color32::WHITE
        } else {
            egui::Color32::BLACK
        }
    }
}

/// The full board: every container, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub containers: Vec<Container>,
}

impl Default for Collection {
    fn default() -> Self {
        Self {
            containers: vec![
                Container::new("S", "S", "#FFD700"),
                Container::new("A", "A", "#C0C0C0"),
                Container::new("B", "B", "#CD7F32"),
                Container::new("C", "C", "#666666"),
                Container::new("D", "D", "#494949"),
                Container::new("F", "F", "#2C2C2C"),
                Container::new(UNRANKED_ID, "Unranked", "#3A3A3A"),
            ],
        }
    }
}

impl Collection {
    pub fn container(&self, id: &ContainerId) -> Option<&Container> {
        self.containers.iter().find(|container| &container.id == id)
    }

    pub(crate) fn container_mut(&mut self, id: &ContainerId) -> Option<&mut Container> {
        self.containers.iter_mut().find(|container| &container.id == id)
    }

    /// Ranked tiers, excluding the staging container
    pub fn tiers(&self) -> impl Iterator<Item = &Container> {
        self.containers.iter().filter(|c| !c.id.is_unranked())
    }

    pub fn unranked(&self) -> Option<&Container> {
        self.container(&ContainerId::unranked())
    }

    /// Locate a placed item: owning container id, index, and the item
    pub fn find(&self, placement_id: &PlacementId) -> Option<(&ContainerId, usize, &PlacedItem)> {
        self.containers.iter().find_map(|container| {
            container
                .position(placement_id)
                .map(|index| (&container.id, index, &container.items[index]))
        })
    }

    pub fn contains_catalog_id(&self, catalog_id: u64) -> bool {
        self.items().any(|placed| placed.item.id == catalog_id)
    }

    pub fn items(&self) -> impl Iterator<Item = &PlacedItem> {
        self.containers.iter().flat_map(|c| c.items.iter())
    }

    pub fn item_count(&self) -> usize {
        self.containers.iter().map(Container::len).sum()
    }

    /// Same containers (ids, labels, colors) with every item dropped
    pub fn emptied(&self) -> Self {
        Self {
            containers: self
                .containers
                .iter()
                .map(|c| Container {
                    items: Vec::new(),
                    ..c.clone()
                })
                .collect(),
        }
    }

    /// True when no placement id appears twice
    pub fn has_unique_placements(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.items().all(|placed| seen.insert(&placed.placement_id))
    }

    /// True when both collections hold the same container ids in the same order
    pub fn same_layout(&self, other: &Collection) -> bool {
        self.containers.len() == other.containers.len()
            && self
                .containers
                .iter()
                .zip(&other.containers)
                .all(|(a, b)| a.id == b.id)
    }
}

/// Parse `#RRGGBB`
pub fn parse_hex_color(hex: &str) -> Option<egui::Color32> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some(egui::Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Perceived brightness below the midpoint
pub fn is_dark(color: egui::Color32) -> bool {
    let [r, g, b, _] = color.to_array();
    let brightness = (r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000;
    brightness < 128
}
