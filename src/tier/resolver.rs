//! Maps a drop or click target to the container it logically belongs to.
//!
//! A target is either a container surface itself or one of the placed items
//! inside a container. On the raw identifier level container surfaces carry
//! the `tier-` prefix; every other identifier is taken as a placement id.

use std::fmt;

use super::{Collection, ContainerId, PlacementId};

/// Prefix marking a raw identifier as a container reference
pub const CONTAINER_PREFIX: &str = "tier-";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// A container surface (tier row or unranked zone)
    Container(ContainerId),
    /// A placed item's tile
    Item(PlacementId),
}

impl Target {
    /// Interpret a raw target identifier
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(CONTAINER_PREFIX) {
            Some(id) => Self::Container(ContainerId::new(id)),
            None => Self::Item(PlacementId::new(raw)),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container(id) => write!(f, "{CONTAINER_PREFIX}{id}"),
            Self::Item(id) => write!(f, "{id}"),
        }
    }
}

/// Resolve `target` against the current collection.
///
/// Returns `None` when the target names a container that does not exist or an
/// item that is no longer on the board. Callers abort the placement silently.
pub fn resolve_container(collection: &Collection, target: &Target) -> Option<ContainerId> {
    match target {
        Target::Container(id) => collection.container(id).map(|c| c.id.clone()),
        Target::Item(placement_id) => collection
            .find(placement_id)
            .map(|(container_id, _, _)| container_id.clone()),
    }
}

/// [`resolve_container`] over the raw identifier protocol
pub fn resolve_raw(collection: &Collection, raw: &str) -> Option<ContainerId> {
    resolve_container(collection, &Target::parse(raw))
}

/// Index the hovered target points at inside `container`: the hovered item's
/// slot, or the end of the sequence for a container surface or a miss.
pub fn target_index(collection: &Collection, container: &ContainerId, target: &Target) -> usize {
    let Some(container) = collection.container(container) else {
        return 0;
    };
    match target {
        Target::Item(placement_id) => container
            .position(placement_id)
            .unwrap_or(container.len()),
        Target::Container(_) => container.len(),
    }
}
