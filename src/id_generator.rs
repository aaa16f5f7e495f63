use uuid::Uuid;

use crate::tier::PlacementId;

/// Mint a placement identity for a newly placed copy of `catalog_id`.
///
/// The catalog id prefix keeps ids readable in logs; the v4 suffix makes
/// every minted id unique for the lifetime of the session.
pub fn generate_placement_id(catalog_id: u64) -> PlacementId {
    PlacementId::new(format!("{}-{}", catalog_id, Uuid::new_v4().simple()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_prefixed_and_unique() {
        let a = generate_placement_id(42);
        let b = generate_placement_id(42);
        assert!(a.as_str().starts_with("42-"));
        assert_ne!(a, b);
    }
}
