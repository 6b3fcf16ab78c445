use crate::aspects::orbs::OrbTable;
use crate::aspects::types::AspectType;
use crate::bodies::BodyId;

/// The aspect types in play plus the orb table they are tested against.
///
/// Detection and chart rendering both read this one definition. Entries are
/// always kept in [`AspectType::DETECTION_ORDER`], so when orb windows
/// overlap the entry with the smaller angle wins.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectCatalog {
    orbs: OrbTable,
    entries: Vec<AspectType>,
}

impl AspectCatalog {
    /// Catalog with all five aspect types
    pub fn new(orbs: OrbTable) -> Self {
        Self {
            orbs,
            entries: AspectType::DETECTION_ORDER.to_vec(),
        }
    }

    /// Catalog restricted to a subset of aspect types
    pub fn with_entries(orbs: OrbTable, entries: &[AspectType]) -> Self {
        let entries = AspectType::DETECTION_ORDER
            .iter()
            .copied()
            .filter(|aspect| entries.contains(aspect))
            .collect();
        Self { orbs, entries }
    }

    pub fn natal() -> Self {
        Self::new(OrbTable::natal())
    }

    pub fn orbs(&self) -> &OrbTable {
        &self.orbs
    }

    pub fn entries(&self) -> &[AspectType] {
        &self.entries
    }

    /// Nothing can be detected against an empty catalog
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() || self.orbs.is_empty()
    }

    /// Averaged orb for an aspect between two bodies
    pub fn orb_for(&self, aspect: AspectType, a: BodyId, b: BodyId) -> Option<f64> {
        self.orbs.effective_orb(a, b, aspect.category())
    }

    /// Accepted separation range `(low, high)` in degrees, clamped to [0, 180]
    pub fn window(&self, aspect: AspectType, a: BodyId, b: BodyId) -> Option<(f64, f64)> {
        let orb = self.orb_for(aspect, a, b)?;
        let angle = aspect.angle();
        Some(((angle - orb).max(0.0), (angle + orb).min(180.0)))
    }
}

impl Default for AspectCatalog {
    fn default() -> Self {
        Self::natal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subset_keeps_detection_order() {
        let catalog = AspectCatalog::with_entries(
            OrbTable::natal(),
            &[AspectType::Opposition, AspectType::Conjunction, AspectType::Square],
        );
        assert_eq!(
            catalog.entries(),
            &[AspectType::Conjunction, AspectType::Square, AspectType::Opposition]
        );
    }

    #[test]
    fn test_default_windows_do_not_overlap() {
        let catalog = AspectCatalog::natal();
        for a in BodyId::ALL {
            for b in BodyId::ALL {
                let windows: Vec<(f64, f64)> = catalog
                    .entries()
                    .iter()
                    .filter_map(|aspect| catalog.window(*aspect, a, b))
                    .collect();
                for pair in windows.windows(2) {
                    assert!(pair[0].1 < pair[1].0, "{a}/{b}: {:?}", pair);
                }
            }
        }
    }

    #[test]
    fn test_empty_catalog() {
        assert!(AspectCatalog::new(OrbTable::empty()).is_empty());
        assert!(AspectCatalog::with_entries(OrbTable::natal(), &[]).is_empty());
        assert!(!AspectCatalog::natal().is_empty());
    }
}
