use crate::aspects::types::OrbCategory;
use crate::bodies::BodyId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-body tolerances in degrees, one per orb category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbRule {
    /// Conjunction / opposition
    pub major: f64,
    /// Square / trine
    pub hard: f64,
    /// Sextile
    pub minor: f64,
}

impl OrbRule {
    pub const fn new(major: f64, hard: f64, minor: f64) -> Self {
        Self { major, hard, minor }
    }

    pub fn for_category(&self, category: OrbCategory) -> f64 {
        match category {
            OrbCategory::Major => self.major,
            OrbCategory::Hard => self.hard,
            OrbCategory::Minor => self.minor,
        }
    }

    /// Every column finite and non-negative
    pub fn is_valid(&self) -> bool {
        [self.major, self.hard, self.minor]
            .iter()
            .all(|orb| orb.is_finite() && *orb >= 0.0)
    }
}

/// Which built-in orb table to start from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbTableKind {
    #[default]
    Natal,
    ChartWheel,
}

// Shared by both candidate tables
const LUMINARY_AND_PLANET_ORBS: &[(BodyId, OrbRule)] = &[
    (BodyId::Sun, OrbRule::new(10.0, 8.0, 6.0)),
    (BodyId::Moon, OrbRule::new(10.0, 8.0, 6.0)),
    (BodyId::Mercury, OrbRule::new(7.0, 6.0, 5.0)),
    (BodyId::Venus, OrbRule::new(7.0, 6.0, 5.0)),
    (BodyId::Mars, OrbRule::new(7.0, 6.0, 5.0)),
    (BodyId::Jupiter, OrbRule::new(6.0, 5.0, 4.0)),
    (BodyId::Saturn, OrbRule::new(6.0, 5.0, 4.0)),
    (BodyId::Uranus, OrbRule::new(5.0, 4.0, 3.0)),
    (BodyId::Neptune, OrbRule::new(5.0, 4.0, 3.0)),
    (BodyId::Pluto, OrbRule::new(5.0, 4.0, 3.0)),
    (BodyId::Ascendant, OrbRule::new(8.0, 6.0, 4.0)),
    (BodyId::Mc, OrbRule::new(8.0, 6.0, 4.0)),
];

// Minor points, report-side values
const NATAL_MINOR_POINT_ORBS: &[(BodyId, OrbRule)] = &[
    (BodyId::NorthNode, OrbRule::new(3.0, 2.0, 1.0)),
    (BodyId::Chiron, OrbRule::new(3.0, 2.0, 1.0)),
    (BodyId::Lilith, OrbRule::new(3.0, 2.0, 1.0)),
];

// Minor points, chart-wheel values
const WHEEL_MINOR_POINT_ORBS: &[(BodyId, OrbRule)] = &[
    (BodyId::NorthNode, OrbRule::new(5.0, 4.0, 2.0)),
    (BodyId::Chiron, OrbRule::new(4.0, 3.0, 2.0)),
    (BodyId::Lilith, OrbRule::new(4.0, 3.0, 2.0)),
];

/// Orb rules keyed by body. A body without a rule cannot take part in detection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrbTable {
    rules: HashMap<BodyId, OrbRule>,
}

impl OrbTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Default table for natal aspect reports
    pub fn natal() -> Self {
        Self::from_rows(LUMINARY_AND_PLANET_ORBS.iter().chain(NATAL_MINOR_POINT_ORBS))
    }

    /// Table the chart-wheel renderer was tuned against; wider on minor points
    pub fn chart_wheel() -> Self {
        Self::from_rows(LUMINARY_AND_PLANET_ORBS.iter().chain(WHEEL_MINOR_POINT_ORBS))
    }

    pub fn from_kind(kind: OrbTableKind) -> Self {
        match kind {
            OrbTableKind::Natal => Self::natal(),
            OrbTableKind::ChartWheel => Self::chart_wheel(),
        }
    }

    fn from_rows<'a>(rows: impl Iterator<Item = &'a (BodyId, OrbRule)>) -> Self {
        Self {
            rules: rows.copied().collect(),
        }
    }

    /// Replace (or add) the rule for one body
    pub fn with_rule(mut self, body: BodyId, rule: OrbRule) -> Self {
        self.rules.insert(body, rule);
        self
    }

    pub fn get(&self, body: BodyId) -> Option<&OrbRule> {
        self.rules.get(&body)
    }

    pub fn contains(&self, body: BodyId) -> bool {
        self.rules.contains_key(&body)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Mean of the two bodies' orbs for a category
    pub fn effective_orb(&self, a: BodyId, b: BodyId, category: OrbCategory) -> Option<f64> {
        let orb_a = self.get(a)?.for_category(category);
        let orb_b = self.get(b)?.for_category(category);
        Some((orb_a + orb_b) / 2.0)
    }
}
