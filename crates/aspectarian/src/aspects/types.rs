use crate::bodies::BodyId;
use crate::error::IdentifierError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aspect type. Declaration order is the ranking precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectType {
    Conjunction,
    Opposition,
    Square,
    Trine,
    Sextile,
}

/// Which orb column of an [`OrbRule`](crate::aspects::OrbRule) applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrbCategory {
    Major,
    Hard,
    Minor,
}

impl AspectType {
    /// Order in which detection tests catalog entries (ascending angle).
    pub const DETECTION_ORDER: [AspectType; 5] = [
        AspectType::Conjunction,
        AspectType::Sextile,
        AspectType::Square,
        AspectType::Trine,
        AspectType::Opposition,
    ];

    /// Tie-break order used when ranking equal scores.
    pub const PRECEDENCE: [AspectType; 5] = [
        AspectType::Conjunction,
        AspectType::Opposition,
        AspectType::Square,
        AspectType::Trine,
        AspectType::Sextile,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AspectType::Conjunction => "conjunction",
            AspectType::Opposition => "opposition",
            AspectType::Square => "square",
            AspectType::Trine => "trine",
            AspectType::Sextile => "sextile",
        }
    }

    /// Canonical separation angle in degrees
    pub fn angle(self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Sextile => 60.0,
            AspectType::Square => 90.0,
            AspectType::Trine => 120.0,
            AspectType::Opposition => 180.0,
        }
    }

    pub fn category(self) -> OrbCategory {
        match self {
            AspectType::Conjunction | AspectType::Opposition => OrbCategory::Major,
            AspectType::Square | AspectType::Trine => OrbCategory::Hard,
            AspectType::Sextile => OrbCategory::Minor,
        }
    }

    pub fn precedence(self) -> usize {
        self as usize
    }

    /// Phrase joining the two sides of a report title
    pub fn connector(self) -> &'static str {
        match self {
            AspectType::Conjunction => "in conjunction with",
            AspectType::Opposition => "in opposition to",
            AspectType::Square => "in square to",
            AspectType::Trine => "in trine with",
            AspectType::Sextile => "in sextile with",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            AspectType::Conjunction => "☌",
            AspectType::Opposition => "☍",
            AspectType::Square => "□",
            AspectType::Trine => "△",
            AspectType::Sextile => "⚹",
        }
    }

    /// Line colour for chart renderers
    pub fn color_hex(self) -> &'static str {
        match self {
            AspectType::Conjunction => "#DC143C", // crimson
            AspectType::Opposition => "#4169E1",  // royal blue
            AspectType::Square => "#FF0000",
            AspectType::Trine => "#228B22", // forest green
            AspectType::Sextile => "#FFA500",
        }
    }
}

impl FromStr for AspectType {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        AspectType::PRECEDENCE
            .iter()
            .copied()
            .find(|aspect| aspect.name() == key)
            .ok_or_else(|| IdentifierError::UnknownAspect(s.to_string()))
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of testing one pair of longitudes against the catalog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectMatch {
    pub aspect: AspectType,
    /// Deviation from the exact angle, in degrees
    pub orb: f64,
    /// Averaged tolerance the deviation was tested against
    pub effective_orb: f64,
    /// Whether the aspect is exact (within 0.1 degrees)
    pub is_exact: bool,
    /// Whether either point is retrograde
    pub is_retrograde: bool,
}

/// A detected aspect between two chart points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectedPair {
    pub p1: BodyId,
    pub p2: BodyId,
    #[serde(flatten)]
    pub aspect: AspectMatch,
}

/// One side of a scored aspect
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointRef {
    /// Identifier as received; "sun", "trueNode", "Júpiter", ...
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house: Option<u8>,
}

impl PointRef {
    /// Reference for a raw identifier; known bodies are resolved through the alias table.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let body = name.parse().ok();
        Self {
            name,
            body,
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_sign(mut self, sign: impl Into<String>) -> Self {
        self.sign = Some(sign.into());
        self
    }

    /// Houses outside 1-12 and houses on angle points are dropped.
    pub fn with_house(mut self, house: Option<u8>) -> Self {
        let is_angle = self.body.map(BodyId::is_angle).unwrap_or(false);
        self.house = house.filter(|h| !is_angle && (1..=12).contains(h));
        self
    }
}

/// A scored aspect between two points, built per report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectInstance {
    #[serde(rename = "type")]
    pub aspect: AspectType,
    pub p1: PointRef,
    pub p2: PointRef,
    pub score: f64,
}
