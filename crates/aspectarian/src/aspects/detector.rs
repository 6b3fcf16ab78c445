use crate::aspects::catalog::AspectCatalog;
use crate::aspects::types::{AspectMatch, AspectType, DetectedPair};
use crate::bodies::{is_angle_pair, CelestialPoint};
use log::debug;

/// Deviation below which an aspect counts as exact
const EXACT_THRESHOLD: f64 = 0.1;

/// Slack for decimal longitudes that land on a minute but multiply out just below it
const MINUTE_EPSILON: f64 = 1e-9;

/// Floor a longitude to whole arc-minutes.
pub fn truncate_to_minute(longitude: f64) -> f64 {
    (longitude * 60.0 + MINUTE_EPSILON).floor() / 60.0
}

/// Absolute circular difference between two longitudes, in [0, 180].
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let raw_diff = (lon1 - lon2).abs() % 360.0;
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}

/// Pure aspect detection against a shared catalog.
///
/// Holds no state of its own, so one detector can be used from any number
/// of threads over any pair ordering.
#[derive(Debug, Clone, Copy)]
pub struct AspectDetector<'a> {
    catalog: &'a AspectCatalog,
}

impl<'a> AspectDetector<'a> {
    pub fn new(catalog: &'a AspectCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &AspectCatalog {
        self.catalog
    }

    /// Aspect formed by two points, if any
    pub fn detect(&self, p1: &CelestialPoint, p2: &CelestialPoint) -> Option<AspectType> {
        self.detect_match(p1, p2).map(|m| m.aspect)
    }

    /// Aspect formed by two points, with the orb it was found at
    pub fn detect_match(&self, p1: &CelestialPoint, p2: &CelestialPoint) -> Option<AspectMatch> {
        if p1.name == p2.name || is_angle_pair(p1.name, p2.name) {
            return None;
        }
        let orbs = self.catalog.orbs();
        if !orbs.contains(p1.name) || !orbs.contains(p2.name) {
            return None;
        }
        if !p1.longitude.is_finite() || !p2.longitude.is_finite() {
            debug!(
                "skipping {}/{}: non-finite longitude ({}, {})",
                p1.name, p2.name, p1.longitude, p2.longitude
            );
            return None;
        }

        let lon1 = truncate_to_minute(p1.longitude.rem_euclid(360.0));
        let lon2 = truncate_to_minute(p2.longitude.rem_euclid(360.0));
        let separation = angular_separation(lon1, lon2);

        for aspect in self.catalog.entries() {
            let Some(effective_orb) = self.catalog.orb_for(*aspect, p1.name, p2.name) else {
                continue;
            };
            let orb = (separation - aspect.angle()).abs();
            if orb <= effective_orb {
                return Some(AspectMatch {
                    aspect: *aspect,
                    orb,
                    effective_orb,
                    is_exact: orb < EXACT_THRESHOLD,
                    is_retrograde: p1.retrograde || p2.retrograde,
                });
            }
        }

        None
    }

    /// Every unordered pair (i < j, input order) that forms an aspect,
    /// borrowing the points it was found between.
    pub fn detect_pairs<'p>(
        &self,
        points: &'p [CelestialPoint],
    ) -> Vec<(&'p CelestialPoint, &'p CelestialPoint, AspectMatch)> {
        let mut pairs = Vec::new();
        for (i, p1) in points.iter().enumerate() {
            for p2 in &points[i + 1..] {
                if let Some(aspect) = self.detect_match(p1, p2) {
                    pairs.push((p1, p2, aspect));
                }
            }
        }
        pairs
    }

    /// Detect aspects between all unordered pairs of points
    pub fn detect_all(&self, points: &[CelestialPoint]) -> Vec<DetectedPair> {
        self.detect_pairs(points)
            .into_iter()
            .map(|(p1, p2, aspect)| DetectedPair {
                p1: p1.name,
                p2: p2.name,
                aspect,
            })
            .collect()
    }
}
