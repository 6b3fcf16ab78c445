//! Significance scoring for ranking aspects.
//!
//! `score = min(10, typeWeight * max(bodyWeight) + max(houseBonus))`.
//! The score is a ranking heuristic only.

use crate::aspects::AspectType;
use crate::bodies::BodyId;

pub const SCORE_CAP: f64 = 10.0;

/// Default scoring version tag surfaced in reports
pub const SCORING_VERSION: &str = "score-v1";

pub fn type_weight(aspect: AspectType) -> f64 {
    match aspect {
        AspectType::Conjunction | AspectType::Opposition => 5.0,
        AspectType::Square => 4.0,
        AspectType::Trine | AspectType::Sextile => 3.0,
    }
}

/// Unknown bodies weigh 1.0
pub fn body_weight(body: Option<BodyId>) -> f64 {
    match body {
        Some(BodyId::Sun | BodyId::Moon | BodyId::Ascendant | BodyId::Mc) => 2.5,
        Some(BodyId::Mercury | BodyId::Venus | BodyId::Mars) => 1.6,
        Some(BodyId::Jupiter | BodyId::Saturn) => 1.3,
        Some(BodyId::Uranus | BodyId::Neptune | BodyId::Pluto) => 1.2,
        Some(BodyId::NorthNode | BodyId::Chiron | BodyId::Lilith) => 1.0,
        None => 1.0,
    }
}

/// Angular 0.5, succedent 0.2, cadent 0.1, missing 0.
pub fn house_bonus(house: Option<u8>) -> f64 {
    match house {
        Some(1 | 4 | 7 | 10) => 0.5,
        Some(2 | 5 | 8 | 11) => 0.2,
        Some(3 | 6 | 9 | 12) => 0.1,
        _ => 0.0,
    }
}

pub fn score(
    aspect: AspectType,
    body_a: Option<BodyId>,
    house_a: Option<u8>,
    body_b: Option<BodyId>,
    house_b: Option<u8>,
) -> f64 {
    let weight = body_weight(body_a).max(body_weight(body_b));
    let bonus = house_bonus(house_a).max(house_bonus(house_b));
    (type_weight(aspect) * weight + bonus).min(SCORE_CAP)
}
