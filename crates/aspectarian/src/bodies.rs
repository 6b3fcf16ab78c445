//! Chart points and zodiac signs.

use crate::error::IdentifierError;
use crate::text::slug::{body_slug, sign_slug};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A point that can take part in an aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BodyId {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    Chiron,
    Lilith,
    Ascendant,
    Mc,
}

// (body, slug, display label)
const BODY_TABLE: &[(BodyId, &str, &str)] = &[
    (BodyId::Sun, "sun", "Sun"),
    (BodyId::Moon, "moon", "Moon"),
    (BodyId::Mercury, "mercury", "Mercury"),
    (BodyId::Venus, "venus", "Venus"),
    (BodyId::Mars, "mars", "Mars"),
    (BodyId::Jupiter, "jupiter", "Jupiter"),
    (BodyId::Saturn, "saturn", "Saturn"),
    (BodyId::Uranus, "uranus", "Uranus"),
    (BodyId::Neptune, "neptune", "Neptune"),
    (BodyId::Pluto, "pluto", "Pluto"),
    (BodyId::NorthNode, "north_node", "North Node"),
    (BodyId::Chiron, "chiron", "Chiron"),
    (BodyId::Lilith, "lilith", "Lilith"),
    (BodyId::Ascendant, "asc", "Ascendant"),
    (BodyId::Mc, "mc", "Midheaven"),
];

impl BodyId {
    pub const ALL: [BodyId; 15] = [
        BodyId::Sun,
        BodyId::Moon,
        BodyId::Mercury,
        BodyId::Venus,
        BodyId::Mars,
        BodyId::Jupiter,
        BodyId::Saturn,
        BodyId::Uranus,
        BodyId::Neptune,
        BodyId::Pluto,
        BodyId::NorthNode,
        BodyId::Chiron,
        BodyId::Lilith,
        BodyId::Ascendant,
        BodyId::Mc,
    ];

    fn row(self) -> &'static (BodyId, &'static str, &'static str) {
        // BODY_TABLE is declared in enum order
        &BODY_TABLE[self as usize]
    }

    /// Canonical slug, also the text-dictionary key segment
    pub fn slug(self) -> &'static str {
        self.row().1
    }

    /// Human-readable label used in report titles
    pub fn label(self) -> &'static str {
        self.row().2
    }

    /// Ascendant and midheaven are chart angles, not physical bodies.
    pub fn is_angle(self) -> bool {
        matches!(self, BodyId::Ascendant | BodyId::Mc)
    }

    /// Look up a body from an already-normalized slug.
    pub fn from_slug(slug: &str) -> Option<BodyId> {
        BODY_TABLE
            .iter()
            .find(|(_, s, _)| *s == slug)
            .map(|(body, _, _)| *body)
    }
}

/// The ascendant/midheaven pair never forms an aspect.
pub fn is_angle_pair(a: BodyId, b: BodyId) -> bool {
    a.is_angle() && b.is_angle() && a != b
}

impl FromStr for BodyId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BodyId::from_slug(&body_slug(s)).ok_or_else(|| IdentifierError::UnknownBody(s.to_string()))
    }
}

impl TryFrom<String> for BodyId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BodyId> for String {
    fn from(body: BodyId) -> Self {
        body.slug().to_string()
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

const SIGN_ORDER: &[(Sign, &str, &str)] = &[
    (Sign::Aries, "aries", "Aries"),
    (Sign::Taurus, "taurus", "Taurus"),
    (Sign::Gemini, "gemini", "Gemini"),
    (Sign::Cancer, "cancer", "Cancer"),
    (Sign::Leo, "leo", "Leo"),
    (Sign::Virgo, "virgo", "Virgo"),
    (Sign::Libra, "libra", "Libra"),
    (Sign::Scorpio, "scorpio", "Scorpio"),
    (Sign::Sagittarius, "sagittarius", "Sagittarius"),
    (Sign::Capricorn, "capricorn", "Capricorn"),
    (Sign::Aquarius, "aquarius", "Aquarius"),
    (Sign::Pisces, "pisces", "Pisces"),
];

impl Sign {
    /// Sign containing an ecliptic longitude; `None` for non-finite input.
    pub fn from_longitude(longitude: f64) -> Option<Sign> {
        if !longitude.is_finite() {
            return None;
        }
        let normalized = longitude.rem_euclid(360.0);
        let index = (normalized / 30.0) as usize % 12;
        Some(SIGN_ORDER[index].0)
    }

    pub fn slug(self) -> &'static str {
        SIGN_ORDER[self as usize].1
    }

    pub fn label(self) -> &'static str {
        SIGN_ORDER[self as usize].2
    }
}

impl FromStr for Sign {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = sign_slug(s);
        SIGN_ORDER
            .iter()
            .find(|(_, name, _)| *name == slug)
            .map(|(sign, _, _)| *sign)
            .ok_or_else(|| IdentifierError::UnknownSign(s.to_string()))
    }
}

impl TryFrom<String> for Sign {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Sign> for String {
    fn from(sign: Sign) -> Self {
        sign.slug().to_string()
    }
}

/// A computed position handed over by the position provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialPoint {
    pub name: BodyId,
    /// Ecliptic longitude in degrees (0-360)
    pub longitude: f64,
    #[serde(default)]
    pub sign: Option<Sign>,
    /// House 1-12; never set for angle points
    #[serde(default)]
    pub house: Option<u8>,
    #[serde(default)]
    pub retrograde: bool,
}

impl CelestialPoint {
    pub fn new(name: BodyId, longitude: f64) -> Self {
        Self {
            name,
            longitude,
            sign: None,
            house: None,
            retrograde: false,
        }
    }

    pub fn with_sign(mut self, sign: Sign) -> Self {
        self.sign = Some(sign);
        self
    }

    pub fn with_house(mut self, house: u8) -> Self {
        self.house = Some(house);
        self
    }

    pub fn retrograde(mut self, retrograde: bool) -> Self {
        self.retrograde = retrograde;
        self
    }

    /// House placement, dropped for angle points and out-of-range values.
    pub fn effective_house(&self) -> Option<u8> {
        if self.name.is_angle() {
            return None;
        }
        self.house.filter(|h| (1..=12).contains(h))
    }

    /// Explicit sign, or the one derived from the longitude.
    pub fn effective_sign(&self) -> Option<Sign> {
        self.sign.or_else(|| Sign::from_longitude(self.longitude))
    }

    /// One position record, or `None` when it names an unknown body or
    /// lacks a finite longitude.
    pub fn from_value(value: &Value) -> Option<Self> {
        match Self::deserialize(value) {
            Ok(point) if point.longitude.is_finite() => Some(point),
            Ok(point) => {
                debug!("dropping {}: non-finite longitude", point.name);
                None
            }
            Err(e) => {
                debug!("dropping position record {}: {}", value, e);
                None
            }
        }
    }

    /// Every usable record of a position array. `None` when the payload is
    /// not an array at all.
    pub fn list_from_value(value: &Value) -> Option<Vec<Self>> {
        let records = value.as_array()?;
        Some(records.iter().filter_map(Self::from_value).collect())
    }
}
