//! Identifier normalization shared by body/sign parsing and text lookup.
//!
//! Raw identifiers arrive as display names ("Júpiter"), camelCase keys
//! ("trueNode") or short codes ("AC"). They are folded to a slug:
//! diacritics stripped, lower-cased, whitespace runs collapsed to `_`,
//! then mapped through a fixed alias table.

use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static::lazy_static! {
    static ref BODY_ALIASES: HashMap<&'static str, &'static str> = {
        let mut aliases = HashMap::new();
        for (alias, slug) in [
            ("ascendant", "asc"),
            ("ac", "asc"),
            ("ascendente", "asc"),
            ("midheaven", "mc"),
            ("medium_coeli", "mc"),
            ("medio_cielo", "mc"),
            ("truenode", "north_node"),
            ("true_node", "north_node"),
            ("northnode", "north_node"),
            ("nodo_norte", "north_node"),
            ("black_moon", "lilith"),
            ("black_moon_lilith", "lilith"),
            ("luna_negra", "lilith"),
            ("sol", "sun"),
            ("luna", "moon"),
            ("mercurio", "mercury"),
            ("marte", "mars"),
            ("saturno", "saturn"),
            ("urano", "uranus"),
            ("neptuno", "neptune"),
            ("pluton", "pluto"),
            ("quiron", "chiron"),
        ] {
            aliases.insert(alias, slug);
        }
        aliases
    };

    static ref SIGN_ALIASES: HashMap<&'static str, &'static str> = {
        let mut aliases = HashMap::new();
        for (alias, slug) in [
            ("tauro", "taurus"),
            ("geminis", "gemini"),
            ("escorpio", "scorpio"),
            ("escorpion", "scorpio"),
            ("sagitario", "sagittarius"),
            ("capricornio", "capricorn"),
            ("acuario", "aquarius"),
            ("piscis", "pisces"),
        ] {
            aliases.insert(alias, slug);
        }
        aliases
    };
}

/// Strip combining marks after canonical decomposition ("Plutón" -> "Pluton").
pub fn fold_diacritics(raw: &str) -> String {
    raw.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Fold diacritics, lower-case, and join whitespace-separated words with `_`.
pub fn slugify(raw: &str) -> String {
    fold_diacritics(raw)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Canonical body slug used as a dictionary key segment.
pub fn body_slug(raw: &str) -> String {
    let slug = slugify(raw);
    match BODY_ALIASES.get(slug.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => slug,
    }
}

/// Canonical sign slug (English, lower-case).
pub fn sign_slug(raw: &str) -> String {
    let slug = slugify(raw);
    match SIGN_ALIASES.get(slug.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => slug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_folds_and_collapses() {
        assert_eq!(slugify("  Nodo   Norte "), "nodo_norte");
        assert_eq!(slugify("Júpiter"), "jupiter");
        assert_eq!(slugify("PLUTÓN"), "pluton");
    }

    #[test]
    fn test_body_slug_aliases() {
        assert_eq!(body_slug("Ascendant"), "asc");
        assert_eq!(body_slug("AC"), "asc");
        assert_eq!(body_slug("trueNode"), "north_node");
        assert_eq!(body_slug("true node"), "north_node");
        assert_eq!(body_slug("northnode"), "north_node");
        assert_eq!(body_slug("Medio Cielo"), "mc");
        assert_eq!(body_slug("Quirón"), "chiron");
        assert_eq!(body_slug("venus"), "venus");
    }

    #[test]
    fn test_unknown_identifiers_pass_through() {
        assert_eq!(body_slug("Vertex"), "vertex");
        assert_eq!(sign_slug("Ophiuchus"), "ophiuchus");
    }

    #[test]
    fn test_sign_slug_aliases() {
        assert_eq!(sign_slug("Géminis"), "gemini");
        assert_eq!(sign_slug("Capricornio"), "capricorn");
        assert_eq!(sign_slug("Leo"), "leo");
    }
}
