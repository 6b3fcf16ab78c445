//! Input normalization for pre-tagged aspect payloads.
//!
//! Upstream producers hand over aspects as a JSON object, a JSON string,
//! JSON embedded in prose, or an array of single-key objects. Parsing runs
//! in two stages: [`canonical_mapping`] reduces any of those shapes to one
//! `{ aspectType: [records] }` object, then [`normalize`] turns that object
//! into typed [`PairRecord`]s. Nothing here returns an error; an
//! unparseable payload yields `parsed_ok == false`.

use crate::aspects::AspectType;
use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// Guards against strings nested inside strings
const MAX_TEXT_DEPTH: usize = 2;

/// One side of a pre-tagged aspect record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairSide {
    pub name: String,
    pub label: Option<String>,
    pub sign: Option<String>,
    pub house: Option<u8>,
}

/// `{ planet1: {...}, planet2: {...} }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairRecord {
    pub planet1: PairSide,
    pub planet2: PairSide,
}

/// Canonical result of normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedAspects {
    /// False when the payload could not be read at all
    pub parsed_ok: bool,
    pub groups: BTreeMap<AspectType, Vec<PairRecord>>,
}

impl NormalizedAspects {
    pub fn unparsed() -> Self {
        Self::default()
    }

    pub fn record_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}

/// Shape of a raw payload before any domain interpretation
enum RawPayload<'a> {
    Mapping(&'a Map<String, Value>),
    Sequence(&'a [Value]),
    Text(&'a str),
    Unsupported,
}

impl<'a> RawPayload<'a> {
    fn classify(raw: &'a Value) -> Self {
        match raw {
            Value::Object(map) => RawPayload::Mapping(map),
            Value::Array(items) => RawPayload::Sequence(items),
            Value::String(text) => RawPayload::Text(text),
            _ => RawPayload::Unsupported,
        }
    }
}

/// Reduce a raw payload to the canonical `{ aspectType: [records] }` object.
pub fn canonical_mapping(raw: &Value) -> Option<Map<String, Value>> {
    extract(raw, 0)
}

fn extract(raw: &Value, depth: usize) -> Option<Map<String, Value>> {
    match RawPayload::classify(raw) {
        RawPayload::Mapping(map) => Some(map.clone()),
        RawPayload::Sequence(items) => merge_mappings(items),
        RawPayload::Text(text) => extract_from_text(text, depth),
        RawPayload::Unsupported => None,
    }
}

fn extract_from_text(text: &str, depth: usize) -> Option<Map<String, Value>> {
    if depth >= MAX_TEXT_DEPTH {
        return None;
    }
    let trimmed = text.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return extract(&value, depth + 1);
    }

    // JSON object embedded in prose
    if let Some(fragment) = delimited(trimmed, '{', '}') {
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(fragment) {
            return Some(map);
        }
    }
    // JSON array embedded in prose
    if let Some(fragment) = delimited(trimmed, '[', ']') {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(fragment) {
            return merge_mappings(&items);
        }
    }
    None
}

/// Substring from the first `open` to the last `close`, inclusive.
fn delimited(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

/// Merge an array of `{ aspectType: [...] }` objects, concatenating records per key.
fn merge_mappings(items: &[Value]) -> Option<Map<String, Value>> {
    let mut merged = Map::new();
    let mut saw_mapping = items.is_empty();
    for item in items {
        let Value::Object(map) = item else {
            continue;
        };
        saw_mapping = true;
        for (key, value) in map {
            let slot = merged
                .entry(key.clone())
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(records) = slot {
                match value {
                    Value::Array(more) => records.extend(more.iter().cloned()),
                    other => records.push(other.clone()),
                }
            }
        }
    }
    saw_mapping.then_some(merged)
}

/// Normalize any supported payload shape.
pub fn normalize(raw: &Value) -> NormalizedAspects {
    match canonical_mapping(raw) {
        Some(map) => from_mapping(&map),
        None => {
            debug!("aspect payload could not be parsed");
            NormalizedAspects::unparsed()
        }
    }
}

/// Normalize a text payload (JSON, wrapped JSON, or a JSON array).
pub fn normalize_text(raw: &str) -> NormalizedAspects {
    match extract_from_text(raw, 0) {
        Some(map) => from_mapping(&map),
        None => {
            debug!("aspect text payload could not be parsed ({} bytes)", raw.len());
            NormalizedAspects::unparsed()
        }
    }
}

fn from_mapping(map: &Map<String, Value>) -> NormalizedAspects {
    let mut groups: BTreeMap<AspectType, Vec<PairRecord>> = BTreeMap::new();
    for (key, value) in map {
        let Ok(aspect) = key.parse::<AspectType>() else {
            debug!("ignoring unknown aspect key {key:?}");
            continue;
        };
        let items: Vec<&Value> = match value {
            Value::Array(items) => items.iter().collect(),
            Value::Object(_) => vec![value],
            _ => Vec::new(),
        };
        let group = groups.entry(aspect).or_default();
        for item in items {
            match PairRecord::from_value(item) {
                Some(record) => group.push(record),
                None => debug!("dropping {aspect} record without two named bodies"),
            }
        }
    }
    NormalizedAspects {
        parsed_ok: true,
        groups,
    }
}

impl PairRecord {
    /// `None` unless both sides carry a body name.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            planet1: PairSide::from_value(obj.get("planet1")?)?,
            planet2: PairSide::from_value(obj.get("planet2")?)?,
        })
    }
}

impl PairSide {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => non_empty(name).map(|name| Self {
                name,
                label: None,
                sign: None,
                house: None,
            }),
            Value::Object(obj) => Some(Self {
                name: obj.get("name").and_then(Value::as_str).and_then(non_empty)?,
                label: obj.get("label").and_then(Value::as_str).and_then(non_empty),
                sign: obj.get("sign").and_then(Value::as_str).and_then(non_empty),
                house: obj.get("house").and_then(parse_house),
            }),
            _ => None,
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// House number 1-12 from a JSON number or numeric string.
fn parse_house(value: &Value) -> Option<u8> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !number.is_finite() || number.fract() != 0.0 || !(1.0..=12.0).contains(&number) {
        return None;
    }
    Some(number as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_house() {
        assert_eq!(parse_house(&json!(7)), Some(7));
        assert_eq!(parse_house(&json!("10")), Some(10));
        assert_eq!(parse_house(&json!(0)), None);
        assert_eq!(parse_house(&json!(13)), None);
        assert_eq!(parse_house(&json!(2.5)), None);
        assert_eq!(parse_house(&json!("x")), None);
        assert_eq!(parse_house(&json!(null)), None);
    }

    #[test]
    fn test_delimited() {
        assert_eq!(delimited("a {b} c {d} e", '{', '}'), Some("{b} c {d}"));
        assert_eq!(delimited("} backwards {", '{', '}'), None);
        assert_eq!(delimited("none", '{', '}'), None);
    }

    #[test]
    fn test_side_from_plain_string() {
        let side = PairSide::from_value(&json!("  Venus ")).unwrap();
        assert_eq!(side.name, "Venus");
        assert!(PairSide::from_value(&json!("   ")).is_none());
        assert!(PairSide::from_value(&json!({"sign": "Leo"})).is_none());
    }

    #[test]
    fn test_nested_string_depth_is_bounded() {
        let plain = serde_json::to_string(&json!({"trine": []})).unwrap();
        let once = serde_json::to_string(&plain).unwrap();
        let twice = serde_json::to_string(&once).unwrap();
        // one level of string encoding is unwrapped, two are not
        assert!(normalize_text(&plain).parsed_ok);
        assert!(normalize_text(&once).parsed_ok);
        assert!(!normalize_text(&twice).parsed_ok);
    }
}
