use crate::aspects::AspectType;
use crate::error::{CorpusError, ReportError};
use crate::text::slug::body_slug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Keyed lookup of interpretive text.
///
/// `pair_key` is two body slugs joined with `|`. An `Err` means the
/// dictionary itself is unusable; a missing entry is `Ok(None)`.
pub trait TextDictionary {
    /// Version tag of the text corpus, surfaced in every report
    fn version(&self) -> &str;

    fn lookup(&self, pair_key: &str, aspect: AspectType) -> Result<Option<&str>, ReportError>;
}

/// Join two body slugs into a dictionary key, in the order given.
pub fn pair_key(a: &str, b: &str) -> String {
    format!("{}|{}", a, b)
}

/// Canonical dictionary key: slugs sorted alphabetically.
pub fn sorted_pair_key(a: &str, b: &str) -> String {
    if a <= b {
        pair_key(a, b)
    } else {
        pair_key(b, a)
    }
}

/// In-memory text corpus loaded from JSON:
///
/// ```json
/// { "version": "2024.1", "entries": { "moon|sun": { "conjunction": "..." } } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextCorpus {
    pub version: String,
    #[serde(default)]
    entries: HashMap<String, HashMap<String, String>>,
}

impl TextCorpus {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            entries: HashMap::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CorpusError> {
        let raw: TextCorpus =
            serde_json::from_str(json).map_err(|e| CorpusError::InvalidJson(e.to_string()))?;
        Ok(raw.normalized())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| CorpusError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    /// Add an entry under the canonical (sorted) key
    pub fn with_entry(
        mut self,
        body_a: &str,
        body_b: &str,
        aspect: AspectType,
        text: impl Into<String>,
    ) -> Self {
        let key = sorted_pair_key(&body_slug(body_a), &body_slug(body_b));
        self.entries
            .entry(key)
            .or_default()
            .insert(aspect.name().to_string(), text.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Authored keys are slugged per side but keep their order; aspect
    // names are lower-cased.
    fn normalized(self) -> Self {
        let mut entries: HashMap<String, HashMap<String, String>> = HashMap::new();
        for (key, texts) in self.entries {
            let key = match key.split_once('|') {
                Some((a, b)) => pair_key(&body_slug(a), &body_slug(b)),
                None => key.trim().to_string(),
            };
            let slot = entries.entry(key).or_default();
            for (aspect, text) in texts {
                slot.insert(aspect.trim().to_lowercase(), text);
            }
        }
        Self {
            version: self.version,
            entries,
        }
    }
}

impl TextDictionary for TextCorpus {
    fn version(&self) -> &str {
        &self.version
    }

    fn lookup(&self, pair_key: &str, aspect: AspectType) -> Result<Option<&str>, ReportError> {
        Ok(self
            .entries
            .get(pair_key)
            .and_then(|texts| texts.get(aspect.name()))
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_normalizes_keys() {
        let corpus = TextCorpus::from_json_str(
            r#"{
                "version": "t1",
                "entries": {
                    "Moon|Sun": { "Conjunction": "Heart and mind agree." },
                    "saturn | trueNode": { "square": "Duty versus direction." }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(corpus.version(), "t1");
        assert_eq!(corpus.len(), 2);
        assert_eq!(
            corpus.lookup("moon|sun", AspectType::Conjunction).unwrap(),
            Some("Heart and mind agree.")
        );
        assert_eq!(
            corpus.lookup("saturn|north_node", AspectType::Square).unwrap(),
            Some("Duty versus direction.")
        );
    }

    #[test]
    fn test_blank_text_counts_as_missing() {
        let corpus = TextCorpus::new("t1").with_entry("sun", "moon", AspectType::Trine, "  ");
        assert_eq!(corpus.lookup("moon|sun", AspectType::Trine).unwrap(), None);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            TextCorpus::from_json_str("{ nope"),
            Err(CorpusError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_sorted_pair_key() {
        assert_eq!(sorted_pair_key("sun", "moon"), "moon|sun");
        assert_eq!(sorted_pair_key("moon", "sun"), "moon|sun");
    }
}
