use crate::aspects::AspectType;
use crate::error::ReportError;
use crate::text::corpus::{pair_key, sorted_pair_key, TextDictionary};
use crate::text::slug::body_slug;
use log::{debug, warn};

/// Resolves interpretive text for a body pair and aspect type.
pub struct TextResolver<'a, D: TextDictionary + ?Sized> {
    dictionary: &'a D,
}

impl<'a, D: TextDictionary + ?Sized> TextResolver<'a, D> {
    pub fn new(dictionary: &'a D) -> Self {
        Self { dictionary }
    }

    pub fn version(&self) -> &str {
        self.dictionary.version()
    }

    /// Text for `(body_a, body_b, aspect)`, or an empty string when the
    /// dictionary has no entry. Only an unusable dictionary is an error.
    ///
    /// Lookup tries the pair in received order, then swapped, then sorted.
    pub fn resolve_text(
        &self,
        body_a: &str,
        body_b: &str,
        aspect: AspectType,
    ) -> Result<String, ReportError> {
        let a = body_slug(body_a);
        let b = body_slug(body_b);
        if a.is_empty() || b.is_empty() {
            debug!("skipping text lookup for unnamed body ({body_a:?}, {body_b:?})");
            return Ok(String::new());
        }
        // No entry exists for the two angles
        if (a == "asc" && b == "mc") || (a == "mc" && b == "asc") {
            return Ok(String::new());
        }

        let attempts = [pair_key(&a, &b), pair_key(&b, &a), sorted_pair_key(&a, &b)];
        let mut tried: Vec<&str> = Vec::with_capacity(attempts.len());
        for key in &attempts {
            if tried.contains(&key.as_str()) {
                continue;
            }
            tried.push(key.as_str());
            if let Some(text) = self.dictionary.lookup(key, aspect)? {
                return Ok(text.to_string());
            }
        }

        warn!(
            "no interpretive text for {} {} {} (tried {})",
            body_a,
            aspect,
            body_b,
            tried.join(", ")
        );
        Ok(String::new())
    }
}
