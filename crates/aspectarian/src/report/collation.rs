use crate::text::slug::fold_diacritics;
use std::cmp::Ordering;

/// Title comparator used for the last ranking tie-break.
pub type Collator = fn(&str, &str) -> Ordering;

/// Case- and diacritic-insensitive ordering; byte order breaks exact ties.
pub fn folded_case_insensitive(a: &str, b: &str) -> Ordering {
    let key_a = fold_diacritics(a).to_lowercase();
    let key_b = fold_diacritics(b).to_lowercase();
    key_a.cmp(&key_b).then_with(|| a.cmp(b))
}

/// Plain byte ordering
pub fn ordinal(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folded_ignores_case_and_accents() {
        assert_eq!(folded_case_insensitive("apple", "Banana"), Ordering::Less);
        assert_eq!(folded_case_insensitive("Éclipse", "eclipse z"), Ordering::Less);
        assert_eq!(ordinal("apple", "Banana"), Ordering::Greater);
    }

    #[test]
    fn test_folded_is_total() {
        assert_ne!(folded_case_insensitive("Moon", "moon"), Ordering::Equal);
        assert_eq!(folded_case_insensitive("Moon", "Moon"), Ordering::Equal);
    }
}
