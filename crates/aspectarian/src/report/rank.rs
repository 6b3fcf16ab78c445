use crate::aspects::{AspectInstance, AspectType};
use crate::report::collation::{folded_case_insensitive, Collator};
use crate::report::title::title;
use crate::text::slug::body_slug;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

/// Report width when none is configured
pub const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct RankOptions {
    pub limit: usize,
    /// Collapse different aspect types declared for the same pair,
    /// keeping the highest score
    pub one_aspect_per_pair: bool,
    pub collator: Collator,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            one_aspect_per_pair: true,
            collator: folded_case_insensitive,
        }
    }
}

/// A retained instance together with its rendered title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAspect {
    pub title: String,
    #[serde(flatten)]
    pub instance: AspectInstance,
}

/// Order-independent pair identity: both body slugs, sorted.
pub fn pair_names(instance: &AspectInstance) -> (String, String) {
    let a = body_slug(&instance.p1.name);
    let b = body_slug(&instance.p2.name);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

pub fn dedup_key(instance: &AspectInstance) -> (AspectType, String, String) {
    let (a, b) = pair_names(instance);
    (instance.aspect, a, b)
}

/// Deduplicate, sort, and truncate to `options.limit`.
pub fn rank(instances: Vec<AspectInstance>, options: &RankOptions) -> Vec<AspectInstance> {
    rank_with_titles(instances, options)
        .into_iter()
        .map(|ranked| ranked.instance)
        .collect()
}

/// Same as [`rank`], keeping the title each instance was sorted by.
pub fn rank_with_titles(instances: Vec<AspectInstance>, options: &RankOptions) -> Vec<RankedAspect> {
    let mut kept = keep_best(instances, dedup_key, |candidate, current| {
        candidate.score > current.score
    });
    if options.one_aspect_per_pair {
        kept = keep_best(kept, pair_names, |candidate, current| {
            match candidate.score.total_cmp(&current.score) {
                Ordering::Greater => true,
                Ordering::Equal => candidate.aspect.precedence() < current.aspect.precedence(),
                Ordering::Less => false,
            }
        });
    }

    let mut ranked: Vec<RankedAspect> = kept
        .into_iter()
        .map(|instance| RankedAspect {
            title: title(&instance),
            instance,
        })
        .collect();
    ranked.sort_by(|a, b| compare(a, b, options.collator));
    ranked.truncate(options.limit);
    ranked
}

/// Score descending, then type precedence, then title.
fn compare(a: &RankedAspect, b: &RankedAspect, collator: Collator) -> Ordering {
    b.instance
        .score
        .total_cmp(&a.instance.score)
        .then_with(|| {
            a.instance
                .aspect
                .precedence()
                .cmp(&b.instance.aspect.precedence())
        })
        .then_with(|| collator(&a.title, &b.title))
}

/// One instance per key; a later instance replaces the kept one only when `better`.
fn keep_best<K, F, B>(instances: Vec<AspectInstance>, key: F, better: B) -> Vec<AspectInstance>
where
    K: Eq + Hash,
    F: Fn(&AspectInstance) -> K,
    B: Fn(&AspectInstance, &AspectInstance) -> bool,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut kept: Vec<AspectInstance> = Vec::with_capacity(instances.len());
    for instance in instances {
        match index.entry(key(&instance)) {
            Entry::Occupied(slot) => {
                let i = *slot.get();
                if better(&instance, &kept[i]) {
                    kept[i] = instance;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(kept.len());
                kept.push(instance);
            }
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::PointRef;

    fn inst(aspect: AspectType, a: &str, b: &str, score: f64) -> AspectInstance {
        AspectInstance {
            aspect,
            p1: PointRef::named(a),
            p2: PointRef::named(b),
            score,
        }
    }

    #[test]
    fn test_pair_names_are_alias_aware() {
        let x = inst(AspectType::Trine, "trueNode", "Sun", 1.0);
        let y = inst(AspectType::Trine, "sun", "north_node", 1.0);
        assert_eq!(dedup_key(&x), dedup_key(&y));
    }

    #[test]
    fn test_same_type_duplicates_keep_max() {
        let options = RankOptions {
            one_aspect_per_pair: false,
            ..RankOptions::default()
        };
        let ranked = rank(
            vec![
                inst(AspectType::Trine, "sun", "jupiter", 4.0),
                inst(AspectType::Trine, "jupiter", "sun", 7.5),
                inst(AspectType::Square, "sun", "jupiter", 5.0),
            ],
            &options,
        );
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].aspect, AspectType::Trine);
        assert_eq!(ranked[0].score, 7.5);
    }

    #[test]
    fn test_equal_scores_collapse_to_precedence() {
        let ranked = rank(
            vec![
                inst(AspectType::Sextile, "moon", "mars", 4.0),
                inst(AspectType::Opposition, "mars", "moon", 4.0),
            ],
            &RankOptions::default(),
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].aspect, AspectType::Opposition);
    }
}
