use crate::aspects::{AspectCatalog, AspectDetector, AspectInstance, AspectType, PointRef};
use crate::bodies::{is_angle_pair, CelestialPoint};
use crate::error::ReportError;
use crate::report::normalize::{normalize, normalize_text, NormalizedAspects, PairSide};
use crate::report::rank::{pair_names, rank_with_titles};
use crate::report::scoring::score;
use crate::settings::ReportSettings;
use crate::text::{TextDictionary, TextResolver};
use log::debug;
use serde::Serialize;
use serde_json::Value;

/// One fixed-width report slot; both fields empty for padding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSlot {
    pub title: String,
    pub text: String,
}

impl ReportSlot {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.text.is_empty()
    }
}

/// Per-instance diagnostics, parallel to the filled slots
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectDiagnostic {
    pub title: String,
    pub score: f64,
    #[serde(rename = "type")]
    pub aspect: AspectType,
    pub p1: String,
    pub p2: String,
    pub house1: Option<u8>,
    pub house2: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectReport {
    /// Exactly `limit` slots
    pub slots: Vec<ReportSlot>,
    pub diagnostics: Vec<AspectDiagnostic>,
    /// False when the raw payload could not be read
    pub parsed_ok: bool,
    pub text_version: String,
    pub scoring_version: String,
}

impl AspectReport {
    pub fn filled(&self) -> impl Iterator<Item = &ReportSlot> {
        self.slots.iter().filter(|slot| !slot.is_empty())
    }
}

/// Builds ranked aspect reports from either pre-tagged aspects or raw positions.
pub struct ReportBuilder<'a, D: TextDictionary + ?Sized> {
    catalog: &'a AspectCatalog,
    dictionary: &'a D,
    settings: &'a ReportSettings,
}

impl<'a, D: TextDictionary + ?Sized> ReportBuilder<'a, D> {
    pub fn new(catalog: &'a AspectCatalog, dictionary: &'a D, settings: &'a ReportSettings) -> Self {
        Self {
            catalog,
            dictionary,
            settings,
        }
    }

    /// Report from a raw pre-tagged payload (object, JSON text, or array)
    pub fn report_raw(&self, raw: &Value) -> Result<AspectReport, ReportError> {
        self.report_normalized(normalize(raw))
    }

    /// Report from a raw text payload
    pub fn report_text(&self, raw: &str) -> Result<AspectReport, ReportError> {
        self.report_normalized(normalize_text(raw))
    }

    pub fn report_normalized(&self, normalized: NormalizedAspects) -> Result<AspectReport, ReportError> {
        self.ensure_catalog()?;
        let parsed_ok = normalized.parsed_ok;
        let instances = instances_from_records(normalized);
        self.assemble(instances, parsed_ok)
    }

    /// Report from computed positions, running detection over every pair
    pub fn report_points(&self, points: &[CelestialPoint]) -> Result<AspectReport, ReportError> {
        self.ensure_catalog()?;
        let instances: Vec<AspectInstance> = AspectDetector::new(self.catalog)
            .detect_pairs(points)
            .into_iter()
            .map(|(p1, p2, found)| instance_from_points(found.aspect, p1, p2))
            .collect();
        debug!("detected {} aspects across {} points", instances.len(), points.len());
        self.assemble(instances, true)
    }

    /// Report from a raw JSON array of positions. Unusable records are
    /// dropped one by one; a payload that is not an array is unparsed.
    pub fn report_positions(&self, raw: &Value) -> Result<AspectReport, ReportError> {
        match CelestialPoint::list_from_value(raw) {
            Some(points) => self.report_points(&points),
            None => {
                self.ensure_catalog()?;
                debug!("position payload is not an array");
                self.assemble(Vec::new(), false)
            }
        }
    }

    fn ensure_catalog(&self) -> Result<(), ReportError> {
        if self.catalog.is_empty() {
            return Err(ReportError::CatalogUnavailable(
                "catalog has no aspect entries or no orb rules".to_string(),
            ));
        }
        Ok(())
    }

    fn assemble(
        &self,
        instances: Vec<AspectInstance>,
        parsed_ok: bool,
    ) -> Result<AspectReport, ReportError> {
        let options = self.settings.rank_options();
        let resolver = TextResolver::new(self.dictionary);
        let ranked = rank_with_titles(instances, &options);

        let mut slots = Vec::with_capacity(options.limit);
        let mut diagnostics = Vec::with_capacity(ranked.len());
        for entry in ranked {
            let instance = &entry.instance;
            let text = resolver.resolve_text(&instance.p1.name, &instance.p2.name, instance.aspect)?;
            diagnostics.push(AspectDiagnostic {
                title: entry.title.clone(),
                score: instance.score,
                aspect: instance.aspect,
                p1: instance.p1.name.clone(),
                p2: instance.p2.name.clone(),
                house1: instance.p1.house,
                house2: instance.p2.house,
            });
            slots.push(ReportSlot {
                title: entry.title,
                text,
            });
        }
        slots.resize_with(options.limit, ReportSlot::default);

        Ok(AspectReport {
            slots,
            diagnostics,
            parsed_ok,
            text_version: resolver.version().to_string(),
            scoring_version: self.settings.scoring_version.clone(),
        })
    }
}

fn point_ref(side: PairSide) -> PointRef {
    let mut point = PointRef::named(side.name);
    point.label = side.label;
    point.sign = side.sign;
    point.with_house(side.house)
}

/// Score every record; angle pairs and self-pairs are structurally excluded.
fn instances_from_records(normalized: NormalizedAspects) -> Vec<AspectInstance> {
    let mut instances = Vec::with_capacity(normalized.record_count());
    for (aspect, records) in normalized.groups {
        for record in records {
            let p1 = point_ref(record.planet1);
            let p2 = point_ref(record.planet2);
            if let (Some(a), Some(b)) = (p1.body, p2.body) {
                if is_angle_pair(a, b) {
                    continue;
                }
            }
            let mut instance = AspectInstance {
                aspect,
                p1,
                p2,
                score: 0.0,
            };
            let (a, b) = pair_names(&instance);
            if a == b {
                debug!("dropping {aspect} record pairing {a} with itself");
                continue;
            }
            instance.score = score(
                aspect,
                instance.p1.body,
                instance.p1.house,
                instance.p2.body,
                instance.p2.house,
            );
            instances.push(instance);
        }
    }
    instances
}

fn instance_from_points(aspect: AspectType, p1: &CelestialPoint, p2: &CelestialPoint) -> AspectInstance {
    let side = |point: &CelestialPoint| {
        let mut r = PointRef::named(point.name.slug()).with_house(point.effective_house());
        r.sign = point.effective_sign().map(|s| s.label().to_string());
        r
    };
    let (r1, r2) = (side(p1), side(p2));
    AspectInstance {
        aspect,
        score: score(aspect, r1.body, r1.house, r2.body, r2.house),
        p1: r1,
        p2: r2,
    }
}
