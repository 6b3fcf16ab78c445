//! Natal aspect detection and ranked aspect reports.
//!
//! Two entry points share one [`AspectCatalog`]: geometric detection over
//! computed positions ([`AspectDetector`]) and ranking of pre-tagged aspect
//! payloads ([`report::normalize`]). Both end in a fixed-width
//! [`AspectReport`] built by [`ReportBuilder`].

pub mod aspects;
pub mod bodies;
pub mod error;
pub mod report;
pub mod settings;
pub mod text;

pub use aspects::{AspectCatalog, AspectDetector, AspectInstance, AspectType, OrbRule, OrbTable};
pub use bodies::{BodyId, CelestialPoint, Sign};
pub use error::{CorpusError, ReportError, SettingsError};
pub use report::{AspectReport, ReportBuilder, ReportSlot};
pub use settings::ReportSettings;
pub use text::{TextCorpus, TextDictionary, TextResolver};
