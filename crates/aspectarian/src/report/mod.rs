pub mod builder;
pub mod collation;
pub mod normalize;
pub mod rank;
pub mod scoring;
pub mod title;

pub use builder::{AspectDiagnostic, AspectReport, ReportBuilder, ReportSlot};
pub use collation::{folded_case_insensitive, Collator};
pub use normalize::{normalize, normalize_text, NormalizedAspects, PairRecord, PairSide};
pub use rank::{rank, rank_with_titles, RankOptions, RankedAspect, DEFAULT_LIMIT};
pub use scoring::{score, SCORE_CAP, SCORING_VERSION};
pub use title::title;
