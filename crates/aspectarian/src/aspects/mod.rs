pub mod catalog;
pub mod detector;
pub mod orbs;
pub mod types;

pub use catalog::AspectCatalog;
pub use detector::{angular_separation, truncate_to_minute, AspectDetector};
pub use orbs::{OrbRule, OrbTable, OrbTableKind};
pub use types::{
    AspectInstance, AspectMatch, AspectType, DetectedPair, OrbCategory, PointRef,
};
