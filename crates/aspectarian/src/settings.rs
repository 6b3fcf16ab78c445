use crate::aspects::{AspectCatalog, OrbRule, OrbTable, OrbTableKind};
use crate::bodies::BodyId;
use crate::error::SettingsError;
use crate::report::rank::{RankOptions, DEFAULT_LIMIT};
use crate::report::scoring::SCORING_VERSION;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Report configuration, loaded once and shared by reference.
///
/// ```toml
/// limit = 10
/// scoring_version = "score-v1"
/// orb_table = "natal"
/// one_aspect_per_pair = true
///
/// [orbs.chiron]
/// major = 4.0
/// hard = 3.0
/// minor = 2.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub limit: usize,
    pub scoring_version: String,
    pub orb_table: OrbTableKind,
    pub one_aspect_per_pair: bool,
    /// Per-body overrides on top of `orb_table`, keyed by body name
    pub orbs: BTreeMap<String, OrbRule>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            scoring_version: SCORING_VERSION.to_string(),
            orb_table: OrbTableKind::Natal,
            one_aspect_per_pair: true,
            orbs: BTreeMap::new(),
        }
    }
}

impl ReportSettings {
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: ReportSettings =
            toml::from_str(text).map_err(|e| SettingsError::InvalidToml(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.limit == 0 {
            return Err(SettingsError::InvalidLimit(self.limit));
        }
        for (name, rule) in &self.orbs {
            name.parse::<BodyId>()
                .map_err(|_| SettingsError::UnknownBody(name.clone()))?;
            if !rule.is_valid() {
                return Err(SettingsError::InvalidOrb {
                    body: name.clone(),
                    message: "orbs must be finite and non-negative".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Base table with overrides applied
    pub fn orb_table(&self) -> Result<OrbTable, SettingsError> {
        let mut table = OrbTable::from_kind(self.orb_table);
        for (name, rule) in &self.orbs {
            let body: BodyId = name
                .parse()
                .map_err(|_| SettingsError::UnknownBody(name.clone()))?;
            table = table.with_rule(body, *rule);
        }
        Ok(table)
    }

    pub fn catalog(&self) -> Result<AspectCatalog, SettingsError> {
        Ok(AspectCatalog::new(self.orb_table()?))
    }

    pub fn rank_options(&self) -> RankOptions {
        RankOptions {
            limit: self.limit,
            one_aspect_per_pair: self.one_aspect_per_pair,
            ..RankOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let settings = ReportSettings::from_toml_str("").unwrap();
        assert_eq!(settings, ReportSettings::default());
        assert_eq!(settings.limit, 10);
    }

    #[test]
    fn test_overrides_apply_on_top_of_base_table() {
        let settings = ReportSettings::from_toml_str(
            r#"
            limit = 5
            orb_table = "chart_wheel"

            [orbs.trueNode]
            major = 6.0
            hard = 5.0
            minor = 3.0
            "#,
        )
        .unwrap();
        assert_eq!(settings.limit, 5);
        let table = settings.orb_table().unwrap();
        assert_eq!(table.get(BodyId::NorthNode), Some(&OrbRule::new(6.0, 5.0, 3.0)));
        assert_eq!(table.get(BodyId::Chiron), OrbTable::chart_wheel().get(BodyId::Chiron));
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        assert!(matches!(
            ReportSettings::from_toml_str("limit = 0"),
            Err(SettingsError::InvalidLimit(0))
        ));
        assert!(matches!(
            ReportSettings::from_toml_str("[orbs.vertex]\nmajor = 1.0\nhard = 1.0\nminor = 1.0"),
            Err(SettingsError::UnknownBody(_))
        ));
        assert!(matches!(
            ReportSettings::from_toml_str("[orbs.sun]\nmajor = -1.0\nhard = 1.0\nminor = 1.0"),
            Err(SettingsError::InvalidOrb { .. })
        ));
        assert!(matches!(
            ReportSettings::from_toml_str("limit = \"ten\""),
            Err(SettingsError::InvalidToml(_))
        ));
    }
}
