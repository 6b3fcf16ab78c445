use thiserror::Error;

/// Failures that abort a single report.
///
/// Everything locally recoverable (malformed payloads, missing fields,
/// missing interpretive text) degrades inside the report instead.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Aspect catalog unavailable: {0}")]
    CatalogUnavailable(String),
    #[error("Interpretive text corpus unavailable: {0}")]
    CorpusUnavailable(String),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Errors that can occur when loading report settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {message}")]
    Read { path: String, message: String },
    #[error("Invalid settings TOML: {0}")]
    InvalidToml(String),
    #[error("Report limit must be at least 1, got {0}")]
    InvalidLimit(usize),
    #[error("Invalid orb for {body}: {message}")]
    InvalidOrb { body: String, message: String },
    #[error("Unknown body in orb overrides: {0}")]
    UnknownBody(String),
}

/// Errors that can occur when loading an interpretive text corpus
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Invalid corpus JSON: {0}")]
    InvalidJson(String),
    #[error("Failed to read corpus file {path}: {message}")]
    Read { path: String, message: String },
}

/// Identifier that does not name a known body, sign, or aspect
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Unknown body: {0}")]
    UnknownBody(String),
    #[error("Unknown sign: {0}")]
    UnknownSign(String),
    #[error("Unknown aspect type: {0}")]
    UnknownAspect(String),
}
