use aspectarian::aspects::AspectType;
use aspectarian::error::ReportError;
use aspectarian::text::{TextCorpus, TextDictionary, TextResolver};
use log::{Level, Log, Metadata, Record};
use std::sync::{Mutex, Once};

struct CapturingLogger {
    warnings: Mutex<Vec<String>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if record.level() == Level::Warn {
            if let Ok(mut warnings) = self.warnings.lock() {
                warnings.push(record.args().to_string());
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    warnings: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

fn install_logger() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(log::LevelFilter::Warn);
    });
}

/// Warnings mentioning `needle`; tests share one logger, so each uses unique identifiers.
fn warnings_mentioning(needle: &str) -> Vec<String> {
    LOGGER
        .warnings
        .lock()
        .unwrap()
        .iter()
        .filter(|w| w.contains(needle))
        .cloned()
        .collect()
}

fn corpus() -> TextCorpus {
    TextCorpus::new("test-1")
        .with_entry("sun", "moon", AspectType::Conjunction, "Will and feeling move together.")
        .with_entry("jupiter", "north_node", AspectType::Trine, "Growth along the path.")
        .with_entry("asc", "mc", AspectType::Square, "Never returned.")
}

#[test]
fn test_missing_text_warns_once_with_given_names() {
    install_logger();
    let corpus = corpus();
    let resolver = TextResolver::new(&corpus);

    let text = resolver
        .resolve_text("MoonMissing", "Saturn", AspectType::Opposition)
        .unwrap();

    assert_eq!(text, "");
    let warnings = warnings_mentioning("MoonMissing");
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("Saturn"));
    assert!(warnings[0].contains("opposition"));
}

#[test]
fn test_moon_saturn_opposition_absent() {
    install_logger();
    let corpus = TextCorpus::new("test-1").with_entry("moon", "saturn", AspectType::Square, "...");
    let resolver = TextResolver::new(&corpus);

    let text = resolver
        .resolve_text("Moon", "Saturn", AspectType::Opposition)
        .unwrap();

    assert_eq!(text, "");
    assert_eq!(warnings_mentioning("for Moon opposition Saturn").len(), 1);
}

#[test]
fn test_resolves_in_either_order() {
    let corpus = corpus();
    let resolver = TextResolver::new(&corpus);

    let forward = resolver.resolve_text("sun", "moon", AspectType::Conjunction).unwrap();
    let backward = resolver.resolve_text("moon", "sun", AspectType::Conjunction).unwrap();

    assert_eq!(forward, "Will and feeling move together.");
    assert_eq!(forward, backward);
}

#[test]
fn test_aliases_and_diacritics_resolve() {
    let corpus = corpus();
    let resolver = TextResolver::new(&corpus);

    let text = resolver
        .resolve_text("Júpiter", "trueNode", AspectType::Trine)
        .unwrap();

    assert_eq!(text, "Growth along the path.");
    assert_eq!(resolver.version(), "test-1");
}

#[test]
fn test_unsorted_authored_key_is_found() {
    let corpus = TextCorpus::from_json_str(
        r#"{ "version": "v", "entries": { "venus|mars": { "square": "Friction in love." } } }"#,
    )
    .unwrap();
    let resolver = TextResolver::new(&corpus);

    assert_eq!(
        resolver.resolve_text("mars", "venus", AspectType::Square).unwrap(),
        "Friction in love."
    );
}

#[test]
fn test_angle_pair_is_always_empty() {
    install_logger();
    let corpus = corpus();
    let resolver = TextResolver::new(&corpus);

    for aspect in AspectType::PRECEDENCE {
        assert_eq!(resolver.resolve_text("Ascendant", "MC", aspect).unwrap(), "");
        assert_eq!(resolver.resolve_text("mc", "ac", aspect).unwrap(), "");
    }
    assert!(warnings_mentioning("Ascendant").is_empty());
}

struct OfflineDictionary;

impl TextDictionary for OfflineDictionary {
    fn version(&self) -> &str {
        "offline"
    }

    fn lookup(&self, _pair_key: &str, _aspect: AspectType) -> Result<Option<&str>, ReportError> {
        Err(ReportError::CorpusUnavailable("store offline".to_string()))
    }
}

#[test]
fn test_unavailable_dictionary_is_an_error() {
    let resolver = TextResolver::new(&OfflineDictionary);

    let result = resolver.resolve_text("sun", "moon", AspectType::Trine);

    assert!(matches!(result, Err(ReportError::CorpusUnavailable(_))));
}
