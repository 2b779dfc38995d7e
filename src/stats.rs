use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use crate::engine::tile::Score;
use crate::error::Result;

pub(crate) const BEST_SCORE_KEY: &str = "bestScore";
pub(crate) const GAMES_PLAYED_KEY: &str = "gamesPlayed";

/// A string key-value store that game statistics are persisted to.
pub(crate) trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Keeps everything in memory; nothing survives the process.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    entries: HashMap<String, String>,
}

impl<const N: usize> From<[(&str, &str); N]> for MemoryStore {
    fn from(entries: [(&str, &str); N]) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores entries as a flat JSON object in a single file. The file is read on every `get` and
/// rewritten on every `set`; a missing file reads as empty.
#[derive(Debug)]
pub(crate) struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Scalars other than strings (`{"bestScore": 512}`) are read back as their JSON text.
    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&contents)?;
        Ok(object
            .into_iter()
            .map(|(key, value)| match value {
                serde_json::Value::String(s) => (key, s),
                other => (key, other.to_string()),
            })
            .collect())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    /// An unreadable file is replaced rather than left to block every later write.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_entries().unwrap_or_else(|e| {
            log::warn!("discarding unreadable {0}: {e}", self.path.display());
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());
        std::fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

/// Stats reads and writes the best score and the games played counter. Persistence failures
/// are logged and otherwise ignored so that they never get in the way of playing.
pub(crate) struct Stats {
    store: Box<dyn KeyValueStore>,
}

impl Stats {
    pub(crate) fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    pub(crate) fn best_score(&self) -> Score {
        self.read(BEST_SCORE_KEY).unwrap_or(0)
    }

    /// Persist a new best score. Zero is never written.
    pub(crate) fn record_best_score(&mut self, score: Score) {
        if score > 0 {
            self.write(BEST_SCORE_KEY, score);
        }
    }

    pub(crate) fn games_played(&self) -> u64 {
        self.read(GAMES_PLAYED_KEY).unwrap_or(0)
    }

    pub(crate) fn increment_games_played(&mut self) -> u64 {
        let count = self.games_played().saturating_add(1);
        self.write(GAMES_PLAYED_KEY, count);
        count
    }

    pub(crate) fn reset(&mut self) {
        log::info!("resetting statistics");
        self.write(BEST_SCORE_KEY, 0);
        self.write(GAMES_PLAYED_KEY, 0);
    }

    fn read<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        match self.store.get(key) {
            Ok(Some(value)) => match value.trim().parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    log::error!("failed to parse stored {key}: {value:?}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::error!("failed to load {key}: {e}");
                None
            }
        }
    }

    fn write<T: std::fmt::Display>(&mut self, key: &str, value: T) {
        if let Err(e) = self.store.set(key, &value.to_string()) {
            log::error!("failed to save {key}: {e}");
        }
    }
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::*;
    use crate::error::Error;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no access").into())
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no access").into())
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("slide48-{0}-{name}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn absent_keys_default_to_zero() {
        let stats = Stats::new(MemoryStore::default());
        assert_eq!(stats.best_score(), 0);
        assert_eq!(stats.games_played(), 0);
    }

    #[rstest]
    #[case::garbage("lots")]
    #[case::negative("-5")]
    #[case::empty("")]
    fn unparseable_values_default_to_zero(#[case] stored: &str) {
        let stats = Stats::new(MemoryStore::from([
            (BEST_SCORE_KEY, stored),
            (GAMES_PLAYED_KEY, stored),
        ]));
        assert_eq!(stats.best_score(), 0);
        assert_eq!(stats.games_played(), 0);
    }

    #[test]
    fn failures_are_swallowed() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut stats = Stats::new(BrokenStore);
        assert_eq!(stats.best_score(), 0);
        stats.record_best_score(128);
        assert_eq!(stats.increment_games_played(), 1);
        stats.reset();
        assert_eq!(stats.games_played(), 0);
    }

    #[test]
    fn counts_and_records() {
        let mut stats = Stats::new(MemoryStore::default());
        stats.record_best_score(0);
        assert_eq!(stats.best_score(), 0);
        stats.record_best_score(256);
        assert_eq!(stats.best_score(), 256);
        assert_eq!(stats.increment_games_played(), 1);
        assert_eq!(stats.increment_games_played(), 2);

        stats.reset();
        assert_eq!(stats.best_score(), 0);
        assert_eq!(stats.games_played(), 0);
    }

    #[test]
    fn json_file_store_persists() {
        let path = temp_path("persists");
        {
            let mut stats = Stats::new(JsonFileStore::new(&path));
            stats.record_best_score(1024);
            stats.increment_games_played();
        }
        let stats = Stats::new(JsonFileStore::new(&path));
        assert_eq!(stats.best_score(), 1024);
        assert_eq!(stats.games_played(), 1);

        let contents = std::fs::read_to_string(&path).expect("stats file should exist");
        let entries: BTreeMap<String, String> =
            serde_json::from_str(&contents).expect("stats file should be a JSON object");
        assert_eq!(entries.get(BEST_SCORE_KEY).map(String::as_str), Some("1024"));
        assert_eq!(entries.get(GAMES_PLAYED_KEY).map(String::as_str), Some("1"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn json_file_store_missing_file_is_empty() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert!(matches!(store.get(BEST_SCORE_KEY), Ok(None)));
    }

    #[test]
    fn json_file_store_corrupt_file() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{not json").expect("writing test file");
        let mut store = JsonFileStore::new(&path);
        assert!(matches!(store.get(BEST_SCORE_KEY), Err(Error::JsonError(_))));
        assert_eq!(Stats::new(JsonFileStore::new(&path)).best_score(), 0);

        store.set(BEST_SCORE_KEY, "2").expect("corrupt file is replaced");
        assert_eq!(store.get(BEST_SCORE_KEY).expect("file is valid again"), Some("2".to_string()));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn json_file_store_reads_numbers() {
        let path = temp_path("numbers");
        std::fs::write(&path, r#"{"bestScore": 512, "gamesPlayed": 3}"#).expect("writing test file");
        let mut stats = Stats::new(JsonFileStore::new(&path));
        assert_eq!(stats.best_score(), 512);
        assert_eq!(stats.increment_games_played(), 4);
        assert_eq!(stats.best_score(), 512);
        let _ = std::fs::remove_file(&path);
    }

    #[rstest]
    #[case::not_json("{not json")]
    #[case::not_an_object("[1, 2, 3]")]
    fn reset_recovers_unreadable_file(#[case] contents: &str) {
        let path = temp_path("recovers");
        std::fs::write(&path, contents).expect("writing test file");
        let mut stats = Stats::new(JsonFileStore::new(&path));
        stats.reset();
        assert_eq!(stats.increment_games_played(), 1);
        stats.record_best_score(64);

        let reopened = Stats::new(JsonFileStore::new(&path));
        assert_eq!(reopened.best_score(), 64);
        assert_eq!(reopened.games_played(), 1);
        let _ = std::fs::remove_file(&path);
    }
}
