use crate::config::AppConfig;
use crate::data::indicators::{load_indicators, IndicatorRow};
use crate::data::scores::{load_scores, ScoreTable};
use crate::error::{DataError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, warn};

/// Memoizes loaded tables per file so repeated loads in a session do not re-read storage.
/// Failed loads are not cached.
#[derive(Debug, Default)]
pub struct DatasetCache {
    indicators: HashMap<PathBuf, Rc<[IndicatorRow]>>,
    scores: HashMap<(PathBuf, Vec<String>), Rc<ScoreTable>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indicators(&mut self, path: &Path) -> Result<Rc<[IndicatorRow]>> {
        let key = cache_key(path);
        if let Some(rows) = self.indicators.get(&key) {
            debug!(path = %path.display(), "indicator sheet served from cache");
            return Ok(Rc::clone(rows));
        }

        let rows: Rc<[IndicatorRow]> = load_indicators(path)?.into();
        self.indicators.insert(key, Rc::clone(&rows));
        Ok(rows)
    }

    pub fn scores(&mut self, path: &Path, ports: &[String]) -> Result<Rc<ScoreTable>> {
        let key = (cache_key(path), ports.to_vec());
        if let Some(table) = self.scores.get(&key) {
            debug!(path = %path.display(), "score table served from cache");
            return Ok(Rc::clone(table));
        }

        let table = Rc::new(load_scores(path, ports)?);
        self.scores.insert(key, Rc::clone(&table));
        Ok(table)
    }

    pub fn clear(&mut self) {
        self.indicators.clear();
        self.scores.clear();
    }

    pub fn len(&self) -> usize {
        self.indicators.len() + self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn cache_key(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// The data context of one dashboard session: both tables loaded at start and
/// read-only afterwards. A failed load is kept as its error so only the views
/// that need that table report it.
#[derive(Debug)]
pub struct Session {
    config: AppConfig,
    cache: DatasetCache,
    indicators: Result<Rc<[IndicatorRow]>>,
    scores: Result<Rc<ScoreTable>>,
}

impl Session {
    pub fn open(config: AppConfig) -> Self {
        let mut cache = DatasetCache::new();
        let indicators = cache.indicators(&config.indicators_path);
        let scores = cache.scores(&config.scores_path, &config.ports);
        log_failure("indicators", &indicators);
        log_failure("scores", &scores);

        Self {
            config,
            cache,
            indicators,
            scores,
        }
    }

    /// Drops cached tables and reads both files again
    pub fn reload(&mut self) {
        self.cache.clear();
        self.indicators = self.cache.indicators(&self.config.indicators_path);
        self.scores = self
            .cache
            .scores(&self.config.scores_path, &self.config.ports);
        log_failure("indicators", &self.indicators);
        log_failure("scores", &self.scores);
    }

    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn indicators(&self) -> std::result::Result<&[IndicatorRow], &DataError> {
        self.indicators.as_deref()
    }

    pub fn scores(&self) -> std::result::Result<&ScoreTable, &DataError> {
        self.scores.as_deref()
    }
}

fn log_failure<T>(table: &str, result: &Result<T>) {
    if let Err(err) = result {
        warn!(table, kind = ?err.kind(), error = %err, "failed to load table");
    }
}
