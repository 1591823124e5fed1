//! Taskflow configuration types and loading

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::backend::{BackendError, InMemoryBackend};
use crate::domain::Task;
use crate::model::FilterType;

/// Main taskflow configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial collection state
    pub seed: SeedConfig,

    /// Demo backend behavior
    pub backend: BackendConfig,
}

/// Initial state of the tasks store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Titles of the tasks the collection starts with
    pub titles: Vec<String>,
    /// Initial display filter
    pub filter: FilterType,
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig {
            titles: vec!["One".to_string(), "Two".to_string(), "Three".to_string()],
            filter: FilterType::Any,
        }
    }
}

/// Behavior of the in-memory demo backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Titles of the tasks a reload returns
    pub titles: Vec<String>,
    /// Simulated load latency in milliseconds
    pub latency_ms: u64,
    /// Make every load fail, to exercise the error path
    pub fail: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            titles: vec!["TaskA".to_string()],
            latency_ms: 150,
            fail: false,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// Explicit path, else project-local `.taskflow.yml`, else defaults.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path)
                .context(format!("Failed to load config from {}", path.display()));
        }

        let local_config = PathBuf::from(".taskflow.yml");
        if local_config.exists() {
            return Self::load_from_file(&local_config)
                .context("Failed to load config from .taskflow.yml");
        }

        Ok(Config::default())
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .context(format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&contents).context("Failed to parse YAML config")
    }

    /// Tasks the collection store starts with
    pub fn seed_tasks(&self) -> Vec<Task> {
        self.seed
            .titles
            .iter()
            .map(|title| Task::new(title.as_str()))
            .collect()
    }

    /// Build the demo backend this config describes
    pub fn build_backend(&self) -> InMemoryBackend {
        let tasks = self
            .backend
            .titles
            .iter()
            .map(|title| Task::new(title.as_str()))
            .collect();
        let mut backend =
            InMemoryBackend::new(tasks).with_latency(Duration::from_millis(self.backend.latency_ms));
        if self.backend.fail {
            backend = backend.failing(BackendError::Unreachable(
                "simulated outage (backend.fail = true)".to_string(),
            ));
        }
        backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_sample_seed() {
        let config = Config::default();
        assert_eq!(config.seed.titles, vec!["One", "Two", "Three"]);
        assert_eq!(config.seed.filter, FilterType::Any);
        assert!(!config.backend.fail);
    }

    #[test]
    fn test_partial_yaml_overrides_only_named_fields() {
        let config: Config = serde_yaml::from_str(
            r#"
seed:
  titles: ["Solo"]
  filter: active
backend:
  fail: true
"#,
        )
        .unwrap();

        assert_eq!(config.seed.titles, vec!["Solo"]);
        assert_eq!(config.seed.filter, FilterType::Active);
        assert!(config.backend.fail);
        // Unnamed fields keep their defaults.
        assert_eq!(config.backend.latency_ms, 150);
    }

    #[test]
    fn test_seed_tasks_get_fresh_ids() {
        let config = Config::default();
        let tasks = config.seed_tasks();
        assert_eq!(tasks.len(), 3);
        assert_ne!(tasks[0].id, tasks[1].id);
        assert_eq!(tasks[0].title, "One");
    }
}
