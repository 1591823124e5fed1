//! In-process task source for the demo binary and tests

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::domain::Task;

use super::{BackendError, TasksBackend};

/// A [`TasksBackend`] serving a fixed task set from memory
///
/// Latency and failure are configurable so callers can exercise the
/// in-flight and error paths of the sync machine.
pub struct InMemoryBackend {
    tasks: Vec<Task>,
    latency: Duration,
    failure: Option<BackendError>,
}

impl InMemoryBackend {
    pub fn new(tasks: Vec<Task>) -> Self {
        InMemoryBackend {
            tasks,
            latency: Duration::ZERO,
            failure: None,
        }
    }

    /// Delay every load by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every load fail with `error` (after any configured latency)
    pub fn failing(mut self, error: BackendError) -> Self {
        self.failure = Some(error);
        self
    }
}

#[async_trait]
impl TasksBackend for InMemoryBackend {
    async fn load_tasks(&self) -> Result<HashMap<String, Task>, BackendError> {
        debug!(task_count = self.tasks.len(), latency = ?self.latency, "load_tasks: called");
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if let Some(error) = &self.failure {
            debug!(%error, "load_tasks: configured failure");
            return Err(error.clone());
        }
        // The source owns the version stamp, like a real backend would.
        let stamped = Utc::now();
        Ok(self
            .tasks
            .iter()
            .cloned()
            .map(|mut task| {
                task.last_update = Some(stamped);
                (task.id.clone(), task)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_returns_tasks_keyed_by_id() {
        let backend = InMemoryBackend::new(vec![
            Task::with_id("t-1", "One"),
            Task::with_id("t-2", "Two"),
        ]);

        let loaded = backend.load_tasks().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded["t-1"].title, "One");
        assert_eq!(loaded["t-2"].title, "Two");
        assert!(loaded["t-1"].last_update.is_some());
    }

    #[tokio::test]
    async fn test_failing_backend_returns_configured_error() {
        let backend = InMemoryBackend::new(vec![Task::new("One")])
            .failing(BackendError::Unreachable("simulated outage".to_string()));

        let err = backend.load_tasks().await.unwrap_err();
        assert_eq!(
            err,
            BackendError::Unreachable("simulated outage".to_string())
        );
    }
}
