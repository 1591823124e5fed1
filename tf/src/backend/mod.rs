//! Asynchronous task source
//!
//! The only genuinely asynchronous collaborator in the system. It is
//! specified at its interface: load everything, keyed by id, or fail with a
//! cause. Cancellation is the runtime's job - the reload factory spawns the
//! load and keeps the task's abort handle.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Task;

mod memory;

pub use memory::InMemoryBackend;

/// Operational failures of the task source
///
/// These are data-layer errors: they become `SyncState::Error` values and
/// are recoverable via a user-initiated reload. They never terminate a
/// store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("Task source unreachable: {0}")]
    Unreachable(String),

    #[error("Task source returned malformed payload: {0}")]
    Malformed(String),
}

/// Remote source of the full task collection
#[async_trait]
pub trait TasksBackend: Send + Sync {
    /// Load all tasks, keyed by task id
    async fn load_tasks(&self) -> Result<HashMap<String, Task>, BackendError>;
}
