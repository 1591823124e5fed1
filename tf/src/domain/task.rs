//! Task value type
//!
//! Tasks are plain values: equality is by field, and every edit produces a
//! new value inside a reducer. Nothing outside a store's reduction pipeline
//! ever replaces one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    /// Opaque unique identity, generated at creation if absent
    pub id: String,
    /// Last backend-assigned version; `None` until the backend stamps one
    pub last_update: Option<DateTime<Utc>>,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl Task {
    /// Create a task with a fresh id and the given title
    pub fn new(title: impl Into<String>) -> Self {
        Task {
            id: Uuid::now_v7().to_string(),
            last_update: None,
            title: title.into(),
            description: String::new(),
            completed: false,
        }
    }

    /// Create a task with a caller-chosen id
    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        Task {
            id: id.into(),
            ..Task::new(title)
        }
    }
}

impl Default for Task {
    fn default() -> Self {
        Task::new("New Task")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let one = Task::new("One");
        let two = Task::new("One");
        assert_ne!(one.id, two.id);
        assert_eq!(one.title, two.title);
        assert!(one.last_update.is_none());
        assert!(!one.completed);
    }

    #[test]
    fn test_default_is_a_fresh_new_task() {
        let task = Task::default();
        assert_eq!(task.title, "New Task");
        assert!(task.description.is_empty());
    }

    #[test]
    fn test_equality_is_by_field_values() {
        let task = Task::with_id("t-1", "One");
        let same = Task::with_id("t-1", "One");
        assert_eq!(task, same);

        let renamed = Task {
            title: "Two".to_string(),
            ..same
        };
        assert_ne!(task, renamed);
    }

    #[test]
    fn test_deserializing_without_id_generates_one() {
        let task: Task = serde_json::from_str(r#"{"title":"From wire"}"#).unwrap();
        assert_eq!(task.title, "From wire");
        assert!(!task.id.is_empty());
    }
}
