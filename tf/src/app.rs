//! Application root - owns the two stores and their factories
//!
//! The stores live from process start to shutdown and there is exactly one
//! of each. Everything is constructor-injected; nothing here is a global.

use std::sync::Arc;

use modelstore::Store;

use crate::backend::TasksBackend;
use crate::config::Config;
use crate::domain::Task;
use crate::intent::{EditorIntentFactory, TasksIntentFactory};
use crate::model::{FilterType, TaskEditorState, TasksState};

/// Composition root for the two-store system
pub struct App {
    pub tasks: Store<TasksState>,
    pub editor: Store<TaskEditorState>,
    pub tasks_intents: TasksIntentFactory,
    pub editor_intents: EditorIntentFactory,
}

impl App {
    /// Wire the stores and factories around an injected backend
    pub fn new(backend: Arc<dyn TasksBackend>, seed: Vec<Task>, filter: FilterType) -> Self {
        let tasks = Store::spawn(TasksState::new(seed, filter));
        let editor = Store::spawn(TaskEditorState::Closed);

        let tasks_intents = TasksIntentFactory::new(tasks.clone(), editor.clone(), backend);
        let editor_intents = EditorIntentFactory::new(editor.clone(), tasks.clone());

        App {
            tasks,
            editor,
            tasks_intents,
            editor_intents,
        }
    }

    /// Convenience wiring from configuration
    pub fn from_config(config: &Config) -> Self {
        App::new(
            Arc::new(config.build_backend()),
            config.seed_tasks(),
            config.seed.filter,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::InMemoryBackend;

    use super::*;

    #[tokio::test]
    async fn test_stores_start_with_injected_seed() {
        let app = App::new(
            Arc::new(InMemoryBackend::new(Vec::new())),
            vec![Task::with_id("t-1", "One")],
            FilterType::Any,
        );

        let mut tasks_stream = app.tasks.state_stream();
        let state = tasks_stream.next().await.unwrap();
        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.filter, FilterType::Any);

        let mut editor_stream = app.editor.state_stream();
        assert_eq!(
            editor_stream.next().await.unwrap(),
            TaskEditorState::Closed
        );
    }
}
