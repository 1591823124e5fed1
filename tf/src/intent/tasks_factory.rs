//! Tasks event translation, the reload path, and editor delegation

use std::sync::Arc;

use tokio::task::AbortHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use modelstore::{Intent, Store, StoreError};

use crate::backend::TasksBackend;
use crate::domain::Task;
use crate::events::TasksViewEvent;
use crate::intent::EditorIntentFactory;
use crate::model::{TaskEditorState, TasksState};

/// Turns [`TasksViewEvent`]s into `Intent<TasksState>`, launches backend
/// loads, and delegates new/edit requests to the editor store
pub struct TasksIntentFactory {
    tasks: Store<TasksState>,
    editor: Store<TaskEditorState>,
    backend: Arc<dyn TasksBackend>,
}

impl TasksIntentFactory {
    pub fn new(
        tasks: Store<TasksState>,
        editor: Store<TaskEditorState>,
        backend: Arc<dyn TasksBackend>,
    ) -> Self {
        TasksIntentFactory {
            tasks,
            editor,
            backend,
        }
    }

    /// Translate a view event and enqueue it on the tasks store
    pub fn process(&self, event: TasksViewEvent) -> Result<(), StoreError> {
        debug!(?event, "process: translating tasks view event");
        self.tasks.process(self.to_intent(event))
    }

    fn to_intent(&self, event: TasksViewEvent) -> Intent<TasksState> {
        match event {
            TasksViewEvent::ClearCompletedClicked => {
                Intent::pure("clear_completed", |state: TasksState| {
                    Ok(state.clear_completed())
                })
            }
            TasksViewEvent::FilterCycleClicked => {
                Intent::pure("cycle_filter", |state: TasksState| Ok(state.cycle_filter()))
            }
            TasksViewEvent::RefreshClicked | TasksViewEvent::RefreshSwiped => {
                self.reload_intent()
            }
            TasksViewEvent::NewTaskClicked => self.new_task_intent(),
            TasksViewEvent::CompleteToggled { task, checked } => {
                Intent::pure("toggle_complete", move |state: TasksState| {
                    state.toggle_complete(&task.id, checked)
                })
            }
            TasksViewEvent::EditClicked { task } => self.edit_request_intent(task),
        }
    }

    /// Merge point for the editor's save path; also used by tests
    pub fn add_or_update_intent(task: Task) -> Intent<TasksState> {
        Intent::pure("add_or_update_task", move |state: TasksState| {
            Ok(state.add_or_update(task))
        })
    }

    /// Merge point for the editor's delete path
    pub fn delete_by_id_intent(task_id: String) -> Intent<TasksState> {
        Intent::pure("delete_task_by_id", move |state: TasksState| {
            Ok(state.delete_by_id(&task_id))
        })
    }

    // The reduction only records the abort handle and returns; the load runs
    // on the runtime and re-enters as a chained completion intent carrying
    // the generation it was minted under.
    fn reload_intent(&self) -> Intent<TasksState> {
        let store = self.tasks.clone();
        let backend = Arc::clone(&self.backend);
        Intent::pure("reload_tasks", move |state: TasksState| {
            let generation = Uuid::now_v7();
            state.begin_refresh(generation, || {
                launch_reload(store, backend, generation)
            })
        })
    }

    // Delegation only - the tasks store's own state is republished unchanged.
    fn new_task_intent(&self) -> Intent<TasksState> {
        let editor = self.editor.clone();
        Intent::side_effect("new_task_request", move |_: &TasksState| {
            editor.process(EditorIntentFactory::add_task_intent(Task::default()))
        })
    }

    // Delegation with a presence guard: editing a task that is no longer in
    // the collection means the event came from stale state.
    fn edit_request_intent(&self, task: Task) -> Intent<TasksState> {
        let editor = self.editor.clone();
        Intent::side_effect("edit_task_request", move |state: &TasksState| {
            if !state.contains(&task.id) {
                return Err(StoreError::inconsistent(
                    format!("task {} present in collection", task.id),
                    "absent",
                ));
            }
            editor.process(EditorIntentFactory::edit_task_intent(task))
        })
    }
}

fn launch_reload(
    store: Store<TasksState>,
    backend: Arc<dyn TasksBackend>,
    generation: Uuid,
) -> AbortHandle {
    debug!(%generation, "launch_reload: spawning backend load");
    let handle = tokio::spawn(async move {
        let intent = match backend.load_tasks().await {
            Ok(loaded) => Intent::pure("reload_succeeded", move |state: TasksState| {
                state.refresh_succeeded(generation, loaded.into_values().collect())
            }),
            Err(cause) => Intent::pure("reload_failed", move |state: TasksState| {
                state.refresh_failed(generation, cause)
            }),
        };
        if let Err(err) = store.process(intent) {
            warn!(%generation, %err, "launch_reload: completion dropped, store terminated");
        }
    });
    handle.abort_handle()
}
