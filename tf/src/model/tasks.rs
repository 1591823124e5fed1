//! Task collection state machine
//!
//! Holds the ordered task list, the active display filter, and the nested
//! sync sub-machine. Fallible operations carry their own variant guards;
//! infallible ones are plain copy-transforms. All of them consume the state
//! and return the next one, so they compose directly into intents.

use serde::{Deserialize, Serialize};
use tokio::task::AbortHandle;
use uuid::Uuid;

use modelstore::StoreError;

use crate::backend::BackendError;
use crate::domain::Task;
use crate::model::sync::{ProcessKind, SyncState};

/// Which subset of the collection is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Any,
    Active,
    Complete,
}

impl FilterType {
    /// Pure visibility predicate; never mutates the underlying list
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            FilterType::Any => true,
            FilterType::Active => !task.completed,
            FilterType::Complete => task.completed,
        }
    }

    /// Deterministic 3-cycle: Any -> Active -> Complete -> Any
    pub fn next(self) -> Self {
        match self {
            FilterType::Any => FilterType::Active,
            FilterType::Active => FilterType::Complete,
            FilterType::Complete => FilterType::Any,
        }
    }
}

/// State of the task collection store
#[derive(Debug, Clone, PartialEq)]
pub struct TasksState {
    /// Insertion order is display order; filtering never reorders
    pub tasks: Vec<Task>,
    pub filter: FilterType,
    pub sync: SyncState,
}

impl TasksState {
    pub fn new(tasks: Vec<Task>, filter: FilterType) -> Self {
        TasksState {
            tasks,
            filter,
            sync: SyncState::Idle,
        }
    }

    /// The subset selected by the active filter, in stored order
    pub fn visible_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|task| self.filter.matches(task))
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.tasks.iter().any(|task| task.id == task_id)
    }

    /// Start a refresh: Idle -> Process(Refresh), or Error -> Process(Refresh)
    /// for a user-initiated retry. Illegal while a load is already in flight.
    ///
    /// `launch` starts the asynchronous load and returns its abort handle;
    /// it is only invoked once the guard has passed, so an illegal reload
    /// never leaks a background task. The reduction itself stays synchronous:
    /// it records the handle and returns.
    pub fn begin_refresh(
        self,
        generation: Uuid,
        launch: impl FnOnce() -> AbortHandle,
    ) -> Result<Self, StoreError> {
        match self.sync {
            SyncState::Idle | SyncState::Error(_) => Ok(TasksState {
                sync: SyncState::Process {
                    kind: ProcessKind::Refresh,
                    generation,
                    cancel: launch(),
                },
                ..self
            }),
            ref other => Err(StoreError::inconsistent("Idle or Error", other.describe())),
        }
    }

    /// Refresh completion: Process(Refresh) -> Idle with the loaded tasks
    pub fn refresh_succeeded(
        self,
        generation: Uuid,
        tasks: Vec<Task>,
    ) -> Result<Self, StoreError> {
        self.expect_refresh(generation)?;
        Ok(TasksState {
            tasks,
            sync: SyncState::Idle,
            ..self
        })
    }

    /// Refresh failure: Process(Refresh) -> Error; the collection is untouched
    pub fn refresh_failed(
        self,
        generation: Uuid,
        cause: BackendError,
    ) -> Result<Self, StoreError> {
        self.expect_refresh(generation)?;
        Ok(TasksState {
            sync: SyncState::Error(cause),
            ..self
        })
    }

    // Completion guard: the refresh this completion was minted for must
    // still be the one in flight. A stale completion - cancelled, or
    // superseded by a newer reload - fails here instead of clobbering state.
    fn expect_refresh(&self, generation: Uuid) -> Result<(), StoreError> {
        match &self.sync {
            SyncState::Process {
                kind: ProcessKind::Refresh,
                generation: current,
                ..
            } if *current == generation => Ok(()),
            other => Err(StoreError::inconsistent(
                format!("Process(Refresh, generation {generation})"),
                other.describe(),
            )),
        }
    }

    /// Replace the matching task with a completed/uncompleted copy
    ///
    /// A missing id is a fail-fast inconsistent-state error: the toggle came
    /// from a rendered task row, so the task not being in the collection
    /// means the caller is operating on stale state.
    pub fn toggle_complete(mut self, task_id: &str, checked: bool) -> Result<Self, StoreError> {
        match self.tasks.iter_mut().find(|task| task.id == task_id) {
            Some(task) => {
                task.completed = checked;
                Ok(self)
            }
            None => Err(StoreError::inconsistent(
                format!("task {task_id} present in collection"),
                "absent",
            )),
        }
    }

    /// Advance the display filter one step along its 3-cycle
    pub fn cycle_filter(mut self) -> Self {
        self.filter = self.filter.next();
        self
    }

    /// Drop all completed tasks, preserving the order of the rest
    pub fn clear_completed(mut self) -> Self {
        self.tasks.retain(|task| !task.completed);
        self
    }

    /// Merge point for the editor's save path: replace in place by id,
    /// or append when the id is new
    pub fn add_or_update(mut self, task: Task) -> Self {
        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(slot) => *slot = task,
            None => self.tasks.push(task),
        }
        self
    }

    /// Merge point for the editor's delete path; an absent id is a no-op
    pub fn delete_by_id(mut self, task_id: &str) -> Self {
        self.tasks.retain(|task| task.id != task_id);
        self
    }
}


#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    fn arb_task() -> impl Strategy<Value = Task> {
        ("[a-c]{1,4}", "[a-z ]{0,12}", any::<bool>()).prop_map(|(id, title, completed)| Task {
            completed,
            ..Task::with_id(id, title)
        })
    }

    fn arb_state() -> impl Strategy<Value = TasksState> {
        prop::collection::vec(arb_task(), 0..8)
            .prop_map(|tasks| TasksState::new(tasks, FilterType::Any))
    }

    proptest! {
        #[test]
        fn prop_cycle_filter_is_a_three_cycle(state in arb_state()) {
            let cycled = state.clone().cycle_filter().cycle_filter().cycle_filter();
            prop_assert_eq!(cycled.filter, state.filter);
            prop_assert_eq!(cycled, state);
        }

        #[test]
        fn prop_clear_completed_is_idempotent(state in arb_state()) {
            let once = state.clear_completed();
            let twice = once.clone().clear_completed();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_clear_completed_leaves_only_active(state in arb_state()) {
            let cleared = state.clear_completed();
            prop_assert!(cleared.tasks.iter().all(|task| !task.completed));
        }

        #[test]
        fn prop_add_or_update_grows_by_at_most_one(state in arb_state(), task in arb_task()) {
            let before = state.tasks.len();
            let after = state.clone().add_or_update(task.clone());
            prop_assert!(after.tasks.len() == before || after.tasks.len() == before + 1);

            // Reapplying identical data changes nothing.
            let again = after.clone().add_or_update(task);
            prop_assert_eq!(after, again);
        }

        #[test]
        fn prop_delete_absent_id_changes_nothing(state in arb_state()) {
            let untouched = state.clone().delete_by_id("never-a-task-id");
            prop_assert_eq!(untouched, state);
        }
    }
}
