//! Task editor state machine
//!
//! Exactly one task can be open for add/edit at a time. Each transition is
//! legal from exactly one source variant; applying it anywhere else is a
//! logic defect and fails with an inconsistent-state error naming the
//! expected and actual variants. The owning store escalates that error as
//! fatal - a wrong-variant intent is never a silent no-op.
//!
//! ```text
//! Closed   --add_task(task)--> Editing(task, adding=true)
//! Closed   --edit_task(task)-> Editing(task, adding=false)
//! Editing  --edit(f)---------> Editing(f(task), same adding)
//! Editing  --save()----------> Saving(task)
//! Editing  --delete()--------> Deleting(task.id)
//! Editing  --cancel()--------> Closed
//! Saving   --saved()---------> Closed
//! Deleting --deleted()-------> Closed
//! ```

use modelstore::StoreError;

use crate::domain::Task;

/// State of the single-task editor
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEditorState {
    /// No task open; initial and terminal state
    Closed,
    /// A task is loaded for editing; `adding` distinguishes a brand-new task
    /// from an existing one (controls delete availability in a frontend)
    Editing { task: Task, adding: bool },
    /// Save in flight
    Saving { task: Task },
    /// Delete in flight
    Deleting { task_id: String },
}

impl TaskEditorState {
    pub fn variant_name(&self) -> &'static str {
        match self {
            TaskEditorState::Closed => "Closed",
            TaskEditorState::Editing { .. } => "Editing",
            TaskEditorState::Saving { .. } => "Saving",
            TaskEditorState::Deleting { .. } => "Deleting",
        }
    }

    /// Closed -> Editing with a brand-new task
    pub fn add_task(self, task: Task) -> Result<Self, StoreError> {
        match self {
            TaskEditorState::Closed => Ok(TaskEditorState::Editing { task, adding: true }),
            other => Err(other.unexpected("Closed")),
        }
    }

    /// Closed -> Editing with an existing task
    pub fn edit_task(self, task: Task) -> Result<Self, StoreError> {
        match self {
            TaskEditorState::Closed => Ok(TaskEditorState::Editing {
                task,
                adding: false,
            }),
            other => Err(other.unexpected("Closed")),
        }
    }

    /// Editing -> Editing, applying a copy-transform to the open task
    pub fn edit(self, f: impl FnOnce(Task) -> Task) -> Result<Self, StoreError> {
        match self {
            TaskEditorState::Editing { task, adding } => Ok(TaskEditorState::Editing {
                task: f(task),
                adding,
            }),
            other => Err(other.unexpected("Editing")),
        }
    }

    /// Editing -> Saving
    pub fn save(self) -> Result<Self, StoreError> {
        match self {
            TaskEditorState::Editing { task, .. } => Ok(TaskEditorState::Saving { task }),
            other => Err(other.unexpected("Editing")),
        }
    }

    /// Editing -> Deleting
    pub fn delete(self) -> Result<Self, StoreError> {
        match self {
            TaskEditorState::Editing { task, .. } => Ok(TaskEditorState::Deleting { task_id: task.id }),
            other => Err(other.unexpected("Editing")),
        }
    }

    /// Editing -> Closed, discarding the open task
    pub fn cancel(self) -> Result<Self, StoreError> {
        match self {
            TaskEditorState::Editing { .. } => Ok(TaskEditorState::Closed),
            other => Err(other.unexpected("Editing")),
        }
    }

    /// Saving -> Closed
    pub fn saved(self) -> Result<Self, StoreError> {
        match self {
            TaskEditorState::Saving { .. } => Ok(TaskEditorState::Closed),
            other => Err(other.unexpected("Saving")),
        }
    }

    /// Deleting -> Closed
    pub fn deleted(self) -> Result<Self, StoreError> {
        match self {
            TaskEditorState::Deleting { .. } => Ok(TaskEditorState::Closed),
            other => Err(other.unexpected("Deleting")),
        }
    }

    fn unexpected(&self, expected: &'static str) -> StoreError {
        StoreError::inconsistent(expected, self.variant_name())
    }
}
