//! View events - the opaque input tokens of the system
//!
//! A frontend (or the demo driver, or a test) produces these; the intent
//! factories translate them into intents for the owning store. They are the
//! only way in.

use serde::{Deserialize, Serialize};

use crate::domain::Task;

/// Events from the add/edit surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EditorViewEvent {
    TitleChanged { title: String },
    DescriptionChanged { description: String },
    SaveClicked,
    DeleteClicked,
    CancelClicked,
}

/// Events from the task list surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TasksViewEvent {
    ClearCompletedClicked,
    FilterCycleClicked,
    RefreshClicked,
    RefreshSwiped,
    NewTaskClicked,
    CompleteToggled { task: Task, checked: bool },
    EditClicked { task: Task },
}
