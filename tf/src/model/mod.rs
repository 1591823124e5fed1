//! State machines owned by the two stores

mod editor;
mod sync;
mod tasks;

pub use editor::TaskEditorState;
pub use sync::{ProcessKind, SyncState};
pub use tasks::{FilterType, TasksState};
