//! Editor event translation and the save/delete delegation paths

use modelstore::{Intent, Store, StoreError};
use tracing::debug;

use crate::domain::Task;
use crate::events::EditorViewEvent;
use crate::intent::TasksIntentFactory;
use crate::model::{TaskEditorState, TasksState};

/// Turns [`EditorViewEvent`]s into `Intent<TaskEditorState>` and coordinates
/// the collection writes that save/delete imply
pub struct EditorIntentFactory {
    editor: Store<TaskEditorState>,
    tasks: Store<TasksState>,
}

impl EditorIntentFactory {
    pub fn new(editor: Store<TaskEditorState>, tasks: Store<TasksState>) -> Self {
        EditorIntentFactory { editor, tasks }
    }

    /// Translate a view event and enqueue it on the editor store
    pub fn process(&self, event: EditorViewEvent) -> Result<(), StoreError> {
        debug!(?event, "process: translating editor view event");
        self.editor.process(self.to_intent(event))
    }

    fn to_intent(&self, event: EditorViewEvent) -> Intent<TaskEditorState> {
        match event {
            EditorViewEvent::TitleChanged { title } => Intent::pure("edit_title", move |state: TaskEditorState| {
                state.edit(|task| Task { title, ..task })
            }),
            EditorViewEvent::DescriptionChanged { description } => {
                Intent::pure("edit_description", move |state: TaskEditorState| {
                    state.edit(|task| Task {
                        description,
                        ..task
                    })
                })
            }
            EditorViewEvent::SaveClicked => self.save_intent(),
            EditorViewEvent::DeleteClicked => self.delete_intent(),
            EditorViewEvent::CancelClicked => {
                Intent::pure("cancel_edit", TaskEditorState::cancel)
            }
        }
    }

    /// Open the editor on a brand-new task; used cross-store by the tasks
    /// factory's new-task path
    pub fn add_task_intent(task: Task) -> Intent<TaskEditorState> {
        Intent::pure("add_task", move |state: TaskEditorState| state.add_task(task))
    }

    /// Open the editor on an existing task; used cross-store by the tasks
    /// factory's edit path
    pub fn edit_task_intent(task: Task) -> Intent<TaskEditorState> {
        Intent::pure("edit_task", move |state: TaskEditorState| {
            state.edit_task(task)
        })
    }

    // Save delegates the collection write, then completes its own machine.
    // The add_or_update intent is enqueued on the tasks store before the
    // editor publishes Closed, so anything observing Closed can rely on the
    // collection already having the write in its queue ahead of whatever
    // that observer submits next.
    fn save_intent(&self) -> Intent<TaskEditorState> {
        let tasks = self.tasks.clone();
        Intent::pure("save_task", move |state: TaskEditorState| {
            let saving = state.save()?;
            if let TaskEditorState::Saving { task } = &saving {
                tasks.process(TasksIntentFactory::add_or_update_intent(task.clone()))?;
            }
            saving.saved()
        })
    }

    // Symmetric to save: collection delete is enqueued before Closed.
    fn delete_intent(&self) -> Intent<TaskEditorState> {
        let tasks = self.tasks.clone();
        Intent::pure("delete_task", move |state: TaskEditorState| {
            let deleting = state.delete()?;
            if let TaskEditorState::Deleting { task_id } = &deleting {
                tasks.process(TasksIntentFactory::delete_by_id_intent(task_id.clone()))?;
            }
            deleting.deleted()
        })
    }
}
