//! Taskflow demo driver
//!
//! Wires the application root from config, attaches logging observers to
//! both state streams, and pushes a scripted sequence of view events through
//! the intent factories: reload from the backend, create and save a task,
//! toggle it complete, cycle the filter, clear completed work, then open and
//! cancel an edit. Prints the final visible task list as JSON.

use std::time::Duration;

use clap::Parser;
use eyre::{Result, eyre};
use tracing::info;

use modelstore::StateStream;
use taskflow::app::App;
use taskflow::cli::Cli;
use taskflow::config::Config;
use taskflow::events::{EditorViewEvent, TasksViewEvent};
use taskflow::model::{SyncState, TaskEditorState};

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let config = Config::load(cli.config.as_ref())?;
    info!(
        seed_count = config.seed.titles.len(),
        backend_fails = config.backend.fail,
        "Taskflow loaded config"
    );

    let app = App::from_config(&config);
    attach_observers(&app);

    run_script(&app).await?;

    let final_state = next_matching(&mut app.tasks.state_stream(), |_| true).await?;
    let visible: Vec<_> = final_state.visible_tasks().collect();
    println!("{}", serde_json::to_string_pretty(&visible)?);

    Ok(())
}

/// Log every state either store publishes
fn attach_observers(app: &App) {
    let mut tasks_stream = app.tasks.state_stream();
    tokio::spawn(async move {
        while let Some(state) = tasks_stream.next().await {
            info!(
                task_count = state.tasks.len(),
                filter = ?state.filter,
                sync = state.sync.variant_name(),
                "tasks state"
            );
        }
    });

    let mut editor_stream = app.editor.state_stream();
    tokio::spawn(async move {
        while let Some(state) = editor_stream.next().await {
            info!(editor = state.variant_name(), "editor state");
        }
    });
}

async fn run_script(app: &App) -> Result<()> {
    let mut tasks_stream = app.tasks.state_stream();
    let mut editor_stream = app.editor.state_stream();

    // Reload the collection from the backend and wait for it to settle. The
    // replayed first value still carries Idle, so look for the in-flight
    // state before looking for the outcome.
    app.tasks_intents.process(TasksViewEvent::RefreshClicked)?;
    next_matching(&mut tasks_stream, |state| {
        matches!(state.sync, SyncState::Process { .. })
    })
    .await?;
    let settled = next_matching(&mut tasks_stream, |state| {
        matches!(state.sync, SyncState::Idle | SyncState::Error(_))
    })
    .await?;
    if let SyncState::Error(cause) = &settled.sync {
        info!(%cause, "reload failed; continuing with the seeded collection");
    }

    // Create a task through the editor and save it into the collection.
    app.tasks_intents.process(TasksViewEvent::NewTaskClicked)?;
    next_matching(&mut editor_stream, |state| {
        matches!(state, TaskEditorState::Editing { .. })
    })
    .await?;
    app.editor_intents.process(EditorViewEvent::TitleChanged {
        title: "Write the demo".to_string(),
    })?;
    app.editor_intents
        .process(EditorViewEvent::DescriptionChanged {
            description: "Scripted from main".to_string(),
        })?;
    app.editor_intents.process(EditorViewEvent::SaveClicked)?;
    next_matching(&mut editor_stream, |state| {
        matches!(state, TaskEditorState::Closed)
    })
    .await?;
    let state = next_matching(&mut tasks_stream, |state| {
        state.tasks.iter().any(|task| task.title == "Write the demo")
    })
    .await?;

    // Mark the saved task complete, then sweep completed work.
    let saved = state
        .tasks
        .iter()
        .find(|task| task.title == "Write the demo")
        .cloned()
        .ok_or_else(|| eyre!("saved task missing from collection"))?;
    app.tasks_intents.process(TasksViewEvent::CompleteToggled {
        task: saved,
        checked: true,
    })?;
    app.tasks_intents.process(TasksViewEvent::FilterCycleClicked)?;
    app.tasks_intents
        .process(TasksViewEvent::ClearCompletedClicked)?;
    let state = next_matching(&mut tasks_stream, |state| {
        state.tasks.iter().all(|task| !task.completed)
    })
    .await?;

    // Open an existing task for edit, then back out.
    if let Some(first) = state.tasks.first().cloned() {
        app.tasks_intents
            .process(TasksViewEvent::EditClicked { task: first })?;
        next_matching(&mut editor_stream, |state| {
            matches!(state, TaskEditorState::Editing { adding: false, .. })
        })
        .await?;
        app.editor_intents.process(EditorViewEvent::CancelClicked)?;
        next_matching(&mut editor_stream, |state| {
            matches!(state, TaskEditorState::Closed)
        })
        .await?;
    }

    Ok(())
}

/// Wait (bounded) for the next published state matching `pred`
async fn next_matching<S, F>(stream: &mut StateStream<S>, mut pred: F) -> Result<S>
where
    F: FnMut(&S) -> bool,
{
    let deadline = Duration::from_secs(5);
    tokio::time::timeout(deadline, async {
        loop {
            match stream.next().await {
                Some(state) if pred(&state) => return Ok(state),
                Some(_) => continue,
                None => return Err(eyre!("store terminated while waiting for state")),
            }
        }
    })
    .await
    .map_err(|_| eyre!("timed out waiting for state"))?
}
