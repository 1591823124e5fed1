//! Taskflow - unidirectional task state management
//!
//! A to-do collection and a single-task editor, each owned by its own
//! serialized [`modelstore::Store`], transitioned only through intents built
//! by the factories in [`intent`], and observed only through replayed state
//! streams.
//!
//! # Core Concepts
//!
//! - **Two independent stores**: the collection ([`model::TasksState`]) and
//!   the editor ([`model::TaskEditorState`]) never share state; they
//!   coordinate by enqueuing intents on each other
//! - **Variant-guarded transitions**: every transition is legal from exactly
//!   one state variant and fails loudly anywhere else
//! - **Save-then-close invariant**: the editor enqueues the collection write
//!   before it publishes `Closed`
//! - **Recoverable vs fatal**: backend failures are ordinary
//!   `SyncState::Error` values; wrong-variant intents terminate the store
//!
//! # Modules
//!
//! - [`domain`] - Task value type
//! - [`model`] - The two state machines and the sync sub-machine
//! - [`events`] - Opaque view-event tokens
//! - [`intent`] - Factories translating events into intents
//! - [`backend`] - Async task source interface and in-memory implementation
//! - [`app`] - Composition root
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Demo binary command-line interface

pub mod app;
pub mod backend;
pub mod cli;
pub mod config;
pub mod domain;
pub mod events;
pub mod intent;
pub mod model;

// Re-export commonly used types
pub use app::App;
pub use backend::{BackendError, InMemoryBackend, TasksBackend};
pub use config::Config;
pub use domain::Task;
pub use events::{EditorViewEvent, TasksViewEvent};
pub use intent::{EditorIntentFactory, TasksIntentFactory};
pub use model::{FilterType, ProcessKind, SyncState, TaskEditorState, TasksState};
