//! Sync sub-machine for the asynchronous collection load
//!
//! Tracks whether a backend operation is outstanding. `Process` carries the
//! abort handle of the in-flight load plus a generation token; completion
//! intents must present the same generation, so a completion that outlives
//! its own refresh (cancelled, superseded) fails the variant guard instead
//! of corrupting state.

use tokio::task::AbortHandle;
use uuid::Uuid;

use crate::backend::BackendError;

/// What kind of backend operation is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessKind {
    Refresh,
    Create,
    Update,
}

impl ProcessKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProcessKind::Refresh => "Refresh",
            ProcessKind::Create => "Create",
            ProcessKind::Update => "Update",
        }
    }
}

/// Idle / in-flight / failed state of the collection sync
#[derive(Debug, Clone)]
pub enum SyncState {
    /// No sync activity
    Idle,
    /// An asynchronous operation is outstanding
    Process {
        kind: ProcessKind,
        /// Identity of this particular operation; completion intents are
        /// minted with it and guarded against it
        generation: Uuid,
        /// Aborting drops the in-flight load, so its completion intent is
        /// never submitted
        cancel: AbortHandle,
    },
    /// Last operation failed; recoverable via a user-initiated reload
    Error(BackendError),
}

impl SyncState {
    pub fn variant_name(&self) -> &'static str {
        match self {
            SyncState::Idle => "Idle",
            SyncState::Process { kind, .. } => match kind {
                ProcessKind::Refresh => "Process(Refresh)",
                ProcessKind::Create => "Process(Create)",
                ProcessKind::Update => "Process(Update)",
            },
            SyncState::Error(_) => "Error",
        }
    }

    /// Variant description carrying the generation, for guard diagnostics
    pub fn describe(&self) -> String {
        match self {
            SyncState::Process {
                kind, generation, ..
            } => format!("Process({}, generation {})", kind.name(), generation),
            other => other.variant_name().to_string(),
        }
    }

    /// Abort the in-flight operation, if any
    ///
    /// Not reachable from any view event today, but structurally required:
    /// an aborted load never submits its completion intent, and a completion
    /// that raced past the abort still fails the generation guard.
    pub fn abort_in_flight(&self) {
        if let SyncState::Process { cancel, .. } = self {
            cancel.abort();
        }
    }
}

// Cancellation handles have no meaningful equality; two sync states are the
// same operation iff kind and generation match.
impl PartialEq for SyncState {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SyncState::Idle, SyncState::Idle) => true,
            (
                SyncState::Process {
                    kind: a,
                    generation: ga,
                    ..
                },
                SyncState::Process {
                    kind: b,
                    generation: gb,
                    ..
                },
            ) => a == b && ga == gb,
            (SyncState::Error(a), SyncState::Error(b)) => a == b,
            _ => false,
        }
    }
}
