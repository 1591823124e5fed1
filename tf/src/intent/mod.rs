//! Intent factories - view events in, intents out
//!
//! Factories are the only components that see both stores. They translate
//! opaque view events into intents for the store they own, and coordinate
//! cross-store writes: an intent reducing one store may enqueue a follow-up
//! intent on the other.

mod editor_factory;
mod tasks_factory;

pub use editor_factory::EditorIntentFactory;
pub use tasks_factory::TasksIntentFactory;
