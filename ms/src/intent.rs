//! Intent - the unit of state transition
//!
//! An intent is a labeled, single-shot reducer over a state type. Reducers
//! are total and synchronous: anything asynchronous is *launched* from inside
//! a reducer (recording whatever handle the state needs) and its completion
//! re-enters the owning store as a new intent.

use std::fmt;

use crate::error::StoreError;

/// A single state transition request, queued to exactly one store
pub struct Intent<S> {
    label: &'static str,
    reduce: Box<dyn FnOnce(S) -> Result<S, StoreError> + Send>,
}

impl<S> Intent<S> {
    /// Build a pure-reduction intent from a state-transforming closure
    pub fn pure<F>(label: &'static str, reduce: F) -> Self
    where
        F: FnOnce(S) -> Result<S, StoreError> + Send + 'static,
    {
        Intent {
            label,
            reduce: Box::new(reduce),
        }
    }

    /// Build a side-effect intent
    ///
    /// The closure performs external work (typically delegating to another
    /// store) and the owning store's state is republished unchanged. Any
    /// visible consequence arrives later, as a state change emitted by the
    /// store that was delegated to.
    pub fn side_effect<F>(label: &'static str, effect: F) -> Self
    where
        F: FnOnce(&S) -> Result<(), StoreError> + Send + 'static,
    {
        Intent {
            label,
            reduce: Box::new(move |state| {
                effect(&state)?;
                Ok(state)
            }),
        }
    }

    /// Label used in logs and fault diagnostics
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Apply this intent to a state value
    ///
    /// Public so state machines and factories can be exercised directly in
    /// tests, without spinning up a store.
    pub fn reduce(self, state: S) -> Result<S, StoreError> {
        (self.reduce)(state)
    }
}

impl<S> fmt::Debug for Intent<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intent").field("label", &self.label).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[test]
    fn test_pure_intent_applies_closure() {
        let intent = Intent::pure("append", |s: String| Ok(s + "bar"));
        assert_eq!(intent.reduce("foo".to_string()).unwrap(), "foobar");
    }

    #[test]
    fn test_pure_intent_propagates_error() {
        let intent = Intent::pure("guarded", |_: String| {
            Err(StoreError::inconsistent("Editing", "Closed"))
        });
        let err = intent.reduce("foo".to_string()).unwrap_err();
        assert!(err.is_inconsistent());
    }

    #[test]
    fn test_side_effect_returns_state_unchanged() {
        let ran = Arc::new(AtomicBool::new(false));
        let observed = ran.clone();
        let intent = Intent::side_effect("delegate", move |s: &String| {
            assert_eq!(s, "foo");
            observed.store(true, Ordering::SeqCst);
            Ok(())
        });

        assert_eq!(intent.reduce("foo".to_string()).unwrap(), "foo");
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn test_side_effect_error_prevents_reduction() {
        let intent = Intent::side_effect("delegate", |_: &String| {
            Err(StoreError::inconsistent("present", "absent"))
        });
        assert!(intent.reduce("foo".to_string()).is_err());
    }

    #[test]
    fn test_label_survives_construction() {
        let intent = Intent::pure("relabeled", |s: u32| Ok(s));
        assert_eq!(intent.label(), "relabeled");
        assert_eq!(format!("{intent:?}"), "Intent { label: \"relabeled\" }");
    }
}
