//! Store - actor that owns a single state value
//!
//! Intents are enqueued over a channel and reduced one at a time by a
//! dedicated task, so no reduction ever observes a stale snapshot. Every
//! successful reduction republishes the state to all subscribers; a failed
//! reduction is fatal and terminates the store.

use std::fmt;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error};

use crate::error::StoreError;
use crate::intent::Intent;

/// Commands sent to the reduction loop
///
/// Subscriptions travel through the same queue as intents, which is what
/// guarantees a new subscriber sees exactly the state sequence from its
/// point of subscription, starting with the current value.
enum StoreCommand<S> {
    Process(Intent<S>),
    Subscribe(mpsc::UnboundedSender<S>),
}

/// Handle to a serialized state owner
///
/// Cheap to clone; all clones feed the same FIFO queue. `process` may be
/// called from any context, including from inside another store's reducer:
/// it only enqueues, it never reduces inline, so cross-store delegation
/// cannot deadlock against the target's reduction loop.
pub struct Store<S> {
    tx: mpsc::UnboundedSender<StoreCommand<S>>,
    fault_rx: watch::Receiver<Option<StoreError>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Store {
            tx: self.tx.clone(),
            fault_rx: self.fault_rx.clone(),
        }
    }
}

impl<S> Store<S>
where
    S: Clone + Send + fmt::Debug + 'static,
{
    /// Spawn a store actor owning `initial`
    ///
    /// Must be called from within a tokio runtime. The loop runs until every
    /// handle is dropped or a reduction fails.
    pub fn spawn(initial: S) -> Self {
        debug!(state = ?initial, "spawn: starting reduction loop");
        let (tx, rx) = mpsc::unbounded_channel();
        let (fault_tx, fault_rx) = watch::channel(None);

        tokio::spawn(reduction_loop(initial, rx, fault_tx));

        Store { tx, fault_rx }
    }

    /// Enqueue an intent for reduction
    ///
    /// Non-blocking; ordering is FIFO relative to every other intent
    /// submitted to this store, from any handle. Fails only once the
    /// reduction loop has terminated.
    pub fn process(&self, intent: Intent<S>) -> Result<(), StoreError> {
        debug!(intent = intent.label(), "process: enqueue");
        self.tx
            .send(StoreCommand::Process(intent))
            .map_err(|_| StoreError::Disconnected)
    }

    /// Subscribe to the state sequence, replaying the current value first
    ///
    /// The first value delivered is the state at subscription time; after
    /// that, one value per successful reduction (including reductions that
    /// leave the state unchanged). Each stream is independent: a slow
    /// consumer does not hold back the store or other subscribers. On a
    /// terminated store the stream ends immediately.
    pub fn state_stream(&self) -> StateStream<S> {
        let (tx, rx) = mpsc::unbounded_channel();
        if self.tx.send(StoreCommand::Subscribe(tx)).is_err() {
            debug!("state_stream: store terminated, stream will be empty");
        }
        StateStream { rx }
    }

    /// Watch the store's fatal-fault slot
    ///
    /// Holds `None` while the store is healthy. When a reducer returns an
    /// error the store publishes it here and terminates; the value never
    /// changes again after that.
    pub fn faults(&self) -> watch::Receiver<Option<StoreError>> {
        self.fault_rx.clone()
    }
}

/// Live sequence of states published by a [`Store`]
pub struct StateStream<S> {
    rx: mpsc::UnboundedReceiver<S>,
}

impl<S> StateStream<S> {
    /// Receive the next published state
    ///
    /// Returns `None` once the owning store has terminated.
    pub async fn next(&mut self) -> Option<S> {
        self.rx.recv().await
    }
}

async fn reduction_loop<S>(
    mut state: S,
    mut rx: mpsc::UnboundedReceiver<StoreCommand<S>>,
    fault_tx: watch::Sender<Option<StoreError>>,
) where
    S: Clone + Send + fmt::Debug + 'static,
{
    let mut subscribers: Vec<mpsc::UnboundedSender<S>> = Vec::new();

    while let Some(command) = rx.recv().await {
        match command {
            StoreCommand::Subscribe(subscriber) => {
                debug!("reduction_loop: subscriber attached, replaying current state");
                if subscriber.send(state.clone()).is_ok() {
                    subscribers.push(subscriber);
                }
            }
            StoreCommand::Process(intent) => {
                let label = intent.label();
                match intent.reduce(state) {
                    Ok(next) => {
                        state = next;
                        debug!(intent = label, state = ?state, "reduction_loop: reduced");
                        subscribers.retain(|subscriber| subscriber.send(state.clone()).is_ok());
                    }
                    Err(err) => {
                        // Fatal by design: a failed reduction is a logic
                        // defect, not a runtime condition. Publish the fault
                        // and abort without emitting a new state.
                        error!(intent = label, %err, "reduction_loop: reduction failed, terminating");
                        let _ = fault_tx.send(Some(err));
                        return;
                    }
                }
            }
        }
    }

    debug!("reduction_loop: all handles dropped, exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(value: &'static str) -> Intent<Vec<&'static str>> {
        Intent::pure(value, move |mut log: Vec<&'static str>| {
            log.push(value);
            Ok(log)
        })
    }

    #[tokio::test]
    async fn test_subscriber_receives_current_state_immediately() {
        let store = Store::spawn(41u32);

        let mut stream = store.state_stream();
        assert_eq!(stream.next().await, Some(41));
    }

    #[tokio::test]
    async fn test_states_published_in_fifo_order() {
        let store = Store::spawn(Vec::new());
        let mut stream = store.state_stream();
        assert_eq!(stream.next().await.unwrap(), Vec::<&str>::new());

        store.process(push("a")).unwrap();
        store.process(push("b")).unwrap();
        store.process(push("c")).unwrap();

        assert_eq!(stream.next().await.unwrap(), vec!["a"]);
        assert_eq!(stream.next().await.unwrap(), vec!["a", "b"]);
        assert_eq!(stream.next().await.unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_clones_feed_the_same_queue() {
        let store = Store::spawn(Vec::new());
        let clone = store.clone();
        let mut stream = store.state_stream();
        assert_eq!(stream.next().await.unwrap(), Vec::<&str>::new());

        store.process(push("from-original")).unwrap();
        clone.process(push("from-clone")).unwrap();

        assert_eq!(stream.next().await.unwrap(), vec!["from-original"]);
        assert_eq!(
            stream.next().await.unwrap(),
            vec!["from-original", "from-clone"]
        );
    }

    #[tokio::test]
    async fn test_late_subscriber_replays_latest_value_only() {
        let store = Store::spawn(Vec::new());

        store.process(push("a")).unwrap();
        store.process(push("b")).unwrap();

        // Subscription is serialized behind the two intents, so the replayed
        // value is the fully reduced state, not the seed.
        let mut stream = store.state_stream();
        assert_eq!(stream.next().await.unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_side_effect_intent_republishes_unchanged_state() {
        let store = Store::spawn(7u32);
        let mut stream = store.state_stream();
        assert_eq!(stream.next().await, Some(7));

        store
            .process(Intent::side_effect("noop-delegate", |_: &u32| Ok(())))
            .unwrap();

        // One value per reduction, even when nothing changed.
        assert_eq!(stream.next().await, Some(7));
    }

    #[tokio::test]
    async fn test_multiple_subscribers_see_the_same_sequence() {
        let store = Store::spawn(Vec::new());
        let mut first = store.state_stream();
        let mut second = store.state_stream();
        assert_eq!(first.next().await.unwrap(), Vec::<&str>::new());
        assert_eq!(second.next().await.unwrap(), Vec::<&str>::new());

        store.process(push("a")).unwrap();
        store.process(push("b")).unwrap();

        // Draining one stream completely does not consume the other's values.
        assert_eq!(first.next().await.unwrap(), vec!["a"]);
        assert_eq!(first.next().await.unwrap(), vec!["a", "b"]);
        assert_eq!(second.next().await.unwrap(), vec!["a"]);
        assert_eq!(second.next().await.unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_failed_reduction_faults_and_terminates() {
        let store = Store::spawn(7u32);
        let mut stream = store.state_stream();
        let mut faults = store.faults();
        assert_eq!(stream.next().await, Some(7));
        assert!(faults.borrow().is_none());

        store
            .process(Intent::pure("illegal", |_: u32| {
                Err(StoreError::inconsistent("Editing", "Closed"))
            }))
            .unwrap();

        faults.changed().await.unwrap();
        assert_eq!(
            *faults.borrow(),
            Some(StoreError::inconsistent("Editing", "Closed"))
        );

        // No state was published for the failed reduction; the stream just
        // ends when the loop aborts.
        assert_eq!(stream.next().await, None);

        // The store is gone: further intents are rejected.
        let result = store.process(Intent::pure("late", |n: u32| Ok(n)));
        assert_eq!(result, Err(StoreError::Disconnected));
    }

    #[tokio::test]
    async fn test_stream_on_terminated_store_is_empty() {
        let store = Store::spawn(7u32);
        let mut stream = store.state_stream();
        assert_eq!(stream.next().await, Some(7));

        store
            .process(Intent::pure("illegal", |_: u32| {
                Err(StoreError::inconsistent("Idle", "Process"))
            }))
            .unwrap();
        assert_eq!(stream.next().await, None);

        let mut late = store.state_stream();
        assert_eq!(late.next().await, None);
    }
}
