//! Integration tests for Store action broadcasting
//!
//! Observers see every committed action in processing order, and each send's
//! actions arrive as one contiguous run even under concurrent senders.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::sync::Arc;
use taskdeck_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use taskdeck_runtime::{Store, StoreConfig};
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum TestAction {
    /// Start a multi-step job
    Start { id: u64, steps: u32 },
    /// One step of a job finished
    StepCompleted { id: u64, step: u32 },
    /// Job finished
    Finished { id: u64 },
    /// Plain increment with no feedback
    Increment,
}

#[derive(Debug, Clone, Default)]
struct TestState {
    counter: u32,
    finished: Vec<u64>,
}

#[derive(Clone)]
struct TestReducer;

impl Reducer for TestReducer {
    type State = TestState;
    type Action = TestAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TestAction::Start { id, steps } => {
                let mut chain: Vec<Effect<TestAction>> = (1..=steps)
                    .map(|step| Effect::Send(TestAction::StepCompleted { id, step }))
                    .collect();
                chain.push(Effect::Send(TestAction::Finished { id }));
                smallvec![Effect::chain(chain)]
            },
            TestAction::StepCompleted { .. } | TestAction::Increment => {
                state.counter += 1;
                SmallVec::new()
            },
            TestAction::Finished { id } => {
                state.finished.push(id);
                SmallVec::new()
            },
        }
    }
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<TestAction>) -> Vec<TestAction> {
    let mut seen = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(action) => seen.push(action),
            Err(TryRecvError::Empty | TryRecvError::Closed) => return seen,
            Err(TryRecvError::Lagged(_)) => {},
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn every_subscriber_sees_the_same_sequence() {
    let store = Store::new(TestState::default(), TestReducer, ());
    let mut first = store.subscribe_actions();
    let mut second = store.subscribe_actions();

    let processed = store.send(TestAction::Start { id: 7, steps: 2 }).await.unwrap();
    assert_eq!(processed, 4);

    let expected = vec![
        TestAction::Start { id: 7, steps: 2 },
        TestAction::StepCompleted { id: 7, step: 1 },
        TestAction::StepCompleted { id: 7, step: 2 },
        TestAction::Finished { id: 7 },
    ];
    assert_eq!(drain(&mut first), expected);
    assert_eq!(drain(&mut second), expected);
    assert_eq!(store.state(|s| s.finished.clone()).await, vec![7]);
}

#[tokio::test]
async fn late_subscriber_misses_earlier_actions() {
    let store = Store::new(TestState::default(), TestReducer, ());
    store.send(TestAction::Increment).await.unwrap();

    let mut late = store.subscribe_actions();
    store.send(TestAction::Increment).await.unwrap();

    assert_eq!(drain(&mut late), vec![TestAction::Increment]);
    assert_eq!(store.state(|s| s.counter).await, 2);
}

#[tokio::test]
async fn sends_without_subscribers_succeed() {
    let store = Store::new(TestState::default(), TestReducer, ());
    {
        let _dropped = store.subscribe_actions();
    }

    assert_eq!(store.send(TestAction::Start { id: 1, steps: 3 }).await, Ok(5));
    assert_eq!(store.state(|s| s.counter).await, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_sends_broadcast_contiguous_runs() {
    let config = StoreConfig::default().with_broadcast_capacity(256);
    let store = Arc::new(Store::with_config(TestState::default(), TestReducer, (), config));
    let mut observer = store.subscribe_actions();

    let handles: Vec<_> = (0..8_u64)
        .map(|id| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.send(TestAction::Start { id, steps: 3 }).await })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap(), Ok(5));
    }

    let seen = drain(&mut observer);
    assert_eq!(seen.len(), 40);
    for run in seen.chunks(5) {
        let &TestAction::Start { id, .. } = &run[0] else {
            panic!("run does not begin with Start: {run:?}");
        };
        assert_eq!(run[4], TestAction::Finished { id });
        assert!(run[1..4]
            .iter()
            .all(|a| matches!(a, TestAction::StepCompleted { id: step_id, .. } if *step_id == id)));
    }
    assert_eq!(store.state(|s| s.finished.len()).await, 8);
}

#[tokio::test]
async fn slow_subscriber_is_told_it_lagged() {
    let config = StoreConfig::default().with_broadcast_capacity(2);
    let store = Store::with_config(TestState::default(), TestReducer, (), config);
    let mut slow = store.subscribe_actions();

    store.send(TestAction::Start { id: 1, steps: 3 }).await.unwrap();

    assert!(matches!(slow.recv().await, Err(RecvError::Lagged(3))));
    assert_eq!(slow.recv().await.unwrap(), TestAction::StepCompleted { id: 1, step: 3 });
    assert_eq!(slow.recv().await.unwrap(), TestAction::Finished { id: 1 });
}
