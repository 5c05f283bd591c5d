//! Given-When-Then harness for reducers.
//!
//! A [`ReducerTest`] replays a list of actions against one state and then
//! runs its checks. Nothing is executed on behalf of the returned effects:
//! a `Send` shows up as data for the checks, not as a second reduce.

#![allow(clippy::module_name_repetitions)]

use taskdeck_core::{effect::Effect, reducer::Reducer};

/// A check queued with one of the `then_*` methods
enum Check<S, A> {
    State(Box<dyn FnOnce(&S)>),
    Effects(Box<dyn FnOnce(&[Effect<A>])>),
}

/// Fluent reducer test
///
/// Checks run in the order they were added. State checks see the state after
/// the final action; effect checks see what the final action returned.
///
/// ```ignore
/// ReducerTest::new(BoardReducer::new())
///     .with_env(env)
///     .given_state(BoardState::new())
///     .when_action(BoardAction::AddRequested)
///     .then_state(|state| assert!(state.form.is_open()))
///     .then_effects(assertions::assert_no_effects)
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    env: Option<E>,
    given: Option<S>,
    script: Vec<A>,
    checks: Vec<Check<S, A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Starts a test for `reducer`
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            env: None,
            given: None,
            script: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Environment handed to every reduce call
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.env = Some(env);
        self
    }

    /// Starting state
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.given = Some(state);
        self
    }

    /// Appends one action to the script
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.script.push(action);
        self
    }

    /// Appends several actions to the script, in order
    #[must_use]
    pub fn when_actions(mut self, actions: impl IntoIterator<Item = A>) -> Self {
        self.script.extend(actions);
        self
    }

    /// Checks the final state
    #[must_use]
    pub fn then_state<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.checks.push(Check::State(Box::new(check)));
        self
    }

    /// Checks the effects returned by the final action
    #[must_use]
    pub fn then_effects<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.checks.push(Check::Effects(Box::new(check)));
        self
    }

    /// Replays the script and runs every check
    ///
    /// # Panics
    ///
    /// Panics when the state, the environment or the script is missing, and
    /// whenever a check fails.
    #[allow(clippy::panic)]
    pub fn run(self) {
        let (Some(mut state), Some(env)) = (self.given, self.env) else {
            panic!("ReducerTest needs both given_state() and with_env() before run()");
        };
        assert!(!self.script.is_empty(), "ReducerTest has no actions; call when_action()");

        let last = self
            .script
            .into_iter()
            .map(|action| self.reducer.reduce(&mut state, action, &env))
            .last()
            .map(|effects| effects.into_vec())
            .unwrap_or_default();

        for check in self.checks {
            match check {
                Check::State(check) => check(&state),
                Check::Effects(check) => check(&last),
            }
        }
    }
}

/// Ready-made effect checks
pub mod assertions {
    use taskdeck_core::effect::Effect;

    /// Every effect is `Effect::None` (an empty list qualifies)
    ///
    /// # Panics
    ///
    /// Panics on the first effect that does something.
    #[allow(clippy::panic)]
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        if let Some(effect) = effects.iter().find(|e| !e.is_none()) {
            panic!("expected only Effect::None, got {effect:?} in {effects:?}");
        }
    }

    /// Exactly `expected` top-level effects
    ///
    /// # Panics
    ///
    /// Panics on a different count.
    pub fn assert_effects_count<A: std::fmt::Debug>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(effects.len(), expected, "effect count mismatch in {effects:?}");
    }

    /// The actions fed back by `effects`, flattened in order, equal `expected`
    ///
    /// # Panics
    ///
    /// Panics when they differ.
    pub fn assert_sends<A>(effects: &[Effect<A>], expected: &[A])
    where
        A: Clone + PartialEq + std::fmt::Debug,
    {
        let sent: Vec<A> = effects.iter().cloned().flat_map(Effect::into_actions).collect();
        assert_eq!(sent, expected, "fed-back actions differ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use taskdeck_core::{SmallVec, smallvec};

    #[derive(Clone, Debug, PartialEq)]
    enum Tally {
        Add(u32),
        Clear,
        AddLater(u32),
    }

    struct TallyReducer;

    impl Reducer for TallyReducer {
        type State = Vec<u32>;
        type Action = Tally;
        type Environment = ();

        fn reduce(&self, state: &mut Vec<u32>, action: Tally, _env: &()) -> SmallVec<[Effect<Tally>; 4]> {
            match action {
                Tally::Add(n) => {
                    state.push(n);
                    SmallVec::new()
                },
                Tally::Clear => {
                    state.clear();
                    smallvec![Effect::None]
                },
                Tally::AddLater(n) => smallvec![Effect::Send(Tally::Add(n))],
            }
        }
    }

    #[test]
    fn script_runs_in_order() {
        ReducerTest::new(TallyReducer)
            .with_env(())
            .given_state(vec![1])
            .when_actions([Tally::Add(2), Tally::Clear])
            .when_action(Tally::Add(3))
            .then_state(|state| assert_eq!(state, &[3]))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn sends_are_reported_not_executed() {
        ReducerTest::new(TallyReducer)
            .with_env(())
            .given_state(Vec::new())
            .when_action(Tally::AddLater(7))
            .then_state(|state| assert!(state.is_empty()))
            .then_effects(|effects| assertions::assert_sends(effects, &[Tally::Add(7)]))
            .run();
    }

    #[test]
    fn only_final_action_effects_are_checked() {
        ReducerTest::new(TallyReducer)
            .with_env(())
            .given_state(Vec::new())
            .when_actions([Tally::AddLater(1), Tally::Clear])
            .then_effects(|effects| assertions::assert_effects_count(effects, 1))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn checks_run_in_insertion_order() {
        let order = Rc::new(Cell::new(0));
        let (first, second) = (Rc::clone(&order), Rc::clone(&order));
        ReducerTest::new(TallyReducer)
            .with_env(())
            .given_state(Vec::new())
            .when_action(Tally::Add(1))
            .then_effects(move |_| {
                assert_eq!(first.get(), 0);
                first.set(1);
            })
            .then_state(move |_| assert_eq!(second.get(), 1))
            .run();
        assert_eq!(order.get(), 1);
    }

    #[test]
    #[should_panic(expected = "no actions")]
    fn empty_script_panics() {
        ReducerTest::new(TallyReducer)
            .with_env(())
            .given_state(Vec::new())
            .run();
    }
}
