//! Guarded transitions and the machines that fold them over input streams.
//!
//! The machine never holds a current state of its own. Running it threads a
//! state value through the transition, earliest input first, and hands back
//! the final state. The configuration is left untouched, so one machine can
//! be run any number of times, including concurrently over separate streams.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

pub type Guard<S, I> = Arc<dyn Fn(&S, &I) -> bool + Send + Sync>;
pub type Compute<S, I> = Arc<dyn Fn(&S, &I) -> S + Send + Sync>;

// ------------- Transition -------------
pub struct Transition<S, I> {
    guard: Guard<S, I>,
    compute: Compute<S, I>,
}
impl<S: 'static, I: 'static> Transition<S, I> {
    pub fn new<G, C>(guard: G, compute: C) -> Self
    where
        G: Fn(&S, &I) -> bool + Send + Sync + 'static,
        C: Fn(&S, &I) -> S + Send + Sync + 'static,
    {
        Self {
            guard: Arc::new(guard),
            compute: Arc::new(compute),
        }
    }
    /// A transition whose guard always holds.
    pub fn unguarded<C>(compute: C) -> Self
    where
        C: Fn(&S, &I) -> S + Send + Sync + 'static,
    {
        Self::new(|_: &S, _: &I| true, compute)
    }
}
impl<S, I> Transition<S, I> {
    /// The next state, or `state` itself when the guard rejects the input.
    pub fn apply(&self, state: S, input: &I) -> S {
        if (self.guard)(&state, input) {
            (self.compute)(&state, input)
        } else {
            trace!("guard rejected input, state unchanged");
            state
        }
    }
    pub fn guard(&self) -> &Guard<S, I> {
        &self.guard
    }
    pub fn compute(&self) -> &Compute<S, I> {
        &self.compute
    }
}
impl<S, I> Clone for Transition<S, I> {
    fn clone(&self) -> Self {
        Self {
            guard: Arc::clone(&self.guard),
            compute: Arc::clone(&self.compute),
        }
    }
}

// ------------- StateMachine -------------
pub struct StateMachine<S, I> {
    transition: Transition<S, I>,
    initial: S,
}
impl<S: Clone, I> StateMachine<S, I> {
    pub fn new(transition: Transition<S, I>, initial: S) -> Self {
        Self {
            transition,
            initial,
        }
    }
    pub fn transition(&self) -> &Transition<S, I> {
        &self.transition
    }
    pub fn initial(&self) -> &S {
        &self.initial
    }
    /// Folds the transition over `stream`, earliest input first.
    pub fn run<'a, T>(&self, stream: T) -> S
    where
        T: IntoIterator<Item = &'a I>,
        I: 'a,
    {
        stream
            .into_iter()
            .fold(self.initial.clone(), |state, input| self.transition.apply(state, input))
    }
    /// The initial state followed by the state after each input.
    pub fn trace<'a, T>(&self, stream: T) -> Vec<S>
    where
        T: IntoIterator<Item = &'a I>,
        I: 'a,
    {
        let mut states = vec![self.initial.clone()];
        let mut state = self.initial.clone();
        for input in stream {
            state = self.transition.apply(state, input);
            states.push(state.clone());
        }
        states
    }
}
impl<S: Clone, I> Clone for StateMachine<S, I> {
    fn clone(&self) -> Self {
        Self {
            transition: self.transition.clone(),
            initial: self.initial.clone(),
        }
    }
}
impl<S: fmt::Debug, I> fmt::Debug for StateMachine<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("initial", &self.initial)
            .finish()
    }
}

/// Runs `machine` over `stream`; see [`StateMachine::run`].
pub fn run_machine<'a, S, I, T>(machine: &StateMachine<S, I>, stream: T) -> S
where
    S: Clone,
    T: IntoIterator<Item = &'a I>,
    I: 'a,
{
    machine.run(stream)
}
