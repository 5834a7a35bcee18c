//! The two primitive suspension operators every combinator is built from.

use tickwork_core::{Routine, Step};

/// Run-until-predicate, the fundamental "loop until" operator.
///
/// Each resumption evaluates the predicate first. While it returns false,
/// the body runs and the routine stays suspended; the first resumption
/// where it returns true invokes the completion callback exactly once and
/// completes without running the body that tick.
///
/// Behavior state lives in one explicitly named value `S`, threaded as
/// `&mut S` into the predicate and body along with the tick's elapsed
/// time. Stateless uses pass `()`.
pub struct RunUntil<S, P, B, C> {
    state: S,
    pred: P,
    body: B,
    on_complete: Option<C>,
}

impl<S, P, B, C> RunUntil<S, P, B, C>
where
    P: FnMut(&mut S, f32) -> bool,
    B: FnMut(&mut S, f32),
    C: FnOnce(),
{
    pub fn new(state: S, pred: P, body: B, on_complete: Option<C>) -> Self {
        Self {
            state,
            pred,
            body,
            on_complete,
        }
    }
}

impl<S, P, B, C> Routine for RunUntil<S, P, B, C>
where
    P: FnMut(&mut S, f32) -> bool,
    B: FnMut(&mut S, f32),
    C: FnOnce(),
{
    fn resume(&mut self, dt: f32) -> Step {
        if (self.pred)(&mut self.state, dt) {
            if let Some(on_complete) = self.on_complete.take() {
                on_complete();
            }
            Step::Complete
        } else {
            (self.body)(&mut self.state, dt);
            Step::Suspend
        }
    }
}

/// Run-while/until, the dual-predicate variant of [`RunUntil`].
///
/// Termination works exactly as in [`RunUntil`], driven by `done`; the
/// body is additionally gated by `paused` without affecting termination.
/// `done` is checked before `paused` every step, and the body runs only on
/// steps where `paused` returns false.
pub struct RunWhileUntil<S, W, U, B, C> {
    state: S,
    paused: W,
    done: U,
    body: B,
    on_complete: Option<C>,
}

impl<S, W, U, B, C> RunWhileUntil<S, W, U, B, C>
where
    W: FnMut(&mut S, f32) -> bool,
    U: FnMut(&mut S, f32) -> bool,
    B: FnMut(&mut S, f32),
    C: FnOnce(),
{
    pub fn new(state: S, paused: W, done: U, body: B, on_complete: Option<C>) -> Self {
        Self {
            state,
            paused,
            done,
            body,
            on_complete,
        }
    }
}

impl<S, W, U, B, C> Routine for RunWhileUntil<S, W, U, B, C>
where
    W: FnMut(&mut S, f32) -> bool,
    U: FnMut(&mut S, f32) -> bool,
    B: FnMut(&mut S, f32),
    C: FnOnce(),
{
    fn resume(&mut self, dt: f32) -> Step {
        if (self.done)(&mut self.state, dt) {
            if let Some(on_complete) = self.on_complete.take() {
                on_complete();
            }
            return Step::Complete;
        }
        if !(self.paused)(&mut self.state, dt) {
            (self.body)(&mut self.state, dt);
        }
        Step::Suspend
    }
}
