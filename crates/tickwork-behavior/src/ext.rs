//! Behavior combinators as extension methods on [`Scheduler`].

use tickwork_core::{Scheduler, TaskHandle};

use crate::primitive::{RunUntil, RunWhileUntil};
use crate::timer::Timer;

/// Bookkeeping for [`ScheduleExt::run_steps`]: one timer per sub-interval,
/// re-armed after each step fires.
struct StepTrack {
    timer: Timer,
    index: usize,
    count: usize,
}

/// Behavior entry points, available on any [`Scheduler`] clone.
///
/// Every method builds a routine out of [`RunUntil`] or [`RunWhileUntil`],
/// registers it, and returns the registration's [`TaskHandle`] (ignorable;
/// keep it only to cancel or observe the behavior). Timed combinators
/// accumulate the per-tick elapsed time and compare the running sum against
/// their target with `>=`.
///
/// ```
/// use tickwork_behavior::prelude::*;
///
/// let sched = Scheduler::new();
/// let fired = std::rc::Rc::new(std::cell::Cell::new(false));
/// let flag = std::rc::Rc::clone(&fired);
/// sched.wait_then(1.5, move || flag.set(true));
///
/// sched.tick(1.0);
/// assert!(!fired.get());
/// sched.tick(1.0);
/// assert!(fired.get());
/// assert!(!sched.is_active());
/// ```
pub trait ScheduleExt {
    /// Run `action` once per tick, forever.
    ///
    /// Never completes on its own; stop it through the returned handle or
    /// [`Scheduler::clear`].
    fn always(&self, action: impl FnMut() + 'static) -> TaskHandle;

    /// Run `body` every tick until `pred` returns true, then run
    /// `on_complete` once.
    ///
    /// `pred` is evaluated first each tick; on the completing tick the body
    /// does not run.
    fn run_until(
        &self,
        pred: impl FnMut() -> bool + 'static,
        body: impl FnMut() + 'static,
        on_complete: impl FnOnce() + 'static,
    ) -> TaskHandle;

    /// [`run_until`](Self::run_until) with an additional pause gate.
    ///
    /// `done` is checked first each tick and terminates exactly as in
    /// `run_until`; otherwise `body` runs only on ticks where `paused`
    /// returns false. Pausing never delays termination.
    fn run_while_until(
        &self,
        paused: impl FnMut() -> bool + 'static,
        done: impl FnMut() -> bool + 'static,
        body: impl FnMut() + 'static,
        on_complete: impl FnOnce() + 'static,
    ) -> TaskHandle;

    /// Run `callback` once after `duration` of accumulated elapsed time.
    ///
    /// Fires on the tick the running sum first reaches `duration`, so a
    /// zero duration fires on the first tick after registration.
    ///
    /// # Panics
    ///
    /// Panics if `duration` is negative or NaN.
    fn wait_then(&self, duration: f32, callback: impl FnOnce() + 'static) -> TaskHandle;

    /// Run `action` exactly once, on the first tick `predicate` returns
    /// true.
    fn run_when(
        &self,
        predicate: impl FnMut() -> bool + 'static,
        action: impl FnOnce() + 'static,
    ) -> TaskHandle;

    /// Run `action` once per `interval` of accumulated elapsed time,
    /// indefinitely.
    ///
    /// One persistent routine re-arms its timer after each firing; overshoot
    /// past the interval boundary is discarded, so long ticks cannot bank
    /// extra firings.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is negative or NaN.
    fn repeat_every(&self, interval: f32, action: impl FnMut() + 'static) -> TaskHandle;

    /// Run `action` every tick while accumulated time is below `duration`,
    /// then run `callback` once.
    ///
    /// The accumulator is bumped by the tick's elapsed time before each
    /// `action` call, so the final call lands on the tick that crosses
    /// `duration` and `callback` runs on the next one.
    ///
    /// # Panics
    ///
    /// Panics if `duration` is negative or NaN.
    fn run_for(
        &self,
        duration: f32,
        action: impl FnMut() + 'static,
        callback: impl FnOnce() + 'static,
    ) -> TaskHandle;

    /// Partition `duration` into `step_count` equal sub-intervals, invoking
    /// `step_action(index)` on entry to each.
    ///
    /// Index 0 fires synchronously inside this call, before any tick
    /// elapses; each later index fires on the tick that crosses its
    /// sub-interval boundary. After the final index's sub-interval,
    /// `on_complete` runs once. `step_action` is invoked exactly
    /// `step_count` times in total.
    ///
    /// A `step_count` of zero runs `on_complete` immediately and registers
    /// nothing; the returned handle reports
    /// [`Finished`](tickwork_core::TaskState::Finished).
    ///
    /// # Panics
    ///
    /// Panics if `duration` is negative or NaN.
    fn run_steps(
        &self,
        duration: f32,
        step_count: usize,
        step_action: impl FnMut(usize) + 'static,
        on_complete: impl FnOnce() + 'static,
    ) -> TaskHandle;

    /// Report completion fraction every tick over `duration`, then run
    /// `callback` once.
    ///
    /// `progress` receives accumulated/`duration` after the tick's elapsed
    /// time is added: the first report is above 0.0 and the last is at or
    /// above 1.0 (the fraction is not clamped). `callback` runs on the tick
    /// after the final report.
    ///
    /// # Panics
    ///
    /// Panics unless `duration` is strictly positive.
    fn run_over(
        &self,
        duration: f32,
        progress: impl FnMut(f32) + 'static,
        callback: impl FnOnce() + 'static,
    ) -> TaskHandle;

    /// [`run_over`](Self::run_over) with a pause gate: ticks where `paused`
    /// returns true neither accumulate time nor report progress.
    ///
    /// # Panics
    ///
    /// Panics unless `duration` is strictly positive.
    fn run_while_over(
        &self,
        paused: impl FnMut() -> bool + 'static,
        duration: f32,
        progress: impl FnMut(f32) + 'static,
        callback: impl FnOnce() + 'static,
    ) -> TaskHandle;
}

impl ScheduleExt for Scheduler {
    fn always(&self, mut action: impl FnMut() + 'static) -> TaskHandle {
        self.register(RunUntil::new(
            (),
            |_, _| false,
            move |_, _| action(),
            None::<fn()>,
        ))
    }

    fn run_until(
        &self,
        mut pred: impl FnMut() -> bool + 'static,
        mut body: impl FnMut() + 'static,
        on_complete: impl FnOnce() + 'static,
    ) -> TaskHandle {
        self.register(RunUntil::new(
            (),
            move |_, _| pred(),
            move |_, _| body(),
            Some(on_complete),
        ))
    }

    fn run_while_until(
        &self,
        mut paused: impl FnMut() -> bool + 'static,
        mut done: impl FnMut() -> bool + 'static,
        mut body: impl FnMut() + 'static,
        on_complete: impl FnOnce() + 'static,
    ) -> TaskHandle {
        self.register(RunWhileUntil::new(
            (),
            move |_, _| paused(),
            move |_, _| done(),
            move |_, _| body(),
            Some(on_complete),
        ))
    }

    fn wait_then(&self, duration: f32, callback: impl FnOnce() + 'static) -> TaskHandle {
        assert!(duration >= 0.0, "wait_then requires a non-negative duration");
        self.register(RunUntil::new(
            Timer::new(duration),
            |t: &mut Timer, dt| t.advance(dt),
            |_, _| {},
            Some(callback),
        ))
    }

    fn run_when(
        &self,
        mut predicate: impl FnMut() -> bool + 'static,
        action: impl FnOnce() + 'static,
    ) -> TaskHandle {
        self.register(RunUntil::new(
            (),
            move |_, _| predicate(),
            |_, _| {},
            Some(action),
        ))
    }

    fn repeat_every(&self, interval: f32, mut action: impl FnMut() + 'static) -> TaskHandle {
        assert!(interval >= 0.0, "repeat_every requires a non-negative interval");
        self.register(RunUntil::new(
            Timer::new(interval),
            |_, _| false,
            move |t: &mut Timer, dt| {
                if t.advance(dt) {
                    t.reset();
                    action();
                }
            },
            None::<fn()>,
        ))
    }

    fn run_for(
        &self,
        duration: f32,
        mut action: impl FnMut() + 'static,
        callback: impl FnOnce() + 'static,
    ) -> TaskHandle {
        assert!(duration >= 0.0, "run_for requires a non-negative duration");
        self.register(RunUntil::new(
            Timer::new(duration),
            |t: &mut Timer, _| t.finished(),
            move |t, dt| {
                t.advance(dt);
                action();
            },
            Some(callback),
        ))
    }

    fn run_steps(
        &self,
        duration: f32,
        step_count: usize,
        mut step_action: impl FnMut(usize) + 'static,
        on_complete: impl FnOnce() + 'static,
    ) -> TaskHandle {
        assert!(duration >= 0.0, "run_steps requires a non-negative duration");
        if step_count == 0 {
            on_complete();
            return TaskHandle::finished();
        }
        step_action(0);
        let track = StepTrack {
            timer: Timer::new(duration / step_count as f32),
            index: 1,
            count: step_count,
        };
        self.register(RunUntil::new(
            track,
            move |s: &mut StepTrack, dt| {
                if !s.timer.advance(dt) {
                    return false;
                }
                s.timer.reset();
                if s.index == s.count {
                    return true;
                }
                step_action(s.index);
                s.index += 1;
                false
            },
            |_, _| {},
            Some(on_complete),
        ))
    }

    fn run_over(
        &self,
        duration: f32,
        mut progress: impl FnMut(f32) + 'static,
        callback: impl FnOnce() + 'static,
    ) -> TaskHandle {
        assert!(duration > 0.0, "run_over requires a positive duration");
        self.register(RunUntil::new(
            Timer::new(duration),
            |t: &mut Timer, _| t.finished(),
            move |t, dt| {
                t.advance(dt);
                progress(t.progress());
            },
            Some(callback),
        ))
    }

    fn run_while_over(
        &self,
        mut paused: impl FnMut() -> bool + 'static,
        duration: f32,
        mut progress: impl FnMut(f32) + 'static,
        callback: impl FnOnce() + 'static,
    ) -> TaskHandle {
        assert!(duration > 0.0, "run_while_over requires a positive duration");
        self.register(RunWhileUntil::new(
            Timer::new(duration),
            move |_, _| paused(),
            |t: &mut Timer, _| t.finished(),
            move |t, dt| {
                t.advance(dt);
                progress(t.progress());
            },
            Some(callback),
        ))
    }
}
