//! Scheduler: ordered registry of suspended routines advanced once per tick.

use core::cell::{Cell, RefCell};
use core::fmt;
use core::mem;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::handle::{TaskHandle, TaskState};
use crate::routine::{BoxedRoutine, Routine, Step};

/// One registry entry: a root routine plus the state cell its handle shares.
struct Task {
    work: RefCell<Work>,
    state: Rc<Cell<TaskState>>,
}

/// The resumable part of a task. Borrowed only while the task itself is
/// being resumed, so user closures are free to call back into the scheduler.
struct Work {
    root: BoxedRoutine,
    /// Nested routines the root is currently suspended on, deepest last.
    stack: Vec<BoxedRoutine>,
}

impl Work {
    /// Resume the deepest suspended routine once and unwind any completed
    /// delegations. Returns `true` when the root itself completes.
    ///
    /// Delegation is depth-first: a `Delegate` payload is pushed and the
    /// whole task stays suspended for this tick, the nested routine taking
    /// its first step on the next one. A completing nested routine hands
    /// control back to its parent within the same tick, so one external
    /// tick can collapse an arbitrarily deep chain without the outer
    /// routine ever running ahead of it.
    fn advance(&mut self, dt: f32) -> bool {
        loop {
            let step = match self.stack.last_mut() {
                Some(nested) => nested.resume(dt),
                None => self.root.resume(dt),
            };
            match step {
                Step::Suspend => return false,
                Step::Delegate(nested) => {
                    self.stack.push(nested);
                    return false;
                }
                Step::Complete => {
                    if self.stack.pop().is_none() {
                        return true;
                    }
                }
            }
        }
    }
}

#[derive(Default)]
struct Registry {
    active: Vec<Rc<Task>>,
    /// Registered during the current tick; eligible starting the next one.
    pending: Vec<Rc<Task>>,
    delta: f32,
    ticking: bool,
}

impl Registry {
    /// Live (non-cancelled, non-finished) tasks across both lists.
    fn live(&self) -> usize {
        self.active
            .iter()
            .chain(&self.pending)
            .filter(|task| task.state.get() == TaskState::Active)
            .count()
    }
}

/// Resets the in-tick flag even when a routine panics out of `tick`.
struct TickGuard {
    inner: Rc<RefCell<Registry>>,
}

impl Drop for TickGuard {
    fn drop(&mut self) {
        self.inner.borrow_mut().ticking = false;
    }
}

/// Single-threaded cooperative tick scheduler.
///
/// A `Scheduler` is a cheap-to-clone handle; clones share one registry, so
/// a completion callback can capture a clone and chain further behaviors.
/// All registered routines are resumed exactly once per [`tick`], in
/// registration order, with nested delegation resolved depth-first.
///
/// Routines whose predicates never come true simply stay registered; that
/// is permanent suspension by design, not a fault, but a registry that only
/// ever grows is the caller's leak to notice.
///
/// If a routine panics during [`tick`], the panic propagates to the caller:
/// resumption stops, the panicking task and all not-yet-resumed tasks stay
/// registered, and the next [`tick`] resumes them from the front of the
/// registry.
///
/// [`tick`]: Scheduler::tick
#[derive(Clone, Default)]
pub struct Scheduler {
    inner: Rc<RefCell<Registry>>,
}

impl Scheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a routine to the registry.
    ///
    /// The routine is resumed on every subsequent tick until it completes,
    /// is cancelled through the returned handle, or the registry is
    /// cleared. A routine registered from inside a running tick is not
    /// resumed within that tick; it becomes eligible starting the next one.
    pub fn register(&self, routine: impl Routine + 'static) -> TaskHandle {
        let state = Rc::new(Cell::new(TaskState::Active));
        let task = Rc::new(Task {
            work: RefCell::new(Work {
                root: Box::new(routine),
                stack: Vec::new(),
            }),
            state: Rc::clone(&state),
        });

        {
            let mut registry = self.inner.borrow_mut();
            if registry.ticking {
                registry.pending.push(task);
            } else {
                registry.active.push(task);
            }
            trace!(live = registry.live(), "routine registered");
        }
        TaskHandle::new(state)
    }

    /// Advance every registered routine by one step.
    ///
    /// Sets the shared elapsed-time value to `dt`, then resumes each live
    /// task once in registration order, removing tasks that complete or
    /// were cancelled. Nested delegation chains are resolved within the
    /// call (see [`Step::Delegate`]).
    ///
    /// # Panics
    ///
    /// Panics if `dt` is negative (or NaN), or if called from inside a
    /// routine already being resumed by this scheduler. Panics raised by
    /// routines themselves propagate after the registry is put back into a
    /// resumable state.
    pub fn tick(&self, dt: f32) {
        assert!(dt >= 0.0, "tick requires a non-negative elapsed time");
        {
            let mut registry = self.inner.borrow_mut();
            assert!(!registry.ticking, "tick called from inside a tick");
            registry.ticking = true;
            registry.delta = dt;
            let pending = mem::take(&mut registry.pending);
            registry.active.extend(pending);
            trace!(dt, live = registry.live(), "tick");
        }
        let _guard = TickGuard {
            inner: Rc::clone(&self.inner),
        };

        let mut index = 0;
        loop {
            let task = {
                let registry = self.inner.borrow();
                match registry.active.get(index) {
                    Some(task) => Rc::clone(task),
                    None => break,
                }
            };

            let remove = match task.state.get() {
                TaskState::Active => {
                    // No registry borrow is held here: the routine may
                    // reentrantly register, cancel, clear, or inspect.
                    let done = task.work.borrow_mut().advance(dt);
                    if done {
                        task.state.set(TaskState::Finished);
                        trace!("routine finished");
                    }
                    done || task.state.get() == TaskState::Cancelled
                }
                // Cancelled before its turn; drop without resuming.
                _ => true,
            };

            if remove {
                let mut registry = self.inner.borrow_mut();
                // A mid-resume clear() already emptied the slot.
                if registry
                    .active
                    .get(index)
                    .is_some_and(|slot| Rc::ptr_eq(slot, &task))
                {
                    registry.active.remove(index);
                }
            } else {
                index += 1;
            }
        }
    }

    /// Remove every registered routine without resuming it further.
    ///
    /// Completion callbacks are not invoked; outstanding handles observe
    /// [`TaskState::Cancelled`]. Typically called on scene teardown.
    pub fn clear(&self) {
        let (active, pending) = {
            let mut registry = self.inner.borrow_mut();
            (
                mem::take(&mut registry.active),
                mem::take(&mut registry.pending),
            )
        };
        let mut dropped = 0usize;
        for task in active.iter().chain(&pending) {
            if task.state.get() == TaskState::Active {
                task.state.set(TaskState::Cancelled);
                dropped += 1;
            }
        }
        debug!(dropped, "registry cleared");
        // Tasks drop here, after the registry borrow is released; routine
        // destructors may themselves call back into the scheduler.
    }

    /// Number of live registered routines, tasks registered mid-tick
    /// included.
    #[must_use]
    pub fn count(&self) -> usize {
        self.inner.borrow().live()
    }

    /// Whether any routine is registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.count() > 0
    }

    /// Elapsed time of the most recent tick, `0.0` before the first.
    ///
    /// Within a tick this is the value every routine is observing; between
    /// ticks it goes stale rather than resetting.
    #[must_use]
    pub fn delta_time(&self) -> f32 {
        self.inner.borrow().delta
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.inner.borrow();
        f.debug_struct("Scheduler")
            .field("active", &registry.active.len())
            .field("pending", &registry.pending.len())
            .field("delta", &registry.delta)
            .finish()
    }
}

// ==================== Tests ====================
