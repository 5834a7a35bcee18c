//! Per-task handles for observing and cancelling individual registrations.

use core::cell::Cell;
use std::rc::Rc;

/// Lifecycle state of one registered task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Registered and awaiting its next resumption.
    Active,
    /// Completed normally; any completion callback has already run.
    Finished,
    /// Removed without completing, by [`TaskHandle::cancel`] or
    /// [`Scheduler::clear`](crate::Scheduler::clear).
    Cancelled,
}

/// Caller-side view of one registered task.
///
/// Returned by [`Scheduler::register`](crate::Scheduler::register) and by
/// every behavior entry point built on it. Handles are cheap to clone and
/// inert if ignored: dropping one has no effect on the task.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    state: Rc<Cell<TaskState>>,
}

impl TaskHandle {
    pub(crate) fn new(state: Rc<Cell<TaskState>>) -> Self {
        Self { state }
    }

    /// Handle for a task that completed at call time and was never
    /// registered.
    #[must_use]
    pub fn finished() -> Self {
        Self {
            state: Rc::new(Cell::new(TaskState::Finished)),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> TaskState {
        self.state.get()
    }

    /// Whether the task is still registered and will be resumed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.get() == TaskState::Active
    }

    /// Whether the task completed normally.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.get() == TaskState::Finished
    }

    /// Whether the task was removed before completing.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.state.get() == TaskState::Cancelled
    }

    /// Request removal without further resumption.
    ///
    /// The scheduler drops a cancelled task without invoking any of its
    /// callbacks. A task cancelled mid-tick before its turn is not resumed
    /// even within that tick. Returns `false` if the task had already
    /// finished or been cancelled.
    pub fn cancel(&self) -> bool {
        if self.state.get() == TaskState::Active {
            self.state.set(TaskState::Cancelled);
            true
        } else {
            false
        }
    }
}
