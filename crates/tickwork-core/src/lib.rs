#![allow(clippy::float_cmp)]
#![allow(clippy::missing_fields_in_debug)]

//! Tickwork core - single-threaded cooperative tick scheduler
//!
//! A [`Scheduler`] owns a registry of suspended routines and advances every
//! one of them exactly once per [`tick`](Scheduler::tick) call from the host,
//! resolving nested delegation chains depth-first within the tick.
//!
//! # Key Concepts
//!
//! - **Routine**: a resumable unit of cooperative work; each resumption
//!   reports [`Step::Suspend`], [`Step::Delegate`], or [`Step::Complete`]
//! - **Tick**: one externally-triggered advance of the scheduler, carrying
//!   the elapsed time since the previous tick
//! - **Delegation**: a routine suspending on a nested routine; the nested
//!   chain is driven to completion before the outer routine takes another
//!   step
//! - **Registry**: the live collection of routines awaiting resumption,
//!   resumed in registration order
//!
//! # Example
//!
//! ```
//! use tickwork_core::{Scheduler, Step};
//!
//! let sched = Scheduler::new();
//! let mut remaining = 3u32;
//! sched.register(move |_dt: f32| {
//!     if remaining == 0 {
//!         Step::Complete
//!     } else {
//!         remaining -= 1;
//!         Step::Suspend
//!     }
//! });
//!
//! while sched.is_active() {
//!     sched.tick(1.0 / 60.0);
//! }
//! ```

mod handle;
mod routine;
mod scheduler;

pub use handle::{TaskHandle, TaskState};
pub use routine::{BoxedRoutine, Routine, Step};
pub use scheduler::Scheduler;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{BoxedRoutine, Routine, Scheduler, Step, TaskHandle, TaskState};
}
