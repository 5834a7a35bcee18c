#![allow(clippy::float_cmp)]

//! Tickwork behavior - combinators over the tick scheduler
//!
//! Builds user-facing behaviors from two primitive suspension operators:
//! [`RunUntil`] (loop until a predicate) and [`RunWhileUntil`] (the same
//! with a pause gate). The [`ScheduleExt`] extension trait puts the derived
//! combinators on every [`Scheduler`](tickwork_core::Scheduler) clone:
//! fire-once waits, repeating intervals, fixed-duration loops, stepped
//! sequences, and progress reporting.
//!
//! # Example
//!
//! ```
//! use tickwork_behavior::prelude::*;
//!
//! let sched = Scheduler::new();
//! let beats = std::rc::Rc::new(std::cell::Cell::new(0u32));
//!
//! let counter = std::rc::Rc::clone(&beats);
//! sched.repeat_every(0.5, move || counter.set(counter.get() + 1));
//!
//! for _ in 0..8 {
//!     sched.tick(0.25);
//! }
//! assert_eq!(beats.get(), 4);
//! ```

mod ext;
mod primitive;
mod timer;

pub use ext::ScheduleExt;
pub use primitive::{RunUntil, RunWhileUntil};
pub use timer::Timer;

/// Prelude for convenient imports
pub mod prelude {
    pub use tickwork_core::prelude::*;

    pub use crate::{RunUntil, RunWhileUntil, ScheduleExt, Timer};
}
