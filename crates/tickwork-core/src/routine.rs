//! Resumable routines and the tagged result of one resumption step.

use core::fmt;

/// A resumable unit of cooperative work.
///
/// A routine is resumed at most once per scheduler tick and reports what to
/// do next through [`Step`]. `dt` is the elapsed time the host passed to the
/// tick in progress; every routine resumed within one tick observes the same
/// value.
///
/// Closures of shape `FnMut(f32) -> Step` are routines via the blanket impl,
/// so ad-hoc routines need no named type.
pub trait Routine {
    /// Advance the routine by one step.
    fn resume(&mut self, dt: f32) -> Step;
}

impl<F> Routine for F
where
    F: FnMut(f32) -> Step,
{
    fn resume(&mut self, dt: f32) -> Step {
        self(dt)
    }
}

/// Boxed routine, as stored in the scheduler registry and in delegation
/// payloads.
pub type BoxedRoutine = Box<dyn Routine>;

/// An already-boxed routine can be registered or delegated to directly.
impl Routine for BoxedRoutine {
    fn resume(&mut self, dt: f32) -> Step {
        (**self).resume(dt)
    }
}

/// Result of resuming a routine for one tick.
pub enum Step {
    /// Still suspended; resume again next tick.
    Suspend,
    /// Suspend on a nested routine. The scheduler drives the nested routine
    /// on subsequent ticks and resumes this one, in the same tick, once the
    /// nested chain completes.
    Delegate(BoxedRoutine),
    /// Finished; the scheduler removes the routine within the current tick.
    Complete,
}

impl Step {
    /// Delegate to a nested routine, boxing it here rather than at every
    /// call site.
    pub fn delegate(routine: impl Routine + 'static) -> Self {
        Self::Delegate(Box::new(routine))
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Suspend => f.write_str("Suspend"),
            Self::Delegate(_) => f.write_str("Delegate(..)"),
            Self::Complete => f.write_str("Complete"),
        }
    }
}
