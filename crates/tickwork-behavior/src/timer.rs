//! Accumulating timer state shared by the timed combinators.

/// Running elapsed-time accumulator with a target.
///
/// The accumulator is a plain sum of per-tick elapsed times; reaching the
/// target is tested with `>=`. Progress is elapsed over target and is not
/// clamped, so it can exceed `1.0` on the tick that crosses the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    elapsed: f32,
    target: f32,
}

impl Timer {
    /// Timer counting from zero toward `target`.
    #[must_use]
    pub const fn new(target: f32) -> Self {
        Self {
            elapsed: 0.0,
            target,
        }
    }

    /// Add one tick's elapsed time and report whether the target is
    /// reached.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.finished()
    }

    /// Whether the accumulated time has reached the target.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.elapsed >= self.target
    }

    /// Restart the accumulation from zero, discarding any overshoot.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Unclamped completion fraction, `elapsed / target`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        debug_assert!(self.target > 0.0, "progress of a zero-length timer");
        self.elapsed / self.target
    }

    /// Accumulated elapsed time.
    #[must_use]
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Target duration.
    #[must_use]
    pub const fn target(&self) -> f32 {
        self.target
    }
}
