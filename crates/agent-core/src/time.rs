//! Explicit simulation time.
//!
//! The decision core never reads a wall clock. The driver loop advances a
//! [`TickTime`] snapshot once per frame and hands it to the planner, which
//! keeps every timer (dwell windows, grace periods, linger phases) as plain
//! millisecond arithmetic against this snapshot. That makes every decision
//! replayable in tests without real time.

/// A monotonic snapshot of simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickTime {
    /// Frame counter, incremented once per driver iteration.
    pub tick: u64,

    /// Milliseconds since simulation start.
    pub now_ms: u64,
}

impl TickTime {
    pub const fn new(tick: u64, now_ms: u64) -> Self {
        Self { tick, now_ms }
    }

    /// Milliseconds elapsed since `start_ms` (saturating).
    pub const fn elapsed_since(self, start_ms: u64) -> u64 {
        self.now_ms.saturating_sub(start_ms)
    }

    /// Returns the snapshot advanced by one tick and `dt_ms` milliseconds.
    pub const fn advanced(self, dt_ms: u64) -> Self {
        Self {
            tick: self.tick + 1,
            now_ms: self.now_ms + dt_ms,
        }
    }

    /// Mixes a call-site salt with the current tick into an RNG seed.
    ///
    /// Distinct salts keep independent decision sites (maneuver choice,
    /// pause scheduling) decorrelated within the same tick.
    pub const fn seed(self, salt: u64) -> u64 {
        self.tick ^ salt.rotate_left(32)
    }
}
