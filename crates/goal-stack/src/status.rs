//! Lifecycle status shared by all goals.

/// The lifecycle state of a goal.
///
/// # Tick-driven Semantics
///
/// A goal is created `Inactive`, activated exactly once, executed once per
/// tick while `Active`, and terminated exactly once when it leaves `Active`.
/// `Completed` and `Failed` are terminal: a parent replaces a terminal goal
/// with a fresh instance instead of re-activating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoalStatus {
    /// Created but not yet activated.
    Inactive,

    /// Activated and executing every tick.
    Active,

    /// Finished successfully. Terminal.
    Completed,

    /// Could not be completed (failed precondition or runtime failure).
    /// Terminal; the parent reselects a tactic on its next execute.
    Failed,
}

impl GoalStatus {
    /// Returns `true` if this goal is currently executing.
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, GoalStatus::Active)
    }

    /// Returns `true` if this goal has not been activated yet.
    #[inline]
    pub fn is_inactive(self) -> bool {
        matches!(self, GoalStatus::Inactive)
    }

    /// Returns `true` for `Completed` or `Failed`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, GoalStatus::Completed | GoalStatus::Failed)
    }

    /// Returns `true` if this goal finished successfully.
    #[inline]
    pub fn is_completed(self) -> bool {
        matches!(self, GoalStatus::Completed)
    }

    /// Returns `true` if this goal failed.
    #[inline]
    pub fn is_failed(self) -> bool {
        matches!(self, GoalStatus::Failed)
    }
}
