//! Ordered child storage for composite goals.
//!
//! A composite goal (a tactic or a campaign) owns its children exclusively
//! through a [`SubgoalQueue`]. The queue drives the front child one tick at
//! a time and guarantees the lifecycle contract: a child that reaches a
//! terminal status is terminated exactly once and dropped, and clearing the
//! queue terminates whatever is still running before dropping everything.

use crate::{Goal, GoalStatus, process};

/// Ordered queue of child goals owned by a composite.
///
/// # Semantics
///
/// - The **front** child is the active one; at most one child executes per
///   tick (the model allows a queue of pending followers behind it).
/// - A child that returns `Completed` or `Failed` is terminated and popped;
///   the next child (if any) activates on the following call.
/// - [`clear`](SubgoalQueue::clear) terminates the running child and drops
///   all children. Afterwards `has_subgoals()` is `false`.
pub struct SubgoalQueue<C> {
    children: Vec<Box<dyn Goal<C>>>,
}

impl<C> SubgoalQueue<C> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    /// Installs a child at the front, making it the next to execute.
    ///
    /// This is the normal way a composite installs a freshly chosen
    /// sub-tactic.
    pub fn push_front(&mut self, child: Box<dyn Goal<C>>) {
        self.children.insert(0, child);
    }

    /// Appends a child behind any pending ones.
    pub fn push_back(&mut self, child: Box<dyn Goal<C>>) {
        self.children.push(child);
    }

    /// Returns `true` while any child remains.
    pub fn has_subgoals(&self) -> bool {
        !self.children.is_empty()
    }

    /// Name of the front child, if any. For logging and debug overlays.
    pub fn front_name(&self) -> Option<&'static str> {
        self.children.first().map(|c| c.name())
    }

    /// Status of the front child, if any.
    pub fn front_status(&self) -> Option<GoalStatus> {
        self.children.first().map(|c| c.status())
    }

    /// Drives the front child for one tick.
    ///
    /// Returns the status the front child reported, or `None` if the queue
    /// is empty. A child reporting a terminal status is terminated and
    /// popped before returning, so the caller sees the terminal status
    /// exactly once.
    pub fn process_front(&mut self, ctx: &mut C) -> Option<GoalStatus> {
        let front = self.children.first_mut()?;
        let status = process(front, ctx);

        if status.is_terminal() {
            front.terminate(ctx);
            self.children.remove(0);
        }

        Some(status)
    }

    /// Terminates the running child (if any) and drops all children.
    pub fn clear(&mut self, ctx: &mut C) {
        for child in &mut self.children {
            if child.status().is_active() {
                child.terminate(ctx);
            }
        }
        self.children.clear();
    }
}

impl<C> Default for SubgoalQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestContext {
        executed: Vec<&'static str>,
        terminated: Vec<&'static str>,
    }

    impl TestContext {
        fn new() -> Self {
            Self {
                executed: Vec::new(),
                terminated: Vec::new(),
            }
        }
    }

    struct Leaf {
        name: &'static str,
        ticks_to_complete: u32,
        fail: bool,
        status: GoalStatus,
    }

    impl Leaf {
        fn completing(name: &'static str, ticks: u32) -> Self {
            Self {
                name,
                ticks_to_complete: ticks,
                fail: false,
                status: GoalStatus::Inactive,
            }
        }

        fn failing(name: &'static str) -> Self {
            Self {
                name,
                ticks_to_complete: 0,
                fail: true,
                status: GoalStatus::Inactive,
            }
        }
    }

    impl Goal<TestContext> for Leaf {
        fn activate(&mut self, _ctx: &mut TestContext) {
            self.status = if self.fail {
                GoalStatus::Failed
            } else {
                GoalStatus::Active
            };
        }

        fn execute(&mut self, ctx: &mut TestContext) -> GoalStatus {
            ctx.executed.push(self.name);
            self.ticks_to_complete -= 1;
            if self.ticks_to_complete == 0 {
                self.status = GoalStatus::Completed;
            }
            self.status
        }

        fn terminate(&mut self, ctx: &mut TestContext) {
            ctx.terminated.push(self.name);
        }

        fn status(&self) -> GoalStatus {
            self.status
        }

        fn name(&self) -> &'static str {
            self.name
        }
    }

    #[test]
    fn front_child_runs_to_completion_then_pops() {
        let mut ctx = TestContext::new();
        let mut queue: SubgoalQueue<TestContext> = SubgoalQueue::new();
        queue.push_back(Box::new(Leaf::completing("a", 2)));

        assert_eq!(queue.process_front(&mut ctx), Some(GoalStatus::Active));
        assert_eq!(queue.process_front(&mut ctx), Some(GoalStatus::Completed));
        assert!(!queue.has_subgoals());
        assert_eq!(ctx.terminated, vec!["a"]);
    }

    #[test]
    fn failed_activation_is_terminated_and_popped() {
        let mut ctx = TestContext::new();
        let mut queue: SubgoalQueue<TestContext> = SubgoalQueue::new();
        queue.push_back(Box::new(Leaf::failing("bad")));

        assert_eq!(queue.process_front(&mut ctx), Some(GoalStatus::Failed));
        assert!(!queue.has_subgoals());
        // Never executed, but cleanup still ran once
        assert!(ctx.executed.is_empty());
        assert_eq!(ctx.terminated, vec!["bad"]);
    }

    #[test]
    fn push_front_preempts_pending_children() {
        let mut ctx = TestContext::new();
        let mut queue: SubgoalQueue<TestContext> = SubgoalQueue::new();
        queue.push_back(Box::new(Leaf::completing("later", 1)));
        queue.push_front(Box::new(Leaf::completing("now", 1)));

        queue.process_front(&mut ctx);
        assert_eq!(ctx.executed, vec!["now"]);
    }

    #[test]
    fn clear_terminates_active_child_and_empties_queue() {
        let mut ctx = TestContext::new();
        let mut queue: SubgoalQueue<TestContext> = SubgoalQueue::new();
        queue.push_back(Box::new(Leaf::completing("a", 10)));
        queue.push_back(Box::new(Leaf::completing("b", 10)));

        queue.process_front(&mut ctx); // "a" becomes Active
        queue.clear(&mut ctx);

        assert!(!queue.has_subgoals());
        // Only the active child needed cleanup; "b" never started
        assert_eq!(ctx.terminated, vec!["a"]);
    }
}
