//! One-way sync from the planner's committed activity to the gate.
//!
//! The goal tree decides what the agent is doing; the discrete state
//! machine reports it. The reflector pushes the committed activity into
//! the gate as a goal-driven transition after the tree settles each tick.
//! It never reads the gate back into the planner.

use agent_core::{AgentState, BehaviorKind, TickTime};

use crate::gate::{TransitionGate, TransitionOptions};

/// Pushes the planner's activity into the discrete state machine.
#[derive(Debug, Default)]
pub struct BehaviorReflector;

impl BehaviorReflector {
    /// Reflects `activity` into the gate when it differs from the gate's
    /// current state. Returns whether a transition was accepted.
    pub fn reflect(
        gate: &mut TransitionGate,
        activity: BehaviorKind,
        agent: &AgentState,
        time: TickTime,
    ) -> bool {
        if gate.current_state() == activity {
            return false;
        }
        gate.change_to(activity, agent, TransitionOptions::goal_driven(), time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlannerConfig;

    #[test]
    fn reflects_only_on_difference() {
        let cfg = PlannerConfig::default();
        let mut gate = TransitionGate::new(cfg, TickTime::default());
        let agent = AgentState::new(100.0);
        let t = TickTime { tick: 1, now_ms: 200 };

        // Gate already in Patrol: nothing to push.
        assert!(!BehaviorReflector::reflect(&mut gate, BehaviorKind::Patrol, &agent, t));

        assert!(BehaviorReflector::reflect(&mut gate, BehaviorKind::Combat, &agent, t));
        assert_eq!(gate.current_state(), BehaviorKind::Combat);
    }
}
