//! Hysteresis for strategic goal switching.

use agent_core::TickTime;

/// Tracks what strategic goal is currently committed and refuses lateral
/// swaps that do not buy a real improvement.
///
/// Without this, two evaluators scoring within noise of each other would
/// trade the top-level slot back and forth, restarting their goals each
/// time.
#[derive(Debug, Default)]
pub struct CommitmentManager {
    current: Option<Commitment>,
}

#[derive(Debug, Clone, Copy)]
struct Commitment {
    name: &'static str,
    score: f32,
    installed_at_ms: u64,
}

impl CommitmentManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the committed goal, if any.
    pub fn current_name(&self) -> Option<&'static str> {
        self.current.map(|c| c.name)
    }

    /// Decides whether `candidate` may replace the committed goal.
    ///
    /// Always yes when nothing is committed or the candidate is the same
    /// type (the caller treats that as a no-op, not a reinstall).
    /// Otherwise the candidate must beat the committed goal's tracked
    /// score by the improvement margin.
    pub fn evaluate_switch(
        &mut self,
        candidate: &'static str,
        score: f32,
        min_improvement: f32,
    ) -> bool {
        match self.current {
            None => true,
            Some(c) if c.name == candidate => {
                // Same goal keeps running; refresh the tracked score so a
                // fading commitment can actually be beaten later.
                self.current = Some(Commitment { score, ..c });
                true
            }
            Some(c) => {
                let allowed = score > c.score + min_improvement;
                if !allowed {
                    tracing::debug!(
                        committed = c.name,
                        candidate,
                        committed_score = c.score,
                        score,
                        "strategic switch refused"
                    );
                }
                allowed
            }
        }
    }

    /// Records a newly installed goal.
    pub fn commit(&mut self, name: &'static str, score: f32, time: TickTime) {
        self.current = Some(Commitment {
            name,
            score,
            installed_at_ms: time.now_ms,
        });
    }

    /// Milliseconds the current commitment has been held.
    pub fn held_for(&self, time: TickTime) -> Option<u64> {
        self.current
            .map(|c| time.now_ms.saturating_sub(c.installed_at_ms))
    }

    /// Drops the commitment (goal finished or agent respawned).
    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: TickTime = TickTime { tick: 5, now_ms: 500 };

    #[test]
    fn first_commitment_is_free() {
        let mut mgr = CommitmentManager::new();
        assert!(mgr.evaluate_switch("explore", 0.25, 0.1));
    }

    #[test]
    fn lateral_swap_needs_the_margin() {
        let mut mgr = CommitmentManager::new();
        mgr.commit("explore", 0.25, T);

        assert!(!mgr.evaluate_switch("eliminate-enemy", 0.30, 0.1));
        assert!(mgr.evaluate_switch("eliminate-enemy", 0.40, 0.1));
    }

    #[test]
    fn same_goal_is_always_allowed_and_refreshes_score() {
        let mut mgr = CommitmentManager::new();
        mgr.commit("eliminate-enemy", 0.9, T);

        // The campaign's own score decays; after refresh a modest
        // challenger can win.
        assert!(mgr.evaluate_switch("eliminate-enemy", 0.2, 0.1));
        assert!(mgr.evaluate_switch("explore", 0.35, 0.1));
    }

    #[test]
    fn clear_drops_the_commitment() {
        let mut mgr = CommitmentManager::new();
        mgr.commit("explore", 0.25, T);
        mgr.clear();
        assert_eq!(mgr.current_name(), None);
        assert_eq!(mgr.held_for(T), None);
    }
}
