//! Transition gating for the discrete behavior state.
//!
//! The scorer says where the agent *wants* to be; the gate says whether it
//! may go there *now*. It enforces debounce, minimum dwell, and a ping-pong
//! guard over a short rolling history, with a fixed list of survival
//! exceptions that bypass everything. A rejection is a transient refusal,
//! not an error; callers simply try again on a later tick.

use std::collections::VecDeque;

use agent_core::{AgentState, BehaviorKind, TickTime};

use crate::PlannerConfig;

/// One accepted state change, kept in the rolling history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StateChange {
    pub from: BehaviorKind,
    pub to: BehaviorKind,
    pub tick: u64,
}

/// Flags modifying how a transition request is judged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionOptions {
    /// The request comes from the planner's committed goal (reflector
    /// push). Goal-driven changes skip the dwell requirement.
    pub goal_driven: bool,

    /// Emergency bypass: skip every check. Used for respawn and scripted
    /// resets.
    pub hard_reset: bool,
}

impl TransitionOptions {
    pub const fn goal_driven() -> Self {
        Self { goal_driven: true, hard_reset: false }
    }
}

/// Why a transition request was refused this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionRejection {
    #[error("same transition already accepted this tick")]
    DuplicateThisTick,

    #[error("same-state re-entry inside the debounce window")]
    ReentryDebounce,

    #[error("minimum dwell not served ({remaining_ms} ms remaining)")]
    DwellNotElapsed { remaining_ms: u64 },

    #[error("transition pair is oscillating across recent ticks")]
    PingPong,
}

/// Bookkeeping behind the gate: current state, when it was entered, the
/// last accepted change, and the capped change history.
#[derive(Debug, Clone)]
pub struct TransitionRecord {
    pub current: BehaviorKind,
    pub entered_at_ms: u64,
    pub entered_at_tick: u64,
    pub last_accepted: Option<StateChange>,
    history: VecDeque<StateChange>,
}

impl TransitionRecord {
    fn new(time: TickTime) -> Self {
        Self {
            current: BehaviorKind::Patrol,
            entered_at_ms: time.now_ms,
            entered_at_tick: time.tick,
            last_accepted: None,
            history: VecDeque::new(),
        }
    }

    /// Milliseconds spent in the current state.
    pub fn time_in_state(&self, time: TickTime) -> u64 {
        time.now_ms.saturating_sub(self.entered_at_ms)
    }

    pub fn history(&self) -> impl Iterator<Item = &StateChange> {
        self.history.iter()
    }

    fn commit(&mut self, to: BehaviorKind, time: TickTime, window_ticks: u64) {
        let change = StateChange { from: self.current, to, tick: time.tick };
        self.history.push_back(change);
        while let Some(front) = self.history.front() {
            if time.tick.saturating_sub(front.tick) >= window_ticks {
                self.history.pop_front();
            } else {
                break;
            }
        }
        self.last_accepted = Some(change);
        self.current = to;
        self.entered_at_ms = time.now_ms;
        self.entered_at_tick = time.tick;
    }

    /// True when a change between exactly this pair of states (either
    /// direction) occurred during `tick`.
    fn pair_changed_on_tick(&self, a: BehaviorKind, b: BehaviorKind, tick: u64) -> bool {
        self.history.iter().any(|c| {
            c.tick == tick && ((c.from == a && c.to == b) || (c.from == b && c.to == a))
        })
    }

    /// Most recent distinct ticks in the history still inside the window
    /// ending at `now_tick`, newest first, at most `n`.
    ///
    /// The history is only pruned on commit, so a quiet gate may still be
    /// holding changes far older than the window; age-filter here too.
    fn recent_ticks(&self, n: usize, now_tick: u64, window_ticks: u64) -> Vec<u64> {
        let mut ticks = Vec::with_capacity(n);
        for change in self.history.iter().rev() {
            if now_tick.saturating_sub(change.tick) >= window_ticks {
                break;
            }
            if !ticks.contains(&change.tick) {
                ticks.push(change.tick);
                if ticks.len() == n {
                    break;
                }
            }
        }
        ticks
    }
}

/// Debounces and rate-limits changes to the agent's discrete state.
pub struct TransitionGate {
    cfg: PlannerConfig,
    record: TransitionRecord,
}

impl TransitionGate {
    pub fn new(cfg: PlannerConfig, time: TickTime) -> Self {
        Self { cfg, record: TransitionRecord::new(time) }
    }

    pub fn current_state(&self) -> BehaviorKind {
        self.record.current
    }

    pub fn record(&self) -> &TransitionRecord {
        &self.record
    }

    pub fn time_in_state(&self, time: TickTime) -> u64 {
        self.record.time_in_state(time)
    }

    /// Judges a transition request without committing it.
    ///
    /// Check order: survival exceptions, debounce, minimum dwell,
    /// ping-pong guard. The first failing check wins.
    pub fn can_change_to(
        &self,
        target: BehaviorKind,
        agent: &AgentState,
        opts: TransitionOptions,
        time: TickTime,
    ) -> Result<(), TransitionRejection> {
        if self.is_exception(target, agent, opts, time) {
            return Ok(());
        }

        let elapsed = self.record.time_in_state(time);

        // Debounce: never accept the same transition twice in one tick,
        // and never thrash re-entry of the current state.
        let duplicate = self.record.history.iter().any(|c| {
            c.tick == time.tick && c.from == self.record.current && c.to == target
        });
        if duplicate {
            return Err(TransitionRejection::DuplicateThisTick);
        }
        if target == self.record.current && elapsed < self.cfg.same_state_debounce_ms {
            return Err(TransitionRejection::ReentryDebounce);
        }

        if elapsed < self.cfg.min_dwell_ms && !self.dwell_waived(target, opts, elapsed) {
            return Err(TransitionRejection::DwellNotElapsed {
                remaining_ms: self.cfg.min_dwell_ms - elapsed,
            });
        }

        if self.is_ping_pong(target, time) {
            return Err(TransitionRejection::PingPong);
        }

        Ok(())
    }

    /// Judges and, on success, commits. Returns whether the change took.
    pub fn change_to(
        &mut self,
        target: BehaviorKind,
        agent: &AgentState,
        opts: TransitionOptions,
        time: TickTime,
    ) -> bool {
        match self.can_change_to(target, agent, opts, time) {
            Ok(()) => {
                tracing::debug!(
                    from = self.record.current.as_str(),
                    to = target.as_str(),
                    tick = time.tick,
                    goal_driven = opts.goal_driven,
                    "state transition accepted"
                );
                self.record.commit(target, time, self.cfg.history_window_ticks);
                true
            }
            Err(rejection) => {
                tracing::debug!(
                    from = self.record.current.as_str(),
                    to = target.as_str(),
                    tick = time.tick,
                    %rejection,
                    "state transition rejected"
                );
                false
            }
        }
    }

    /// Commits unconditionally, bypassing every check. `reason` is logged.
    pub fn force_change(&mut self, target: BehaviorKind, reason: &'static str, time: TickTime) {
        tracing::debug!(
            from = self.record.current.as_str(),
            to = target.as_str(),
            reason,
            "state transition forced"
        );
        self.record.commit(target, time, self.cfg.history_window_ticks);
    }

    /// Resets all gating state for respawn.
    pub fn clear(&mut self, time: TickTime) {
        self.record = TransitionRecord::new(time);
    }

    fn is_exception(
        &self,
        target: BehaviorKind,
        agent: &AgentState,
        opts: TransitionOptions,
        time: TickTime,
    ) -> bool {
        if opts.hard_reset || target == BehaviorKind::Death || agent.is_dead() {
            return true;
        }
        let ratio = agent.health_ratio();
        if ratio <= self.cfg.critical_health_ratio {
            return true;
        }
        ratio <= self.cfg.low_health_ratio
            && self.record.time_in_state(time) >= self.cfg.low_health_override_delay_ms
    }

    fn dwell_waived(&self, target: BehaviorKind, opts: TransitionOptions, elapsed: u64) -> bool {
        if opts.goal_driven {
            return true;
        }
        // Resource runs may bail early toward a fight they can no longer
        // avoid, but only after a minimum investment in the run.
        self.record.current.is_resource_seek()
            && matches!(target, BehaviorKind::Combat | BehaviorKind::Death)
            && elapsed >= self.cfg.resource_seek_early_exit_ms
    }

    fn is_ping_pong(&self, target: BehaviorKind, time: TickTime) -> bool {
        let current = self.record.current;
        if target == current {
            return false;
        }
        let ticks = self.record.recent_ticks(
            self.cfg.ping_pong_span_ticks,
            time.tick,
            self.cfg.history_window_ticks,
        );
        let hits = ticks
            .iter()
            .filter(|&&tick| self.record.pair_changed_on_tick(current, target, tick))
            .count();
        hits >= self.cfg.ping_pong_min_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> AgentState {
        AgentState::new(100.0)
    }

    fn time(tick: u64, now_ms: u64) -> TickTime {
        TickTime { tick, now_ms }
    }

    #[test]
    fn dwell_blocks_early_switch() {
        let cfg = PlannerConfig::default();
        let mut gate = TransitionGate::new(cfg, time(0, 0));
        let agent = agent();

        assert!(gate.change_to(BehaviorKind::Alert, &agent, TransitionOptions::goal_driven(), time(1, 200)));
        // 400 ms into Alert: dwell (1500 ms) not served.
        let verdict = gate.can_change_to(
            BehaviorKind::Patrol,
            &agent,
            TransitionOptions::default(),
            time(5, 600),
        );
        assert!(matches!(verdict, Err(TransitionRejection::DwellNotElapsed { .. })));

        // Past the dwell it goes through.
        assert!(gate.change_to(BehaviorKind::Patrol, &agent, TransitionOptions::default(), time(20, 2000)));
    }

    #[test]
    fn goal_driven_waives_dwell() {
        let cfg = PlannerConfig::default();
        let mut gate = TransitionGate::new(cfg, time(0, 0));
        let agent = agent();

        assert!(gate.change_to(BehaviorKind::Alert, &agent, TransitionOptions::goal_driven(), time(1, 200)));
        assert!(gate.change_to(BehaviorKind::Combat, &agent, TransitionOptions::goal_driven(), time(2, 300)));
    }

    #[test]
    fn duplicate_transition_same_tick_is_debounced() {
        let cfg = PlannerConfig::default();
        let mut gate = TransitionGate::new(cfg, time(0, 0));
        let agent = agent();

        let opts = TransitionOptions::goal_driven();
        assert!(gate.change_to(BehaviorKind::Combat, &agent, opts, time(3, 300)));
        assert!(gate.change_to(BehaviorKind::Patrol, &agent, opts, time(3, 300)));

        // Patrol -> Combat was already accepted on this tick.
        let verdict = gate.can_change_to(BehaviorKind::Combat, &agent, opts, time(3, 300));
        assert_eq!(verdict, Err(TransitionRejection::DuplicateThisTick));
    }

    #[test]
    fn same_state_reentry_is_debounced() {
        let cfg = PlannerConfig::default();
        let mut gate = TransitionGate::new(cfg, time(0, 0));
        let agent = agent();

        assert!(gate.change_to(BehaviorKind::Alert, &agent, TransitionOptions::goal_driven(), time(1, 100)));
        let verdict = gate.can_change_to(
            BehaviorKind::Alert,
            &agent,
            TransitionOptions::goal_driven(),
            time(2, 150),
        );
        assert_eq!(verdict, Err(TransitionRejection::ReentryDebounce));
    }

    #[test]
    fn ping_pong_pair_is_rejected() {
        let cfg = PlannerConfig::default();
        let mut gate = TransitionGate::new(cfg, time(0, 0));
        let agent = agent();
        let opts = TransitionOptions::goal_driven();

        assert!(gate.change_to(BehaviorKind::Combat, &agent, opts, time(10, 1000)));
        assert!(gate.change_to(BehaviorKind::Alert, &agent, opts, time(11, 1100)));
        assert!(gate.change_to(BehaviorKind::Combat, &agent, opts, time(12, 1200)));

        // The Combat<->Alert pair flipped on two of the last three ticks.
        let verdict = gate.can_change_to(BehaviorKind::Alert, &agent, opts, time(12, 1200));
        assert_eq!(verdict, Err(TransitionRejection::PingPong));
    }

    #[test]
    fn ping_pong_guard_forgets_old_flaps() {
        let cfg = PlannerConfig::default();
        let mut gate = TransitionGate::new(cfg, time(0, 0));
        let agent = agent();
        let opts = TransitionOptions::goal_driven();

        assert!(gate.change_to(BehaviorKind::Combat, &agent, opts, time(1, 100)));
        assert!(gate.change_to(BehaviorKind::Alert, &agent, opts, time(2, 200)));
        assert!(gate.change_to(BehaviorKind::Combat, &agent, opts, time(3, 300)));
        assert_eq!(
            gate.can_change_to(BehaviorKind::Alert, &agent, opts, time(3, 300)),
            Err(TransitionRejection::PingPong)
        );

        // No commits since the flap: the stale pair must age out of the
        // window instead of rejecting forever.
        let later = time(100, 10_000);
        assert_eq!(gate.can_change_to(BehaviorKind::Alert, &agent, opts, later), Ok(()));
        assert_eq!(
            gate.can_change_to(BehaviorKind::Alert, &agent, TransitionOptions::default(), later),
            Ok(())
        );
    }

    #[test]
    fn critical_health_bypasses_everything() {
        let cfg = PlannerConfig::default();
        let mut gate = TransitionGate::new(cfg, time(0, 0));
        let mut agent = agent();

        assert!(gate.change_to(BehaviorKind::Combat, &agent, TransitionOptions::goal_driven(), time(1, 100)));

        agent.health = 10.0;
        // 50 ms into Combat, dwell nowhere near served, still allowed.
        assert!(gate.change_to(BehaviorKind::Flee, &agent, TransitionOptions::default(), time(2, 150)));
    }

    #[test]
    fn low_health_bypass_needs_its_delay() {
        let cfg = PlannerConfig::default();
        let mut gate = TransitionGate::new(cfg, time(0, 0));
        let mut agent = agent();
        agent.health = 25.0; // low but above critical

        assert!(gate.change_to(BehaviorKind::Combat, &agent, TransitionOptions::goal_driven(), time(1, 100)));

        let early = gate.can_change_to(BehaviorKind::Flee, &agent, TransitionOptions::default(), time(2, 400));
        assert!(early.is_err());

        let late = gate.can_change_to(BehaviorKind::Flee, &agent, TransitionOptions::default(), time(10, 1000));
        assert_eq!(late, Ok(()));
    }

    #[test]
    fn resource_seek_can_exit_early_toward_combat() {
        let cfg = PlannerConfig::default();
        let mut gate = TransitionGate::new(cfg, time(0, 0));
        let agent = agent();

        assert!(gate.change_to(BehaviorKind::SeekAmmo, &agent, TransitionOptions::goal_driven(), time(1, 100)));

        // 200 ms in: below the early-exit investment, rejected.
        let early = gate.can_change_to(BehaviorKind::Combat, &agent, TransitionOptions::default(), time(3, 300));
        assert!(early.is_err());

        // 600 ms in: early exit applies even though dwell is 1500 ms.
        let late = gate.can_change_to(BehaviorKind::Combat, &agent, TransitionOptions::default(), time(7, 700));
        assert_eq!(late, Ok(()));
    }

    #[test]
    fn death_target_always_passes() {
        let cfg = PlannerConfig::default();
        let mut gate = TransitionGate::new(cfg, time(0, 0));
        let agent = agent();

        assert!(gate.change_to(BehaviorKind::Combat, &agent, TransitionOptions::goal_driven(), time(1, 100)));
        assert!(gate.change_to(BehaviorKind::Death, &agent, TransitionOptions::default(), time(1, 100)));
        assert_eq!(gate.current_state(), BehaviorKind::Death);
    }

    #[test]
    fn clear_resets_to_patrol() {
        let cfg = PlannerConfig::default();
        let mut gate = TransitionGate::new(cfg, time(0, 0));
        let agent = agent();

        gate.force_change(BehaviorKind::Combat, "test", time(5, 500));
        gate.clear(time(6, 600));

        assert_eq!(gate.current_state(), BehaviorKind::Patrol);
        assert_eq!(gate.record().history().count(), 0);
        assert_eq!(gate.time_in_state(time(6, 600)), 0);
    }
}
