//! Close-combat tactic coordinator.

use agent_core::{AgentWorld, BehaviorKind};
use goal_stack::{Goal, GoalStatus, SubgoalQueue};

use crate::PlannerConfig;
use crate::goals::{ChargeGoal, DodgeGoal, HuntGoal, TacticalManeuverGoal, probe_strafe_space};

/// Where the post-kill wind-down currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LingerPhase {
    /// Hold position and watch for further threats.
    Scan,
    /// Stationary reload pause.
    Reload,
    /// Short repositioning move for the rest of the window.
    Reposition,
}

struct Linger {
    phase: LingerPhase,
    phase_until_ms: u64,
    until_ms: u64,
}

/// Fights the acquired target by cycling sub-tactics.
///
/// With the target visible it dodges when there is strafe room and charges
/// when there is not; with the target merely tracked it hunts the last
/// known position. Each finished sub-tactic hands the decision back here,
/// so the choice is re-made continuously rather than once.
///
/// The goal force-terminates on three conditions: critical health while
/// the agent is not already seeking health (fail, parent reselects), dry
/// ammo that stays dry past a grace window (fail), and target death, which
/// runs the scan/reload/reposition linger before completing.
pub struct AttackGoal<W> {
    cfg: PlannerConfig,
    subgoals: SubgoalQueue<W>,
    ammo_empty_since_ms: Option<u64>,
    target_unseen_since_ms: Option<u64>,
    target_lost_since_ms: Option<u64>,
    linger: Option<Linger>,
    status: GoalStatus,
}

impl<W: AgentWorld> AttackGoal<W> {
    pub fn new(cfg: &PlannerConfig) -> Self {
        Self {
            cfg: *cfg,
            subgoals: SubgoalQueue::new(),
            ammo_empty_since_ms: None,
            target_unseen_since_ms: None,
            target_lost_since_ms: None,
            linger: None,
            status: GoalStatus::Inactive,
        }
    }
}

impl<W: AgentWorld + 'static> AttackGoal<W> {
    /// Drives the post-kill wind-down. Returns the status for this tick.
    fn linger_tick(&mut self, ctx: &mut W) -> GoalStatus {
        let now = ctx.time().now_ms;

        if self.linger.is_none() {
            let caution = ctx.state().personality.caution;
            let total = self.cfg.post_kill_linger_total_ms(caution);
            self.subgoals.clear(ctx);
            ctx.navigation().stop_movement();
            self.linger = Some(Linger {
                phase: LingerPhase::Scan,
                phase_until_ms: now + self.cfg.post_kill_scan_ms,
                until_ms: now + total.max(self.cfg.post_kill_scan_ms + self.cfg.post_kill_reload_ms),
            });
            tracing::debug!(total_ms = total, "target down, lingering");
        }

        let (phase, phase_until, until) = {
            let l = self.linger.as_ref().filter(|l| now < l.until_ms);
            match l {
                Some(l) => (l.phase, l.phase_until_ms, l.until_ms),
                None => {
                    self.status = GoalStatus::Completed;
                    return self.status;
                }
            }
        };

        if now >= phase_until {
            let (next, next_until) = match phase {
                LingerPhase::Scan => (LingerPhase::Reload, now + self.cfg.post_kill_reload_ms),
                LingerPhase::Reload | LingerPhase::Reposition => (LingerPhase::Reposition, until),
            };
            if next == LingerPhase::Reposition && phase == LingerPhase::Reload {
                // Reposition around wherever the fight ended.
                let focus = ctx
                    .perception()
                    .target_position()
                    .or_else(|| ctx.perception().last_known_target_position())
                    .unwrap_or(ctx.state().position);
                self.subgoals
                    .push_front(Box::new(TacticalManeuverGoal::new(focus, &self.cfg)));
            }
            if let Some(l) = self.linger.as_mut() {
                l.phase = next;
                l.phase_until_ms = next_until;
            }
        }

        if matches!(self.linger.as_ref().map(|l| l.phase), Some(LingerPhase::Reposition)) {
            self.subgoals.process_front(ctx);
        }
        self.status
    }

    /// Picks the next sub-tactic when none is running.
    ///
    /// May pick nothing: right after losing sight the agent holds
    /// position for a short delay, since the target often reappears.
    fn select_tactic(&mut self, ctx: &mut W) {
        if ctx.perception().is_target_visible() {
            if probe_strafe_space(ctx, &self.cfg).is_some() {
                self.subgoals
                    .push_front(Box::new(DodgeGoal::new(&self.cfg)));
            } else {
                self.subgoals
                    .push_front(Box::new(ChargeGoal::new(&self.cfg)));
            }
            return;
        }

        let remembered = ctx
            .perception()
            .last_known_target_position()
            .or_else(|| ctx.perception().target_position());
        match remembered {
            Some(pos) => {
                let now = ctx.time().now_ms;
                let unseen = self
                    .target_unseen_since_ms
                    .map_or(0, |since| now.saturating_sub(since));
                if unseen < self.cfg.target_loss_hunt_delay_ms {
                    return;
                }
                self.subgoals
                    .push_front(Box::new(HuntGoal::new(Some(pos), &self.cfg)));
            }
            None => {
                // Nothing to fight and nowhere to look.
                self.status = GoalStatus::Completed;
            }
        }
    }
}

impl<W: AgentWorld + 'static> Goal<W> for AttackGoal<W> {
    fn activate(&mut self, ctx: &mut W) {
        // Dry ammo is not checked here: execute grants it a grace window
        // so a reload or pickup can still land.
        if !ctx.perception().has_target() || !ctx.state().has_weapon {
            self.status = GoalStatus::Failed;
            return;
        }
        self.status = GoalStatus::Active;
    }

    fn execute(&mut self, ctx: &mut W) -> GoalStatus {
        let now = ctx.time().now_ms;

        if ctx.perception().is_target_dead() {
            return self.linger_tick(ctx);
        }

        let agent = ctx.state();
        if agent.health_ratio() < self.cfg.critical_health_ratio
            && agent.activity() != BehaviorKind::SeekHealth
        {
            tracing::debug!("attack aborted at critical health");
            self.status = GoalStatus::Failed;
            return self.status;
        }

        if ctx.state().ammo.total() == 0 {
            let since = *self.ammo_empty_since_ms.get_or_insert(now);
            if now.saturating_sub(since) >= self.cfg.attack_ammo_grace_ms {
                tracing::debug!("attack aborted, out of ammo past grace");
                self.status = GoalStatus::Failed;
                return self.status;
            }
        } else {
            self.ammo_empty_since_ms = None;
        }

        if ctx.perception().is_target_visible() {
            self.target_unseen_since_ms = None;
        } else {
            self.target_unseen_since_ms.get_or_insert(now);
        }

        if ctx.perception().has_target() {
            self.target_lost_since_ms = None;
        } else {
            // Tenacity stretches the grace up to the configured maximum.
            let tenacity = ctx.state().personality.tenacity;
            let grace =
                (self.cfg.target_loss_max_grace_ms as f32 * (0.5 + 0.5 * tenacity)) as u64;
            let since = *self.target_lost_since_ms.get_or_insert(now);
            if now.saturating_sub(since) >= grace {
                tracing::debug!("target lost for good, attack over");
                self.status = GoalStatus::Completed;
                return self.status;
            }
        }

        if !self.subgoals.has_subgoals() {
            self.select_tactic(ctx);
            if self.status.is_terminal() {
                return self.status;
            }
        }

        self.subgoals.process_front(ctx);
        self.status
    }

    fn terminate(&mut self, ctx: &mut W) {
        self.subgoals.clear(ctx);
        ctx.navigation().stop_movement();
    }

    fn status(&self) -> GoalStatus {
        self.status
    }

    fn name(&self) -> &'static str {
        "attack"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::{AgentState, AmmoState, StubWorld, Vec3};
    use goal_stack::process;

    fn combat_world() -> StubWorld {
        let mut agent = AgentState::new(100.0);
        agent.has_weapon = true;
        agent.ammo = AmmoState::new(30, 90);
        let mut world = StubWorld::new(agent);
        world.perception.has_target = true;
        world.perception.target_visible = true;
        world.perception.target_position = Some(Vec3::new(10.0, 0.0, 0.0));
        world
    }

    #[test]
    fn dodges_when_strafe_room_exists() {
        let cfg = PlannerConfig::default();
        let mut world = combat_world();
        let mut goal: AttackGoal<StubWorld> = AttackGoal::new(&cfg);

        assert_eq!(process(&mut goal, &mut world), GoalStatus::Active);
        assert_eq!(goal.subgoals.front_name(), Some("dodge"));
    }

    #[test]
    fn charges_when_both_sides_are_blocked() {
        let cfg = PlannerConfig::default();
        let mut world = combat_world();
        world.navigation.deny_position_queries = true;
        let mut goal: AttackGoal<StubWorld> = AttackGoal::new(&cfg);

        process(&mut goal, &mut world);
        assert_eq!(goal.subgoals.front_name(), Some("charge"));
    }

    #[test]
    fn hunts_a_sensed_but_unseen_target() {
        let cfg = PlannerConfig::default();
        let mut world = combat_world();
        world.perception.target_visible = false;
        world.perception.target_position = None;
        world.perception.last_known_target_position = Some(Vec3::new(40.0, 0.0, 0.0));

        let mut goal: AttackGoal<StubWorld> = AttackGoal::new(&cfg);

        // Sight just lost: hold position through the hunt-start delay.
        assert_eq!(process(&mut goal, &mut world), GoalStatus::Active);
        assert_eq!(goal.subgoals.front_name(), None);

        world.advance(cfg.target_loss_hunt_delay_ms + 1);
        process(&mut goal, &mut world);
        assert_eq!(goal.subgoals.front_name(), Some("hunt"));
    }

    #[test]
    fn critical_health_aborts_the_attack() {
        let cfg = PlannerConfig::default();
        let mut world = combat_world();
        let mut goal: AttackGoal<StubWorld> = AttackGoal::new(&cfg);

        assert_eq!(process(&mut goal, &mut world), GoalStatus::Active);
        world.agent.health = 10.0;
        assert_eq!(process(&mut goal, &mut world), GoalStatus::Failed);
    }

    #[test]
    fn dry_ammo_fails_only_after_the_grace_window() {
        let cfg = PlannerConfig::default();
        let mut world = combat_world();
        world.agent.ammo = AmmoState::new(0, 0);
        let mut goal: AttackGoal<StubWorld> = AttackGoal::new(&cfg);

        // Weapon in hand: activation succeeds and the grace keeps the
        // attack alive while a reload or pickup might land.
        assert_eq!(process(&mut goal, &mut world), GoalStatus::Active);
        world.advance(cfg.attack_ammo_grace_ms + 1);
        assert_eq!(process(&mut goal, &mut world), GoalStatus::Failed);
    }

    #[test]
    fn unarmed_agent_cannot_open_an_attack() {
        let cfg = PlannerConfig::default();
        let mut world = combat_world();
        world.agent.has_weapon = false;

        let mut goal: AttackGoal<StubWorld> = AttackGoal::new(&cfg);
        assert_eq!(process(&mut goal, &mut world), GoalStatus::Failed);
    }

    #[test]
    fn target_death_runs_the_linger_then_completes() {
        let cfg = PlannerConfig::default();
        let mut world = combat_world();
        let mut goal: AttackGoal<StubWorld> = AttackGoal::new(&cfg);

        assert_eq!(process(&mut goal, &mut world), GoalStatus::Active);

        world.perception.target_dead = true;
        let killed_at = world.time.now_ms;
        assert_eq!(process(&mut goal, &mut world), GoalStatus::Active);

        // Walk the clock forward until the goal completes, then check
        // the whole wind-down respected the caution-scaled minimum.
        let mut guard = 0;
        while goal.status() == GoalStatus::Active {
            world.advance(100);
            process(&mut goal, &mut world);
            guard += 1;
            assert!(guard < 200, "linger never completed");
        }
        assert_eq!(goal.status(), GoalStatus::Completed);

        let elapsed = world.time.now_ms - killed_at;
        assert!(elapsed >= cfg.post_kill_linger_min_ms);
    }
}
