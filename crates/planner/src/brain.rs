//! Per-agent decision orchestrator.

use agent_core::{AgentWorld, BehaviorKind};
use goal_stack::{Goal, GoalStatus, process};

use crate::PlannerConfig;
use crate::error::PlannerError;
use crate::evaluators::{
    CommitmentManager, EliminateEnemyEvaluator, ExploreEvaluator, GoalEvaluator,
};
use crate::gate::{TransitionGate, TransitionOptions};
use crate::reflector::BehaviorReflector;
use crate::scoring::{BehaviorScoreSet, UtilityScorer};

/// One agent's complete decision stack: utility scorer, transition gate,
/// strategic evaluators with commitment hysteresis, and the single
/// top-level goal slot.
///
/// `tick` runs the fixed per-tick pipeline; everything else is state
/// carried between ticks. One brain per agent, driven single-threaded.
pub struct AgentBrain<W: AgentWorld> {
    cfg: PlannerConfig,
    gate: TransitionGate,
    commitment: CommitmentManager,
    evaluators: Vec<Box<dyn GoalEvaluator<W>>>,
    goal: Option<Box<dyn Goal<W>>>,
    goal_activity: BehaviorKind,
    reflected_activity: BehaviorKind,
    last_scores: Option<BehaviorScoreSet>,
}

/// Point-in-time view of the brain for logs and debug overlays.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BrainSnapshot {
    pub state: &'static str,
    pub activity: &'static str,
    pub scores: Option<BehaviorScoreSet>,
    pub goal: Option<&'static str>,
    pub goal_status: Option<&'static str>,
}

fn status_name(status: GoalStatus) -> &'static str {
    match status {
        GoalStatus::Inactive => "inactive",
        GoalStatus::Active => "active",
        GoalStatus::Completed => "completed",
        GoalStatus::Failed => "failed",
    }
}

impl<W: AgentWorld + 'static> AgentBrain<W> {
    /// Builds a brain with the standard evaluator set.
    pub fn new(cfg: PlannerConfig, time: agent_core::TickTime) -> Result<Self, PlannerError> {
        Self::with_evaluators(
            cfg,
            time,
            vec![Box::new(EliminateEnemyEvaluator), Box::new(ExploreEvaluator)],
        )
    }

    /// Builds a brain with a caller-supplied evaluator set.
    pub fn with_evaluators(
        cfg: PlannerConfig,
        time: agent_core::TickTime,
        evaluators: Vec<Box<dyn GoalEvaluator<W>>>,
    ) -> Result<Self, PlannerError> {
        cfg.validate()?;
        if evaluators.is_empty() {
            return Err(PlannerError::NoEvaluators);
        }
        Ok(Self {
            cfg,
            gate: TransitionGate::new(cfg, time),
            commitment: CommitmentManager::new(),
            evaluators,
            goal: None,
            goal_activity: BehaviorKind::Patrol,
            reflected_activity: BehaviorKind::Patrol,
            last_scores: None,
        })
    }

    pub fn current_state(&self) -> BehaviorKind {
        self.gate.current_state()
    }

    pub fn current_goal_name(&self) -> Option<&'static str> {
        self.goal.as_ref().map(|g| g.name())
    }

    /// Runs one decision tick.
    ///
    /// Pipeline order is fixed: utility/gate pass for the discrete state,
    /// strategic goal selection, goal tree execution, then the activity
    /// write-back and reflector push.
    pub fn tick(&mut self, world: &mut W) {
        let time = world.time();

        if world.state().is_dead() {
            self.enter_death(world);
            return;
        }

        // 1. Utility pass over the discrete state.
        let scores = UtilityScorer::calculate_all(world.state(), world.perception(), &self.cfg);
        self.last_scores = Some(scores);
        let best = UtilityScorer::best_state(&scores, self.gate.current_state(), None, &self.cfg);
        if best.state != self.gate.current_state() {
            self.gate
                .change_to(best.state, world.state(), TransitionOptions::default(), time);
        }

        // 2. Strategic selection.
        self.select_strategic_goal(world);

        // 3. Drive the goal tree.
        if let Some(mut goal) = self.goal.take() {
            let status = process(goal.as_mut(), world);
            if status.is_terminal() {
                tracing::debug!(goal = goal.name(), ?status, "top-level goal finished");
                goal.terminate(world);
                self.commitment.clear();
            } else {
                self.goal = Some(goal);
            }
        }

        // 4. Commit the activity and reflect it into the state machine.
        let activity = if self.goal.is_some() {
            self.goal_activity
        } else {
            BehaviorKind::Patrol
        };
        world.state_mut().set_activity(activity);

        // Push on change only. A level-triggered push would drag the state
        // machine out of scorer-driven states (flee, investigate, resource
        // seeks) every tick; edge-triggered, those states persist until the
        // planner's activity actually moves.
        if activity != self.reflected_activity {
            let synced = self.gate.current_state() == activity
                || BehaviorReflector::reflect(&mut self.gate, activity, world.state(), time);
            if synced {
                self.reflected_activity = activity;
            }
        }
    }

    /// Clears all carried state for respawn.
    pub fn reset(&mut self, world: &mut W) {
        if let Some(mut goal) = self.goal.take() {
            if goal.status().is_active() {
                goal.terminate(world);
            }
        }
        self.commitment.clear();
        self.gate.clear(world.time());
        self.goal_activity = BehaviorKind::Patrol;
        self.reflected_activity = BehaviorKind::Patrol;
        self.last_scores = None;
        world.state_mut().set_activity(BehaviorKind::Patrol);
    }

    pub fn debug_snapshot(&self) -> BrainSnapshot {
        BrainSnapshot {
            state: self.gate.current_state().as_str(),
            activity: self.goal_activity.as_str(),
            scores: self.last_scores,
            goal: self.goal.as_ref().map(|g| g.name()),
            goal_status: self.goal.as_ref().map(|g| status_name(g.status())),
        }
    }

    fn enter_death(&mut self, world: &mut W) {
        if self.gate.current_state() != BehaviorKind::Death {
            tracing::debug!("agent died, clearing goal chain");
            self.gate
                .change_to(BehaviorKind::Death, world.state(), TransitionOptions::default(), world.time());
            if let Some(mut goal) = self.goal.take() {
                if goal.status().is_active() {
                    goal.terminate(world);
                }
            }
            self.commitment.clear();
            self.reflected_activity = BehaviorKind::Death;
            world.state_mut().set_activity(BehaviorKind::Death);
        }
    }

    fn select_strategic_goal(&mut self, world: &mut W) {
        let mut winner: Option<(usize, f32)> = None;
        for (i, evaluator) in self.evaluators.iter().enumerate() {
            let score = evaluator.desirability(world, &self.cfg).clamp(0.0, 1.0);
            // Ties go to the earlier evaluator.
            if winner.is_none_or(|(_, best)| score > best) {
                winner = Some((i, score));
            }
        }
        let Some((index, score)) = winner else { return };
        let name = self.evaluators[index].name();

        if self.current_goal_name() == Some(name) {
            // Keep the commitment's tracked score honest.
            self.commitment
                .evaluate_switch(name, score, self.cfg.min_switch_improvement);
            return;
        }

        if !self
            .commitment
            .evaluate_switch(name, score, self.cfg.min_switch_improvement)
        {
            return;
        }

        if let Some(mut old) = self.goal.take() {
            if old.status().is_active() {
                tracing::debug!(old = old.name(), new = name, "strategic goal replaced");
                old.terminate(world);
            }
        }
        let evaluator = &self.evaluators[index];
        self.goal = Some(evaluator.build_goal(&self.cfg));
        self.goal_activity = evaluator.activity();
        self.commitment.commit(name, score, world.time());
    }
}
