//! Utility scoring for discrete behaviors.
//!
//! This module rates every candidate behavior from 0 to 1 each evaluation:
//!
//! 1. **Per-behavior scoring** ([`behaviors`]): each behavior has its own
//!    scoring function over agent vitals, perception, and personality.
//! 2. **Selection** ([`UtilityScorer`]): pick the best-scoring behavior,
//!    but only recommend leaving the current one when the candidate clears
//!    a fixed improvement threshold — the primary anti-oscillation
//!    mechanism at the scoring layer.
//!
//! Scoring is a pure function of the inputs: no randomness, no I/O, no
//! stored state. Two calls against unchanged agent state return identical
//! scores and the same recommendation.

pub mod behaviors;

use agent_core::{AgentState, BehaviorKind, Perception};

use crate::PlannerConfig;

/// Desirability of every scored behavior, each clamped to `[0, 1]`.
///
/// Recomputed fresh on every evaluation; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct BehaviorScoreSet {
    scores: [f32; 7],
}

impl BehaviorScoreSet {
    /// Score of one behavior. `Death` is never scored and reads as 0.
    pub fn get(&self, kind: BehaviorKind) -> f32 {
        match kind {
            BehaviorKind::Death => 0.0,
            _ => self.scores[kind.index()],
        }
    }

    fn set(&mut self, kind: BehaviorKind, score: f32) {
        self.scores[kind.index()] = score.clamp(0.0, 1.0);
    }

    /// All `(behavior, score)` pairs in stable `scored()` order.
    pub fn iter(&self) -> impl Iterator<Item = (BehaviorKind, f32)> + '_ {
        BehaviorKind::scored()
            .into_iter()
            .map(|kind| (kind, self.get(kind)))
    }
}

/// Why [`UtilityScorer::best_state`] picked what it picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionReason {
    /// The current behavior still scores highest.
    CurrentIsBest,

    /// A candidate scored higher but not by more than the transition
    /// threshold; the current behavior is retained.
    HeldByThreshold,

    /// A candidate cleared the threshold and is recommended.
    Switched,
}

/// Outcome of a best-state evaluation.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct BestState {
    /// The recommended behavior (possibly the current one).
    pub state: BehaviorKind,

    /// Its score.
    pub score: f32,

    /// Margin between the top candidate and the current behavior.
    pub difference: f32,

    pub reason: SelectionReason,

    /// The full score set the decision was made from.
    pub scores: BehaviorScoreSet,
}

/// Stateless scorer over the full behavior set.
pub struct UtilityScorer;

impl UtilityScorer {
    /// Computes fresh scores for every scored behavior.
    pub fn calculate_all(
        agent: &AgentState,
        perception: &dyn Perception,
        cfg: &PlannerConfig,
    ) -> BehaviorScoreSet {
        let mut set = BehaviorScoreSet::default();
        for kind in BehaviorKind::scored() {
            set.set(kind, Self::score(kind, agent, perception, cfg));
        }
        set
    }

    /// Scores a single behavior by dispatching to its scoring function.
    pub fn score(
        kind: BehaviorKind,
        agent: &AgentState,
        perception: &dyn Perception,
        cfg: &PlannerConfig,
    ) -> f32 {
        let score = match kind {
            BehaviorKind::Patrol => behaviors::patrol(agent, perception),
            BehaviorKind::Alert => behaviors::alert(perception),
            BehaviorKind::Combat => behaviors::combat(agent, perception, cfg),
            BehaviorKind::Flee => behaviors::flee(agent, perception, cfg),
            BehaviorKind::SeekHealth => behaviors::seek_health(agent, perception, cfg),
            BehaviorKind::SeekAmmo => behaviors::seek_ammo(agent, perception, cfg),
            BehaviorKind::Investigate => behaviors::investigate(perception),
            BehaviorKind::Death => 0.0,
        };
        score.clamp(0.0, 1.0)
    }

    /// Picks the best behavior, holding the current one unless a candidate
    /// beats its score by more than the transition threshold.
    ///
    /// `exclude` removes one behavior from consideration (used when a state
    /// is known to be unavailable this tick).
    pub fn best_state(
        scores: &BehaviorScoreSet,
        current: BehaviorKind,
        exclude: Option<BehaviorKind>,
        cfg: &PlannerConfig,
    ) -> BestState {
        let mut best_kind = current;
        let mut best_score = scores.get(current);

        // Ties resolve to the earliest behavior in scored() order, and the
        // current state wins against equal candidates
        for (kind, score) in scores.iter() {
            if Some(kind) == exclude {
                continue;
            }
            if score > best_score {
                best_kind = kind;
                best_score = score;
            }
        }

        let current_score = scores.get(current);
        let difference = best_score - current_score;

        let (state, score, reason) = if best_kind == current {
            (current, current_score, SelectionReason::CurrentIsBest)
        } else if difference > cfg.transition_threshold {
            (best_kind, best_score, SelectionReason::Switched)
        } else {
            (current, current_score, SelectionReason::HeldByThreshold)
        };

        tracing::debug!(
            current = current.as_str(),
            candidate = best_kind.as_str(),
            score,
            difference,
            ?reason,
            "utility best-state"
        );

        BestState {
            state,
            score,
            difference,
            reason,
            scores: *scores,
        }
    }
}
