//! Planner configuration.
//!
//! Every tuned constant lives here with its empirically chosen default.
//! The grace-period and linger values in particular were tuned by play
//! observation, not derived; keep them configurable rather than "fixing"
//! them.

use crate::error::ConfigError;

/// All tuning knobs of the decision core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    // ------------------------------------------------------------------
    // Utility scoring
    // ------------------------------------------------------------------
    /// A candidate behavior must beat the current one by more than this
    /// before the scorer recommends switching. Primary anti-oscillation
    /// mechanism at the scoring layer.
    pub transition_threshold: f32,

    /// More visible enemies than this damps combat scoring (outnumbered).
    pub outnumbered_threshold: u32,

    /// Resource pickups within this distance boost seek scores.
    pub resource_near_radius: f32,

    /// Resource pickups beyond this distance damp seek scores.
    pub resource_far_radius: f32,

    // ------------------------------------------------------------------
    // Transition gate
    // ------------------------------------------------------------------
    /// Minimum time in a state before a non-excepted exit is allowed.
    pub min_dwell_ms: u64,

    /// Window in which re-entering the same state is rejected.
    pub same_state_debounce_ms: u64,

    /// Health ratio at or below which transitions bypass every gate check.
    pub critical_health_ratio: f32,

    /// Health ratio for the delayed low-health override.
    pub low_health_ratio: f32,

    /// Time in state before the low-health override applies.
    pub low_health_override_delay_ms: u64,

    /// Seek-health/seek-ammo may exit early toward combat or death after
    /// this much time in state.
    pub resource_seek_early_exit_ms: u64,

    /// Change-history retention, in ticks.
    pub history_window_ticks: u64,

    /// Ping-pong guard: a pair flapping in at least `ping_pong_min_ticks`
    /// of the last `ping_pong_span_ticks` tracked ticks is blocked.
    pub ping_pong_span_ticks: usize,
    pub ping_pong_min_ticks: usize,

    // ------------------------------------------------------------------
    // Movement goals
    // ------------------------------------------------------------------
    /// Distance at which a movement objective counts as reached.
    pub arrival_threshold: f32,

    /// Tolerance around a computed tactical/assault position.
    pub assault_tolerance: f32,

    /// Being this close to the live target completes an advance even if
    /// the computed position was never reached.
    pub engagement_range: f32,

    /// Lateral offset of a strafe leg.
    pub strafe_distance: f32,

    /// Give up hunting a last-known position after this long.
    pub hunt_timeout_ms: u64,

    /// How far a tactical retreat tries to put between agent and threat.
    pub retreat_distance: f32,

    /// A maneuver leg times out after this long even short of its position.
    pub maneuver_duration_ms: u64,

    /// Speed factor while approaching cautiously.
    pub cautious_speed_factor: f32,

    /// Randomized interval between surveillance pauses.
    pub cautious_pause_interval_min_ms: u64,
    pub cautious_pause_interval_max_ms: u64,

    /// Length of one surveillance pause.
    pub cautious_pause_duration_ms: u64,

    /// How often a charge re-aims at the target's current position.
    pub charge_reaim_interval_ms: u64,

    // ------------------------------------------------------------------
    // Attack tactic
    // ------------------------------------------------------------------
    /// Running completely dry only fails the attack after this grace.
    pub attack_ammo_grace_ms: u64,

    /// Hold position this long after losing sight of the target before a
    /// hunt toward its last position begins.
    pub target_loss_hunt_delay_ms: u64,

    /// A lost-but-tracked target keeps the attack hunting up to this long.
    pub target_loss_max_grace_ms: u64,

    /// Post-kill linger phase lengths. Scan and reload are fixed; the
    /// reposition phase fills the remainder of a total window interpolated
    /// across `[linger_total_min, linger_total_max]` by the caution trait.
    pub post_kill_scan_ms: u64,
    pub post_kill_reload_ms: u64,
    pub post_kill_linger_min_ms: u64,
    pub post_kill_linger_max_ms: u64,

    // ------------------------------------------------------------------
    // Search / strategic layer
    // ------------------------------------------------------------------
    /// SearchForEnemy gives up after this long without reacquisition.
    pub search_duration_ms: u64,

    /// EliminateEnemy re-plans its tactical child this often.
    pub replan_interval_ms: u64,

    /// Strategic base weights.
    pub eliminate_base_weight: f32,
    pub explore_base_weight: f32,

    /// A candidate strategic goal must beat the running one's tracked
    /// score by this margin before the commitment manager allows a switch.
    pub min_switch_improvement: f32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            transition_threshold: 0.15,
            outnumbered_threshold: 2,
            resource_near_radius: 10.0,
            resource_far_radius: 30.0,

            min_dwell_ms: 1500,
            same_state_debounce_ms: 100,
            critical_health_ratio: 0.15,
            low_health_ratio: 0.30,
            low_health_override_delay_ms: 800,
            resource_seek_early_exit_ms: 500,
            history_window_ticks: 10,
            ping_pong_span_ticks: 3,
            ping_pong_min_ticks: 2,

            arrival_threshold: 1.5,
            assault_tolerance: 2.0,
            engagement_range: 8.0,
            strafe_distance: 4.0,
            hunt_timeout_ms: 8000,
            retreat_distance: 12.0,
            maneuver_duration_ms: 3000,
            cautious_speed_factor: 0.5,
            cautious_pause_interval_min_ms: 1500,
            cautious_pause_interval_max_ms: 4000,
            cautious_pause_duration_ms: 1000,
            charge_reaim_interval_ms: 500,

            attack_ammo_grace_ms: 2000,
            target_loss_hunt_delay_ms: 1000,
            target_loss_max_grace_ms: 10_000,
            post_kill_scan_ms: 1500,
            post_kill_reload_ms: 500,
            post_kill_linger_min_ms: 2000,
            post_kill_linger_max_ms: 4000,

            search_duration_ms: 12_000,
            replan_interval_ms: 3000,
            eliminate_base_weight: 0.5,
            explore_base_weight: 0.25,
            min_switch_improvement: 0.1,
        }
    }
}

impl PlannerConfig {
    /// Checks internal consistency of the configured values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.transition_threshold) {
            return Err(ConfigError::OutOfRange {
                field: "transition_threshold",
            });
        }
        if !(0.0..=1.0).contains(&self.critical_health_ratio)
            || !(0.0..=1.0).contains(&self.low_health_ratio)
            || self.critical_health_ratio > self.low_health_ratio
        {
            return Err(ConfigError::OutOfRange {
                field: "health ratios",
            });
        }
        if self.post_kill_linger_min_ms > self.post_kill_linger_max_ms {
            return Err(ConfigError::InvertedWindow {
                field: "post_kill_linger",
            });
        }
        if self.cautious_pause_interval_min_ms > self.cautious_pause_interval_max_ms {
            return Err(ConfigError::InvertedWindow {
                field: "cautious_pause_interval",
            });
        }
        if self.ping_pong_min_ticks > self.ping_pong_span_ticks {
            return Err(ConfigError::OutOfRange {
                field: "ping_pong_min_ticks",
            });
        }
        Ok(())
    }

    /// The total post-kill linger window for a given caution trait:
    /// linear interpolation across the configured band.
    pub fn post_kill_linger_total_ms(&self, caution: f32) -> u64 {
        let span = (self.post_kill_linger_max_ms - self.post_kill_linger_min_ms) as f32;
        self.post_kill_linger_min_ms + (span * caution.clamp(0.0, 1.0)) as u64
    }
}
