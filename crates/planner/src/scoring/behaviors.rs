//! Per-behavior scoring functions.
//!
//! Each function maps agent vitals, perception, and personality to a raw
//! desirability. Callers clamp the result to `[0, 1]`; the functions here
//! only shape it. All of them are pure reads over their inputs.

use agent_core::{AgentState, Perception, Vec3};

use crate::PlannerConfig;

/// Desirability of escaping the current engagement.
///
/// Stepped on health ratio, nudged by pickup availability and caution.
/// At critical health the final value is floored at 0.95 so nothing can
/// damp flee below the emergency level.
pub fn flee(agent: &AgentState, perception: &dyn Perception, cfg: &PlannerConfig) -> f32 {
    let ratio = agent.health_ratio();
    let visible_threat = perception.is_target_visible();

    let base = if ratio < cfg.critical_health_ratio {
        0.95
    } else if ratio < cfg.low_health_ratio {
        0.75
    } else if ratio < 0.50 && visible_threat {
        0.50
    } else {
        0.05
    };

    let mut score = base;
    if perception.nearest_health_pickup().is_some() {
        score += 0.10;
    }
    if !visible_threat {
        score *= 0.3;
    }
    score += 0.2 * (agent.personality.caution - 0.5);

    if ratio < cfg.critical_health_ratio {
        score = score.max(0.95);
    }
    score
}

/// Desirability of engaging the acquired target.
pub fn combat(agent: &AgentState, perception: &dyn Perception, cfg: &PlannerConfig) -> f32 {
    if !perception.has_target() || !agent.can_engage() {
        return 0.0;
    }

    let mut score = if perception.is_target_visible() { 0.60 } else { 0.20 };

    if agent.ammo.has_usable_ammo() {
        score += 0.20;
    } else {
        score *= 0.2;
    }

    let ratio = agent.health_ratio();
    if ratio > 0.70 {
        score += 0.15;
    } else if ratio < cfg.low_health_ratio {
        score *= 0.4;
    }

    score += 0.25 * (agent.personality.aggression - 0.5);

    if perception.visible_enemy_count() > cfg.outnumbered_threshold {
        score *= 0.7;
    }
    score
}

/// Desirability of routing to the nearest health pickup.
pub fn seek_health(agent: &AgentState, perception: &dyn Perception, cfg: &PlannerConfig) -> f32 {
    let Some(pickup) = perception.nearest_health_pickup() else {
        return 0.0;
    };

    let ratio = agent.health_ratio();
    let base = if ratio < cfg.low_health_ratio {
        0.70
    } else if ratio < 0.50 {
        0.50
    } else if ratio < 0.70 {
        0.30
    } else {
        return 0.0;
    };

    shape_resource(base, agent.position, pickup, perception, cfg)
}

/// Desirability of routing to the nearest ammo pickup.
pub fn seek_ammo(agent: &AgentState, perception: &dyn Perception, cfg: &PlannerConfig) -> f32 {
    let Some(pickup) = perception.nearest_ammo_pickup() else {
        return 0.0;
    };
    if !agent.has_weapon {
        return 0.0;
    }

    let base = if !agent.ammo.has_usable_ammo() {
        0.70
    } else if agent.ammo.is_low() {
        0.35
    } else {
        return 0.0;
    };

    shape_resource(base, agent.position, pickup, perception, cfg)
}

/// Distance and engagement shaping shared by both resource behaviors.
fn shape_resource(
    base: f32,
    position: Vec3,
    pickup: Vec3,
    perception: &dyn Perception,
    cfg: &PlannerConfig,
) -> f32 {
    let mut score = base;
    let distance = position.distance(pickup);
    if distance <= cfg.resource_near_radius {
        score *= 1.15;
    } else if distance > cfg.resource_far_radius {
        score *= 0.6;
    }
    if perception.is_target_visible() {
        score *= 0.7;
    }
    score
}

/// Desirability of the heightened-awareness state: a target is sensed but
/// not currently in line of sight.
pub fn alert(perception: &dyn Perception) -> f32 {
    if perception.is_target_sensed_only() {
        0.55
    } else {
        0.0
    }
}

/// Desirability of checking an unresolved disturbance. Collapses once the
/// target itself is visible.
pub fn investigate(perception: &dyn Perception) -> f32 {
    if perception.investigation_point().is_none() {
        return 0.0;
    }
    let mut score = 0.60;
    if perception.is_target_visible() {
        score *= 0.25;
    }
    score
}

/// Baseline wandering desirability. Never zero while the agent lives, so
/// patrol is the fallback when nothing else applies.
pub fn patrol(agent: &AgentState, perception: &dyn Perception) -> f32 {
    let mut score = if perception.has_target() { 0.15 } else { 0.45 };
    if agent.health_ratio() < 0.50 {
        score *= 0.8;
    }
    if !agent.ammo.has_usable_ammo() {
        score *= 0.9;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::{AmmoState, StubPerception};

    fn agent_at(health: f32) -> AgentState {
        let mut agent = AgentState::new(100.0);
        agent.health = health;
        agent.has_weapon = true;
        agent.ammo = AmmoState::new(12, 24);
        agent
    }

    #[test]
    fn flee_floor_holds_at_critical_health() {
        let cfg = PlannerConfig::default();
        let mut agent = agent_at(10.0);
        // Worst case for flee: bold personality, no visible threat to run
        // from, still must not dip under the emergency floor.
        agent.personality.caution = 0.0;
        let per = StubPerception::default();

        assert!(flee(&agent, &per, &cfg) >= 0.90);
    }

    #[test]
    fn flee_is_negligible_when_healthy_and_unthreatened() {
        let cfg = PlannerConfig::default();
        let agent = agent_at(100.0);
        let per = StubPerception::default();

        assert!(flee(&agent, &per, &cfg) < 0.15);
    }

    #[test]
    fn combat_requires_target_and_weapon() {
        let cfg = PlannerConfig::default();
        let mut agent = agent_at(100.0);
        let mut per = StubPerception::default();

        assert_eq!(combat(&agent, &per, &cfg), 0.0);

        per.has_target = true;
        agent.has_weapon = false;
        assert_eq!(combat(&agent, &per, &cfg), 0.0);
    }

    #[test]
    fn empty_ammo_guts_combat() {
        let cfg = PlannerConfig::default();
        let mut agent = agent_at(100.0);
        let per = StubPerception {
            has_target: true,
            target_visible: true,
            ..StubPerception::default()
        };

        let armed = combat(&agent, &per, &cfg);
        agent.ammo = AmmoState::new(0, 0);
        let dry = combat(&agent, &per, &cfg);

        assert!(dry < armed * 0.5);
    }

    #[test]
    fn outnumbered_damps_combat() {
        let cfg = PlannerConfig::default();
        let agent = agent_at(100.0);
        let mut per = StubPerception {
            has_target: true,
            target_visible: true,
            visible_enemy_count: 1,
            ..StubPerception::default()
        };

        let solo = combat(&agent, &per, &cfg);
        per.visible_enemy_count = cfg.outnumbered_threshold + 1;
        let mobbed = combat(&agent, &per, &cfg);

        assert!(mobbed < solo);
    }

    #[test]
    fn seek_health_zero_without_pickup_or_need() {
        let cfg = PlannerConfig::default();
        let hurt = agent_at(20.0);
        let per = StubPerception::default();
        assert_eq!(seek_health(&hurt, &per, &cfg), 0.0);

        let healthy = agent_at(100.0);
        let per = StubPerception {
            nearest_health_pickup: Some(Vec3::new(5.0, 0.0, 0.0)),
            ..StubPerception::default()
        };
        assert_eq!(seek_health(&healthy, &per, &cfg), 0.0);
    }

    #[test]
    fn nearby_pickup_scores_higher_than_distant() {
        let cfg = PlannerConfig::default();
        let agent = agent_at(20.0);

        let near = StubPerception {
            nearest_health_pickup: Some(Vec3::new(5.0, 0.0, 0.0)),
            ..StubPerception::default()
        };
        let far = StubPerception {
            nearest_health_pickup: Some(Vec3::new(50.0, 0.0, 0.0)),
            ..StubPerception::default()
        };

        assert!(seek_health(&agent, &near, &cfg) > seek_health(&agent, &far, &cfg));
    }

    #[test]
    fn seek_ammo_tiers_on_magazine_state() {
        let cfg = PlannerConfig::default();
        let per = StubPerception {
            nearest_ammo_pickup: Some(Vec3::new(5.0, 0.0, 0.0)),
            ..StubPerception::default()
        };

        let mut agent = agent_at(100.0);
        agent.ammo = AmmoState::new(0, 0);
        let empty = seek_ammo(&agent, &per, &cfg);

        agent.ammo = AmmoState::new(0, 30);
        let low = seek_ammo(&agent, &per, &cfg);

        agent.ammo = AmmoState::new(30, 90);
        let stocked = seek_ammo(&agent, &per, &cfg);

        assert!(empty > low);
        assert!(low > 0.0);
        assert_eq!(stocked, 0.0);
    }

    #[test]
    fn alert_fires_only_when_target_is_sensed_not_seen() {
        let mut per = StubPerception {
            has_target: true,
            target_visible: false,
            ..StubPerception::default()
        };
        assert!(alert(&per) > 0.5);

        per.target_visible = true;
        assert_eq!(alert(&per), 0.0);
    }

    #[test]
    fn visible_target_collapses_investigate() {
        let mut per = StubPerception {
            investigation_point: Some(Vec3::new(3.0, 0.0, 3.0)),
            ..StubPerception::default()
        };
        let quiet = investigate(&per);

        per.has_target = true;
        per.target_visible = true;
        let seen = investigate(&per);

        assert!(quiet > 0.5);
        assert!(seen < quiet * 0.5);
    }

    #[test]
    fn patrol_is_the_idle_fallback() {
        let agent = agent_at(100.0);
        let per = StubPerception::default();
        assert!(patrol(&agent, &per) > 0.4);

        let engaged = StubPerception {
            has_target: true,
            ..StubPerception::default()
        };
        assert!(patrol(&agent, &engaged) < 0.2);
    }
}
