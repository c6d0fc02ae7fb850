//! Mutable per-agent state read by the planner.
//!
//! [`AgentState`] is the slice of the external agent the decision core is
//! allowed to see: vitals, ammo, personality, and the single-writer
//! `activity` field the planner publishes its committed top-level activity
//! through. The agent entity itself (body, inventory, animation) lives in
//! the host game and outlives the planner.

use crate::{BehaviorKind, Personality, Vec3};

/// Magazine and reserve ammunition for the agent's current weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmmoState {
    pub magazine: u32,
    pub reserve: u32,
}

impl AmmoState {
    pub const fn new(magazine: u32, reserve: u32) -> Self {
        Self { magazine, reserve }
    }

    /// Rounds available across magazine and reserve.
    pub const fn total(self) -> u32 {
        self.magazine + self.reserve
    }

    /// True when at least one round can be fired or loaded.
    pub const fn has_usable_ammo(self) -> bool {
        self.total() > 0
    }

    /// True when the magazine is dry and only reserve remains.
    pub const fn is_low(self) -> bool {
        self.magazine == 0 && self.reserve > 0
    }
}

/// The agent fields the decision core reads, plus the one field it writes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    pub health: f32,
    pub max_health: f32,
    pub position: Vec3,
    pub has_weapon: bool,
    pub ammo: AmmoState,
    pub personality: Personality,

    /// Movement speed multiplier, temporarily lowered by goals such as the
    /// cautious approach and restored on their terminate.
    pub speed_factor: f32,

    /// The planner's committed top-level activity.
    ///
    /// Single-writer: only [`set_activity`](AgentState::set_activity) (called
    /// by the brain after the goal tree settles) mutates this; everything
    /// else — the reflector included — reads it.
    activity: BehaviorKind,
}

impl AgentState {
    pub fn new(max_health: f32) -> Self {
        Self {
            health: max_health,
            max_health,
            position: Vec3::ZERO,
            has_weapon: false,
            ammo: AmmoState::default(),
            personality: Personality::default(),
            speed_factor: 1.0,
            activity: BehaviorKind::Patrol,
        }
    }

    /// Health as a ratio in `[0, 1]`.
    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// True when the agent can actually fire: weapon plus usable ammo.
    pub fn can_engage(&self) -> bool {
        self.has_weapon && self.ammo.has_usable_ammo()
    }

    /// The committed top-level activity (read-only everywhere).
    pub fn activity(&self) -> BehaviorKind {
        self.activity
    }

    /// Publishes the committed activity. Called only by the planner brain.
    pub fn set_activity(&mut self, activity: BehaviorKind) {
        self.activity = activity;
    }

    /// Clears transient fields after respawn. Vitals are restored by the
    /// host game; this only resets what the planner owns.
    pub fn reset_for_respawn(&mut self) {
        self.speed_factor = 1.0;
        self.activity = BehaviorKind::Patrol;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_ratio_is_clamped() {
        let mut agent = AgentState::new(100.0);
        agent.health = 150.0;
        assert_eq!(agent.health_ratio(), 1.0);
        agent.health = -5.0;
        assert_eq!(agent.health_ratio(), 0.0);
        assert!(agent.is_dead());
    }

    #[test]
    fn engage_requires_weapon_and_ammo() {
        let mut agent = AgentState::new(100.0);
        assert!(!agent.can_engage());
        agent.has_weapon = true;
        assert!(!agent.can_engage());
        agent.ammo = AmmoState::new(0, 12);
        assert!(agent.can_engage());
    }

    #[test]
    fn respawn_resets_planner_owned_fields() {
        let mut agent = AgentState::new(100.0);
        agent.speed_factor = 0.4;
        agent.set_activity(BehaviorKind::Combat);
        agent.reset_for_respawn();
        assert_eq!(agent.speed_factor, 1.0);
        assert_eq!(agent.activity(), BehaviorKind::Patrol);
    }
}
