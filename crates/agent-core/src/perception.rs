//! Perception collaborator interface.

use crate::Vec3;

/// Read-only view of what the agent currently senses.
///
/// Implemented by the host game's sensing system (line-of-sight, sound,
/// memory of contacts). The decision core only reads; it never drives
/// sensing. A degraded implementation (everything `None`/`false`) is valid
/// and simply keeps the agent patrolling.
pub trait Perception {
    /// True while the agent has an acquired target, visible or not.
    fn has_target(&self) -> bool;

    /// True when the acquired target is in line of sight right now.
    fn is_target_visible(&self) -> bool;

    /// Live position of the target, when visible or otherwise tracked.
    fn target_position(&self) -> Option<Vec3>;

    /// True once the acquired target is confirmed dead or destroyed.
    fn is_target_dead(&self) -> bool;

    /// Last position the target was seen or heard at, if remembered.
    fn last_known_target_position(&self) -> Option<Vec3>;

    /// An unresolved disturbance worth investigating, if any.
    fn investigation_point(&self) -> Option<Vec3>;

    /// How many hostiles are currently visible (for outnumbered checks).
    fn visible_enemy_count(&self) -> u32;

    /// Nearest known health resource, if one exists in the world.
    fn nearest_health_pickup(&self) -> Option<Vec3>;

    /// Nearest known ammo resource, if one exists in the world.
    fn nearest_ammo_pickup(&self) -> Option<Vec3>;

    /// Target acquired but currently out of sight.
    fn is_target_sensed_only(&self) -> bool {
        self.has_target() && !self.is_target_visible()
    }
}
