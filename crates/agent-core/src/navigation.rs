//! Navigation collaborator interface.

use crate::Vec3;

/// Movement commands and spatial queries the planner issues.
///
/// Implemented by the host game's pathfinding/steering layer. The contract
/// is deliberately narrow: the planner chooses *where* to go and at what
/// speed factor; how the agent gets there (steering, avoidance, kinematics)
/// is entirely the implementor's business.
pub trait Navigation {
    /// Starts moving toward `dest` at `speed_factor` times base speed.
    ///
    /// Returns `false` when the destination is unreachable or navigation
    /// is not ready; the caller treats that as a goal precondition failure.
    fn move_to(&mut self, dest: Vec3, speed_factor: f32) -> bool;

    /// Cancels the current movement order.
    fn stop_movement(&mut self);

    /// True once the current movement order has arrived.
    fn is_at_destination(&self) -> bool;

    /// A navigable position within `radius` of `near`, if one exists.
    fn find_valid_position(&mut self, near: Vec3, radius: f32) -> Option<Vec3>;

    /// A navigable position anywhere in the walkable area.
    fn find_valid_random_position(&mut self) -> Option<Vec3>;

    /// False while the navigation mesh or provider is unavailable.
    fn is_ready(&self) -> bool;
}
