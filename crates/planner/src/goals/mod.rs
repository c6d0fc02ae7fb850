//! Goal hierarchy: atomic movement leaves and composite tactics.
//!
//! Atomic goals issue navigation commands and report arrival, timeout, or
//! failure. Composite goals own a [`goal_stack::SubgoalQueue`] and decide
//! which child runs next; they hold no navigation logic of their own.
//! Every goal is generic over `W: AgentWorld`, receives the world fresh
//! each tick, and keeps only its own timers and destinations across ticks.

mod advance;
mod attack;
mod cautious;
mod charge;
mod dodge;
mod eliminate;
mod explore;
mod hunt;
mod maneuver;
mod patrol;
mod retreat;
mod search;

pub use advance::AdvanceGoal;
pub use attack::AttackGoal;
pub use cautious::CautiousApproachGoal;
pub use charge::ChargeGoal;
pub use dodge::{DodgeGoal, probe_strafe_space};
pub use eliminate::EliminateEnemyGoal;
pub use explore::ExploreGoal;
pub use hunt::HuntGoal;
pub use maneuver::TacticalManeuverGoal;
pub use patrol::PatrolGoal;
pub use retreat::TacticalRetreatGoal;
pub use search::SearchForEnemyGoal;
