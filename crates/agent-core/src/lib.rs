//! Deterministic agent data model and collaborator interfaces.
//!
//! `agent-core` defines the canonical types the decision core operates on
//! (health, ammo, personality, behavior kinds, simulation time) and the
//! narrow interfaces through which it consumes the rest of the game
//! (perception queries, navigation commands). The planner holds no game
//! state of its own; everything it reads or writes flows through the
//! [`AgentWorld`] facade defined here.
//!
//! All types are deterministic: no wall-clock reads, no global RNG. Time is
//! an explicit [`TickTime`] snapshot advanced by the external driver loop,
//! and randomness goes through the seeded [`RngOracle`].

pub mod behavior;
pub mod navigation;
pub mod perception;
pub mod personality;
pub mod rng;
pub mod state;
pub mod stub;
pub mod time;
pub mod vec;
pub mod world;

pub use behavior::BehaviorKind;
pub use navigation::Navigation;
pub use perception::Perception;
pub use personality::Personality;
pub use rng::{RngOracle, SplitMix64};
pub use state::{AgentState, AmmoState};
pub use stub::{StubNavigation, StubPerception, StubWorld};
pub use time::TickTime;
pub use vec::Vec3;
pub use world::AgentWorld;
