//! Lightweight hierarchical goal lifecycle library for tick-driven agents.
//!
//! This library provides a minimal, deterministic goal system designed for
//! cooperative, single-threaded simulations: a goal stays alive across many
//! ticks, accumulating elapsed time instead of blocking, and a composite
//! goal owns an ordered queue of children it activates one at a time.
//!
//! - **Uniform lifecycle**: every goal moves through
//!   `Inactive → Active → Completed | Failed`
//! - **No resurrection**: terminal goals are replaced with fresh instances,
//!   never re-activated
//! - **Exclusive ownership**: a child is owned by exactly one parent queue;
//!   clearing the parent terminates and drops the children
//! - **Zero dependencies**: pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Goal`]: core trait with `activate`/`execute`/`terminate`
//! - [`GoalStatus`]: the four lifecycle states
//! - [`SubgoalQueue`]: ordered child storage for composite goals
//! - [`process`]: activate-if-needed driver helper invoked once per tick

pub mod composite;
pub mod goal;
pub mod status;

// Re-export core types for ergonomic API
pub use composite::SubgoalQueue;
pub use goal::{Goal, process};
pub use status::GoalStatus;
