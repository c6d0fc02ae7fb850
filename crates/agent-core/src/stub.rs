//! In-memory stub collaborators.
//!
//! These are reference implementations of [`Perception`] and [`Navigation`]
//! with directly settable fields. The planner's unit and integration tests
//! drive scenarios through them, and they double as a starting point for
//! wiring the decision core into a host game.

use crate::{
    AgentState, AgentWorld, Navigation, Perception, RngOracle, SplitMix64, TickTime, Vec3,
};

/// Scriptable perception: every query answered from public fields.
#[derive(Debug, Clone, Default)]
pub struct StubPerception {
    pub has_target: bool,
    pub target_visible: bool,
    pub target_position: Option<Vec3>,
    pub target_dead: bool,
    pub last_known_target_position: Option<Vec3>,
    pub investigation_point: Option<Vec3>,
    pub visible_enemy_count: u32,
    pub nearest_health_pickup: Option<Vec3>,
    pub nearest_ammo_pickup: Option<Vec3>,
}

impl Perception for StubPerception {
    fn has_target(&self) -> bool {
        self.has_target
    }

    fn is_target_visible(&self) -> bool {
        self.target_visible
    }

    fn target_position(&self) -> Option<Vec3> {
        self.target_position
    }

    fn is_target_dead(&self) -> bool {
        self.target_dead
    }

    fn last_known_target_position(&self) -> Option<Vec3> {
        self.last_known_target_position
    }

    fn investigation_point(&self) -> Option<Vec3> {
        self.investigation_point
    }

    fn visible_enemy_count(&self) -> u32 {
        self.visible_enemy_count
    }

    fn nearest_health_pickup(&self) -> Option<Vec3> {
        self.nearest_health_pickup
    }

    fn nearest_ammo_pickup(&self) -> Option<Vec3> {
        self.nearest_ammo_pickup
    }
}

/// Scriptable navigation that records every command it receives.
#[derive(Debug, Clone)]
pub struct StubNavigation {
    /// Every `move_to` call as `(dest, speed_factor)`, oldest first.
    pub move_orders: Vec<(Vec3, f32)>,

    /// Number of `stop_movement` calls.
    pub stops: u32,

    /// Destination of the current order, if any.
    pub current_order: Option<Vec3>,

    /// Answer for `is_at_destination`. Tests flip this to simulate arrival.
    pub at_destination: bool,

    /// When `true`, position queries return `None` (no free space anywhere).
    pub deny_position_queries: bool,

    /// Answer for `find_valid_random_position`.
    pub random_position: Option<Vec3>,

    /// Answer for `is_ready`.
    pub ready: bool,
}

impl Default for StubNavigation {
    fn default() -> Self {
        Self {
            move_orders: Vec::new(),
            stops: 0,
            current_order: None,
            at_destination: false,
            deny_position_queries: false,
            random_position: Some(Vec3::new(25.0, 0.0, 25.0)),
            ready: true,
        }
    }
}

impl StubNavigation {
    /// Marks the current order as arrived.
    pub fn arrive(&mut self) {
        self.at_destination = true;
    }

    /// Destination of the most recent `move_to`, if any.
    pub fn last_order(&self) -> Option<(Vec3, f32)> {
        self.move_orders.last().copied()
    }
}

impl Navigation for StubNavigation {
    fn move_to(&mut self, dest: Vec3, speed_factor: f32) -> bool {
        if !self.ready {
            return false;
        }
        self.move_orders.push((dest, speed_factor));
        self.current_order = Some(dest);
        self.at_destination = false;
        true
    }

    fn stop_movement(&mut self) {
        self.stops += 1;
        self.current_order = None;
    }

    fn is_at_destination(&self) -> bool {
        self.at_destination
    }

    fn find_valid_position(&mut self, near: Vec3, _radius: f32) -> Option<Vec3> {
        if self.deny_position_queries {
            None
        } else {
            // Echo the requested point: the whole area is navigable
            Some(near)
        }
    }

    fn find_valid_random_position(&mut self) -> Option<Vec3> {
        if self.deny_position_queries {
            None
        } else {
            self.random_position
        }
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

/// A complete scriptable world for one agent.
#[derive(Debug, Clone)]
pub struct StubWorld {
    pub agent: AgentState,
    pub perception: StubPerception,
    pub navigation: StubNavigation,
    pub time: TickTime,
    rng: SplitMix64,
}

impl StubWorld {
    pub fn new(agent: AgentState) -> Self {
        Self {
            agent,
            perception: StubPerception::default(),
            navigation: StubNavigation::default(),
            time: TickTime::default(),
            rng: SplitMix64,
        }
    }

    /// Advances simulation time by `dt_ms` and one tick.
    pub fn advance(&mut self, dt_ms: u64) {
        self.time = self.time.advanced(dt_ms);
    }
}

impl AgentWorld for StubWorld {
    fn state(&self) -> &AgentState {
        &self.agent
    }

    fn state_mut(&mut self) -> &mut AgentState {
        &mut self.agent
    }

    fn perception(&self) -> &dyn Perception {
        &self.perception
    }

    fn navigation(&mut self) -> &mut dyn Navigation {
        &mut self.navigation
    }

    fn time(&self) -> TickTime {
        self.time
    }

    fn rng(&self) -> &dyn RngOracle {
        &self.rng
    }
}
