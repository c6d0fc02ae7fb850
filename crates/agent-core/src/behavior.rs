//! Discrete behavior states observed by animation, UI, and debug overlays.

/// The closed set of high-level behaviors an agent can be in.
///
/// This is the discrete state the transition gate manages and the reflector
/// pushes the planner's activity into. Keeping it a closed enum (instead of
/// string keys) gives exhaustive matching everywhere a behavior is scored
/// or dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BehaviorKind {
    /// Default low-priority wandering between waypoints.
    Patrol,

    /// Heightened awareness: something was sensed but not confirmed.
    Alert,

    /// Actively engaging a target.
    Combat,

    /// Escaping a threat, usually at low health.
    Flee,

    /// Moving toward a health resource.
    SeekHealth,

    /// Moving toward an ammo resource.
    SeekAmmo,

    /// Checking out a specific disturbance point.
    Investigate,

    /// Terminal state; always accepted by the gate, never left.
    Death,
}

impl BehaviorKind {
    /// All behaviors that utility scoring ranks.
    ///
    /// `Death` is excluded: it is entered only through the gate's exception
    /// path, never selected by score.
    pub const fn scored() -> [BehaviorKind; 7] {
        [
            BehaviorKind::Patrol,
            BehaviorKind::Alert,
            BehaviorKind::Combat,
            BehaviorKind::Flee,
            BehaviorKind::SeekHealth,
            BehaviorKind::SeekAmmo,
            BehaviorKind::Investigate,
        ]
    }

    /// Stable string form used in logs and overlays.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Index into score arrays. Stable across the `scored()` ordering.
    pub const fn index(self) -> usize {
        match self {
            BehaviorKind::Patrol => 0,
            BehaviorKind::Alert => 1,
            BehaviorKind::Combat => 2,
            BehaviorKind::Flee => 3,
            BehaviorKind::SeekHealth => 4,
            BehaviorKind::SeekAmmo => 5,
            BehaviorKind::Investigate => 6,
            BehaviorKind::Death => 7,
        }
    }

    /// Resource-gathering states may exit early toward combat or death.
    pub const fn is_resource_seek(self) -> bool {
        matches!(self, BehaviorKind::SeekHealth | BehaviorKind::SeekAmmo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_case_names() {
        assert_eq!(BehaviorKind::SeekHealth.as_str(), "seek-health");
        assert_eq!(BehaviorKind::Patrol.as_str(), "patrol");
    }

    #[test]
    fn scored_indexes_are_dense_and_unique() {
        let mut seen = [false; 8];
        for kind in BehaviorKind::scored() {
            assert!(!seen[kind.index()]);
            seen[kind.index()] = true;
        }
        // Death keeps its own slot outside the scored set
        assert!(!seen[BehaviorKind::Death.index()]);
    }
}
