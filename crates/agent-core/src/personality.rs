//! Personality traits that bias decision scoring.

/// Per-agent personality profile, each trait in `[0, 1]`.
///
/// Traits never decide anything on their own; they nudge utility scores and
/// scale time windows (e.g. the post-kill linger duration) so two agents in
/// identical situations can still behave differently.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Personality {
    /// Willingness to engage: boosts combat scoring, shortens hesitation.
    pub aggression: f32,

    /// Self-preservation: boosts flee scoring, lengthens surveillance
    /// pauses and post-kill repositioning.
    pub caution: f32,

    /// Pursuit tenacity: how long the agent keeps hunting a lost target.
    pub tenacity: f32,
}

impl Personality {
    /// Builds a profile, clamping every trait to `[0, 1]`.
    pub fn new(aggression: f32, caution: f32, tenacity: f32) -> Self {
        Self {
            aggression: aggression.clamp(0.0, 1.0),
            caution: caution.clamp(0.0, 1.0),
            tenacity: tenacity.clamp(0.0, 1.0),
        }
    }
}

impl Default for Personality {
    /// Neutral profile: every trait at the midpoint.
    fn default() -> Self {
        Self {
            aggression: 0.5,
            caution: 0.5,
            tenacity: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_out_of_range_traits() {
        let p = Personality::new(1.5, -0.2, 0.7);
        assert_eq!(p.aggression, 1.0);
        assert_eq!(p.caution, 0.0);
        assert_eq!(p.tenacity, 0.7);
    }
}
