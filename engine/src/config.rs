//! The engine's one genuinely configurable constant.
//!
//! Per the Design Notes' second quirk, `MAX_POINTS` must default to the
//! regulation 15-point *partida* and be configurable, not hardcoded.

use std::env;

/// Match-wide configuration. Threaded through `start`/the win-check
/// instead of a hardcoded constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub max_points: u8,
}

/// Regulation target for a Truco *partida*.
pub const DEFAULT_MAX_POINTS: u8 = 15;

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_points: DEFAULT_MAX_POINTS,
        }
    }
}

impl MatchConfig {
    /// Read `TRUCO_MAX_POINTS` from the environment, falling back to the
    /// regulation default on anything unset or unparsable.
    pub fn from_env() -> Self {
        let max_points = env::var("TRUCO_MAX_POINTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_POINTS);
        Self { max_points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_regulation_fifteen() {
        assert_eq!(MatchConfig::default().max_points, 15);
    }

    #[test]
    fn from_env_falls_back_when_unset() {
        env::remove_var("TRUCO_MAX_POINTS");
        assert_eq!(MatchConfig::from_env().max_points, 15);
    }
}
