//! Session configuration.
//!
//! Every field has a default matching the classic board, so a JSON file only
//! needs the values it changes:
//!
//! ```
//! use blockfall_core::GameConfig;
//!
//! let config = GameConfig::from_json(r#"{ "step_delay_ms": 250 }"#).unwrap();
//! assert_eq!(config.step_delay_ms, 250);
//! assert_eq!(config.width, 10);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::Bounds;
use crate::piece::PieceTiming;
use crate::types::{
    CellOffset, BOARD_HEIGHT, BOARD_WIDTH, LOCK_DELAY_MS, SPAWN_POSITION, STEP_DELAY_MS,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    /// Bottom-left cell of the grid. `None` centres the grid on the origin.
    pub origin: Option<CellOffset>,
    pub spawn: CellOffset,
    pub step_delay_ms: u32,
    pub lock_delay_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            origin: None,
            spawn: SPAWN_POSITION,
            step_delay_ms: STEP_DELAY_MS,
            lock_delay_ms: LOCK_DELAY_MS,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Grid bounds described by this configuration.
    pub fn bounds(&self) -> Result<Bounds, ConfigError> {
        match self.origin {
            Some((x, y)) => Bounds::new(x, y, self.width, self.height),
            None => Bounds::centered(self.width, self.height),
        }
    }

    pub fn timing(&self) -> PieceTiming {
        PieceTiming {
            step_delay_ms: self.step_delay_ms,
            lock_delay_ms: self.lock_delay_ms,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = self.bounds()?;
        if !bounds.contains(self.spawn) {
            return Err(ConfigError::SpawnOutOfBounds(self.spawn));
        }
        if self.step_delay_ms == 0 {
            return Err(ConfigError::ZeroDelay {
                name: "step_delay_ms",
            });
        }
        if self.lock_delay_ms == 0 {
            return Err(ConfigError::ZeroDelay {
                name: "lock_delay_ms",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        let bounds = config.bounds().unwrap();
        assert_eq!((bounds.x_min(), bounds.y_min()), (-5, -10));
        assert_eq!(config.timing(), PieceTiming::default());
    }

    #[test]
    fn test_explicit_origin() {
        let config = GameConfig::from_json(r#"{ "origin": [0, 0], "spawn": [4, 18] }"#).unwrap();
        let bounds = config.bounds().unwrap();
        assert_eq!((bounds.x_min(), bounds.x_max()), (0, 10));
        assert_eq!((bounds.y_min(), bounds.y_max()), (0, 20));
    }

    #[test]
    fn test_rejects_spawn_outside() {
        let err = GameConfig::from_json(r#"{ "spawn": [5, 0] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::SpawnOutOfBounds((5, 0))));
    }

    #[test]
    fn test_rejects_zero_delays() {
        let config = GameConfig {
            lock_delay_ms: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroDelay {
                name: "lock_delay_ms"
            })
        ));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "width": "wide" }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "width": 0 }"#),
            Err(ConfigError::GridSize { .. })
        ));
    }
}
