use serde::{Deserialize, Serialize};

use crate::types::{CollisionError, DEFAULT_TILE_SIZE, MAX_ENTITY_COUNT, MAX_MEMO_SLOTS};

/// Collision layer configuration, usually loaded once at startup.
///
/// ```toml
/// tile_size = 16
/// max_entities = 2
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Tile edge in pixels. Must be a power of two.
    pub tile_size: u16,
    /// Number of memo slots; valid entity indices are `0..max_entities`.
    /// At most [`MAX_MEMO_SLOTS`].
    pub max_entities: usize,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self { tile_size: DEFAULT_TILE_SIZE, max_entities: MAX_ENTITY_COUNT }
    }
}

impl CollisionConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, CollisionError> {
        let cfg: CollisionConfig = toml::from_str(src)?;
        log::debug!("loaded collision config: tile_size={} max_entities={}", cfg.tile_size, cfg.max_entities);
        Ok(cfg)
    }

    /// Check ranges and derive the pixel-to-tile shift.
    pub fn validate(&self) -> Result<TileShift, CollisionError> {
        if self.max_entities == 0 {
            return Err(CollisionError::Config { message: "max_entities must be at least 1".into() });
        }
        if self.max_entities > MAX_MEMO_SLOTS {
            return Err(CollisionError::Config {
                message: format!("max_entities {} exceeds {MAX_MEMO_SLOTS}", self.max_entities),
            });
        }
        TileShift::from_tile_size(self.tile_size)
    }
}

/// Pixel-to-tile conversion for a power-of-two tile size.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileShift {
    shift: u32,
}

impl Default for TileShift {
    fn default() -> Self {
        Self { shift: DEFAULT_TILE_SIZE.trailing_zeros() }
    }
}

impl TileShift {
    pub fn from_tile_size(tile_size: u16) -> Result<Self, CollisionError> {
        if !tile_size.is_power_of_two() {
            return Err(CollisionError::InvalidTileSize { tile_size });
        }
        Ok(Self { shift: tile_size.trailing_zeros() })
    }

    pub const fn shift(self) -> u32 {
        self.shift
    }

    pub const fn tile_size(self) -> u32 {
        1 << self.shift
    }

    /// Arithmetic shift (floors toward negative infinity), saturated into `i32`.
    pub fn to_tile(self, pixel: i64) -> i32 {
        (pixel >> self.shift).clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_16px_two_slots() {
        let cfg = CollisionConfig::default();
        let shift = cfg.validate().unwrap();
        assert_eq!(shift.shift(), 4);
        assert_eq!(shift.tile_size(), 16);
        assert_eq!(cfg.max_entities, 2);
    }

    #[test]
    fn test_toml_partial_uses_defaults() {
        let cfg = CollisionConfig::from_toml_str("max_entities = 4\n").unwrap();
        assert_eq!(cfg.tile_size, 16);
        assert_eq!(cfg.max_entities, 4);
        let cfg = CollisionConfig::from_toml_str("tile_size = 8").unwrap();
        assert_eq!(cfg.validate().unwrap().shift(), 3);
    }

    #[test]
    fn test_bad_toml_reports_config_error() {
        let err = CollisionConfig::from_toml_str("tile_size = \"big\"").unwrap_err();
        assert!(matches!(err, CollisionError::Config { .. }));
    }

    #[test]
    fn test_rejects_non_power_of_two_and_zero_slots() {
        let cfg = CollisionConfig { tile_size: 12, ..Default::default() };
        assert_eq!(cfg.validate(), Err(CollisionError::InvalidTileSize { tile_size: 12 }));
        let cfg = CollisionConfig { tile_size: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = CollisionConfig { max_entities: 0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(CollisionError::Config { .. })));
    }

    #[test]
    fn test_rejects_oversized_memo() {
        let cfg = CollisionConfig::from_toml_str("max_entities = 9223372036854775807").unwrap();
        assert!(matches!(cfg.validate(), Err(CollisionError::Config { .. })));
        let cfg = CollisionConfig { max_entities: MAX_MEMO_SLOTS + 1, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = CollisionConfig { max_entities: MAX_MEMO_SLOTS, ..Default::default() };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_to_tile_floors_negatives() {
        let s = TileShift::default();
        assert_eq!(s.to_tile(0), 0);
        assert_eq!(s.to_tile(15), 0);
        assert_eq!(s.to_tile(16), 1);
        assert_eq!(s.to_tile(-1), -1);
        assert_eq!(s.to_tile(-16), -1);
        assert_eq!(s.to_tile(-17), -2);
    }
}
