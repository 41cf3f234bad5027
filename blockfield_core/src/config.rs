// Layout configuration.
//
// All spacing constants of the field live here in `LayoutConfig`, loadable
// from JSON. The pipeline never uses magic numbers; it reads from the config.
// `Default` reproduces the stock field: 28-unit slots, 400-unit blocks spaced
// 50 units apart, ten blocks per row.
//
// Derived quantities (`half_slot`, `half_diagonal`, `artboard_id_count`,
// `block_anchor`) are methods rather than fields so a config file can never
// disagree with itself.
//
// See also: `geometry.rs` and `slots.rs` for where slot size and half
// diagonal are used, `parse.rs` for `block_anchor`, `import.rs` for id
// seeding via `artboard_id_count`.

use crate::error::ConfigError;
use crate::geometry::round_half_up;
use crate::types::Point;
use serde::{Deserialize, Serialize};

/// Largest slot size, block size or block offset a config may set.
pub const MAX_LENGTH: i32 = 1 << 16;

/// Largest absolute block anchor or block-relative marker coordinate the
/// pipeline accepts. With `MAX_LENGTH` and `MAX_SECTOR_SLOTS` this keeps every
/// placed, mirrored or rotated slot coordinate inside `i32`.
pub const COORDINATE_LIMIT: i32 = 1 << 28;

/// Number of layouts emitted per source block (original, mirror, and three
/// rotations of each).
pub const VARIANTS_PER_BLOCK: u32 = 8;

/// Spacing and sizing of the block field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Edge length of one square slot tile. Must be even so the top-left
    /// corner of a tile stays on integer coordinates.
    pub slot_size: i32,
    /// Margin before the first block and between neighbouring blocks.
    pub block_offset: i32,
    /// Edge length of one block. Also the translation applied after rotating
    /// a block's slots so they land back inside the block.
    pub block_size: i32,
    /// Blocks per field row.
    pub field_width: u32,
    /// Most field rows a single artboard is expected to hold. Only used to
    /// space out id ranges between artboards.
    pub field_max_rows: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            slot_size: 28,
            block_offset: 50,
            block_size: 400,
            field_width: 10,
            field_max_rows: 6,
        }
    }
}

impl LayoutConfig {
    /// Parse a config from JSON and validate it. Missing fields take their
    /// default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_size <= 0 {
            return Err(ConfigError::Invalid("slot_size must be positive"));
        }
        if self.slot_size % 2 != 0 {
            return Err(ConfigError::Invalid("slot_size must be even"));
        }
        if self.block_size <= 0 {
            return Err(ConfigError::Invalid("block_size must be positive"));
        }
        if self.block_offset < 0 {
            return Err(ConfigError::Invalid("block_offset must not be negative"));
        }
        if self.slot_size > MAX_LENGTH
            || self.block_size > MAX_LENGTH
            || self.block_offset > MAX_LENGTH
        {
            return Err(ConfigError::Invalid("lengths must not exceed 65536"));
        }
        if self.field_width == 0 {
            return Err(ConfigError::Invalid("field_width must be positive"));
        }
        if self.field_max_rows == 0 {
            return Err(ConfigError::Invalid("field_max_rows must be positive"));
        }
        Ok(())
    }

    pub fn half_slot(&self) -> i32 {
        self.slot_size / 2
    }

    /// Half the diagonal of a slot tile, rounded twice (diagonal first, then
    /// the half) so 45° tiles butt up against each other without gaps.
    pub fn half_diagonal(&self) -> i32 {
        let side = f64::from(self.slot_size);
        let diagonal = round_half_up((side * side * 2.0).sqrt());
        round_half_up(f64::from(diagonal) / 2.0)
    }

    /// Size of the id range reserved for one artboard.
    pub fn artboard_id_count(&self) -> u64 {
        u64::from(self.field_width) * u64::from(self.field_max_rows) * u64::from(VARIANTS_PER_BLOCK)
    }

    /// Canvas position of the top-left corner of the block at `position`, or
    /// `None` if it lies beyond `COORDINATE_LIMIT`.
    pub fn block_anchor(&self, position: u32) -> Option<Point> {
        let stride = i64::from(self.block_offset) + i64::from(self.block_size);
        let column = i64::from(position % self.field_width);
        let row = i64::from(position / self.field_width);
        let offset = i64::from(self.block_offset);
        Some(Point::new(
            within_limit(offset + stride * column)?,
            within_limit(offset + stride * row)?,
        ))
    }

    /// Translation that brings slots back into the block after a quarter
    /// turn: `(block_size, 0)` for 270°, `(0, block_size)` for 90°.
    pub fn block_extent_x(&self) -> Point {
        Point::new(self.block_size, 0)
    }

    pub fn block_extent_y(&self) -> Point {
        Point::new(0, self.block_size)
    }
}

fn within_limit(value: i64) -> Option<i32> {
    if value.abs() > i64::from(COORDINATE_LIMIT) {
        return None;
    }
    i32::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_stock_field() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.half_slot(), 14);
        assert_eq!(config.half_diagonal(), 20);
        assert_eq!(config.artboard_id_count(), 480);
    }

    #[test]
    fn block_anchor_walks_rows() {
        let config = LayoutConfig::default();
        assert_eq!(config.block_anchor(0), Some(Point::new(50, 50)));
        assert_eq!(config.block_anchor(1), Some(Point::new(500, 50)));
        assert_eq!(config.block_anchor(9), Some(Point::new(4100, 50)));
        assert_eq!(config.block_anchor(10), Some(Point::new(50, 500)));
        assert_eq!(config.block_anchor(23), Some(Point::new(1400, 950)));
    }

    #[test]
    fn far_away_block_has_no_anchor() {
        let config = LayoutConfig::default();
        // Row 9_999_999 starts at 50 + 450 * 9_999_999, past the limit.
        assert_eq!(config.block_anchor(99_999_999), None);
        assert_eq!(config.block_anchor(u32::MAX), None);
        assert!(config.block_anchor(5_000_000).is_some());
    }

    #[test]
    fn oversized_lengths_are_rejected() {
        let err = LayoutConfig::from_json_str(r#"{"block_size": 2000000000}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = LayoutConfig::from_json_str(r#"{"slot_size": 131072}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn config_loads_from_partial_json() {
        let config = LayoutConfig::from_json_str(r#"{"slot_size": 20, "field_width": 4}"#).unwrap();
        assert_eq!(config.slot_size, 20);
        assert_eq!(config.field_width, 4);
        assert_eq!(config.block_size, 400);
        assert_eq!(config.half_diagonal(), 14);
        assert_eq!(config.artboard_id_count(), 4 * 6 * 8);
    }

    #[test]
    fn config_serialization_roundtrip() {
        let config = LayoutConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored = LayoutConfig::from_json_str(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn odd_slot_size_is_rejected() {
        let err = LayoutConfig::from_json_str(r#"{"slot_size": 27}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_field_width_is_rejected() {
        let err = LayoutConfig::from_json_str(r#"{"field_width": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = LayoutConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
