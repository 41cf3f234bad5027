// Geometry primitives for slot placement.
//
// Three placement formulas map a slot's grid coordinate inside its sector to
// the canvas position of its center:
//
// - Axis-aligned: `anchor + half_slot + slot_size * relative`, per axis.
// - Diagonal (+45°): cells step along the two diagonals, half a diagonal per
//   step. Moving +x goes right and up, moving +y goes right and down.
// - Reverse diagonal (-45°): the mirror image. +x goes right and down, +y
//   goes left and down.
//
// `rotate_point` turns a center about the canvas origin by 90° or 270° and
// shifts it by a translation; `variants.rs` uses it with translations of one
// block edge so the result lands back in the block's own square.
//
// Rounding is half-up (toward +∞ at .5), the same rule the canvas host uses,
// and happens only where a float result becomes a coordinate.

use crate::config::LayoutConfig;
use crate::types::Point;
use std::f64::consts::FRAC_PI_2;

/// Round to the nearest integer, ties toward positive infinity.
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// `round_half_up`, or `None` if the result would exceed `limit` in
/// magnitude (NaN and infinities included).
pub fn round_within(value: f64, limit: i32) -> Option<i32> {
    let rounded = (value + 0.5).floor();
    if rounded.is_finite() && rounded.abs() <= f64::from(limit) {
        Some(rounded as i32)
    } else {
        None
    }
}

/// Top-left corner of a slot tile given its center.
pub fn top_left_from_center(center: Point, half_slot: i32) -> Point {
    Point::new(center.x - half_slot, center.y - half_slot)
}

/// Center of an upright slot tile.
pub fn place_axis_aligned(relative: Point, anchor: Point, config: &LayoutConfig) -> Point {
    let half = config.half_slot();
    let size = config.slot_size;
    Point::new(
        anchor.x + half + size * relative.x,
        anchor.y + half + size * relative.y,
    )
}

/// Center of a 45° slot tile in a diagonal sector.
pub fn place_diagonal(relative: Point, anchor: Point, config: &LayoutConfig) -> Point {
    let hd = config.half_diagonal();
    Point::new(
        anchor.x + hd * (1 + relative.x + relative.y),
        anchor.y + hd * (relative.y - relative.x),
    )
}

/// Center of a 45° slot tile in a reverse-diagonal sector.
pub fn place_reverse_diagonal(relative: Point, anchor: Point, config: &LayoutConfig) -> Point {
    let hd = config.half_diagonal();
    Point::new(
        anchor.x + hd * (relative.x - relative.y),
        anchor.y + hd * (1 + relative.x + relative.y),
    )
}

/// Quarter-turn angles used by the variant generator.
///
/// Only 90° and 270° exist: with the formula in `rotate_point`, those are
/// proper rotations, while 180° would come out as a reflection. Half turns
/// are built by applying `Deg270` twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuarterTurn {
    Deg90,
    Deg270,
}

impl QuarterTurn {
    pub fn radians(self) -> f64 {
        match self {
            QuarterTurn::Deg90 => FRAC_PI_2,
            QuarterTurn::Deg270 => 3.0 * FRAC_PI_2,
        }
    }
}

/// Rotate `p` about the origin by `turn`, then add `translation`.
///
/// `x' = round(x·cos + y·sin) + t.x`, `y' = round(-(x·sin + y·cos)) + t.y`.
/// The trig values of quarter turns are not exact in floating point, so the
/// rounding is what snaps the result back onto the integer grid.
pub fn rotate_point(p: Point, turn: QuarterTurn, translation: Point) -> Point {
    let (sin, cos) = turn.radians().sin_cos();
    let x = f64::from(p.x);
    let y = f64::from(p.y);
    Point::new(
        round_half_up(x * cos + y * sin) + translation.x,
        round_half_up(-(x * sin + y * cos)) + translation.y,
    )
}
