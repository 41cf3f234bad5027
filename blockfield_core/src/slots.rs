// Slot-grid builder.
//
// Fills one building footprint with slots. The marker's placement rotation
// picks the fill dimensions and the placement formula:
//
//   rotation | columns | rows | anchor shift      | formula
//   ---------+---------+------+-------------------+-----------------
//        0°  |    W    |  H   | none              | axis-aligned
//       90°  |    H    |  W   | y -= slot_size    | axis-aligned
//       45°  |    W    |  H   | none              | diagonal
//      -45°  |    W    |  H   | none              | reverse diagonal
//
// Fill order is column by column: for each x in 0..columns, for each y in
// 0..rows. Slot ids follow that order from 0 and are consumed downstream as
// stable keys, so the order is fixed.

use crate::config::LayoutConfig;
use crate::geometry::{place_axis_aligned, place_diagonal, place_reverse_diagonal};
use crate::types::{Footprint, PlacementRotation, Point, Slot, SlotRotation};

/// Build the slots of one sector, in fill order.
pub fn build_slots(
    footprint: Footprint,
    anchor: Point,
    rotation: PlacementRotation,
    config: &LayoutConfig,
) -> Vec<Slot> {
    let (columns, rows, anchor, place, slot_rotation): (u32, u32, Point, PlaceFn, SlotRotation) =
        match rotation {
            PlacementRotation::Upright => (
                footprint.width,
                footprint.height,
                anchor,
                place_axis_aligned as PlaceFn,
                SlotRotation::Flat,
            ),
            PlacementRotation::Sideways => (
                footprint.height,
                footprint.width,
                Point::new(anchor.x, anchor.y - config.slot_size),
                place_axis_aligned as PlaceFn,
                SlotRotation::Flat,
            ),
            PlacementRotation::Diagonal => (
                footprint.width,
                footprint.height,
                anchor,
                place_diagonal as PlaceFn,
                SlotRotation::Diagonal,
            ),
            PlacementRotation::ReverseDiagonal => (
                footprint.width,
                footprint.height,
                anchor,
                place_reverse_diagonal as PlaceFn,
                SlotRotation::Diagonal,
            ),
        };

    let mut slots = Vec::with_capacity(footprint.slot_count() as usize);
    let mut next_id = 0;
    for x in 0..columns {
        for y in 0..rows {
            let relative = Point::new(x as i32, y as i32);
            let center = place(relative, anchor, config);
            slots.push(Slot::new(next_id, relative, center, slot_rotation, config));
            next_id += 1;
        }
    }
    slots
}

type PlaceFn = fn(Point, Point, &LayoutConfig) -> Point;
