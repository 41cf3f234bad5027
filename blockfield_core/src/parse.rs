// Block name parsing and sector detection.
//
// A block node is named `<Shape>:<Type>_<Density>_<NNN>`:
// - Shape: `S` (square) or `T` (triangle). Authored triangles always have
//   their right angle bottom-right; the other orientations only appear as
//   derived variants (see `variants.rs`).
// - Type: a three-letter code from `BlockType::from_abbreviation`.
// - Density: letters, kept verbatim.
// - NNN: the block's index in the field.
// Letters match case-insensitively. The pattern is anchored at the start
// only: whatever follows the digits (a host's " copy" suffix, say) is
// ignored.
//
// Sector detection walks the block's immediate children and turns every
// child named `Slot <WxH>` into one sector. The child's position is made
// relative to the block's anchor in the field grid (see
// `LayoutConfig::block_anchor`) and rounded, its rotation is rounded to whole
// degrees and must be one of 0, 90, 45, -45. Sector ids follow child order.
// A block whose anchor, or a marker whose relative position, lies beyond
// `COORDINATE_LIMIT` fails with `CoordinateOutOfRange`. A far-away block
// without markers is fine, since nothing is placed relative to it.
//
// See also: `slots.rs` for the grid each sector delegates to, `types.rs`
// for `Block` and `Footprint`.

use crate::config::{COORDINATE_LIMIT, LayoutConfig};
use crate::error::ImportError;
use crate::geometry::{round_half_up, round_within};
use crate::scene::SceneNode;
use crate::slots::build_slots;
use crate::types::{
    Block, BlockShape, BlockType, Density, Footprint, PlacementRotation, Point, Postfix, Sector,
};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Name prefix marking a child as a slot sector marker.
pub const SLOT_MARKER_PREFIX: &str = "Slot ";

static BLOCK_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([TS]):([a-z]+)_([a-z]+)_(\d+)").unwrap_or_else(|e| {
        unreachable!("block name pattern is a valid regex: {e}")
    })
});

static SLOT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Slot (\w+)").unwrap_or_else(|e| {
        unreachable!("slot marker pattern is a valid regex: {e}")
    })
});

/// Parse a block node name into a `Block` with postfix `a`.
pub fn parse_block_name(name: &str) -> Result<Block, ImportError> {
    let malformed = || ImportError::MalformedName {
        name: name.to_string(),
    };
    let caps = BLOCK_NAME.captures(name).ok_or_else(malformed)?;

    let shape = if caps[1].eq_ignore_ascii_case("T") {
        BlockShape::TriangleBottomRight
    } else {
        BlockShape::Square
    };
    let code = &caps[2];
    let block_type = BlockType::from_abbreviation(code).ok_or_else(|| ImportError::UnknownTypeCode {
        code: code.to_string(),
    })?;
    let position: u32 = caps[4].parse().map_err(|_| malformed())?;

    Ok(Block {
        shape,
        block_type,
        density: Density::new(&caps[3]),
        position,
        postfix: Postfix::A,
    })
}

/// Footprint token of a `Slot WxH` marker name, or `None` if the node is not
/// a slot marker at all.
pub fn slot_marker_footprint(name: &str) -> Option<Result<Footprint, ImportError>> {
    if !name.starts_with(SLOT_MARKER_PREFIX) {
        return None;
    }
    let footprint = SLOT_MARKER
        .captures(name)
        .and_then(|caps| Footprint::parse(&caps[1]))
        .ok_or_else(|| ImportError::MalformedFootprint {
            name: name.to_string(),
        });
    Some(footprint)
}

/// Build one sector per slot marker among `node`'s immediate children.
pub fn detect_sectors<N: SceneNode>(
    block: &Block,
    node: &N,
    config: &LayoutConfig,
) -> Result<Vec<Sector>, ImportError> {
    let origin = config.block_anchor(block.position);
    let mut sectors = Vec::new();

    for child in node.children() {
        let Some(footprint) = slot_marker_footprint(child.name()) else {
            continue;
        };
        let footprint = footprint?;

        let origin = origin.ok_or_else(|| ImportError::CoordinateOutOfRange {
            node: node.name().to_string(),
        })?;
        let out_of_range = || ImportError::CoordinateOutOfRange {
            node: child.name().to_string(),
        };
        let anchor = Point::new(
            round_within(child.x() - f64::from(origin.x), COORDINATE_LIMIT)
                .ok_or_else(out_of_range)?,
            round_within(child.y() - f64::from(origin.y), COORDINATE_LIMIT)
                .ok_or_else(out_of_range)?,
        );
        let degrees = round_half_up(child.rotation());
        let rotation = PlacementRotation::from_degrees(degrees).ok_or_else(|| {
            ImportError::UnsupportedRotation {
                node: child.name().to_string(),
                rotation: degrees,
            }
        })?;

        let id = sectors.len() as u32;
        let slots = build_slots(footprint, anchor, rotation, config);
        debug!(
            sector = id,
            %footprint,
            %anchor,
            rotation = rotation.degrees(),
            slots = slots.len(),
            "detected sector"
        );
        sectors.push(Sector {
            id,
            slots,
            size: footprint,
        });
    }

    Ok(sectors)
}
