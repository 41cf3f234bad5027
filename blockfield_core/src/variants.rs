// Variant generation: mirror and rotate a block's sectors into eight layouts.
//
// One authored block fills one quadrant of a symmetric field. The other
// quadrants need the same slots turned by 90°, 180° and 270°, and each of
// those also exists mirrored. `expand` produces all eight, always in this
// order:
//
//   postfix  | shape                 | sectors
//   ---------+-----------------------+-------------------------------------
//   a        | original              | S
//   a_mirror | Square / TriBotRight  | M = mirror(S)
//   b        | shapes[0]             | R = rotate(S, 270°, (size, 0))
//   b_mirror | shapes[0]             | R' = rotate(M, 270°, (size, 0))
//   c        | shapes[1]             | rotate(R, 270°, (size, 0))
//   c_mirror | shapes[1]             | rotate(R', 270°, (size, 0))
//   d        | shapes[2]             | rotate(S, 90°, (0, size))
//   d_mirror | shapes[2]             | rotate(M, 90°, (0, size))
//
// `shapes` is three squares for a square block and
// [TriangleBottomLeft, TriangleTopLeft, TriangleTopRight] for a triangle.
// The translations turn each rotation about the canvas origin into a
// rotation about the block's own center, so every variant's slots stay in
// the `size` x `size` square the original occupied.
//
// Mirroring swaps x and y of every slot center (reflection across the main
// diagonal). It keeps the triangle's shape tag: a bottom-right triangle
// reflected across that diagonal is still bottom-right.
//
// All transforms touch only slot centers (and the top-left derived from
// them). Relative positions, slot rotations, and slot/sector ids carry over.
//
// This stage is pure arithmetic over already-validated data and cannot fail.

use crate::config::LayoutConfig;
use crate::geometry::{QuarterTurn, rotate_point};
use crate::types::{Block, BlockShape, Layout, Point, Postfix, Sector};

/// Reflect every slot center across the main diagonal.
pub fn mirror(sectors: &[Sector], config: &LayoutConfig) -> Vec<Sector> {
    sectors
        .iter()
        .map(|sector| sector.map_positions(config, Point::transposed))
        .collect()
}

/// Rotate every slot center about the origin, then translate.
pub fn rotate(
    sectors: &[Sector],
    turn: QuarterTurn,
    translation: Point,
    config: &LayoutConfig,
) -> Vec<Sector> {
    sectors
        .iter()
        .map(|sector| sector.map_positions(config, |p| rotate_point(p, turn, translation)))
        .collect()
}

/// The mirrored counterpart of an authored block.
pub fn mirror_block(block: &Block) -> Block {
    let shape = if block.shape.is_square() {
        BlockShape::Square
    } else {
        BlockShape::TriangleBottomRight
    };
    block.derive(shape, Postfix::AMirror)
}

/// Shapes of the b, c and d variants.
fn rotated_shapes(original: BlockShape) -> [BlockShape; 3] {
    if original.is_square() {
        [BlockShape::Square; 3]
    } else {
        [
            BlockShape::TriangleBottomLeft,
            BlockShape::TriangleTopLeft,
            BlockShape::TriangleTopRight,
        ]
    }
}

/// Expand one block and its sectors into the eight layouts, ids unassigned.
pub fn expand(block: &Block, sectors: Vec<Sector>, config: &LayoutConfig) -> Vec<Layout> {
    let shapes = rotated_shapes(block.shape);
    let to_right = config.block_extent_x();
    let to_bottom = config.block_extent_y();

    let mirrored_block = mirror_block(block);
    let mirrored = mirror(&sectors, config);

    let b_sectors = rotate(&sectors, QuarterTurn::Deg270, to_right, config);
    let b_mirror_sectors = rotate(&mirrored, QuarterTurn::Deg270, to_right, config);
    let c_sectors = rotate(&b_sectors, QuarterTurn::Deg270, to_right, config);
    let c_mirror_sectors = rotate(&b_mirror_sectors, QuarterTurn::Deg270, to_right, config);
    let d_sectors = rotate(&sectors, QuarterTurn::Deg90, to_bottom, config);
    let d_mirror_sectors = rotate(&mirrored, QuarterTurn::Deg90, to_bottom, config);

    let variants = [
        (block.clone(), sectors),
        (mirrored_block.clone(), mirrored),
        (block.derive(shapes[0], Postfix::B), b_sectors),
        (mirrored_block.derive(shapes[0], Postfix::BMirror), b_mirror_sectors),
        (block.derive(shapes[1], Postfix::C), c_sectors),
        (mirrored_block.derive(shapes[1], Postfix::CMirror), c_mirror_sectors),
        (block.derive(shapes[2], Postfix::D), d_sectors),
        (mirrored_block.derive(shapes[2], Postfix::DMirror), d_mirror_sectors),
    ];

    variants
        .into_iter()
        .map(|(block, sectors)| Layout {
            id: None,
            block,
            sectors,
        })
        .collect()
}
