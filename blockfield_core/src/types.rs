// Core data model shared by every stage of the derivation pipeline.
//
// Defines canvas coordinates (`Point`), the slot grid (`Slot`, `Sector`,
// `Footprint`), the block descriptor parsed from a block's name (`Block` and
// its closed vocabularies `BlockShape`, `BlockType`, `Density`, `Postfix`) and
// the emitted result unit (`Layout`).
//
// Serialization follows the layout format the game's importer reads: camelCase
// keys, shapes/types/slot rotations as integer codes, postfix and footprint as
// strings. `Slot`, `Sector` and `Layout` are serialize-only; a slot's top-left
// corner is always derived from its center and is never read back from outside.
//
// See also: `geometry.rs` for the formulas that produce slot positions,
// `parse.rs` for how a `Block` is read from a node name, `variants.rs` for
// how `Postfix` values are assigned.

use crate::config::LayoutConfig;
use crate::geometry::top_left_from_center;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A 2D position in canvas units. X grows to the right, Y grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Reflection across the main diagonal (x and y swapped).
    pub const fn transposed(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Integer-coded enums
// ---------------------------------------------------------------------------

// Enums the importer reads as integers rather than names. Generates the enum,
// `code()` / `from_code()`, and serde impls that go through the code.
macro_rules! coded_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident = $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const fn code(self) -> u8 {
                match self {
                    $($name::$variant => $code),+
                }
            }

            pub const fn from_code(code: u8) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_u8(self.code())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let code = u8::deserialize(deserializer)?;
                $name::from_code(code).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "invalid {} code {code}",
                        stringify!($name)
                    ))
                })
            }
        }
    };
}

coded_enum! {
    /// Outline of a block. Triangles are named by the corner holding the
    /// right angle.
    BlockShape {
        Square = 1,
        TriangleTopLeft = 2,
        TriangleTopRight = 3,
        TriangleBottomLeft = 4,
        TriangleBottomRight = 5,
    }
}

coded_enum! {
    /// Land-use category of a block.
    BlockType {
        Residential = 1,
        Commercial = 2,
        Industrial = 3,
        Forest = 4,
        Park = 5,
        Agricultural = 6,
        Water = 7,
        Wasteland = 8,
    }
}

coded_enum! {
    /// Visual rotation of a slot tile in degrees. Distinct from the rotation
    /// its sector marker was placed with (see `PlacementRotation`).
    SlotRotation {
        Flat = 0,
        Diagonal = 45,
    }
}

impl BlockShape {
    pub fn is_square(self) -> bool {
        self == BlockShape::Square
    }
}

impl BlockType {
    pub const ALL: [BlockType; 8] = [
        BlockType::Residential,
        BlockType::Commercial,
        BlockType::Industrial,
        BlockType::Forest,
        BlockType::Park,
        BlockType::Agricultural,
        BlockType::Water,
        BlockType::Wasteland,
    ];

    /// Resolve a type code from a block name. Case-insensitive.
    pub fn from_abbreviation(code: &str) -> Option<Self> {
        BlockType::ALL
            .into_iter()
            .find(|block_type| block_type.abbreviation().eq_ignore_ascii_case(code))
    }

    /// Three-letter code used in block names.
    pub fn abbreviation(self) -> &'static str {
        match self {
            BlockType::Residential => "Res",
            BlockType::Commercial => "Com",
            BlockType::Industrial => "Ind",
            BlockType::Forest => "For",
            BlockType::Park => "Par",
            BlockType::Agricultural => "Agr",
            BlockType::Water => "Wat",
            BlockType::Wasteland => "Was",
        }
    }
}

// ---------------------------------------------------------------------------
// Placement rotation and footprint
// ---------------------------------------------------------------------------

/// Rotation (in whole degrees) a `Slot WxH` marker was placed with on the
/// canvas. Selects the fill dimensions and placement formula of its sector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementRotation {
    /// 0°: axis-aligned, W columns by H rows.
    Upright,
    /// 90°: axis-aligned, H columns by W rows.
    Sideways,
    /// 45°: diagonal fill.
    Diagonal,
    /// -45°: reverse-diagonal fill.
    ReverseDiagonal,
}

impl PlacementRotation {
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees {
            0 => Some(PlacementRotation::Upright),
            90 => Some(PlacementRotation::Sideways),
            45 => Some(PlacementRotation::Diagonal),
            -45 => Some(PlacementRotation::ReverseDiagonal),
            _ => None,
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            PlacementRotation::Upright => 0,
            PlacementRotation::Sideways => 90,
            PlacementRotation::Diagonal => 45,
            PlacementRotation::ReverseDiagonal => -45,
        }
    }
}

/// Largest footprint a single slot marker may declare. A block holds about
/// 14 x 14 stock slots, so this leaves ample room while keeping every slot
/// coordinate well inside `i32`.
pub const MAX_SECTOR_SLOTS: u32 = 4096;

/// A building footprint in slot units, written `WxH` (e.g. `2x3`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parse `WxH` with both sides positive integers and at most
    /// `MAX_SECTOR_SLOTS` slots in total.
    pub fn parse(token: &str) -> Option<Self> {
        let (w, h) = token.split_once('x')?;
        let width: u32 = w.parse().ok()?;
        let height: u32 = h.parse().ok()?;
        if width == 0 || height == 0 {
            return None;
        }
        match width.checked_mul(height) {
            Some(count) if count <= MAX_SECTOR_SLOTS => Some(Self { width, height }),
            _ => None,
        }
    }

    pub fn slot_count(self) -> u32 {
        self.width.saturating_mul(self.height)
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl Serialize for Footprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Footprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Footprint::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid footprint {s:?}")))
    }
}

// ---------------------------------------------------------------------------
// Slots and sectors
// ---------------------------------------------------------------------------

/// One buildable cell of a sector.
///
/// `top_left_position` is always `absolute_position` minus half a slot on each
/// axis; both are only reachable through `Slot::new` / `Slot::moved_to`, so
/// the two can never drift apart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Sequential within its sector, in fill order.
    pub id: u32,
    /// Grid coordinate inside the sector, origin at the first filled cell.
    pub relative_position: Point,
    absolute_position: Point,
    top_left_position: Point,
    pub rotation: SlotRotation,
}

impl Slot {
    pub fn new(
        id: u32,
        relative_position: Point,
        absolute_position: Point,
        rotation: SlotRotation,
        config: &LayoutConfig,
    ) -> Self {
        Self {
            id,
            relative_position,
            absolute_position,
            top_left_position: top_left_from_center(absolute_position, config.half_slot()),
            rotation,
        }
    }

    /// Canvas position of the slot's center.
    pub fn absolute_position(&self) -> Point {
        self.absolute_position
    }

    /// Canvas position of the slot tile's top-left corner.
    pub fn top_left_position(&self) -> Point {
        self.top_left_position
    }

    /// Copy of this slot with its center moved, top-left recomputed.
    pub fn moved_to(&self, absolute_position: Point, config: &LayoutConfig) -> Self {
        Slot::new(
            self.id,
            self.relative_position,
            absolute_position,
            self.rotation,
            config,
        )
    }
}

/// A rectangular group of slots for one building footprint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Sector {
    /// Sequential within its block, in marker encounter order.
    pub id: u32,
    pub slots: Vec<Slot>,
    pub size: Footprint,
}

impl Sector {
    /// Copy of this sector with every slot center passed through `f`.
    pub fn map_positions(&self, config: &LayoutConfig, f: impl Fn(Point) -> Point) -> Self {
        Self {
            id: self.id,
            slots: self
                .slots
                .iter()
                .map(|slot| slot.moved_to(f(slot.absolute_position()), config))
                .collect(),
            size: self.size,
        }
    }
}

// ---------------------------------------------------------------------------
// Block descriptor
// ---------------------------------------------------------------------------

/// Density band of a block, taken verbatim from its name (`Low`, `High`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Density(String);

impl Density {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which of the eight derived variants a layout is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Postfix {
    #[serde(rename = "a")]
    A,
    #[serde(rename = "a_mirror")]
    AMirror,
    #[serde(rename = "b")]
    B,
    #[serde(rename = "b_mirror")]
    BMirror,
    #[serde(rename = "c")]
    C,
    #[serde(rename = "c_mirror")]
    CMirror,
    #[serde(rename = "d")]
    D,
    #[serde(rename = "d_mirror")]
    DMirror,
}

impl Postfix {
    /// All postfixes in emission order.
    pub const ALL: [Postfix; 8] = [
        Postfix::A,
        Postfix::AMirror,
        Postfix::B,
        Postfix::BMirror,
        Postfix::C,
        Postfix::CMirror,
        Postfix::D,
        Postfix::DMirror,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Postfix::A => "a",
            Postfix::AMirror => "a_mirror",
            Postfix::B => "b",
            Postfix::BMirror => "b_mirror",
            Postfix::C => "c",
            Postfix::CMirror => "c_mirror",
            Postfix::D => "d",
            Postfix::DMirror => "d_mirror",
        }
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata of one block, parsed from its name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub shape: BlockShape,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub density: Density,
    /// Index of the block in the field, row-major.
    pub position: u32,
    pub postfix: Postfix,
}

impl Block {
    /// Copy keeping type, density and position; only shape and postfix change.
    pub fn derive(&self, shape: BlockShape, postfix: Postfix) -> Self {
        Self {
            shape,
            block_type: self.block_type,
            density: self.density.clone(),
            position: self.position,
            postfix,
        }
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Run-unique layout identifier, assigned by the import orchestrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayoutId(pub u64);

/// One emitted result unit: a block variant and its slot sectors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<LayoutId>,
    pub block: Block,
    pub sectors: Vec<Sector>,
}
