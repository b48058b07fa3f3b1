use std::fmt;

use glam::{IVec2, UVec2};

/// Tile byte value that blocks movement. Every other value is passable.
pub const SOLID_TILE: u8 = 1;

/// Default collision tile edge in pixels.
pub const DEFAULT_TILE_SIZE: u16 = 16;

/// Default number of memo slots (one per tracked entity).
pub const MAX_ENTITY_COUNT: usize = 2;

/// Upper bound on configurable memo slots; the memo is allocated up front.
pub const MAX_MEMO_SLOTS: usize = u16::MAX as usize;

/// One cardinal movement direction, checked once per call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Raw mask value used by callers that still pass directions as bit flags.
    pub const fn mask(self) -> u8 {
        match self {
            Direction::Up => 1,
            Direction::Down => 2,
            Direction::Left => 4,
            Direction::Right => 8,
        }
    }

    /// Parse a raw direction mask. Exactly one bit must be set.
    pub fn from_mask(mask: u8) -> Result<Self, CollisionError> {
        match mask {
            1 => Ok(Direction::Up),
            2 => Ok(Direction::Down),
            4 => Ok(Direction::Left),
            8 => Ok(Direction::Right),
            _ => Err(CollisionError::InvalidDirection { mask }),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Per-entity bitset of directions found blocked at the memoized position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectionFlags(u8);

impl DirectionFlags {
    pub const DOWN: u8 = 1 << 0;
    pub const UP: u8 = 1 << 1;
    pub const LEFT: u8 = 1 << 2;
    pub const RIGHT: u8 = 1 << 3;

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    const fn bit(dir: Direction) -> u8 {
        match dir {
            Direction::Down => Self::DOWN,
            Direction::Up => Self::UP,
            Direction::Left => Self::LEFT,
            Direction::Right => Self::RIGHT,
        }
    }

    pub fn contains(self, dir: Direction) -> bool {
        (self.0 & Self::bit(dir)) != 0
    }

    pub fn insert(&mut self, dir: Direction) {
        self.0 |= Self::bit(dir);
    }

    pub fn remove(&mut self, dir: Direction) {
        self.0 &= !Self::bit(dir);
    }

    pub fn set(&mut self, dir: Direction, on: bool) {
        if on { self.insert(dir) } else { self.remove(dir) }
    }
}

/// How tile coordinates outside the grid are classified, per axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OobPolicy {
    /// Result for a column outside `[0, row_length)`.
    pub solid_x: bool,
    /// Result for a row outside `[0, total_rows)`.
    pub solid_y: bool,
}

impl OobPolicy {
    /// Used by LEFT/RIGHT checks: map side edges are walls, top/bottom are open.
    pub const HORIZONTAL: OobPolicy = OobPolicy { solid_x: true, solid_y: false };
    /// Used by UP/DOWN checks: every edge is a wall.
    pub const VERTICAL: OobPolicy = OobPolicy { solid_x: true, solid_y: true };

    /// Same answer on both axes.
    pub const fn uniform(solid: bool) -> Self {
        Self { solid_x: solid, solid_y: solid }
    }

    pub const fn for_direction(dir: Direction) -> Self {
        if dir.is_horizontal() { Self::HORIZONTAL } else { Self::VERTICAL }
    }
}

/// Axis-aligned entity bounds in pixel space (top-left origin).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelBox {
    pub pos: IVec2,
    pub size: UVec2,
}

impl PixelBox {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { pos: IVec2::new(x, y), size: UVec2::new(width, height) }
    }

    /// Inclusive pixel edges `(left, top, right, bottom)`, widened to avoid overflow.
    pub fn edges(&self) -> (i64, i64, i64, i64) {
        let left = self.pos.x as i64;
        let top = self.pos.y as i64;
        (left, top, left + self.size.x as i64 - 1, top + self.size.y as i64 - 1)
    }

    /// Strict overlap: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &PixelBox) -> bool {
        let (al, at, ar, ab) = self.edges();
        let (bl, bt, br, bb) = other.edges();
        al < br + 1 && ar + 1 > bl && at < bb + 1 && ab + 1 > bt
    }
}

/// Counters for the resolver's hot path.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Accepted `check_collision` calls.
    pub queries: u64,
    /// Calls answered from the memo without sampling.
    pub cache_hits: u64,
    /// Individual tile lookups performed.
    pub tile_samples: u64,
}

/// Errors reported by the collision layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollisionError {
    /// Entity index has no memo slot.
    InvalidEntityIndex { index: usize, capacity: usize },
    /// Direction mask was zero or had more than one bit set.
    InvalidDirection { mask: u8 },
    /// Grid metadata does not describe whole rows.
    MalformedGrid { row_length: u16, data_length: u16 },
    /// Tile size is zero or not a power of two.
    InvalidTileSize { tile_size: u16 },
    /// Configuration could not be parsed or is out of range.
    Config { message: String },
}

impl fmt::Display for CollisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionError::InvalidEntityIndex { index, capacity } => {
                write!(f, "entity index {index} out of range (capacity {capacity})")
            }
            CollisionError::InvalidDirection { mask } => {
                write!(f, "direction mask {mask:#06b} must have exactly one bit set")
            }
            CollisionError::MalformedGrid { row_length, data_length } => {
                write!(f, "malformed grid: {data_length} tiles is not a whole number of rows of {row_length}")
            }
            CollisionError::InvalidTileSize { tile_size } => {
                write!(f, "tile size {tile_size} is not a non-zero power of two")
            }
            CollisionError::Config { message } => write!(f, "invalid collision config: {message}"),
        }
    }
}

impl std::error::Error for CollisionError {}

impl From<toml::de::Error> for CollisionError {
    fn from(e: toml::de::Error) -> Self {
        CollisionError::Config { message: e.to_string() }
    }
}
