use glam::IVec2;

use crate::grid::CollisionGrid;
use crate::types::*;

/// Read-only solidity queries against a tile grid.
pub trait TileGridApi {
    /// Number of whole rows described by the grid metadata (0 if `row_length == 0`).
    fn total_rows(&self) -> u16;

    /// Solidity of `tile` with independent out-of-bounds answers per axis.
    fn is_solid_axes(&self, tile: IVec2, oob: OobPolicy) -> bool;

    /// Solidity of `tile` with one out-of-bounds answer for both axes.
    fn is_solid(&self, tile: IVec2, oob_solid: bool) -> bool {
        self.is_solid_axes(tile, OobPolicy::uniform(oob_solid))
    }
}

/// Public contract for the directional, memoized level collider.
pub trait LevelCollisionApi {
    /// Does `bounds` collide with the level in `direction`?
    ///
    /// `index` selects the entity's memo slot. A repeated query at an
    /// unchanged position for an already-blocked direction is answered from
    /// the memo.
    fn check_collision(
        &mut self,
        index: usize,
        bounds: PixelBox,
        grid: &CollisionGrid<'_>,
        direction: Direction,
    ) -> Result<bool, CollisionError>;

    /// Convenience: take a raw bit-flag direction and reject combined masks.
    fn check_collision_mask(
        &mut self,
        index: usize,
        bounds: PixelBox,
        grid: &CollisionGrid<'_>,
        mask: u8,
    ) -> Result<bool, CollisionError> {
        let direction = Direction::from_mask(mask)?;
        self.check_collision(index, bounds, grid, direction)
    }
}

/// Source of raw controller button bitmasks, read once per frame.
pub trait JoypadSource {
    fn read_buttons(&self, pad: crate::input::Joypad) -> u16;
}
