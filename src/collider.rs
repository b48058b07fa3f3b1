use glam::IVec2;

use crate::api::{LevelCollisionApi, TileGridApi};
use crate::config::{CollisionConfig, TileShift};
use crate::grid::CollisionGrid;
use crate::memo::CollisionMemo;
use crate::types::*;

/// Directional tile collider with a per-entity verdict memo.
///
/// Owned by the caller's world; queries need `&mut self`, so each
/// collider's memo is only ever touched by one query at a time.
pub struct LevelCollider {
    pub cfg: CollisionConfig,
    shift: TileShift,
    memo: CollisionMemo,
    stats: CollisionStats,
}

impl LevelCollider {
    pub fn new(cfg: CollisionConfig) -> Result<Self, CollisionError> {
        let shift = cfg.validate()?;
        let memo = CollisionMemo::new(cfg.max_entities);
        Ok(Self { cfg, shift, memo, stats: CollisionStats::default() })
    }

    pub fn memo(&self) -> &CollisionMemo {
        &self.memo
    }

    /// Drop cached verdicts for every entity. Needed when switching grids,
    /// since the memo is keyed by position only.
    pub fn clear_memo(&mut self) {
        self.memo.clear();
    }

    pub fn reset_entity(&mut self, index: usize) -> Result<(), CollisionError> {
        self.memo.reset(index)
    }

    pub fn stats(&self) -> CollisionStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = CollisionStats::default();
    }

    /// The two tiles sampled for `direction`, in `(first, second)` order.
    pub fn sample_tiles(&self, bounds: &PixelBox, direction: Direction) -> [IVec2; 2] {
        let (left, top, right, bottom) = bounds.edges();
        let s = self.shift;
        let (l, t, r, b) = (s.to_tile(left), s.to_tile(top), s.to_tile(right), s.to_tile(bottom));
        match direction {
            Direction::Left => [IVec2::new(l, t), IVec2::new(l, b)],
            Direction::Right => [IVec2::new(r, t), IVec2::new(r, b)],
            Direction::Up => [IVec2::new(l, t), IVec2::new(r, t)],
            Direction::Down => [IVec2::new(l, b), IVec2::new(r, b)],
        }
    }
}

impl LevelCollisionApi for LevelCollider {
    fn check_collision(
        &mut self,
        index: usize,
        bounds: PixelBox,
        grid: &CollisionGrid<'_>,
        direction: Direction,
    ) -> Result<bool, CollisionError> {
        let entry = self.memo.get_mut(index)?;
        self.stats.queries += 1;

        // A check in one direction invalidates the opposite verdict.
        entry.flags.remove(direction.opposite());

        if entry.hit(bounds.pos, direction) {
            self.stats.cache_hits += 1;
            log::trace!("entity {index} {direction:?} at {}: memo hit", bounds.pos);
            return Ok(true);
        }

        let oob = OobPolicy::for_direction(direction);
        let [a, b] = self.sample_tiles(&bounds, direction);
        let blocked = if grid.is_solid_axes(a, oob) {
            self.stats.tile_samples += 1;
            true
        } else {
            self.stats.tile_samples += 2;
            grid.is_solid_axes(b, oob)
        };

        let entry = self.memo.get_mut(index)?;
        entry.record(bounds.pos, direction, blocked);
        log::trace!("entity {index} {direction:?} at {}: tiles {a} {b} -> {blocked}", bounds.pos);
        Ok(blocked)
    }
}
