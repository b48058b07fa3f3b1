use glam::IVec2;

use crate::api::TileGridApi;
use crate::types::*;

/// Borrowed, row-major level collision grid: one byte per tile.
///
/// The metadata is trusted as given. Inconsistent metadata is tolerated by
/// the queries (it only shrinks the addressable area) and reported by
/// [`CollisionGrid::validate`].
#[derive(Copy, Clone, Debug)]
pub struct CollisionGrid<'a> {
    pub row_length: u16,
    pub data_length: u16,
    pub data: &'a [u8],
}

impl<'a> CollisionGrid<'a> {
    /// Build from tile bytes; `data_length` is the slice length (saturated to `u16`).
    pub fn new(row_length: u16, data: &'a [u8]) -> Self {
        let data_length = u16::try_from(data.len()).unwrap_or(u16::MAX);
        Self::with_lengths(row_length, data_length, data)
    }

    /// Build from explicit metadata, as stored alongside exported level data.
    pub fn with_lengths(row_length: u16, data_length: u16, data: &'a [u8]) -> Self {
        Self { row_length, data_length, data }
    }

    /// Log inconsistent metadata once, e.g. at level load. Returns the grid unchanged.
    pub fn checked(self) -> Self {
        if let Err(e) = self.validate() {
            log::warn!("{e}; rows past the last whole row are treated as out of bounds");
        } else if (self.data_length as usize) > self.data.len() {
            log::warn!("grid claims {} tiles but only {} are present", self.data_length, self.data.len());
        }
        self
    }

    /// Report metadata that does not describe a whole number of rows.
    pub fn validate(&self) -> Result<(), CollisionError> {
        let ragged = match self.row_length {
            0 => self.data_length != 0,
            n => self.data_length % n != 0,
        };
        if ragged {
            return Err(CollisionError::MalformedGrid {
                row_length: self.row_length,
                data_length: self.data_length,
            });
        }
        Ok(())
    }

    /// Raw tile byte, if `tile` addresses a stored cell.
    pub fn tile(&self, tile: IVec2) -> Option<u8> {
        if tile.x < 0 || tile.y < 0 || tile.x >= self.row_length as i32 || tile.y >= self.total_rows() as i32 {
            return None;
        }
        let idx = tile.y as usize * self.row_length as usize + tile.x as usize;
        if idx >= self.data_length as usize { return None; }
        self.data.get(idx).copied()
    }
}

impl TileGridApi for CollisionGrid<'_> {
    fn total_rows(&self) -> u16 {
        match self.row_length {
            0 => 0,
            n => self.data_length / n,
        }
    }

    fn is_solid_axes(&self, tile: IVec2, oob: OobPolicy) -> bool {
        if tile.x < 0 || tile.x >= self.row_length as i32 {
            return oob.solid_x;
        }
        if tile.y < 0 || tile.y >= self.total_rows() as i32 {
            return oob.solid_y;
        }
        let idx = tile.y as usize * self.row_length as usize + tile.x as usize;
        if idx >= self.data_length as usize {
            return oob.solid_x || oob.solid_y;
        }
        match self.data.get(idx) {
            Some(&t) => t == SOLID_TILE,
            // Metadata claims more tiles than were supplied.
            None => oob.solid_x || oob.solid_y,
        }
    }
}
