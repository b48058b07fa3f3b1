//! Camera follow and map-bounds clamping in pixel space.
//!
//! Pure arithmetic: the caller hands the resulting [`CameraFrame`] to its
//! display layer (map scroll, background scroll, sprite placement).

use glam::{IVec2, UVec2};

/// Visible area of the target console, in pixels.
pub const SCREEN_SIZE: UVec2 = UVec2::new(320, 224);

/// Default cap on the background's vertical scroll, in 8px tiles.
pub const DEFAULT_VERTICAL_SCROLL_LIMIT: i32 = 32;

/// Map dimensions are authored in 128px metatile blocks (8x8 tiles of 16px).
pub const fn metatiles_to_pixels(n: u16) -> u32 {
    (n as u32) << 7
}

/// What the camera should keep centered.
#[derive(Copy, Clone, Debug)]
pub struct CameraTarget {
    /// Top-left of the followed sprite in map pixels.
    pub pos: IVec2,
    pub sprite_size: UVec2,
}

/// Result of one follow step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CameraFrame {
    /// Camera top-left in map pixels.
    pub position: IVec2,
    /// True if `position` changed this step and scroll registers need updating.
    pub moved: bool,
    /// Background plane scroll in 8px units `(horizontal, vertical)`.
    pub background: IVec2,
    /// Where the target sprite lands on screen.
    pub sprite_screen: IVec2,
}

#[derive(Clone, Debug)]
pub struct Camera {
    map_size: UVec2,
    screen: UVec2,
    position: IVec2,
    active: bool,
    vertical_scroll_limit: i32,
}

impl Camera {
    /// Camera over a map measured in metatiles. Starts active at the origin.
    pub fn new(map_metatiles: (u16, u16)) -> Self {
        let map_size = UVec2::new(metatiles_to_pixels(map_metatiles.0), metatiles_to_pixels(map_metatiles.1));
        Self::with_screen(map_size, SCREEN_SIZE)
    }

    pub fn with_screen(map_size: UVec2, screen: UVec2) -> Self {
        Self {
            map_size,
            screen,
            position: IVec2::ZERO,
            active: true,
            vertical_scroll_limit: DEFAULT_VERTICAL_SCROLL_LIMIT,
        }
    }

    pub fn map_size(&self) -> UVec2 { self.map_size }
    pub fn position(&self) -> IVec2 { self.position }

    pub fn activate(&mut self) { self.active = true; }
    pub fn deactivate(&mut self) { self.active = false; }
    pub fn is_active(&self) -> bool { self.active }

    pub fn vertical_scroll_limit(&self) -> i32 { self.vertical_scroll_limit }
    pub fn set_vertical_scroll_limit(&mut self, limit: i32) { self.vertical_scroll_limit = limit; }

    /// Move the camera directly. Ignored while active (the target drives it).
    pub fn set_position(&mut self, pos: IVec2) -> bool {
        if self.active {
            return false;
        }
        self.position = pos;
        true
    }

    /// Center on `target`, clamped so the screen stays inside the map.
    /// Returns `None` while the camera is inactive.
    pub fn follow(&mut self, target: &CameraTarget) -> Option<CameraFrame> {
        if !self.active {
            return None;
        }
        let screen = self.screen.as_ivec2();
        let max = (self.map_size.as_ivec2() - screen).max(IVec2::ZERO);
        let wanted = target.pos - screen / 2 + target.sprite_size.as_ivec2() / 2;
        let next = wanted.clamp(IVec2::ZERO, max);

        let moved = next != self.position;
        self.position = next;
        let background = IVec2::new(-next.x >> 3, (next.y >> 3).min(self.vertical_scroll_limit));
        Some(CameraFrame { position: next, moved, background, sprite_screen: target.pos - next })
    }

    /// Keep an entity of `size` fully on the map.
    pub fn clamp_to_map(&self, pos: IVec2, size: UVec2) -> IVec2 {
        let map = self.map_size.as_ivec2();
        let size = size.as_ivec2();
        let mut out = pos;
        if out.x < 0 { out.x = 0; }
        if out.x > map.x - 1 - size.x { out.x = map.x - 1 - size.x; }
        if out.y < 0 { out.y = 0; }
        if out.y > map.y - size.y { out.y = map.y - size.y; }
        out
    }

    /// Per-frame camera positions for a horizontal shake; the camera itself is unchanged.
    pub fn shake(&self, duration: u16, intensity: i32) -> impl Iterator<Item = IVec2> + '_ {
        (0..duration).map(move |i| {
            let dx = if i % 2 == 0 { intensity } else { -intensity };
            self.position + IVec2::new(dx, 0)
        })
    }
}
