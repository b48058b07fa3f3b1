use crate::api::JoypadSource;

pub const BUTTON_NONE: u16 = 0x0000;
pub const BUTTON_UP: u16 = 0x0001;
pub const BUTTON_DOWN: u16 = 0x0002;
pub const BUTTON_LEFT: u16 = 0x0004;
pub const BUTTON_RIGHT: u16 = 0x0008;
pub const BUTTON_B: u16 = 0x0010;
pub const BUTTON_C: u16 = 0x0020;
pub const BUTTON_A: u16 = 0x0040;
pub const BUTTON_START: u16 = 0x0080;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Joypad {
    One,
    Two,
}

impl Joypad {
    pub const ALL: [Joypad; 2] = [Joypad::One, Joypad::Two];

    const fn slot(self) -> usize {
        match self {
            Joypad::One => 0,
            Joypad::Two => 1,
        }
    }
}

/// Current and previous button masks for both pads, for edge detection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    current: [u16; 2],
    previous: [u16; 2],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift this frame's state into `previous` and read fresh masks. Call once per frame.
    pub fn poll(&mut self, source: &impl JoypadSource) {
        self.previous = self.current;
        for pad in Joypad::ALL {
            self.current[pad.slot()] = source.read_buttons(pad);
        }
    }

    pub fn current(&self, pad: Joypad) -> u16 {
        self.current[pad.slot()]
    }

    pub fn previous(&self, pad: Joypad) -> u16 {
        self.previous[pad.slot()]
    }

    /// Any button in `mask` went down this frame.
    pub fn pressed(&self, pad: Joypad, mask: u16) -> bool {
        (self.current(pad) & !self.previous(pad) & mask) != 0
    }

    /// Any button in `mask` went up this frame.
    pub fn released(&self, pad: Joypad, mask: u16) -> bool {
        (!self.current(pad) & self.previous(pad) & mask) != 0
    }

    /// Any button in `mask` is held.
    pub fn down(&self, pad: Joypad, mask: u16) -> bool {
        (self.current(pad) & mask) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct MockPads {
        one: Cell<u16>,
        two: Cell<u16>,
    }

    impl MockPads {
        fn set(&self, one: u16, two: u16) {
            self.one.set(one);
            self.two.set(two);
        }
    }

    impl JoypadSource for MockPads {
        fn read_buttons(&self, pad: Joypad) -> u16 {
            match pad {
                Joypad::One => self.one.get(),
                Joypad::Two => self.two.get(),
            }
        }
    }

    fn step(input: &mut InputState, pads: &MockPads, one: u16, two: u16) {
        pads.set(one, two);
        input.poll(pads);
    }

    #[test]
    fn test_poll_tracks_previous() {
        let pads = MockPads::default();
        let mut input = InputState::new();
        step(&mut input, &pads, BUTTON_A, BUTTON_B);
        step(&mut input, &pads, BUTTON_A | BUTTON_UP, BUTTON_B | BUTTON_DOWN);
        assert_eq!(input.current(Joypad::One), BUTTON_A | BUTTON_UP);
        assert_eq!(input.previous(Joypad::One), BUTTON_A);
        assert_eq!(input.current(Joypad::Two), BUTTON_B | BUTTON_DOWN);
        assert_eq!(input.previous(Joypad::Two), BUTTON_B);
    }

    #[test]
    fn test_pressed_is_edge_only() {
        let pads = MockPads::default();
        let mut input = InputState::new();
        step(&mut input, &pads, BUTTON_A, 0);
        assert!(input.pressed(Joypad::One, BUTTON_A));
        assert!(!input.pressed(Joypad::Two, BUTTON_A));
        step(&mut input, &pads, BUTTON_A, 0);
        assert!(!input.pressed(Joypad::One, BUTTON_A));
        assert!(input.down(Joypad::One, BUTTON_A));
        // B added while A held: any newly set bit in the mask counts.
        step(&mut input, &pads, BUTTON_A | BUTTON_B, 0);
        assert!(input.pressed(Joypad::One, BUTTON_B));
        assert!(input.pressed(Joypad::One, BUTTON_A | BUTTON_B));
    }

    #[test]
    fn test_released_and_swap() {
        let pads = MockPads::default();
        let mut input = InputState::new();
        step(&mut input, &pads, BUTTON_A | BUTTON_B, 0);
        step(&mut input, &pads, BUTTON_A, 0);
        assert!(input.released(Joypad::One, BUTTON_B));
        assert!(!input.released(Joypad::One, BUTTON_A));
        step(&mut input, &pads, BUTTON_B, 0);
        assert!(input.released(Joypad::One, BUTTON_A));
        assert!(input.pressed(Joypad::One, BUTTON_B));
    }

    #[test]
    fn test_zero_mask_is_always_false() {
        let pads = MockPads::default();
        let mut input = InputState::new();
        step(&mut input, &pads, 0xFFFF, 0);
        assert!(!input.pressed(Joypad::One, BUTTON_NONE));
        assert!(!input.down(Joypad::One, BUTTON_NONE));
        step(&mut input, &pads, 0, 0);
        assert!(!input.released(Joypad::One, BUTTON_NONE));
        assert!(input.released(Joypad::One, BUTTON_A | BUTTON_START));
    }
}
