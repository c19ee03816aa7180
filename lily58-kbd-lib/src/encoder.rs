use crate::action::KeyAction;
use crate::keycode::{KeyCode, MediaCode};

/// Left half encoder, read by the master directly
pub const LEFT_ENCODER: u8 = 0;
/// Right half encoder, arrives over the split link
pub const RIGHT_ENCODER: u8 = 1;

/// Action tapped for one detent of an encoder, `None` for unknown encoders.
#[must_use]
pub const fn encoder_action(index: u8, clockwise: bool) -> Option<KeyAction> {
    match (index, clockwise) {
        (LEFT_ENCODER, true) => Some(KeyAction::Media(MediaCode::VOLUME_UP)),
        (LEFT_ENCODER, false) => Some(KeyAction::Media(MediaCode::VOLUME_DOWN)),
        (RIGHT_ENCODER, true) => Some(KeyAction::Key(KeyCode::PAGE_DOWN)),
        (RIGHT_ENCODER, false) => Some(KeyAction::Key(KeyCode::PAGE_UP)),
        _ => None,
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum RotaryPosition {
    North,
    East,
    South,
    West,
}

impl RotaryPosition {
    fn from_state(a: bool, b: bool) -> Self {
        match (a, b) {
            (true, true) => RotaryPosition::South,
            (false, true) => RotaryPosition::West,
            (false, false) => RotaryPosition::North,
            (true, false) => RotaryPosition::East,
        }
    }
}

/// Quadrature steps per mechanical detent
pub const STEPS_PER_DETENT: i8 = 4;

/// Turns raw pin a/b readings into one direction per detent.
#[derive(Copy, Clone, Debug, Default)]
pub struct QuadratureDecoder {
    last_position: Option<RotaryPosition>,
    steps: i8,
}

impl QuadratureDecoder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_position: None,
            steps: 0,
        }
    }

    /// Feed a pin reading, returns `Some(clockwise)` when a full detent was turned.
    pub fn update(&mut self, pin_a: bool, pin_b: bool) -> Option<bool> {
        let current = RotaryPosition::from_state(pin_a, pin_b);
        let old = self.last_position.replace(current)?;
        let step: i8 = match (old, current) {
            (RotaryPosition::North, RotaryPosition::East)
            | (RotaryPosition::East, RotaryPosition::South)
            | (RotaryPosition::South, RotaryPosition::West)
            | (RotaryPosition::West, RotaryPosition::North) => 1,
            (RotaryPosition::North, RotaryPosition::West)
            | (RotaryPosition::West, RotaryPosition::South)
            | (RotaryPosition::South, RotaryPosition::East)
            | (RotaryPosition::East, RotaryPosition::North) => -1,
            // Unchanged, or skipped a position and the direction is unknown
            (_, _) => return None,
        };
        if self.steps.signum() == -step {
            self.steps = 0;
        }
        self.steps += step;
        if self.steps.abs() >= STEPS_PER_DETENT {
            let clockwise = self.steps > 0;
            self.steps = 0;
            return Some(clockwise);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // North, East, South, West as (a, b)
    const CLOCKWISE: [(bool, bool); 4] = [(false, false), (true, false), (true, true), (false, true)];

    fn turn(decoder: &mut QuadratureDecoder, positions: impl Iterator<Item = (bool, bool)>) -> heapless::Vec<bool, 16> {
        let mut out = heapless::Vec::new();
        for (a, b) in positions {
            if let Some(dir) = decoder.update(a, b) {
                out.push(dir).unwrap();
            }
        }
        out
    }

    #[test]
    fn encoder_mapping() {
        assert_eq!(Some(KeyAction::Media(MediaCode::VOLUME_UP)), encoder_action(0, true));
        assert_eq!(Some(KeyAction::Media(MediaCode::VOLUME_DOWN)), encoder_action(0, false));
        assert_eq!(Some(KeyAction::Key(KeyCode::PAGE_DOWN)), encoder_action(1, true));
        assert_eq!(Some(KeyAction::Key(KeyCode::PAGE_UP)), encoder_action(1, false));
        for index in 2..=u8::MAX {
            assert_eq!(None, encoder_action(index, true));
            assert_eq!(None, encoder_action(index, false));
        }
    }

    #[test]
    fn one_detent_each_way() {
        let mut dec = QuadratureDecoder::new();
        // Start at rest, then a full cycle back to rest
        let cw = CLOCKWISE.into_iter().chain(core::iter::once(CLOCKWISE[0]));
        assert_eq!(&[true], turn(&mut dec, cw).as_slice());
        let ccw = CLOCKWISE.into_iter().rev();
        assert_eq!(&[false], turn(&mut dec, ccw).as_slice());
    }

    #[test]
    fn several_detents() {
        let mut dec = QuadratureDecoder::new();
        let positions = CLOCKWISE.into_iter().cycle().take(1 + 4 * 3);
        assert_eq!(&[true, true, true], turn(&mut dec, positions).as_slice());
    }

    #[test]
    fn wobble_does_not_emit() {
        let mut dec = QuadratureDecoder::new();
        let wobble = [CLOCKWISE[0], CLOCKWISE[1], CLOCKWISE[0], CLOCKWISE[1], CLOCKWISE[0]];
        assert!(turn(&mut dec, wobble.into_iter()).is_empty());
    }

    #[test]
    fn skipped_position_is_ignored() {
        let mut dec = QuadratureDecoder::new();
        // North straight to South
        let skip = [CLOCKWISE[0], CLOCKWISE[2], CLOCKWISE[2]];
        assert!(turn(&mut dec, skip.into_iter()).is_empty());
    }
}
