use crate::keyboard::RowPin;
use embedded_hal::digital::InputPin;
use lily58_kbd_lib::encoder::QuadratureDecoder;

pub struct RotaryEncoder {
    pin_a: RowPin,
    pin_b: RowPin,
    decoder: QuadratureDecoder,
}

impl RotaryEncoder {
    pub fn new(pin_a: RowPin, pin_b: RowPin) -> Self {
        Self {
            pin_a,
            pin_b,
            decoder: QuadratureDecoder::new(),
        }
    }

    /// `Some(clockwise)` once per detent
    #[inline]
    pub fn scan(&mut self) -> Option<bool> {
        let pin_a = matches!(self.pin_a.is_high(), Ok(true));
        let pin_b = matches!(self.pin_b.is_high(), Ok(true));
        self.decoder.update(pin_a, pin_b)
    }
}
