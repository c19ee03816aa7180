use rp2040_hal::gpio::bank0::Gpio24;
use rp2040_hal::gpio::{FunctionSio, Pin, PullDown, SioOutput};

/// The controller's own led, lit while the pin is low.
pub struct PowerLed {
    #[cfg_attr(not(feature = "serial"), expect(dead_code))]
    pin: Pin<Gpio24, FunctionSio<SioOutput>, PullDown>,
}

impl PowerLed {
    /// Takes the pin already driven high, it's set up before anything else so
    /// that the led never flashes on at boot.
    pub fn new(pin: Pin<Gpio24, FunctionSio<SioOutput>, PullDown>) -> Self {
        Self { pin }
    }

    #[cfg(feature = "serial")]
    pub fn toggle(&mut self) {
        let _ = embedded_hal::digital::StatefulOutputPin::toggle(&mut self.pin);
    }
}
