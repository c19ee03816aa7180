pub(crate) mod message_serializer;

use crate::keyboard::{ButtonMatrix, ButtonPin, ScanPin};
use rp2040_hal::gpio::bank0::{
    Gpio20, Gpio21, Gpio22, Gpio23, Gpio29, Gpio4, Gpio5, Gpio6, Gpio7, Gpio8, Gpio9,
};

pub fn right_buttons(
    rows: (
        ButtonPin<Gpio29>,
        ButtonPin<Gpio4>,
        ButtonPin<Gpio20>,
        ButtonPin<Gpio23>,
        ButtonPin<Gpio21>,
    ),
    cols: (
        ScanPin<Gpio22>,
        ScanPin<Gpio5>,
        ScanPin<Gpio6>,
        ScanPin<Gpio7>,
        ScanPin<Gpio8>,
        ScanPin<Gpio9>,
    ),
) -> ButtonMatrix {
    ButtonMatrix::new(
        [
            rows.0.into_dyn_pin(),
            rows.1.into_dyn_pin(),
            rows.2.into_dyn_pin(),
            rows.3.into_dyn_pin(),
            rows.4.into_dyn_pin(),
        ],
        [
            cols.0.into_dyn_pin(),
            cols.1.into_dyn_pin(),
            cols.2.into_dyn_pin(),
            cols.3.into_dyn_pin(),
            cols.4.into_dyn_pin(),
            cols.5.into_dyn_pin(),
        ],
    )
}
