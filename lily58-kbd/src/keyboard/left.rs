pub(crate) mod message_receiver;

use crate::keyboard::{ButtonMatrix, ButtonPin, ScanPin};
use rp2040_hal::gpio::bank0::{
    Gpio20, Gpio21, Gpio22, Gpio23, Gpio26, Gpio27, Gpio29, Gpio6, Gpio7, Gpio8, Gpio9,
};

pub fn left_buttons(
    rows: (
        ButtonPin<Gpio29>,
        ButtonPin<Gpio27>,
        ButtonPin<Gpio6>,
        ButtonPin<Gpio7>,
        ButtonPin<Gpio8>,
    ),
    cols: (
        ScanPin<Gpio9>,
        ScanPin<Gpio26>,
        ScanPin<Gpio22>,
        ScanPin<Gpio20>,
        ScanPin<Gpio23>,
        ScanPin<Gpio21>,
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
