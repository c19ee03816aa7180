pub mod encoder;
#[cfg(feature = "left")]
pub mod left;
pub mod oled;
pub mod power_led;
#[cfg(feature = "right")]
pub mod right;
pub mod split_serial;
#[cfg(feature = "serial")]
pub mod usb_serial;

use crate::timer::wait_micros;
use embedded_hal::digital::{InputPin, OutputPin};
use lily58_kbd_lib::debounce::{settle, PinDebouncer};
use lily58_kbd_lib::matrix::{
    ColIndex, MatrixIndex, RowIndex, HALF_MATRIX_SIZE, NUM_COLS, NUM_ROWS,
};
use rp2040_hal::gpio::{DynPinId, FunctionSio, Pin, PullDown, PullUp, SioInput, SioOutput};
use rp2040_hal::Timer;

pub type RowPin = Pin<DynPinId, FunctionSio<SioInput>, PullUp>;
pub type ColPin = Pin<DynPinId, FunctionSio<SioOutput>, PullDown>;
pub type ButtonPin<Id> = Pin<Id, FunctionSio<SioInput>, PullUp>;
pub type ScanPin<Id> = Pin<Id, FunctionSio<SioOutput>, PullDown>;

/// One half's switches, columns are driven low one at a time and the pulled
/// up rows read low where a switch is closed.
pub struct ButtonMatrix {
    rows: [RowPin; NUM_ROWS as usize],
    cols: [ColPin; NUM_COLS as usize],
    pressed: [bool; HALF_MATRIX_SIZE],
    debouncers: [PinDebouncer; HALF_MATRIX_SIZE],
}

impl ButtonMatrix {
    pub fn new(rows: [RowPin; NUM_ROWS as usize], cols: [ColPin; NUM_COLS as usize]) -> Self {
        Self {
            rows,
            cols,
            pressed: [false; HALF_MATRIX_SIZE],
            debouncers: [PinDebouncer::new(); HALF_MATRIX_SIZE],
        }
    }

    /// Scans every switch once, `on_change` gets each debounced change.
    /// Returns true if anything changed.
    #[expect(clippy::cast_possible_truncation)]
    pub fn scan(&mut self, timer: Timer, mut on_change: impl FnMut(MatrixIndex, bool)) -> bool {
        let mut changed = false;
        for (col_ind, col) in self.cols.iter_mut().enumerate() {
            let _ = col.set_low();
            wait_micros(timer, 1);
            for (row_ind, row) in self.rows.iter_mut().enumerate() {
                let index = MatrixIndex::from_row_col(
                    RowIndex::from_value(row_ind as u8),
                    ColIndex::from_value(col_ind as u8),
                );
                if !index.has_switch() {
                    continue;
                }
                let raw = matches!(row.is_low(), Ok(true));
                let ind = index.index();
                let Some(pressed) =
                    self.debouncers[ind].update(timer.get_counter(), raw, self.pressed[ind])
                else {
                    continue;
                };
                self.pressed[ind] = pressed;
                on_change(index, pressed);
                changed = true;
            }
            let _ = col.set_high();
            // Wait for all rows to settle before driving the next column
            for row in &mut self.rows {
                settle(|| timer.get_counter(), || !matches!(row.is_low(), Ok(true)));
            }
        }
        changed
    }
}
