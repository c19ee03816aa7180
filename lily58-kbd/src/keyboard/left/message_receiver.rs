use crate::keyboard::split_serial::UartLeft;
use lily58_kbd_lib::matrix::{MatrixChange, MatrixUpdate};

const BUF_SIZE: usize = 32;

pub(crate) struct MessageReceiver {
    uart: UartLeft,
    buf: [u8; BUF_SIZE],
    cursor: usize,
    filled: usize,
    pub(crate) rejected: u16,
}

impl MessageReceiver {
    pub fn new(uart: UartLeft) -> Self {
        Self {
            uart,
            buf: [0u8; BUF_SIZE],
            cursor: 0,
            filled: 0,
            rejected: 0,
        }
    }

    /// Next change sent by the right half, bytes that don't decode are dropped.
    pub(crate) fn try_read(&mut self) -> Option<MatrixChange> {
        loop {
            if self.cursor >= self.filled {
                self.cursor = 0;
                self.filled = self.uart.read(&mut self.buf);
                if self.filled == 0 {
                    return None;
                }
            }
            let byte = self.buf[self.cursor];
            self.cursor += 1;
            if let Some(update) = MatrixUpdate::from_byte(byte) {
                return Some(update.interpret_byte());
            }
            self.rejected = self.rejected.wrapping_add(1);
        }
    }
}
