use crate::keyboard::split_serial::UartRight;
use lily58_kbd_lib::matrix::MatrixUpdate;

pub(crate) struct MessageSerializer {
    uart: UartRight,
    buf: [u8; 64],
    cursor: usize,
}

impl MessageSerializer {
    pub fn new(uart: UartRight) -> Self {
        Self {
            uart,
            buf: [0u8; 64],
            cursor: 0,
        }
    }

    /// Queues an update, false if the buffer is full
    pub(crate) fn serialize(&mut self, update: MatrixUpdate) -> bool {
        let Some(slot) = self.buf.get_mut(self.cursor) else {
            return false;
        };
        *slot = update.byte();
        self.cursor += 1;
        true
    }

    /// Sends what's queued, returns false if the uart errored
    pub(crate) fn pump(&mut self) -> bool {
        // Exit if no write necessary
        if self.cursor == 0 {
            return true;
        }
        let Some(written) = self.uart.write(&self.buf[..self.cursor]) else {
            return false;
        };
        if written >= self.cursor {
            self.cursor = 0;
        } else if written > 0 {
            self.buf.copy_within(written..self.cursor, 0);
            self.cursor -= written;
        }
        true
    }
}
