use core::fmt::Write;
use rp2040_hal::usb::UsbBus;
use usb_device::bus::UsbBusAllocator;
use usbd_serial::SerialPort;

/// Debug port next to the keyboard, output is dropped until the host asks for it.
pub struct UsbSerial<'a> {
    pub(crate) inner: SerialPort<'a, UsbBus>,
    output: bool,
    last_chars: [u8; 16],
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SerialCommand {
    /// Reboot into the usb bootloader
    Boot,
    /// Start writing debug output
    Output,
    /// Flip the power led
    Led,
}

impl<'a> UsbSerial<'a> {
    pub fn new(usb_bus: &'a UsbBusAllocator<UsbBus>) -> Self {
        // Set up the USB Communications Class Device driver
        let inner = SerialPort::new(usb_bus);
        Self {
            inner,
            output: false,
            last_chars: [0u8; 16],
        }
    }

    /// Reads what the host typed, a command is recognized once its last
    /// character arrives.
    pub fn read_command(&mut self) -> Option<SerialCommand> {
        let mut buf = [0u8; 16];
        let count = self.inner.read(&mut buf).ok()?;
        let last_chars_len = self.last_chars.len();
        let mut command = None;
        for byte in &buf[..count] {
            self.last_chars.copy_within(1..last_chars_len, 0);
            self.last_chars[last_chars_len - 1] = *byte;
            if self.last_chars.ends_with(b"boot") {
                command = Some(SerialCommand::Boot);
            } else if self.last_chars.ends_with(b"output") {
                self.output = true;
                command = Some(SerialCommand::Output);
            } else if self.last_chars.ends_with(b"led") {
                command = Some(SerialCommand::Led);
            }
        }
        command
    }
}

impl Write for UsbSerial<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        if self.output {
            serial_write_all(&mut self.inner, s.as_bytes());
        }
        Ok(())
    }
}

// Nothing drains the endpoint while this runs, so a full buffer drops the rest
fn serial_write_all(serial: &mut SerialPort<UsbBus>, buf: &[u8]) {
    let mut rem = buf;
    while !rem.is_empty() {
        match serial.write(rem) {
            Ok(wrote) if wrote > 0 => {
                rem = &rem[wrote..];
            }
            _ => return,
        }
    }
}
