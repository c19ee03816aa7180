#[cfg(feature = "left")]
use embedded_io::Read;
#[cfg(feature = "right")]
use embedded_io::Write;
use rp2040_hal::fugit::HertzU32;
use rp2040_hal::gpio::bank0::{Gpio0, Gpio1};
use rp2040_hal::gpio::{FunctionNull, Pin, PullDown};
use rp2040_hal::pac::{PIO0, RESETS};
use rp2040_hal::pio::Running;

/// Receiving end of the link between the halves.
#[cfg(feature = "left")]
pub struct UartLeft {
    inner: pio_uart::PioUart<Gpio0, Gpio1, PIO0, Running>,
}

#[cfg(feature = "left")]
impl UartLeft {
    pub fn new(
        rx: Pin<Gpio0, FunctionNull, PullDown>,
        tx: Pin<Gpio1, FunctionNull, PullDown>,
        baud: HertzU32,
        system_freq: HertzU32,
        pio: PIO0,
        resets: &mut RESETS,
    ) -> Self {
        let inner = pio_uart::PioUart::new(
            pio,
            rx.reconfigure(),
            tx.reconfigure(),
            resets,
            baud,
            system_freq,
        )
        .enable();
        Self { inner }
    }

    /// Reads whatever is buffered, 0 if nothing or the read failed
    #[inline]
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        self.inner.read(buf).unwrap_or(0)
    }
}

/// Sending end, the right half flips tx and rx.
#[cfg(feature = "right")]
pub struct UartRight {
    inner: pio_uart::PioUart<Gpio1, Gpio0, PIO0, Running>,
}

#[cfg(feature = "right")]
impl UartRight {
    pub fn new(
        rx: Pin<Gpio1, FunctionNull, PullDown>,
        tx: Pin<Gpio0, FunctionNull, PullDown>,
        baud: HertzU32,
        system_freq: HertzU32,
        pio: PIO0,
        resets: &mut RESETS,
    ) -> Self {
        let inner = pio_uart::PioUart::new(
            pio,
            rx.reconfigure(),
            tx.reconfigure(),
            resets,
            baud,
            system_freq,
        )
        .enable();
        Self { inner }
    }

    /// Writes as much as fits right now, returns how much was taken
    #[inline]
    pub fn write(&mut self, msg: &[u8]) -> Option<usize> {
        let written = self.inner.write(msg).ok()?;
        self.inner.flush().ok()?;
        Some(written)
    }
}
