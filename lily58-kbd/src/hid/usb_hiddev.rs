#[cfg(feature = "serial")]
use crate::keyboard::usb_serial::UsbSerial;
use lily58_kbd_lib::report::OutboundReport;
use rp2040_hal::usb::UsbBus;
use usb_device::bus::UsbBusAllocator;
use usb_device::device::{BuilderError, StringDescriptors, UsbDevice, UsbDeviceBuilder, UsbVidPid};
use usb_device::{LangID, UsbError};
use usbd_hid::descriptor::{KeyboardReport, MediaKeyboardReport, SerializedDescriptor};
use usbd_hid::hid_class::HIDClass;

/// Keyboard and media keys as two hid interfaces on one device, with the
/// debug serial port next to them when built with `serial`.
pub struct UsbHiddev<'a> {
    keyboard: HIDClass<'a, UsbBus>,
    media: HIDClass<'a, UsbBus>,
    #[cfg(feature = "serial")]
    pub serial: UsbSerial<'a>,
    dev: UsbDevice<'a, UsbBus>,
}

impl<'a> UsbHiddev<'a> {
    pub fn new(allocator: &'a UsbBusAllocator<UsbBus>) -> Result<Self, BuilderError> {
        // Classes have to be allocated before the device is built
        // Keyboard gets an out endpoint, that's where the host sends lock leds
        let keyboard = HIDClass::new(allocator, KeyboardReport::desc(), 1);
        let media = HIDClass::new_ep_in(allocator, MediaKeyboardReport::desc(), 1);
        #[cfg(feature = "serial")]
        let serial = UsbSerial::new(allocator);
        let dev = UsbDeviceBuilder::new(allocator, UsbVidPid(0x16c0, 0x27da))
            .strings(&[StringDescriptors::new(LangID::EN_US)
                .manufacturer("Liatris")
                .product("Lily58")
                .serial_number("1")])?
            .device_class(0)
            .build();
        Ok(Self {
            keyboard,
            media,
            #[cfg(feature = "serial")]
            serial,
            dev,
        })
    }

    #[inline]
    pub fn poll(&mut self) -> bool {
        self.dev.poll(&mut [
            &mut self.keyboard,
            &mut self.media,
            #[cfg(feature = "serial")]
            &mut self.serial.inner,
        ])
    }

    /// False if the host hasn't picked up the last report yet, try again later.
    /// Other errors drop the report.
    pub fn try_push(&mut self, report: &OutboundReport) -> bool {
        let res = match report {
            OutboundReport::Keyboard(snapshot) => self.keyboard.push_input(&KeyboardReport {
                modifier: snapshot.modifier,
                reserved: 0,
                leds: 0,
                keycodes: snapshot.keycodes,
            }),
            OutboundReport::Media(code) => self
                .media
                .push_input(&MediaKeyboardReport { usage_id: code.0 }),
        };
        !matches!(res, Err(UsbError::WouldBlock))
    }

    /// Lock leds, if the host sent an update
    pub fn read_leds(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match self.keyboard.pull_raw_output(&mut buf) {
            Ok(n) if n > 0 => Some(buf[0]),
            _ => None,
        }
    }
}
