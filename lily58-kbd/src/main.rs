#![cfg_attr(not(test), no_std)]
#![no_main]

#[cfg(feature = "left")]
mod hid;
pub(crate) mod keyboard;
pub(crate) mod runtime;
mod timer;

use core::ops::Div;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::BinaryColor;
// The macro for our start-up function
use liatris::{entry, Pins};

// A shorter alias for the Peripheral Access Crate, which provides low-level
// register access
use liatris::hal::pac;

// A shorter alias for the Hardware Abstraction Layer, which provides
// higher-level drivers.
use liatris::hal;

use crate::keyboard::oled::OledHandle;
use crate::keyboard::power_led::PowerLed;
use embedded_hal::digital::InputPin;
use liatris::pac::vreg_and_chip_reset::vreg::VSEL_A;
use liatris::pac::I2C1;
use rp2040_hal::clocks::{ClocksManager, PeripheralClock};
use rp2040_hal::fugit::{HertzU32, RateExtU32};
use rp2040_hal::gpio::bank0::{Gpio2, Gpio3};
use rp2040_hal::gpio::{FunctionI2C, Pin, PinState, PullUp};
use rp2040_hal::multicore::Multicore;
use rp2040_hal::pll::common_configs::PLL_USB_48MHZ;
use rp2040_hal::pll::{setup_pll_blocking, PLLConfig};
use rp2040_hal::vreg::{get_voltage, set_voltage};
use rp2040_hal::xosc::setup_xosc_blocking;
use rp2040_hal::Clock;
use ssd1306::mode::DisplayConfig;
use ssd1306::prelude::DisplayRotation;
use ssd1306::size::DisplaySize128x32;
use ssd1306::Ssd1306;

#[cfg(all(feature = "left", feature = "right"))]
const _ILLEGAL_SIDES: () = assert!(false, "Can't compile as both right and left");

#[cfg(all(feature = "serial", feature = "right"))]
const _RIGHT_SERIAL: () = assert!(false, "Can't compile right with serial, usb is on the left");

/// Calculate by (FREF / REFDIV) * FBDIV / (POSTDIV1 * POSTDIV2)
/// where FREF is the 12Mhz crystal and VCO = FREF * FBDIV, at most 1600Mhz.
/// If postdiv has different values, POSTDIV1 should be higher
/// for energy efficiency.
/// There's a script for finding your optimal clock frequency here:
/// <https://github.com/raspberrypi/pico-sdk/blob/master/src/rp2_common/hardware_clocks/scripts/vcocalc.py>
/// Below is a legal config for 199.5Mhz
/// `VCO_FREQ` = 1596
/// REFDIV = 1
/// FBDIV = 133
/// POSTDIV1 = 4
/// POSTDIV2 = 2
const PLL_1995_MHZ: PLLConfig = PLLConfig {
    vco_freq: HertzU32::MHz(1596),
    refdiv: 1,
    post_div1: 4,
    post_div2: 2,
};

/// Entry point to our bare-metal application.
///
/// The `#[entry]` macro ensures the Cortex-M start-up code calls this function
/// as soon as all global variables are initialised.
#[entry]
fn main() -> ! {
    setup_kbd()
}

#[expect(clippy::too_many_lines)]
fn setup_kbd() -> ! {
    // Grab our singleton objects
    let Some(mut pac) = pac::Peripherals::take() else {
        panic!("Peripherals taken twice");
    };
    let mut sio = hal::Sio::new(pac.SIO);
    let pins = Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );
    // Before anything else, the led is on while the pin is low
    let power_led = PowerLed::new(pins.power_led.into_push_pull_output_in_state(PinState::High));

    // Up voltage if necessary for 200Mhz clock
    if get_voltage(&pac.VREG_AND_CHIP_RESET) != Some(VSEL_A::VOLTAGE1_15) {
        set_voltage(&mut pac.VREG_AND_CHIP_RESET, VSEL_A::VOLTAGE1_15);
    }

    // Set up the watchdog driver - needed by the clock setup code
    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);
    let Some(clocks) = setup_clocks(
        pac.XOSC,
        pac.PLL_SYS,
        pac.PLL_USB,
        pac.CLOCKS,
        &mut watchdog,
        &mut pac.RESETS,
    ) else {
        panic!("Failed to set up clocks");
    };
    // The pio uart clock divisor is the baud-rate * 16, and can at most be 1,
    // so that's `199_500_000 / 16 => 12_468_750`.
    let uart_baud = clocks.system_clock.freq().div(16);

    let timer = hal::Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

    let mut oled = setup_oled(
        pac.I2C1,
        &mut pac.RESETS,
        pins.gpio2.reconfigure(),
        pins.gpio3.reconfigure(),
        &clocks.peripheral_clock,
    );

    let mut side_check_pin = pins.gpio28.into_pull_up_input();
    let is_left = matches!(side_check_pin.is_high(), Ok(true));
    let mut mc = Multicore::new(&mut pac.PSM, &mut pac.PPB, &mut sio.fifo);
    if is_left {
        #[cfg(feature = "left")]
        {
            // Set up the USB driver
            let usb_bus = usb_device::bus::UsbBusAllocator::new(hal::usb::UsbBus::new(
                pac.USBCTRL_REGS,
                pac.USBCTRL_DPRAM,
                clocks.usb_clock,
                true,
                &mut pac.RESETS,
            ));
            let uart = keyboard::split_serial::UartLeft::new(
                pins.gpio0,
                pins.gpio1,
                uart_baud,
                clocks.system_clock.freq(),
                pac.PIO0,
                &mut pac.RESETS,
            );
            let buttons = keyboard::left::left_buttons(
                (
                    pins.gpio29.into_pull_up_input(),
                    pins.gpio27.into_pull_up_input(),
                    pins.gpio6.into_pull_up_input(),
                    pins.gpio7.into_pull_up_input(),
                    pins.gpio8.into_pull_up_input(),
                ),
                (
                    pins.gpio9.into_push_pull_output_in_state(PinState::High),
                    pins.gpio26.into_push_pull_output_in_state(PinState::High),
                    pins.gpio22.into_push_pull_output_in_state(PinState::High),
                    pins.gpio20.into_push_pull_output_in_state(PinState::High),
                    pins.gpio23.into_push_pull_output_in_state(PinState::High),
                    pins.gpio21.into_push_pull_output_in_state(PinState::High),
                ),
            );
            let encoder = keyboard::encoder::RotaryEncoder::new(
                pins.gpio4.into_pull_up_input().into_dyn_pin(),
                pins.gpio5.into_pull_up_input().into_dyn_pin(),
            );
            runtime::left::run_left(
                &mut mc, usb_bus, oled, uart, buttons, encoder, power_led, timer,
            );
        }
        #[cfg(not(feature = "left"))]
        {
            // Hard error, needs new firmware loaded
            runtime::shared::reboot_with_message(&mut oled, &["NOT", "LEFT", "BOOT"]);
        }
    } else {
        #[cfg(feature = "right")]
        {
            let uart = keyboard::split_serial::UartRight::new(
                pins.gpio1,
                pins.gpio0,
                uart_baud,
                clocks.system_clock.freq(),
                pac.PIO0,
                &mut pac.RESETS,
            );
            let buttons = keyboard::right::right_buttons(
                (
                    pins.gpio29.into_pull_up_input(),
                    pins.gpio4.into_pull_up_input(),
                    pins.gpio20.into_pull_up_input(),
                    pins.gpio23.into_pull_up_input(),
                    pins.gpio21.into_pull_up_input(),
                ),
                (
                    pins.gpio22.into_push_pull_output_in_state(PinState::High),
                    pins.gpio5.into_push_pull_output_in_state(PinState::High),
                    pins.gpio6.into_push_pull_output_in_state(PinState::High),
                    pins.gpio7.into_push_pull_output_in_state(PinState::High),
                    pins.gpio8.into_push_pull_output_in_state(PinState::High),
                    pins.gpio9.into_push_pull_output_in_state(PinState::High),
                ),
            );
            let encoder = keyboard::encoder::RotaryEncoder::new(
                pins.gpio26.into_pull_up_input().into_dyn_pin(),
                pins.gpio27.into_pull_up_input().into_dyn_pin(),
            );
            runtime::right::run_right(&mut mc, oled, uart, buttons, encoder, power_led, timer);
        }
        #[cfg(not(feature = "right"))]
        {
            // Hard error, needs new firmware loaded
            runtime::shared::reboot_with_message(&mut oled, &["NOT", "RIGHT", "BOOT"]);
        }
    }
}

#[expect(clippy::cast_possible_truncation)]
fn setup_clocks(
    xosc_dev: pac::XOSC,
    pll_sys_dev: pac::PLL_SYS,
    pll_usb_dev: pac::PLL_USB,
    clocks_dev: pac::CLOCKS,
    watchdog: &mut hal::Watchdog,
    resets: &mut pac::RESETS,
) -> Option<ClocksManager> {
    let xosc = setup_xosc_blocking(xosc_dev, liatris::XOSC_CRYSTAL_FREQ.Hz()).ok()?;
    watchdog.enable_tick_generation((liatris::XOSC_CRYSTAL_FREQ / 1_000_000) as u8);

    let mut clocks = ClocksManager::new(clocks_dev);
    let pll_sys = setup_pll_blocking(
        pll_sys_dev,
        xosc.operating_frequency(),
        PLL_1995_MHZ,
        &mut clocks,
        resets,
    )
    .ok()?;
    let pll_usb = setup_pll_blocking(
        pll_usb_dev,
        xosc.operating_frequency(),
        PLL_USB_48MHZ,
        &mut clocks,
        resets,
    )
    .ok()?;
    clocks.init_default(&xosc, &pll_sys, &pll_usb).ok()?;
    Some(clocks)
}

fn setup_oled(
    i2c: I2C1,
    r: &mut pac::RESETS,
    sda: Pin<Gpio2, FunctionI2C, PullUp>,
    scl: Pin<Gpio3, FunctionI2C, PullUp>,
    clock: &PeripheralClock,
) -> OledHandle {
    let i2c = hal::I2C::i2c1(i2c, sda, scl, 400.kHz(), r, clock);

    let interface = ssd1306::I2CDisplayInterface::new(i2c);
    // Portrait, 32 wide and 128 tall
    let mut display = Ssd1306::new(interface, DisplaySize128x32, DisplayRotation::Rotate270)
        .into_buffered_graphics_mode();
    // A dead display shouldn't stop the keyboard
    let _ = display.init();
    let _ = display.clear(BinaryColor::Off);
    let _ = display.flush();
    OledHandle::new(display)
}

#[panic_handler]
#[inline(never)]
fn halt(_info: &core::panic::PanicInfo) -> ! {
    loop {
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }
}
