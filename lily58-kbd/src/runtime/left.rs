use crate::hid::usb_hiddev::UsbHiddev;
use crate::keyboard::encoder::RotaryEncoder;
use crate::keyboard::left::message_receiver::MessageReceiver;
use crate::keyboard::oled::OledHandle;
use crate::keyboard::power_led::PowerLed;
use crate::keyboard::split_serial::UartLeft;
#[cfg(feature = "serial")]
use crate::keyboard::usb_serial::SerialCommand;
use crate::keyboard::ButtonMatrix;
use crate::runtime::shared::cores::{
    pop_message, push_status_change, push_touch_to_admin, push_usb_failure,
    KeycoreToAdminMessage,
};
use crate::runtime::shared::reboot_with_message;
#[cfg(feature = "serial")]
use core::fmt::Write;
use lily58_kbd_lib::encoder::{LEFT_ENCODER, RIGHT_ENCODER};
use lily58_kbd_lib::matrix::{MatrixChange, Side};
use lily58_kbd_lib::report::KeyboardReportState;
use lily58_kbd_lib::sleep::SleepCountdown;
use rp2040_hal::multicore::Multicore;
#[cfg(feature = "serial")]
use rp2040_hal::rom_data::reset_to_usb_boot;
use rp2040_hal::usb::UsbBus;
use rp2040_hal::Timer;
use usb_device::bus::UsbBusAllocator;

static mut CORE_1_STACK_AREA: [usize; 1024 * 8] = [0; 1024 * 8];

/// Core 0 keeps the display, core 1 does everything that has to be fast.
#[inline(never)]
pub fn run_left(
    mc: &mut Multicore<'_>,
    usb_bus: UsbBusAllocator<UsbBus>,
    mut oled_handle: OledHandle,
    uart_driver: UartLeft,
    buttons: ButtonMatrix,
    encoder: RotaryEncoder,
    power_led: PowerLed,
    timer: Timer,
) -> ! {
    let receiver = MessageReceiver::new(uart_driver);
    // Safety: Only handed out once, to core 1
    let stack = unsafe { &mut *core::ptr::addr_of_mut!(CORE_1_STACK_AREA) };
    if mc.cores()[1]
        .spawn(stack, move || {
            run_core1(receiver, buttons, encoder, power_led, timer, usb_bus);
        })
        .is_err()
    {
        reboot_with_message(
            &mut oled_handle,
            &["ERROR", "SPAWN", "CORE1", "FAIL", "BOOT"],
        );
    }

    let mut sleep = SleepCountdown::new();
    sleep.touch(timer.get_counter());
    loop {
        let now = timer.get_counter();
        match pop_message() {
            Some(KeycoreToAdminMessage::Touch) => {
                if sleep.touch(now) {
                    oled_handle.show();
                }
            }
            Some(KeycoreToAdminMessage::Status(status)) => {
                oled_handle.render_status(&status);
            }
            Some(KeycoreToAdminMessage::UsbFailure) => {
                reboot_with_message(&mut oled_handle, &["ERROR", "USB", "FAIL", "BOOT"]);
            }
            None => {}
        }
        if sleep.should_sleep(now) {
            oled_handle.hide();
            sleep.set_sleeping();
        }
    }
}

#[expect(clippy::needless_pass_by_value)]
fn run_core1(
    mut receiver: MessageReceiver,
    mut buttons: ButtonMatrix,
    mut encoder: RotaryEncoder,
    power_led: PowerLed,
    timer: Timer,
    allocator: UsbBusAllocator<UsbBus>,
) -> ! {
    let Ok(mut usb) = UsbHiddev::new(&allocator) else {
        while !push_usb_failure() {}
        loop {
            core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
        }
    };
    // Keeps the pin driven even without anything to toggle it
    #[cfg(not(feature = "serial"))]
    let _ = power_led;
    #[cfg(feature = "serial")]
    let mut power_led = power_led;
    let mut report_state = KeyboardReportState::new();
    let mut pending_status = None;
    #[cfg(feature = "serial")]
    let mut rejected_logged = 0;
    loop {
        usb.poll();
        if let Some(leds) = usb.read_leds() {
            report_state.set_leds(leds);
        }
        let mut touched = false;
        if let Some(change) = receiver.try_read() {
            // Right side sent an update
            match change {
                MatrixChange::KeyUpdate(index, pressed) => {
                    report_state.handle_key(Side::Right, index, pressed);
                }
                MatrixChange::EncoderUpdate(clockwise) => {
                    report_state.handle_encoder(RIGHT_ENCODER, clockwise);
                }
            }
            touched = true;
        }
        touched |= buttons.scan(timer, |index, pressed| {
            report_state.handle_key(Side::Left, index, pressed);
        });
        if let Some(clockwise) = encoder.scan() {
            report_state.handle_encoder(LEFT_ENCODER, clockwise);
            touched = true;
        }
        if report_state.report().is_some_and(|report| usb.try_push(report)) {
            // Remove the sent report
            report_state.accept();
        }
        if touched {
            push_touch_to_admin();
        }
        // Only the latest status matters, keep it until the admin core takes it
        pending_status = report_state.take_status_change().or(pending_status);
        if let Some(status) = pending_status {
            if push_status_change(status) {
                pending_status = None;
            }
        }
        #[cfg(feature = "serial")]
        {
            if let Some(rgb) = report_state.take_rgb_change() {
                let _ = writeln!(usb.serial, "rgb {rgb:?}\r");
            }
            if receiver.rejected != rejected_logged {
                rejected_logged = receiver.rejected;
                let _ = writeln!(usb.serial, "rejected {rejected_logged} bytes from right\r");
            }
            match usb.serial.read_command() {
                Some(SerialCommand::Boot) => reset_to_usb_boot(0, 0),
                Some(SerialCommand::Output) => {
                    let _ = usb.serial.write_str("Left side running\r\n");
                }
                Some(SerialCommand::Led) => power_led.toggle(),
                None => {}
            }
        }
    }
}
