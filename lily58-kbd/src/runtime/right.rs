use crate::keyboard::encoder::RotaryEncoder;
use crate::keyboard::oled::OledHandle;
use crate::keyboard::power_led::PowerLed;
use crate::keyboard::right::message_serializer::MessageSerializer;
use crate::keyboard::split_serial::UartRight;
use crate::keyboard::ButtonMatrix;
use crate::runtime::shared::cores::{pop_message, push_touch_to_admin, KeycoreToAdminMessage};
use crate::runtime::shared::reboot_with_message;
use lily58_kbd_lib::matrix::MatrixUpdate;
use lily58_kbd_lib::sleep::SleepCountdown;
use rp2040_hal::multicore::Multicore;
use rp2040_hal::Timer;

static mut CORE_1_STACK_AREA: [usize; 1024 * 4] = [0; 1024 * 4];

/// Right half only forwards its switches, the display shows art and sleeps
/// on its own.
#[inline(never)]
pub fn run_right(
    mc: &mut Multicore<'_>,
    mut oled_handle: OledHandle,
    uart_driver: UartRight,
    buttons: ButtonMatrix,
    encoder: RotaryEncoder,
    power_led: PowerLed,
    timer: Timer,
) -> ! {
    let serializer = MessageSerializer::new(uart_driver);
    // Safety: Only handed out once, to core 1
    let stack = unsafe { &mut *core::ptr::addr_of_mut!(CORE_1_STACK_AREA) };
    if mc.cores()[1]
        .spawn(stack, move || {
            run_core1(serializer, buttons, encoder, timer);
        })
        .is_err()
    {
        reboot_with_message(
            &mut oled_handle,
            &["ERROR", "SPAWN", "CORE1", "FAIL", "BOOT"],
        );
    }
    // Nothing toggles it on this side
    let _power_led = power_led;
    oled_handle.render_art();
    let mut sleep = SleepCountdown::new();
    sleep.touch(timer.get_counter());
    loop {
        let now = timer.get_counter();
        if let Some(KeycoreToAdminMessage::Touch) = pop_message() {
            if sleep.touch(now) {
                oled_handle.show();
            }
        }
        if sleep.should_sleep(now) {
            oled_handle.hide();
            sleep.set_sleeping();
        }
    }
}

fn run_core1(
    mut serializer: MessageSerializer,
    mut buttons: ButtonMatrix,
    mut encoder: RotaryEncoder,
    timer: Timer,
) -> ! {
    loop {
        let mut touched = buttons.scan(timer, |index, pressed| {
            // A full buffer means the left side is gone, the change is dropped
            let _ = serializer.serialize(MatrixUpdate::from_key_update(index, pressed));
        });
        if let Some(clockwise) = encoder.scan() {
            let _ = serializer.serialize(MatrixUpdate::from_rotary_change(clockwise));
            touched = true;
        }
        serializer.pump();
        if touched {
            push_touch_to_admin();
        }
    }
}
