pub mod cores;

use crate::keyboard::oled::OledHandle;
use rp2040_hal::rom_data::reset_to_usb_boot;

/// Hard error, shows what went wrong and waits for new firmware
pub fn reboot_with_message(oled: &mut OledHandle, lines: &[&str]) -> ! {
    oled.show();
    oled.write_lines(lines);
    reset_to_usb_boot(0, 0);
    unreachable!("Should have gone into boot");
}
