use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::Point;
use embedded_graphics::mono_font::iso_8859_2::FONT_6X9;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::Drawable;
#[cfg(feature = "right")]
use lily58_kbd_lib::oled::{render_raw_pages, AURORA_ART};
#[cfg(feature = "left")]
use lily58_kbd_lib::{oled::render_status, report::Status};
use rp2040_hal::gpio::bank0::{Gpio2, Gpio3};
use rp2040_hal::gpio::{FunctionI2C, Pin, PullUp};
use rp2040_hal::pac::I2C1;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::{Brightness, DisplaySize128x32, I2CInterface};
use ssd1306::Ssd1306;

pub type OledDisplay = Ssd1306<
    I2CInterface<
        rp2040_hal::I2C<
            I2C1,
            (
                Pin<Gpio2, FunctionI2C, PullUp>,
                Pin<Gpio3, FunctionI2C, PullUp>,
            ),
        >,
    >,
    DisplaySize128x32,
    BufferedGraphicsMode<DisplaySize128x32>,
>;

pub struct OledHandle {
    display: OledDisplay,
    hidden: bool,
}

impl OledHandle {
    pub fn new(mut display: OledDisplay) -> Self {
        let _ = display.set_brightness(Brightness::BRIGHTEST);
        Self {
            display,
            hidden: false,
        }
    }

    #[cfg(feature = "left")]
    pub fn render_status(&mut self, status: &Status) -> bool {
        render_status(&mut self.display, status).is_ok() && self.display.flush().is_ok()
    }

    #[cfg(feature = "right")]
    pub fn render_art(&mut self) -> bool {
        render_raw_pages(&mut self.display, &AURORA_ART).is_ok() && self.display.flush().is_ok()
    }

    /// Display off, the buffer is kept so showing it again needs no redraw
    pub fn hide(&mut self) {
        if !self.hidden {
            self.hidden = self.display.set_display_on(false).is_ok();
        }
    }

    pub fn show(&mut self) {
        if self.hidden {
            self.hidden = self.display.set_display_on(true).is_err();
        }
    }

    /// One word per line, for when the keyboard can't start normally
    pub fn write_lines(&mut self, lines: &[&str]) {
        let _ = self.display.clear(BinaryColor::Off);
        let text_style = MonoTextStyleBuilder::new()
            .font(&FONT_6X9)
            .text_color(BinaryColor::On)
            .build();
        let mut y = 0;
        for line in lines {
            let _ = Text::with_baseline(line, Point::new(0, y), text_style, Baseline::Top)
                .draw(&mut self.display);
            y += 9;
        }
        let _ = self.display.flush();
    }
}
