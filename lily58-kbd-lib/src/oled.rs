//! Drawing for the 128x32 displays, mounted portrait so everything here is in
//! a 32 wide, 128 tall coordinate space.

use crate::keycode::Modifier;
use crate::layer::Layer;
use crate::report::Status;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::mono_font::iso_8859_2::FONT_6X9;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::primitives::{Primitive, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::{Drawable, Pixel};

pub const DISPLAY_WIDTH: u32 = 32;
pub const DISPLAY_HEIGHT: u32 = 128;

const ROW_HEIGHT: i32 = 9;
const PAGE_WIDTH: i32 = 32;

const LOGO_TOP: i32 = 0;
const LAYERS_TOP: i32 = 21;
const MODS_TOP: i32 = 60;
const LEDS_TOP: i32 = 99;

const LAYER_LABELS: [(Layer, &str); 4] = [
    (Layer::Qwerty, "BASE"),
    (Layer::Lower, "LOWER"),
    (Layer::Raise, "RAISE"),
    (Layer::Adjust, "ADJ"),
];

const MOD_LABELS: [(Modifier, &str); 4] = [
    (Modifier::ANY_GUI, "GUI"),
    (Modifier::ANY_ALT, "ALT"),
    (Modifier::ANY_CONTROL, "CTL"),
    (Modifier::ANY_SHIFT, "SFT"),
];

/// Top of the row that shows `layer` on the status screen.
#[must_use]
pub const fn layer_row_top(layer: Layer) -> i32 {
    LAYERS_TOP + layer as i32 * ROW_HEIGHT
}

/// Full status screen for the master half, logo then layers, modifiers, and
/// host leds, each section closed by a horizontal rule.
///
/// # Errors
/// Whatever the draw target fails with
pub fn render_status<D>(target: &mut D, status: &Status) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;
    draw_row(target, LOGO_TOP, "LILY", true)?;
    draw_row(target, LOGO_TOP + ROW_HEIGHT, " 58", false)?;
    draw_rule(target, LAYERS_TOP - 2)?;

    let highlighted = status.layers.highest();
    for (layer, label) in LAYER_LABELS {
        draw_row(target, layer_row_top(layer), label, layer == highlighted)?;
    }
    draw_rule(target, MODS_TOP - 2)?;

    let mut top = MODS_TOP;
    for (modifier, label) in MOD_LABELS {
        draw_row(target, top, label, status.modifiers.intersects(modifier))?;
        top += ROW_HEIGHT;
    }
    draw_rule(target, LEDS_TOP - 2)?;

    let leds = [
        ("NUM", status.leds.num_lock()),
        ("CAPS", status.leds.caps_lock()),
        ("SCRL", status.leds.scroll_lock()),
    ];
    let mut top = LEDS_TOP;
    for (label, on) in leds {
        draw_row(target, top, label, on)?;
        top += ROW_HEIGHT;
    }
    Ok(())
}

/// Bitmap in display page order, each byte is 8 vertical pixels with the least
/// significant bit on top, pages run left to right then top to bottom.
///
/// # Errors
/// Whatever the draw target fails with
pub fn render_raw_pages<D>(target: &mut D, bytes: &[u8]) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.draw_iter(bytes.iter().zip(0i32..).flat_map(|(byte, ind)| {
        let x = ind % PAGE_WIDTH;
        let page_top = ind / PAGE_WIDTH * 8;
        (0..8).map(move |bit| {
            let color = if byte & (1 << bit) == 0 {
                BinaryColor::Off
            } else {
                BinaryColor::On
            };
            Pixel(Point::new(x, page_top + bit), color)
        })
    }))
}

fn draw_row<D>(target: &mut D, top: i32, label: &str, inverted: bool) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let (text, background) = if inverted {
        (BinaryColor::Off, BinaryColor::On)
    } else {
        (BinaryColor::On, BinaryColor::Off)
    };
    Rectangle::new(Point::new(0, top), Size::new(DISPLAY_WIDTH, ROW_HEIGHT.unsigned_abs()))
        .into_styled(PrimitiveStyle::with_fill(background))
        .draw(target)?;
    let style = MonoTextStyleBuilder::new()
        .font(&FONT_6X9)
        .text_color(text)
        .build();
    Text::with_baseline(label, Point::new(1, top), style, Baseline::Top).draw(target)?;
    Ok(())
}

fn draw_rule<D>(target: &mut D, y: i32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(Point::new(0, y), Size::new(DISPLAY_WIDTH, 1))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(target)
}

/// Aurora borealis over a treeline, shown on the half without the host.
#[rustfmt::skip]
pub const AURORA_ART: [u8; 512] = [
    0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08, 0x1c, 0x08, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x40,
    0xe0, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x80, 0xc0, 0x80,
    0xc0, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xe0, 0x00, 0x80, 0x00, 0xf0, 0x00, 0x00, 0xc0,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00,
    0x81, 0x00, 0xc0, 0x00, 0xfe, 0x00, 0xfc, 0x00, 0xff, 0x20, 0xff, 0xf0, 0x0f, 0xf0, 0x00, 0xff,
    0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x90, 0x00, 0xf8, 0x00, 0x00, 0xf8,
    0xff, 0x10, 0xff, 0x84, 0xff, 0x60, 0xff, 0x36, 0xff, 0x0f, 0xff, 0x3f, 0x00, 0x5f, 0x00, 0x05,
    0x80, 0x00, 0x80, 0x00, 0xc0, 0x38, 0x00, 0xec, 0xf0, 0x00, 0xfb, 0x80, 0xff, 0xf0, 0xff, 0xef,
    0xff, 0xe8, 0xff, 0x03, 0xff, 0x0c, 0xff, 0x00, 0xff, 0x00, 0x03, 0x00, 0x00, 0xf8, 0x00, 0x80,
    0xff, 0x20, 0xff, 0xd0, 0xff, 0xe0, 0xfe, 0xf8, 0xff, 0xfc, 0xff, 0xff, 0x0f, 0xff, 0x01, 0x3f,
    0xff, 0x00, 0x0f, 0x00, 0x01, 0x00, 0x03, 0x00, 0xfe, 0x80, 0xfe, 0x00, 0xc0, 0xff, 0xc4, 0xfb,
    0xff, 0xfe, 0xff, 0xff, 0xff, 0x3f, 0xff, 0xff, 0x07, 0xff, 0x03, 0x3f, 0x00, 0x0f, 0xc0, 0x00,
    0x00, 0x00, 0xb8, 0x00, 0xff, 0x40, 0xbe, 0xf0, 0xff, 0xf1, 0xff, 0xfe, 0xff, 0xff, 0xff, 0xff,
    0x1f, 0xff, 0x67, 0x00, 0xef, 0x00, 0x1f, 0x00, 0x00, 0x07, 0x00, 0x00, 0xe0, 0x00, 0xff, 0xf0,
    0xff, 0x88, 0xff, 0xc4, 0xff, 0xf8, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x8f, 0x7f, 0x0f, 0xff,
    0x00, 0x07, 0xfe, 0x00, 0x07, 0x00, 0x00, 0x00, 0x00, 0xf8, 0x00, 0xc0, 0x3f, 0xf8, 0xe7, 0xff,
    0xff, 0xff, 0xff, 0x1f, 0xff, 0xff, 0x1f, 0x3f, 0x01, 0xff, 0x0b, 0x00, 0xff, 0x00, 0x00, 0x05,
    0x00, 0x00, 0x00, 0xe0, 0x00, 0xf8, 0x60, 0x80, 0xfe, 0xe3, 0xfc, 0xff, 0x1e, 0xff, 0xff, 0x23,
    0xff, 0x09, 0xff, 0x20, 0x00, 0x3f, 0x02, 0x00, 0x00, 0x0f, 0x00, 0x40, 0x00, 0xc0, 0x00, 0xfc,
    0xe0, 0xfc, 0xf0, 0xff, 0xff, 0x7f, 0xfc, 0xff, 0x0f, 0xff, 0x07, 0x1f, 0x00, 0x01, 0x0f, 0x00,
    0x0f, 0x00, 0x81, 0x70, 0x0c, 0xf0, 0x80, 0x00, 0x00, 0xe4, 0xf8, 0xe6, 0x70, 0x3f, 0xcf, 0xff,
    0x1f, 0xff, 0x48, 0xff, 0x0f, 0x00, 0x07, 0x00, 0x00, 0x43, 0x60, 0xf8, 0xf0, 0xfe, 0x38, 0xfe,
    0x00, 0xfc, 0x03, 0x00, 0xc8, 0x72, 0xcf, 0xfc, 0x00, 0x03, 0x0f, 0x01, 0xe0, 0x1c, 0xe0, 0x03,
    0x00, 0x0f, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf8, 0x06, 0xf9, 0x00, 0x03, 0x00, 0x07,
    0xff, 0x00, 0x10, 0x12, 0xc9, 0xf0, 0xcf, 0xb4, 0x7f, 0x80, 0xe0, 0x1e, 0x01, 0x40, 0x65, 0x5e,
    0xe0, 0x00, 0x00, 0xf0, 0x0c, 0xf0, 0x00, 0x80, 0x7e, 0x01, 0x80, 0x93, 0xfc, 0xc0, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x89, 0x18, 0x2c, 0x46, 0x00, 0x07, 0x21, 0x10, 0x10, 0x80, 0x09, 0x13,
    0x31, 0xbf, 0xff, 0x00, 0x08, 0x1a, 0xf7, 0x0f, 0x00, 0x00, 0x44, 0x45, 0x34, 0xbf, 0xb8, 0x00,
    0x10, 0xf0, 0x08, 0xf4, 0x18, 0x11, 0xfc, 0x18, 0xfb, 0x0e, 0x10, 0xf8, 0x04, 0xf8, 0x10, 0x20,
    0x18, 0x09, 0xff, 0x0c, 0xea, 0x1f, 0x28, 0x60, 0x30, 0xf8, 0x20, 0xc0, 0x42, 0x33, 0x21, 0x00,
];
