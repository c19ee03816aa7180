//! USB HID usage ids, keyboard page (0x07) and consumer page (0x0C).

/// A keyboard page usage id.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyCode(pub u8);

impl KeyCode {
    pub const A: Self = Self(0x04);
    pub const B: Self = Self(0x05);
    pub const C: Self = Self(0x06);
    pub const D: Self = Self(0x07);
    pub const E: Self = Self(0x08);
    pub const F: Self = Self(0x09);
    pub const G: Self = Self(0x0A);
    pub const H: Self = Self(0x0B);
    pub const I: Self = Self(0x0C);
    pub const J: Self = Self(0x0D);
    pub const K: Self = Self(0x0E);
    pub const L: Self = Self(0x0F);
    pub const M: Self = Self(0x10);
    pub const N: Self = Self(0x11);
    pub const O: Self = Self(0x12);
    pub const P: Self = Self(0x13);
    pub const Q: Self = Self(0x14);
    pub const R: Self = Self(0x15);
    pub const S: Self = Self(0x16);
    pub const T: Self = Self(0x17);
    pub const U: Self = Self(0x18);
    pub const V: Self = Self(0x19);
    pub const W: Self = Self(0x1A);
    pub const X: Self = Self(0x1B);
    pub const Y: Self = Self(0x1C);
    pub const Z: Self = Self(0x1D);
    pub const N1: Self = Self(0x1E);
    pub const N2: Self = Self(0x1F);
    pub const N3: Self = Self(0x20);
    pub const N4: Self = Self(0x21);
    pub const N5: Self = Self(0x22);
    pub const N6: Self = Self(0x23);
    pub const N7: Self = Self(0x24);
    pub const N8: Self = Self(0x25);
    pub const N9: Self = Self(0x26);
    pub const N0: Self = Self(0x27);
    pub const ENTER: Self = Self(0x28);
    pub const ESCAPE: Self = Self(0x29);
    pub const BACKSPACE: Self = Self(0x2A);
    pub const TAB: Self = Self(0x2B);
    pub const SPACE: Self = Self(0x2C);
    pub const MINUS: Self = Self(0x2D);
    pub const EQUAL: Self = Self(0x2E);
    pub const LEFT_BRACKET: Self = Self(0x2F);
    pub const RIGHT_BRACKET: Self = Self(0x30);
    pub const BACKSLASH: Self = Self(0x31);
    pub const SEMICOLON: Self = Self(0x33);
    pub const QUOTE: Self = Self(0x34);
    pub const GRAVE: Self = Self(0x35);
    pub const COMMA: Self = Self(0x36);
    pub const DOT: Self = Self(0x37);
    pub const SLASH: Self = Self(0x38);
    pub const F1: Self = Self(0x3A);
    pub const F2: Self = Self(0x3B);
    pub const F3: Self = Self(0x3C);
    pub const F4: Self = Self(0x3D);
    pub const F5: Self = Self(0x3E);
    pub const F6: Self = Self(0x3F);
    pub const F7: Self = Self(0x40);
    pub const F8: Self = Self(0x41);
    pub const F9: Self = Self(0x42);
    pub const F10: Self = Self(0x43);
    pub const F11: Self = Self(0x44);
    pub const F12: Self = Self(0x45);
    pub const PAGE_UP: Self = Self(0x4B);
    pub const PAGE_DOWN: Self = Self(0x4E);
    pub const RIGHT_ARROW: Self = Self(0x4F);
    pub const LEFT_ARROW: Self = Self(0x50);
    pub const DOWN_ARROW: Self = Self(0x51);
    pub const UP_ARROW: Self = Self(0x52);
}

/// Modifier byte of a keyboard report.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Modifier(pub u8);

impl Modifier {
    pub const NONE: Self = Self(0);
    pub const LEFT_CONTROL: Self = Self(0b0000_0001);
    pub const LEFT_SHIFT: Self = Self(0b0000_0010);
    pub const LEFT_ALT: Self = Self(0b0000_0100);
    pub const LEFT_GUI: Self = Self(0b0000_1000);
    pub const RIGHT_CONTROL: Self = Self(0b0001_0000);
    pub const RIGHT_SHIFT: Self = Self(0b0010_0000);
    pub const RIGHT_ALT: Self = Self(0b0100_0000);
    pub const RIGHT_GUI: Self = Self(0b1000_0000);

    pub const ANY_CONTROL: Self = Self(Self::LEFT_CONTROL.0 | Self::RIGHT_CONTROL.0);
    pub const ANY_SHIFT: Self = Self(Self::LEFT_SHIFT.0 | Self::RIGHT_SHIFT.0);
    pub const ANY_ALT: Self = Self(Self::LEFT_ALT.0 | Self::RIGHT_ALT.0);
    pub const ANY_GUI: Self = Self(Self::LEFT_GUI.0 | Self::RIGHT_GUI.0);

    #[inline]
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

/// A consumer page usage id.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MediaCode(pub u16);

impl MediaCode {
    pub const NONE: Self = Self(0);
    pub const NEXT_TRACK: Self = Self(0xB5);
    pub const PREV_TRACK: Self = Self(0xB6);
    pub const PLAY_PAUSE: Self = Self(0xCD);
    pub const MUTE: Self = Self(0xE2);
    pub const VOLUME_UP: Self = Self(0xE9);
    pub const VOLUME_DOWN: Self = Self(0xEA);
}

/// Host LED output report.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedState(pub u8);

impl LedState {
    const NUM_LOCK: u8 = 0b0000_0001;
    const CAPS_LOCK: u8 = 0b0000_0010;
    const SCROLL_LOCK: u8 = 0b0000_0100;

    #[inline]
    #[must_use]
    pub const fn num_lock(self) -> bool {
        self.0 & Self::NUM_LOCK != 0
    }

    #[inline]
    #[must_use]
    pub const fn caps_lock(self) -> bool {
        self.0 & Self::CAPS_LOCK != 0
    }

    #[inline]
    #[must_use]
    pub const fn scroll_lock(self) -> bool {
        self.0 & Self::SCROLL_LOCK != 0
    }
}
