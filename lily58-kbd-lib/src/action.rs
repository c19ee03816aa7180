use crate::keycode::{KeyCode, MediaCode, Modifier};
use crate::layer::Layer;
use crate::rgb::RgbCommand;

/// What a key does on a given layer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    /// Unbound, swallows the press
    NoOp,
    /// Use whatever the next active layer below has bound
    Transparent,
    Key(KeyCode),
    Modifier(Modifier),
    /// Sent with left shift held, for symbols like `!` or `{`
    Shifted(KeyCode),
    Media(MediaCode),
    /// Layer is on while the key is held
    Momentary(Layer),
    Rgb(RgbCommand),
}
