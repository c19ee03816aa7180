use crate::action::KeyAction;
use crate::encoder::encoder_action;
use crate::keycode::{KeyCode, LedState, MediaCode, Modifier};
use crate::keymap::{action_at, keymap_row, resolve_action, MATRIX_COLS, MATRIX_ROWS};
use crate::layer::{resolve, Layer, LayerState, LAYER_COUNT};
use crate::matrix::{MatrixIndex, Side};
use crate::rgb::RgbSettings;
use crate::ring_buffer::RingBuffer;

/// Boot keyboard report rollover
pub const MAX_KEYS: usize = 6;
pub const REPORT_QUEUE_SIZE: usize = 32;

/// Keyboard report content, converted to the usb type when sent.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyboardSnapshot {
    pub modifier: u8,
    pub keycodes: [u8; MAX_KEYS],
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OutboundReport {
    Keyboard(KeyboardSnapshot),
    Media(MediaCode),
}

/// What the status screen shows.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    pub layers: LayerState,
    pub modifiers: Modifier,
    pub leds: LedState,
}

impl Status {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            layers: LayerState::EMPTY,
            modifiers: Modifier::NONE,
            leds: LedState(0),
        }
    }
}

pub struct KeyboardReportState {
    keys: heapless::Vec<KeyCode, MAX_KEYS>,
    modifiers: Modifier,
    shifted_held: u8,
    media: MediaCode,
    layers: LayerState,
    // Momentary keys currently holding each layer
    layer_holds: [u8; LAYER_COUNT],
    // What each position pressed, so it releases the same thing regardless of layer changes
    held: [[Option<KeyAction>; MATRIX_COLS]; MATRIX_ROWS],
    outbound_reports: RingBuffer<OutboundReport, REPORT_QUEUE_SIZE>,
    rgb: RgbSettings,
    leds: LedState,
    status_change: bool,
    rgb_change: bool,
}

impl KeyboardReportState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            keys: heapless::Vec::new(),
            modifiers: Modifier::NONE,
            shifted_held: 0,
            media: MediaCode::NONE,
            layers: LayerState::EMPTY,
            layer_holds: [0; LAYER_COUNT],
            held: [[None; MATRIX_COLS]; MATRIX_ROWS],
            outbound_reports: RingBuffer::new(),
            rgb: RgbSettings::new(),
            leds: LedState(0),
            status_change: true,
            rgb_change: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn report(&self) -> Option<&OutboundReport> {
        self.outbound_reports.peek()
    }

    /// The report from [`Self::report`] was sent
    #[inline]
    pub fn accept(&mut self) {
        let _ = self.outbound_reports.try_pop();
    }

    #[inline]
    #[must_use]
    pub fn pending_reports(&self) -> usize {
        self.outbound_reports.len()
    }

    #[inline]
    #[must_use]
    pub fn layers(&self) -> LayerState {
        self.layers
    }

    #[must_use]
    pub fn status(&self) -> Status {
        Status {
            layers: self.layers,
            modifiers: self.modifiers,
            leds: self.leds,
        }
    }

    /// Status if anything on it changed since last call
    pub fn take_status_change(&mut self) -> Option<Status> {
        core::mem::replace(&mut self.status_change, false).then(|| self.status())
    }

    pub fn take_rgb_change(&mut self) -> Option<RgbSettings> {
        core::mem::replace(&mut self.rgb_change, false).then_some(self.rgb)
    }

    pub fn set_leds(&mut self, leds: u8) {
        let leds = LedState(leds);
        if leds != self.leds {
            self.leds = leds;
            self.status_change = true;
        }
    }

    /// Key event from either half, returns false if it changed nothing.
    pub fn handle_key(&mut self, side: Side, index: MatrixIndex, pressed: bool) -> bool {
        self.handle_position(keymap_row(side, index), index.col().index(), pressed)
    }

    pub fn handle_position(&mut self, row: usize, col: usize, pressed: bool) -> bool {
        if row >= MATRIX_ROWS || col >= MATRIX_COLS {
            return false;
        }
        if pressed {
            if self.held[row][col].is_some() {
                return false;
            }
            let action = momentary_base(resolve_action(self.layers, row, col), row, col);
            self.held[row][col] = Some(action);
            self.press(action);
        } else {
            let Some(action) = self.held[row][col].take() else {
                return false;
            };
            self.release(action);
        }
        true
    }

    /// One detent of an encoder, returns false for encoders with nothing bound.
    pub fn handle_encoder(&mut self, index: u8, clockwise: bool) -> bool {
        let Some(action) = encoder_action(index, clockwise) else {
            return false;
        };
        self.tap(action);
        true
    }

    pub fn tap(&mut self, action: KeyAction) {
        self.press(action);
        self.release(action);
    }

    fn press(&mut self, action: KeyAction) {
        match action {
            KeyAction::NoOp | KeyAction::Transparent => {}
            KeyAction::Key(key_code) => {
                if self.push_key(key_code) {
                    self.push_keyboard_report();
                }
            }
            KeyAction::Modifier(modifier) => {
                self.modifiers = self.modifiers.union(modifier);
                self.status_change = true;
                self.push_keyboard_report();
            }
            KeyAction::Shifted(key_code) => {
                self.shifted_held = self.shifted_held.saturating_add(1);
                self.push_key(key_code);
                self.push_keyboard_report();
            }
            KeyAction::Media(media_code) => {
                self.media = media_code;
                self.push_media_report();
            }
            KeyAction::Momentary(layer) => self.hold_layer(layer, true),
            KeyAction::Rgb(command) => {
                self.rgb.apply(command);
                self.rgb_change = true;
            }
        }
    }

    fn release(&mut self, action: KeyAction) {
        match action {
            KeyAction::NoOp | KeyAction::Transparent | KeyAction::Rgb(_) => {}
            KeyAction::Key(key_code) => {
                if self.pop_key(key_code) {
                    self.push_keyboard_report();
                }
            }
            KeyAction::Modifier(modifier) => {
                self.modifiers = self.modifiers.difference(modifier);
                self.status_change = true;
                self.push_keyboard_report();
            }
            KeyAction::Shifted(key_code) => {
                self.shifted_held = self.shifted_held.saturating_sub(1);
                self.pop_key(key_code);
                self.push_keyboard_report();
            }
            KeyAction::Media(media_code) => {
                if self.media == media_code {
                    self.media = MediaCode::NONE;
                    self.push_media_report();
                }
            }
            KeyAction::Momentary(layer) => self.hold_layer(layer, false),
        }
    }

    fn hold_layer(&mut self, layer: Layer, held: bool) {
        let holds = &mut self.layer_holds[layer.index()];
        *holds = if held {
            holds.saturating_add(1)
        } else {
            holds.saturating_sub(1)
        };
        let mut raw = LayerState::EMPTY;
        for held_layer in Layer::ALL {
            if self.layer_holds[held_layer.index()] > 0 {
                raw = raw.with(held_layer);
            }
        }
        self.set_layers(raw);
    }

    fn set_layers(&mut self, layers: LayerState) {
        let layers = resolve(layers);
        if layers != self.layers {
            self.layers = layers;
            self.status_change = true;
        }
    }

    // Beyond rollover the press is lost, the release then finds nothing to remove
    fn push_key(&mut self, key_code: KeyCode) -> bool {
        !self.keys.contains(&key_code) && self.keys.push(key_code).is_ok()
    }

    fn pop_key(&mut self, key_code: KeyCode) -> bool {
        let Some(pos) = self.keys.iter().position(|k| *k == key_code) else {
            return false;
        };
        self.keys.remove(pos);
        true
    }

    fn snapshot(&self) -> KeyboardSnapshot {
        let mut keycodes = [0u8; MAX_KEYS];
        for (slot, key) in keycodes.iter_mut().zip(&self.keys) {
            *slot = key.0;
        }
        let modifier = if self.shifted_held > 0 {
            self.modifiers.union(Modifier::LEFT_SHIFT)
        } else {
            self.modifiers
        };
        KeyboardSnapshot {
            modifier: modifier.0,
            keycodes,
        }
    }

    fn push_keyboard_report(&mut self) {
        let _ = self
            .outbound_reports
            .try_push(OutboundReport::Keyboard(self.snapshot()));
    }

    fn push_media_report(&mut self) {
        let _ = self
            .outbound_reports
            .try_push(OutboundReport::Media(self.media));
    }
}

/// A key for the derived layer holds both of its source layers, otherwise
/// the tri-layer rule would switch it straight back off.
/// Adjust is only ever derived from Lower and Raise, a key bound to it holds
/// whatever layer the same position holds on the base layer.
fn momentary_base(action: KeyAction, row: usize, col: usize) -> KeyAction {
    match (action, action_at(Layer::Qwerty, row, col)) {
        (KeyAction::Momentary(Layer::Adjust), base @ KeyAction::Momentary(_)) => base,
        _ => action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Layer;
    use crate::matrix::{ColIndex, RowIndex};
    use crate::rgb::RgbCommand;

    fn pos(row: u8, col: u8) -> MatrixIndex {
        MatrixIndex::from_row_col(RowIndex::from_value(row), ColIndex::from_value(col))
    }

    fn drain(state: &mut KeyboardReportState) -> heapless::Vec<OutboundReport, REPORT_QUEUE_SIZE> {
        let mut out = heapless::Vec::new();
        while let Some(report) = state.report().copied() {
            out.push(report).unwrap();
            state.accept();
        }
        out
    }

    fn keyboard(modifier: Modifier, keys: &[KeyCode]) -> OutboundReport {
        let mut keycodes = [0u8; MAX_KEYS];
        for (slot, key) in keycodes.iter_mut().zip(keys) {
            *slot = key.0;
        }
        OutboundReport::Keyboard(KeyboardSnapshot {
            modifier: modifier.0,
            keycodes,
        })
    }

    const LOWER_KEY: (Side, u8, u8) = (Side::Left, 4, 3);
    const RAISE_KEY: (Side, u8, u8) = (Side::Right, 4, 3);

    fn key(state: &mut KeyboardReportState, key: (Side, u8, u8), pressed: bool) -> bool {
        state.handle_key(key.0, pos(key.1, key.2), pressed)
    }

    #[test]
    fn press_release() {
        let mut state = KeyboardReportState::new();
        assert!(key(&mut state, (Side::Left, 1, 1), true));
        assert!(!key(&mut state, (Side::Left, 1, 1), true));
        assert!(key(&mut state, (Side::Left, 1, 1), false));
        assert!(!key(&mut state, (Side::Left, 1, 1), false));
        assert_eq!(
            &[
                keyboard(Modifier::NONE, &[KeyCode::Q]),
                keyboard(Modifier::NONE, &[]),
            ],
            drain(&mut state).as_slice()
        );
    }

    #[test]
    fn modifiers_combine() {
        let mut state = KeyboardReportState::new();
        key(&mut state, (Side::Left, 3, 0), true);
        key(&mut state, (Side::Right, 1, 5), true);
        key(&mut state, (Side::Left, 3, 0), false);
        assert_eq!(
            &[
                keyboard(Modifier::LEFT_SHIFT, &[]),
                keyboard(Modifier::LEFT_SHIFT, &[KeyCode::Y]),
                keyboard(Modifier::NONE, &[KeyCode::Y]),
            ],
            drain(&mut state).as_slice()
        );
        assert_eq!(Modifier::NONE, state.status().modifiers);
    }

    #[test]
    fn shifted_symbol_on_lower() {
        let mut state = KeyboardReportState::new();
        key(&mut state, LOWER_KEY, true);
        key(&mut state, (Side::Left, 2, 1), true);
        key(&mut state, (Side::Left, 2, 1), false);
        assert_eq!(
            &[
                keyboard(Modifier::LEFT_SHIFT, &[KeyCode::N1]),
                keyboard(Modifier::NONE, &[]),
            ],
            drain(&mut state).as_slice()
        );
    }

    #[test]
    fn releases_what_was_pressed() {
        let mut state = KeyboardReportState::new();
        key(&mut state, LOWER_KEY, true);
        key(&mut state, (Side::Left, 1, 0), true);
        key(&mut state, LOWER_KEY, false);
        assert_eq!(LayerState::EMPTY, state.layers());
        key(&mut state, (Side::Left, 1, 0), false);
        assert_eq!(
            &[
                keyboard(Modifier::NONE, &[KeyCode::F1]),
                keyboard(Modifier::NONE, &[]),
            ],
            drain(&mut state).as_slice()
        );
    }

    #[test]
    fn tri_layer() {
        let mut state = KeyboardReportState::new();
        assert_eq!(Some(Status::new()), state.take_status_change());
        key(&mut state, LOWER_KEY, true);
        assert_eq!(
            LayerState::EMPTY.with(Layer::Lower),
            state.take_status_change().unwrap().layers
        );
        // Raise position is bound to adjust on the lower layer
        key(&mut state, RAISE_KEY, true);
        let layers = state.take_status_change().unwrap().layers;
        assert!(layers.is_on(Layer::Adjust));
        assert_eq!(Layer::Adjust, layers.highest());
        key(&mut state, RAISE_KEY, false);
        let layers = state.take_status_change().unwrap().layers;
        assert_eq!(LayerState::EMPTY.with(Layer::Lower), layers);
        assert!(state.take_status_change().is_none());
        // Layer keys send nothing to the host
        assert!(state.report().is_none());
    }

    #[test]
    fn either_order_reaches_adjust() {
        let mut state = KeyboardReportState::new();
        key(&mut state, RAISE_KEY, true);
        key(&mut state, LOWER_KEY, true);
        assert!(state.layers().is_on(Layer::Adjust));
        // Lower's position is bound to adjust on raise, it still only holds lower
        key(&mut state, RAISE_KEY, false);
        assert_eq!(LayerState::EMPTY.with(Layer::Lower), state.layers());
        key(&mut state, LOWER_KEY, false);
        assert_eq!(LayerState::EMPTY, state.layers());
    }

    #[test]
    fn releasing_first_thumb_drops_adjust() {
        let mut state = KeyboardReportState::new();
        key(&mut state, LOWER_KEY, true);
        key(&mut state, RAISE_KEY, true);
        assert!(state.layers().is_on(Layer::Adjust));
        key(&mut state, LOWER_KEY, false);
        let layers = state.layers();
        assert!(!layers.is_on(Layer::Adjust));
        assert!(!layers.is_on(Layer::Lower));
        assert!(layers.is_on(Layer::Raise));
        key(&mut state, RAISE_KEY, false);
        assert_eq!(LayerState::EMPTY, state.layers());
    }

    #[test]
    fn rgb_on_adjust() {
        let mut state = KeyboardReportState::new();
        key(&mut state, LOWER_KEY, true);
        key(&mut state, RAISE_KEY, true);
        assert!(state.take_rgb_change().is_none());
        key(&mut state, (Side::Right, 2, 3), true);
        let rgb = state.take_rgb_change().unwrap();
        assert!(!rgb.enabled);
        key(&mut state, (Side::Right, 2, 3), false);
        assert!(state.take_rgb_change().is_none());
        let mut expect = RgbSettings::new();
        expect.apply(RgbCommand::Toggle);
        assert_eq!(expect, rgb);
    }

    #[test]
    fn media_key() {
        let mut state = KeyboardReportState::new();
        key(&mut state, (Side::Left, 4, 5), true);
        key(&mut state, (Side::Left, 4, 5), false);
        assert_eq!(
            &[
                OutboundReport::Media(MediaCode::PLAY_PAUSE),
                OutboundReport::Media(MediaCode::NONE),
            ],
            drain(&mut state).as_slice()
        );
    }

    #[test]
    fn encoders_tap() {
        let mut state = KeyboardReportState::new();
        assert!(state.handle_encoder(0, true));
        assert!(state.handle_encoder(1, false));
        assert!(!state.handle_encoder(2, true));
        assert_eq!(
            &[
                OutboundReport::Media(MediaCode::VOLUME_UP),
                OutboundReport::Media(MediaCode::NONE),
                keyboard(Modifier::NONE, &[KeyCode::PAGE_UP]),
                keyboard(Modifier::NONE, &[]),
            ],
            drain(&mut state).as_slice()
        );
    }

    #[test]
    fn rollover_drops_seventh_key() {
        let mut state = KeyboardReportState::new();
        for col in 0..=5 {
            key(&mut state, (Side::Left, 0, col), true);
        }
        key(&mut state, (Side::Right, 0, 5), true);
        let reports = drain(&mut state);
        assert_eq!(6, reports.len());
        assert_eq!(
            keyboard(
                Modifier::NONE,
                &[KeyCode::ESCAPE, KeyCode::N1, KeyCode::N2, KeyCode::N3, KeyCode::N4, KeyCode::N5]
            ),
            reports[5]
        );
        key(&mut state, (Side::Right, 0, 5), false);
        key(&mut state, (Side::Left, 0, 0), false);
        // The dropped key releases without a report
        assert_eq!(
            &[keyboard(
                Modifier::NONE,
                &[KeyCode::N1, KeyCode::N2, KeyCode::N3, KeyCode::N4, KeyCode::N5]
            )],
            drain(&mut state).as_slice()
        );
    }

    #[test]
    fn host_leds() {
        let mut state = KeyboardReportState::new();
        let _ = state.take_status_change();
        state.set_leds(0b10);
        let status = state.take_status_change().unwrap();
        assert!(status.leds.caps_lock());
        assert!(!status.leds.num_lock());
        state.set_leds(0b10);
        assert!(state.take_status_change().is_none());
    }

    #[test]
    fn full_queue_drops_reports() {
        let mut state = KeyboardReportState::new();
        for _ in 0..REPORT_QUEUE_SIZE {
            state.handle_encoder(1, true);
        }
        assert_eq!(REPORT_QUEUE_SIZE, state.pending_reports());
    }
}
