use crate::action::KeyAction;
use crate::keycode::{KeyCode, MediaCode, Modifier};
use crate::layer::{Layer, LayerState, LAYER_COUNT};
use crate::matrix::{MatrixIndex, Side, NUM_COLS, NUM_ROWS};
use crate::rgb::RgbCommand;

/// Rows 0-4 are the left half, 5-9 the right half.
pub const MATRIX_ROWS: usize = NUM_ROWS as usize * 2;
pub const MATRIX_COLS: usize = NUM_COLS as usize;

pub type LayerTable = [[KeyAction; MATRIX_COLS]; MATRIX_ROWS];

/// Row in the combined table for a position within one half.
#[inline]
#[must_use]
pub const fn keymap_row(side: Side, index: MatrixIndex) -> usize {
    match side {
        Side::Left => index.row().index(),
        Side::Right => NUM_ROWS as usize + index.row().index(),
    }
}

/// Binding on exactly `layer`, out of range positions are unbound.
#[must_use]
pub fn action_at(layer: Layer, row: usize, col: usize) -> KeyAction {
    KEYMAPS[layer.index()]
        .get(row)
        .and_then(|r| r.get(col))
        .copied()
        .unwrap_or(KeyAction::NoOp)
}

/// Effective binding for a position, searching active layers highest first.
#[must_use]
pub fn resolve_action(layers: LayerState, row: usize, col: usize) -> KeyAction {
    for layer in layers.active_highest_first() {
        let action = action_at(layer, row, col);
        if action != KeyAction::Transparent {
            return action;
        }
    }
    KeyAction::NoOp
}

/// Maps the physical layout, as seen from above, onto the scanned matrix.
///
/// Both halves scan with column 0 at the outer edge, so right half rows are
/// listed mirrored. The big inner keys between the halves sit in the thumb row
/// matrix-wise, the outermost thumb row slot has no switch.
macro_rules! layout {
    (
        $l00: expr, $l01: expr, $l02: expr, $l03: expr, $l04: expr, $l05: expr,
        $r00: expr, $r01: expr, $r02: expr, $r03: expr, $r04: expr, $r05: expr,
        $l10: expr, $l11: expr, $l12: expr, $l13: expr, $l14: expr, $l15: expr,
        $r10: expr, $r11: expr, $r12: expr, $r13: expr, $r14: expr, $r15: expr,
        $l20: expr, $l21: expr, $l22: expr, $l23: expr, $l24: expr, $l25: expr,
        $r20: expr, $r21: expr, $r22: expr, $r23: expr, $r24: expr, $r25: expr,
        $l30: expr, $l31: expr, $l32: expr, $l33: expr, $l34: expr, $l35: expr, $l_inner: expr,
        $r_inner: expr, $r30: expr, $r31: expr, $r32: expr, $r33: expr, $r34: expr, $r35: expr,
        $l41: expr, $l42: expr, $l43: expr, $l44: expr,
        $r44: expr, $r43: expr, $r42: expr, $r41: expr $(,)?
    ) => {
        [
            [$l00, $l01, $l02, $l03, $l04, $l05],
            [$l10, $l11, $l12, $l13, $l14, $l15],
            [$l20, $l21, $l22, $l23, $l24, $l25],
            [$l30, $l31, $l32, $l33, $l34, $l35],
            [KeyAction::NoOp, $l41, $l42, $l43, $l44, $l_inner],
            [$r05, $r04, $r03, $r02, $r01, $r00],
            [$r15, $r14, $r13, $r12, $r11, $r10],
            [$r25, $r24, $r23, $r22, $r21, $r20],
            [$r35, $r34, $r33, $r32, $r31, $r30],
            [KeyAction::NoOp, $r41, $r42, $r43, $r44, $r_inner],
        ]
    };
}

const ____: KeyAction = KeyAction::Transparent;
const XXXX: KeyAction = KeyAction::NoOp;

const fn kc(code: KeyCode) -> KeyAction {
    KeyAction::Key(code)
}

const fn sft(code: KeyCode) -> KeyAction {
    KeyAction::Shifted(code)
}

const fn md(modifier: Modifier) -> KeyAction {
    KeyAction::Modifier(modifier)
}

const fn media(code: MediaCode) -> KeyAction {
    KeyAction::Media(code)
}

const fn mo(layer: Layer) -> KeyAction {
    KeyAction::Momentary(layer)
}

const fn rgb(command: RgbCommand) -> KeyAction {
    KeyAction::Rgb(command)
}

const ESC: KeyAction = kc(KeyCode::ESCAPE);
const TAB: KeyAction = kc(KeyCode::TAB);
const ENT: KeyAction = kc(KeyCode::ENTER);
const SPC: KeyAction = kc(KeyCode::SPACE);
const BSPC: KeyAction = kc(KeyCode::BACKSPACE);
const GRV: KeyAction = kc(KeyCode::GRAVE);
const MINS: KeyAction = kc(KeyCode::MINUS);
const EQL: KeyAction = kc(KeyCode::EQUAL);
const LBRC: KeyAction = kc(KeyCode::LEFT_BRACKET);
const RBRC: KeyAction = kc(KeyCode::RIGHT_BRACKET);
const BSLS: KeyAction = kc(KeyCode::BACKSLASH);
const SCLN: KeyAction = kc(KeyCode::SEMICOLON);
const QUOT: KeyAction = kc(KeyCode::QUOTE);
const COMM: KeyAction = kc(KeyCode::COMMA);
const DOT: KeyAction = kc(KeyCode::DOT);
const SLSH: KeyAction = kc(KeyCode::SLASH);
const LEFT: KeyAction = kc(KeyCode::LEFT_ARROW);
const DOWN: KeyAction = kc(KeyCode::DOWN_ARROW);
const UP: KeyAction = kc(KeyCode::UP_ARROW);
const RGHT: KeyAction = kc(KeyCode::RIGHT_ARROW);

const EXLM: KeyAction = sft(KeyCode::N1);
const AT: KeyAction = sft(KeyCode::N2);
const HASH: KeyAction = sft(KeyCode::N3);
const DLR: KeyAction = sft(KeyCode::N4);
const PERC: KeyAction = sft(KeyCode::N5);
const CIRC: KeyAction = sft(KeyCode::N6);
const AMPR: KeyAction = sft(KeyCode::N7);
const ASTR: KeyAction = sft(KeyCode::N8);
const LPRN: KeyAction = sft(KeyCode::N9);
const RPRN: KeyAction = sft(KeyCode::N0);
const TILD: KeyAction = sft(KeyCode::GRAVE);
const UNDS: KeyAction = sft(KeyCode::MINUS);
const PLUS: KeyAction = sft(KeyCode::EQUAL);
const LCBR: KeyAction = sft(KeyCode::LEFT_BRACKET);
const RCBR: KeyAction = sft(KeyCode::RIGHT_BRACKET);
const PIPE: KeyAction = sft(KeyCode::BACKSLASH);

const LCTL: KeyAction = md(Modifier::LEFT_CONTROL);
const LSFT: KeyAction = md(Modifier::LEFT_SHIFT);
const LALT: KeyAction = md(Modifier::LEFT_ALT);
const LGUI: KeyAction = md(Modifier::LEFT_GUI);
const RSFT: KeyAction = md(Modifier::RIGHT_SHIFT);
const RGUI: KeyAction = md(Modifier::RIGHT_GUI);

const MPLY: KeyAction = media(MediaCode::PLAY_PAUSE);
const MUTE: KeyAction = media(MediaCode::MUTE);
const MPRV: KeyAction = media(MediaCode::PREV_TRACK);
const MNXT: KeyAction = media(MediaCode::NEXT_TRACK);

const LOWER: KeyAction = mo(Layer::Lower);
const RAISE: KeyAction = mo(Layer::Raise);
const ADJUST: KeyAction = mo(Layer::Adjust);

const RM_TOGG: KeyAction = rgb(RgbCommand::Toggle);
const RM_NEXT: KeyAction = rgb(RgbCommand::NextMode);
const RM_HUEU: KeyAction = rgb(RgbCommand::HueUp);
const RM_HUED: KeyAction = rgb(RgbCommand::HueDown);
const RM_SATU: KeyAction = rgb(RgbCommand::SaturationUp);
const RM_SATD: KeyAction = rgb(RgbCommand::SaturationDown);
const RM_VALU: KeyAction = rgb(RgbCommand::ValueUp);
const RM_VALD: KeyAction = rgb(RgbCommand::ValueDown);

const F1: KeyAction = kc(KeyCode::F1);
const F2: KeyAction = kc(KeyCode::F2);
const F3: KeyAction = kc(KeyCode::F3);
const F4: KeyAction = kc(KeyCode::F4);
const F5: KeyAction = kc(KeyCode::F5);
const F6: KeyAction = kc(KeyCode::F6);
const F7: KeyAction = kc(KeyCode::F7);
const F8: KeyAction = kc(KeyCode::F8);
const F9: KeyAction = kc(KeyCode::F9);
const F10: KeyAction = kc(KeyCode::F10);
const F11: KeyAction = kc(KeyCode::F11);
const F12: KeyAction = kc(KeyCode::F12);

const N1: KeyAction = kc(KeyCode::N1);
const N2: KeyAction = kc(KeyCode::N2);
const N3: KeyAction = kc(KeyCode::N3);
const N4: KeyAction = kc(KeyCode::N4);
const N5: KeyAction = kc(KeyCode::N5);
const N6: KeyAction = kc(KeyCode::N6);
const N7: KeyAction = kc(KeyCode::N7);
const N8: KeyAction = kc(KeyCode::N8);
const N9: KeyAction = kc(KeyCode::N9);
const N0: KeyAction = kc(KeyCode::N0);

const A: KeyAction = kc(KeyCode::A);
const B: KeyAction = kc(KeyCode::B);
const C: KeyAction = kc(KeyCode::C);
const D: KeyAction = kc(KeyCode::D);
const E: KeyAction = kc(KeyCode::E);
const F: KeyAction = kc(KeyCode::F);
const G: KeyAction = kc(KeyCode::G);
const H: KeyAction = kc(KeyCode::H);
const I: KeyAction = kc(KeyCode::I);
const J: KeyAction = kc(KeyCode::J);
const K: KeyAction = kc(KeyCode::K);
const L: KeyAction = kc(KeyCode::L);
const M: KeyAction = kc(KeyCode::M);
const N: KeyAction = kc(KeyCode::N);
const O: KeyAction = kc(KeyCode::O);
const P: KeyAction = kc(KeyCode::P);
const Q: KeyAction = kc(KeyCode::Q);
const R: KeyAction = kc(KeyCode::R);
const S: KeyAction = kc(KeyCode::S);
const T: KeyAction = kc(KeyCode::T);
const U: KeyAction = kc(KeyCode::U);
const V: KeyAction = kc(KeyCode::V);
const W: KeyAction = kc(KeyCode::W);
const X: KeyAction = kc(KeyCode::X);
const Y: KeyAction = kc(KeyCode::Y);
const Z: KeyAction = kc(KeyCode::Z);

#[rustfmt::skip]
pub static KEYMAPS: [LayerTable; LAYER_COUNT] = [
    /* QWERTY
     * ,-----------------------------------------.                    ,-----------------------------------------.
     * | ESC  |   1  |   2  |   3  |   4  |   5  |                    |   6  |   7  |   8  |   9  |   0  |  `   |
     * |------+------+------+------+------+------|                    |------+------+------+------+------+------|
     * | Tab  |   Q  |   W  |   E  |   R  |   T  |                    |   Y  |   U  |   I  |   O  |   P  |  -   |
     * |------+------+------+------+------+------|                    |------+------+------+------+------+------|
     * | LGUI |   A  |   S  |   D  |   F  |   G  |-------.    ,-------|   H  |   J  |   K  |   L  |   ;  |  '   |
     * |------+------+------+------+------+------| Play  |    | Mute  |------+------+------+------+------+------|
     * |LShift|   Z  |   X  |   C  |   V  |   B  |-------|    |-------|   N  |   M  |   ,  |   .  |   /  |RShift|
     * `-----------------------------------------/       /     \      \-----------------------------------------'
     *                   | LCtl | LAlt |LOWER | /Space  /       \Enter \  |RAISE |BackSP| RGUI |
     *                   `----------------------------'           '------''--------------------'
     */
    layout!(
        ESC,  N1,   N2,   N3,   N4,   N5,               N6,   N7,   N8,   N9,   N0,   GRV,
        TAB,  Q,    W,    E,    R,    T,                Y,    U,    I,    O,    P,    MINS,
        LGUI, A,    S,    D,    F,    G,                H,    J,    K,    L,    SCLN, QUOT,
        LSFT, Z,    X,    C,    V,    B,    MPLY, MUTE, N,    M,    COMM, DOT,  SLSH, RSFT,
                    LCTL, LALT, LOWER, SPC,       ENT,  RAISE, BSPC, RGUI,
    ),
    /* LOWER
     * ,-----------------------------------------.                    ,-----------------------------------------.
     * |      |      |      |      |      |      |                    |      |      |      |      |      |      |
     * |------+------+------+------+------+------|                    |------+------+------+------+------+------|
     * |  F1  |  F2  |  F3  |  F4  |  F5  |  F6  |                    |  F7  |  F8  |  F9  | F10  | F11  | F12  |
     * |------+------+------+------+------+------|                    |------+------+------+------+------+------|
     * |   `  |   !  |   @  |   #  |   $  |   %  |-------.    ,-------|   ^  |   &  |   *  |   (  |   )  |   ~  |
     * |------+------+------+------+------+------| Prev  |    | Next  |------+------+------+------+------+------|
     * |      |      |      |      |      |      |-------|    |-------|      |   _  |   +  |   {  |   }  |   |  |
     * `-----------------------------------------/       /     \      \-----------------------------------------'
     *                   |      |      |      | /       /       \      \  |ADJUST|      |      |
     *                   `----------------------------'           '------''--------------------'
     */
    layout!(
        ____, ____, ____, ____, ____, ____,             ____, ____, ____, ____, ____, ____,
        F1,   F2,   F3,   F4,   F5,   F6,               F7,   F8,   F9,   F10,  F11,  F12,
        GRV,  EXLM, AT,   HASH, DLR,  PERC,             CIRC, AMPR, ASTR, LPRN, RPRN, TILD,
        ____, ____, ____, ____, ____, ____, MPRV, MNXT, XXXX, UNDS, PLUS, LCBR, RCBR, PIPE,
                    ____, ____, ____, ____,       ____, ADJUST, ____, ____,
    ),
    /* RAISE
     * ,-----------------------------------------.                    ,-----------------------------------------.
     * |      |      |      |      |      |      |                    |      |      |      |      |      |      |
     * |------+------+------+------+------+------|                    |------+------+------+------+------+------|
     * |   `  |   1  |   2  |   3  |   4  |   5  |                    |   6  |   7  |   8  |   9  |   0  |      |
     * |------+------+------+------+------+------|                    |------+------+------+------+------+------|
     * |  F1  |  F2  |  F3  |  F4  |  F5  |  F6  |-------.    ,-------|      | Left | Down |  Up  |Right |      |
     * |------+------+------+------+------+------| Prev  |    | Next  |------+------+------+------+------+------|
     * |  F7  |  F8  |  F9  | F10  | F11  | F12  |-------|    |-------|   +  |   -  |   =  |   [  |   ]  |   \  |
     * `-----------------------------------------/       /     \      \-----------------------------------------'
     *                   |      |      |ADJUST| /       /       \      \  |      |      |      |
     *                   `----------------------------'           '------''--------------------'
     */
    layout!(
        ____, ____, ____, ____, ____, ____,             ____, ____, ____, ____, ____, ____,
        GRV,  N1,   N2,   N3,   N4,   N5,               N6,   N7,   N8,   N9,   N0,   ____,
        F1,   F2,   F3,   F4,   F5,   F6,               XXXX, LEFT, DOWN, UP,   RGHT, XXXX,
        F7,   F8,   F9,   F10,  F11,  F12,  MPRV, MNXT, PLUS, MINS, EQL,  LBRC, RBRC, BSLS,
                    ____, ____, ADJUST, ____,     ____, ____, ____, ____,
    ),
    /* ADJUST
     * ,-----------------------------------------.                    ,-----------------------------------------.
     * |      |      |      |      |      |      |                    |      |      |      |      |      |      |
     * |------+------+------+------+------+------|                    |------+------+------+------+------+------|
     * |      |      |      |      |      |      |                    |      |      |      |      |      |      |
     * |------+------+------+------+------+------|                    |------+------+------+------+------+------|
     * |      |      |      |      |      |      |-------.    ,-------|      |      |RGB ON| HUE+ | SAT+ | VAL+ |
     * |------+------+------+------+------+------|       |    |       |------+------+------+------+------+------|
     * |      |      |      |      |      |      |-------|    |-------|      |      | MODE | HUE- | SAT- | VAL- |
     * `-----------------------------------------/       /     \      \-----------------------------------------'
     *                   |      |      |      | /       /       \      \  |      |      |      |
     *                   `----------------------------'           '------''--------------------'
     */
    layout!(
        XXXX, XXXX, XXXX, XXXX, XXXX, XXXX,             XXXX, XXXX, XXXX,    XXXX,    XXXX,    XXXX,
        XXXX, XXXX, XXXX, XXXX, XXXX, XXXX,             XXXX, XXXX, XXXX,    XXXX,    XXXX,    XXXX,
        XXXX, XXXX, XXXX, XXXX, XXXX, XXXX,             XXXX, XXXX, RM_TOGG, RM_HUEU, RM_SATU, RM_VALU,
        XXXX, XXXX, XXXX, XXXX, XXXX, XXXX, XXXX, XXXX, XXXX, XXXX, RM_NEXT, RM_HUED, RM_SATD, RM_VALD,
                    ____, ____, ____, ____,       ____, ____, ____, ____,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::resolve;
    use crate::matrix::{ColIndex, RowIndex};

    fn left(row: u8, col: u8) -> (usize, usize) {
        let ind = MatrixIndex::from_row_col(RowIndex::from_value(row), ColIndex::from_value(col));
        (keymap_row(Side::Left, ind), ind.col().index())
    }

    fn right(row: u8, col: u8) -> (usize, usize) {
        let ind = MatrixIndex::from_row_col(RowIndex::from_value(row), ColIndex::from_value(col));
        (keymap_row(Side::Right, ind), ind.col().index())
    }

    fn base(pos: (usize, usize)) -> KeyAction {
        action_at(Layer::Qwerty, pos.0, pos.1)
    }

    #[test]
    fn corners() {
        assert_eq!(ESC, base(left(0, 0)));
        assert_eq!(N5, base(left(0, 5)));
        // Right half is mirrored, column 0 is the outer edge
        assert_eq!(GRV, base(right(0, 0)));
        assert_eq!(N6, base(right(0, 5)));
        assert_eq!(LSFT, base(left(3, 0)));
        assert_eq!(RSFT, base(right(3, 0)));
    }

    #[test]
    fn thumb_row() {
        assert_eq!(XXXX, base(left(4, 0)));
        assert_eq!(LCTL, base(left(4, 1)));
        assert_eq!(LALT, base(left(4, 2)));
        assert_eq!(LOWER, base(left(4, 3)));
        assert_eq!(SPC, base(left(4, 4)));
        assert_eq!(MPLY, base(left(4, 5)));
        assert_eq!(XXXX, base(right(4, 0)));
        assert_eq!(RGUI, base(right(4, 1)));
        assert_eq!(BSPC, base(right(4, 2)));
        assert_eq!(RAISE, base(right(4, 3)));
        assert_eq!(ENT, base(right(4, 4)));
        assert_eq!(MUTE, base(right(4, 5)));
    }

    #[test]
    fn transparent_falls_through() {
        let lower = resolve(LayerState::EMPTY.with(Layer::Lower));
        let (row, col) = left(0, 0);
        assert_eq!(____, action_at(Layer::Lower, row, col));
        assert_eq!(ESC, resolve_action(lower, row, col));
        let (row, col) = left(1, 0);
        assert_eq!(F1, resolve_action(lower, row, col));
    }

    #[test]
    fn no_op_does_not_fall_through() {
        let lower = resolve(LayerState::EMPTY.with(Layer::Lower));
        let (row, col) = right(3, 5);
        assert_eq!(N, base((row, col)));
        assert_eq!(XXXX, resolve_action(lower, row, col));
    }

    #[test]
    fn adjust_layer() {
        let adjust = resolve(LayerState::EMPTY.with(Layer::Lower).with(Layer::Raise));
        let (row, col) = right(2, 3);
        assert_eq!(RM_TOGG, resolve_action(adjust, row, col));
        let (row, col) = right(3, 0);
        assert_eq!(RM_VALD, resolve_action(adjust, row, col));
        // Thumbs fall through adjust to raise, then the base layer
        let (row, col) = left(4, 4);
        assert_eq!(SPC, resolve_action(adjust, row, col));
        let (row, col) = left(4, 3);
        assert_eq!(ADJUST, resolve_action(adjust, row, col));
        // Everything else is unbound
        let (row, col) = left(0, 0);
        assert_eq!(XXXX, resolve_action(adjust, row, col));
    }

    #[test]
    fn raise_arrows() {
        let raise = resolve(LayerState::EMPTY.with(Layer::Raise));
        let arrows = [right(2, 4), right(2, 3), right(2, 2), right(2, 1)];
        let expect = [LEFT, DOWN, UP, RGHT];
        for (pos, exp) in arrows.into_iter().zip(expect) {
            assert_eq!(exp, resolve_action(raise, pos.0, pos.1));
        }
    }

    #[test]
    fn out_of_range() {
        assert_eq!(XXXX, action_at(Layer::Qwerty, MATRIX_ROWS, 0));
        assert_eq!(XXXX, action_at(Layer::Qwerty, 0, MATRIX_COLS));
    }
}
