/// Keymap layers, ordered by priority, highest last.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Layer {
    Qwerty = 0,
    Lower = 1,
    Raise = 2,
    Adjust = 3,
}

pub const LAYER_COUNT: usize = 4;

impl Layer {
    pub const ALL: [Layer; LAYER_COUNT] = [Layer::Qwerty, Layer::Lower, Layer::Raise, Layer::Adjust];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn from_index(ind: usize) -> Option<Self> {
        match ind {
            0 => Some(Layer::Qwerty),
            1 => Some(Layer::Lower),
            2 => Some(Layer::Raise),
            3 => Some(Layer::Adjust),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn mask(self) -> u32 {
        1 << self as u32
    }
}

/// Active layer bitset, bit `n` is layer `n`.
///
/// Bits above the known layers are kept as-is so that the state can round trip
/// through anything that treats it as a plain integer. The base layer is always
/// considered active, whether or not its bit is set.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerState(u32);

impl LayerState {
    pub const EMPTY: Self = Self(0);

    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_on(self, layer: Layer) -> bool {
        self.0 & layer.mask() != 0
    }

    #[inline]
    #[must_use]
    pub const fn with(self, layer: Layer) -> Self {
        Self(self.0 | layer.mask())
    }

    #[inline]
    #[must_use]
    pub const fn without(self, layer: Layer) -> Self {
        Self(self.0 & !layer.mask())
    }

    /// Highest known layer that is on, falling back to the base layer.
    #[must_use]
    pub const fn highest(self) -> Layer {
        let mut ind = LAYER_COUNT;
        while ind > 1 {
            ind -= 1;
            if self.0 & (1 << ind) != 0 {
                if let Some(layer) = Layer::from_index(ind) {
                    return layer;
                }
            }
        }
        Layer::Qwerty
    }

    /// Active layers in lookup order, highest first, always ending with the base layer.
    pub fn active_highest_first(self) -> impl Iterator<Item = Layer> {
        Layer::ALL
            .into_iter()
            .rev()
            .filter(move |layer| *layer == Layer::Qwerty || self.is_on(*layer))
    }
}

/// Forces `derived` on iff both `first` and `second` are on, every other bit is untouched.
#[inline]
#[must_use]
pub const fn update_tri_layer(
    state: LayerState,
    first: Layer,
    second: Layer,
    derived: Layer,
) -> LayerState {
    let both = first.mask() | second.mask();
    if state.0 & both == both {
        state.with(derived)
    } else {
        state.without(derived)
    }
}

/// Applies the Lower + Raise = Adjust rule, run on every layer state change.
#[inline]
#[must_use]
pub const fn resolve(state: LayerState) -> LayerState {
    update_tri_layer(state, Layer::Lower, Layer::Raise, Layer::Adjust)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states() -> impl Iterator<Item = LayerState> {
        // Every combination of the known layers, with and without junk in the high bits
        (0u32..16).flat_map(|low| {
            [0u32, 0x10, 0x8000_0000, 0xFFFF_FFF0]
                .into_iter()
                .map(move |high| LayerState::from_bits(low | high))
        })
    }

    #[test]
    fn adjust_tracks_lower_and_raise() {
        for state in states() {
            let resolved = resolve(state);
            assert_eq!(
                state.is_on(Layer::Lower) && state.is_on(Layer::Raise),
                resolved.is_on(Layer::Adjust),
                "{:#b}",
                state.bits()
            );
        }
    }

    #[test]
    fn only_adjust_bit_changes() {
        for state in states() {
            let resolved = resolve(state);
            assert_eq!(
                state.bits() & !Layer::Adjust.mask(),
                resolved.bits() & !Layer::Adjust.mask(),
                "{:#b}",
                state.bits()
            );
        }
    }

    #[test]
    fn resolve_is_idempotent() {
        for state in states() {
            assert_eq!(resolve(state), resolve(resolve(state)));
        }
    }

    #[test]
    fn resolve_empty() {
        assert_eq!(LayerState::EMPTY, resolve(LayerState::EMPTY));
        assert_eq!(0, resolve(LayerState::from_bits(0)).bits());
    }

    #[test]
    fn stale_adjust_is_cleared() {
        let state = LayerState::EMPTY.with(Layer::Lower).with(Layer::Adjust);
        assert_eq!(LayerState::EMPTY.with(Layer::Lower), resolve(state));
    }

    #[test]
    fn highest_layer() {
        assert_eq!(Layer::Qwerty, LayerState::EMPTY.highest());
        assert_eq!(Layer::Qwerty, LayerState::from_bits(0xF0).highest());
        assert_eq!(Layer::Lower, LayerState::EMPTY.with(Layer::Lower).highest());
        let both = resolve(LayerState::EMPTY.with(Layer::Lower).with(Layer::Raise));
        assert_eq!(Layer::Adjust, both.highest());
    }

    #[test]
    fn lookup_order() {
        let state = LayerState::EMPTY.with(Layer::Raise);
        let mut order = state.active_highest_first();
        assert_eq!(Some(Layer::Raise), order.next());
        assert_eq!(Some(Layer::Qwerty), order.next());
        assert_eq!(None, order.next());
    }
}
