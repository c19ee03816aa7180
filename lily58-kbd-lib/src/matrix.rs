/// Rows per half
pub const NUM_ROWS: u8 = 5;
/// Columns per half
pub const NUM_COLS: u8 = 6;
/// Switches per half, including the one empty slot in the thumb row
pub const HALF_MATRIX_SIZE: usize = NUM_ROWS as usize * NUM_COLS as usize;

#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Left = 0,
    Right = 1,
}

#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RowIndex(pub u8);

impl RowIndex {
    #[must_use]
    #[allow(clippy::missing_panics_doc)]
    pub const fn from_value(ind: u8) -> Self {
        assert!(
            ind < NUM_ROWS,
            "Tried to construct row index from a bad value"
        );
        Self(ind)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColIndex(pub u8);

impl ColIndex {
    #[must_use]
    #[allow(clippy::missing_panics_doc)]
    pub const fn from_value(ind: u8) -> Self {
        assert!(
            ind < NUM_COLS,
            "Tried to construct col index from a bad value"
        );
        Self(ind)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Position of a switch within one half, `row * NUM_COLS + col`.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixIndex(u8);

impl MatrixIndex {
    #[inline]
    #[must_use]
    pub const fn from_row_col(row_index: RowIndex, col_index: ColIndex) -> Self {
        Self(row_index.0 * NUM_COLS + col_index.0)
    }

    #[inline]
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        if (byte as usize) < HALF_MATRIX_SIZE {
            Some(Self(byte))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn row(self) -> RowIndex {
        RowIndex(self.0 / NUM_COLS)
    }

    #[inline]
    #[must_use]
    pub const fn col(self) -> ColIndex {
        ColIndex(self.0 % NUM_COLS)
    }

    /// The outermost thumb row slot has no switch
    #[inline]
    #[must_use]
    pub const fn has_switch(self) -> bool {
        !(self.row().0 == NUM_ROWS - 1 && self.col().0 == 0)
    }

    #[must_use]
    #[inline(always)]
    pub const fn byte(&self) -> u8 {
        self.0
    }

    #[must_use]
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A single byte sent from the right half to the left.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixUpdate(u8);

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixChange {
    KeyUpdate(MatrixIndex, bool),
    EncoderUpdate(bool),
}

impl MatrixUpdate {
    const KEY_STATE_BIT: u8 = 0b0010_0000;
    const KEY_INDEX_MASK: u8 = 0b0001_1111;
    const KIND_MASK: u8 = 0b1100_0000;
    const ENCODER_STATE_BIT: u8 = 0b1000_0000;
    const ENCODER_ON: Self = Self(0b1100_0000);
    const ENCODER_OFF: Self = Self(0b0100_0000);

    /// Rejects bytes that no sender produces, such as line noise after one half is plugged in.
    #[must_use]
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte & Self::KIND_MASK {
            0 => MatrixIndex::from_byte(byte & Self::KEY_INDEX_MASK)
                .filter(|ind| ind.has_switch())
                .map(|_| Self(byte)),
            0b0100_0000 | 0b1100_0000 => (byte & !Self::KIND_MASK == 0).then_some(Self(byte)),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn from_key_update(index: MatrixIndex, state: bool) -> Self {
        let mut val = index.0;
        if state {
            val |= Self::KEY_STATE_BIT;
        }
        Self(val)
    }

    #[inline]
    #[must_use]
    pub const fn from_rotary_change(clockwise: bool) -> Self {
        if clockwise {
            Self::ENCODER_ON
        } else {
            Self::ENCODER_OFF
        }
    }

    #[inline]
    #[must_use]
    pub const fn interpret_byte(&self) -> MatrixChange {
        let encoder = self.0 & Self::KIND_MASK;
        if encoder == 0 {
            let idx = self.0 & Self::KEY_INDEX_MASK;
            let state = self.0 & Self::KEY_STATE_BIT;
            MatrixChange::KeyUpdate(MatrixIndex(idx), state != 0)
        } else {
            MatrixChange::EncoderUpdate(encoder & Self::ENCODER_STATE_BIT != 0)
        }
    }

    #[inline]
    #[must_use]
    pub const fn byte(self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_from_key() {
        const R1: RowIndex = RowIndex::from_value(1);
        const C1: ColIndex = ColIndex::from_value(4);
        const M1: MatrixIndex = MatrixIndex::from_row_col(R1, C1);
        const MU1: MatrixUpdate = MatrixUpdate::from_key_update(M1, true);
        assert_eq!(0b00101010, MU1.0, "{:b}", MU1.0);
        const EXPECT_IND: u8 = R1.0 * NUM_COLS + C1.0;
        assert!(matches!(
            MU1.interpret_byte(),
            MatrixChange::KeyUpdate(MatrixIndex(EXPECT_IND), true)
        ));
        const MU2: MatrixUpdate = MatrixUpdate::from_key_update(M1, false);
        assert!(matches!(
            MU2.interpret_byte(),
            MatrixChange::KeyUpdate(MatrixIndex(EXPECT_IND), false)
        ));
        assert_eq!(0b00001010, MU2.0, "{:b}", MU2.0);
        assert_eq!(Some(MU1), MatrixUpdate::from_byte(MU1.byte()));
        assert_eq!(R1, M1.row());
        assert_eq!(C1, M1.col());
    }

    #[test]
    fn update_from_encoder() {
        let cw = MatrixUpdate::from_rotary_change(true);
        let ccw = MatrixUpdate::from_rotary_change(false);
        assert_eq!(MatrixChange::EncoderUpdate(true), cw.interpret_byte());
        assert_eq!(MatrixChange::EncoderUpdate(false), ccw.interpret_byte());
        assert_eq!(Some(cw), MatrixUpdate::from_byte(cw.byte()));
        assert_eq!(Some(ccw), MatrixUpdate::from_byte(ccw.byte()));
    }

    #[test]
    fn rejects_junk() {
        // Past the end of the matrix
        assert!(MatrixUpdate::from_byte(30).is_none());
        assert!(MatrixUpdate::from_byte(31 | 0b0010_0000).is_none());
        // Empty thumb slot, row 4 col 0
        assert!(MatrixUpdate::from_byte(24).is_none());
        // Encoder with trailing bits
        assert!(MatrixUpdate::from_byte(0b0100_0001).is_none());
        assert!(MatrixUpdate::from_byte(0b1110_0000).is_none());
        // Direction bit without the encoder bit
        assert!(MatrixUpdate::from_byte(0b1000_0000).is_none());
        assert!(MatrixUpdate::from_byte(u8::MAX).is_none());
    }

    #[test]
    fn every_switch_survives_the_wire() {
        let mut switches = 0;
        for row in 0..NUM_ROWS {
            for col in 0..NUM_COLS {
                let ind = MatrixIndex::from_row_col(RowIndex::from_value(row), ColIndex::from_value(col));
                if !ind.has_switch() {
                    continue;
                }
                switches += 1;
                for pressed in [true, false] {
                    let update = MatrixUpdate::from_byte(MatrixUpdate::from_key_update(ind, pressed).byte()).unwrap();
                    assert_eq!(MatrixChange::KeyUpdate(ind, pressed), update.interpret_byte());
                }
            }
        }
        assert_eq!(29, switches);
    }
}
