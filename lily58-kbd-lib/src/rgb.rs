/// Edits issued from the adjust layer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RgbCommand {
    Toggle,
    NextMode,
    HueUp,
    HueDown,
    SaturationUp,
    SaturationDown,
    ValueUp,
    ValueDown,
}

pub const MODE_COUNT: u8 = 8;
const HUE_STEP: u8 = 8;
const SATURATION_STEP: u8 = 16;
const VALUE_STEP: u8 = 16;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RgbSettings {
    pub enabled: bool,
    /// 1-based, wraps at [`MODE_COUNT`]
    pub mode: u8,
    pub hue: u8,
    pub saturation: u8,
    pub value: u8,
}

impl RgbSettings {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: true,
            mode: 1,
            hue: 0,
            saturation: u8::MAX,
            value: u8::MAX,
        }
    }

    pub fn apply(&mut self, command: RgbCommand) {
        match command {
            RgbCommand::Toggle => self.enabled = !self.enabled,
            RgbCommand::NextMode => {
                self.mode = if self.mode >= MODE_COUNT {
                    1
                } else {
                    self.mode + 1
                };
            }
            // Hue is a color wheel, the others are levels
            RgbCommand::HueUp => self.hue = self.hue.wrapping_add(HUE_STEP),
            RgbCommand::HueDown => self.hue = self.hue.wrapping_sub(HUE_STEP),
            RgbCommand::SaturationUp => {
                self.saturation = self.saturation.saturating_add(SATURATION_STEP);
            }
            RgbCommand::SaturationDown => {
                self.saturation = self.saturation.saturating_sub(SATURATION_STEP);
            }
            RgbCommand::ValueUp => self.value = self.value.saturating_add(VALUE_STEP),
            RgbCommand::ValueDown => self.value = self.value.saturating_sub(VALUE_STEP),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_wraps() {
        let mut rgb = RgbSettings::new();
        rgb.apply(RgbCommand::HueDown);
        assert_eq!(256 - u16::from(HUE_STEP), u16::from(rgb.hue));
        rgb.apply(RgbCommand::HueUp);
        assert_eq!(0, rgb.hue);
    }

    #[test]
    fn levels_saturate() {
        let mut rgb = RgbSettings::new();
        rgb.apply(RgbCommand::ValueUp);
        rgb.apply(RgbCommand::SaturationUp);
        assert_eq!(u8::MAX, rgb.value);
        assert_eq!(u8::MAX, rgb.saturation);
        for _ in 0..32 {
            rgb.apply(RgbCommand::ValueDown);
        }
        assert_eq!(0, rgb.value);
        assert_eq!(u8::MAX, rgb.saturation);
    }

    #[test]
    fn mode_cycles() {
        let mut rgb = RgbSettings::new();
        for expect in 2..=MODE_COUNT {
            rgb.apply(RgbCommand::NextMode);
            assert_eq!(expect, rgb.mode);
        }
        rgb.apply(RgbCommand::NextMode);
        assert_eq!(1, rgb.mode);
    }

    #[test]
    fn toggle() {
        let mut rgb = RgbSettings::new();
        rgb.apply(RgbCommand::Toggle);
        assert!(!rgb.enabled);
        rgb.apply(RgbCommand::Toggle);
        assert!(rgb.enabled);
    }
}
