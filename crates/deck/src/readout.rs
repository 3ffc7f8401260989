//! Weight percentage readout with Safe / Warning / Danger banding.

use serde::{Deserialize, Serialize};

use crate::constants::{DANGER_PERCENT, WARNING_PERCENT};

/// Discrete status band for a weight percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StressBand {
    #[default]
    Safe,
    Warning,
    Danger,
}

impl StressBand {
    /// Band for a rounded weight percentage
    pub fn from_percent(percent: u32) -> Self {
        if percent < WARNING_PERCENT {
            StressBand::Safe
        } else if percent < DANGER_PERCENT {
            StressBand::Warning
        } else {
            StressBand::Danger
        }
    }

    /// Status text shown under the percentage
    pub fn label(&self) -> &'static str {
        match self {
            StressBand::Safe => "Safe",
            StressBand::Warning => "Warning",
            StressBand::Danger => "Danger!",
        }
    }

    /// sRGB color of the percentage text
    pub fn rgb8(&self) -> [u8; 3] {
        match self {
            StressBand::Safe => [0x00, 0xff, 0x00],
            StressBand::Warning => [0xff, 0xa5, 0x00],
            StressBand::Danger => [0xff, 0x00, 0x00],
        }
    }

    /// Color as a CSS hex string, for the page bridge
    pub fn css_hex(&self) -> String {
        let [r, g, b] = self.rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// Round a weight in 0..=1 to a whole percentage
pub fn weight_percent(weight: f32) -> u32 {
    (weight.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// State of the on-screen weight readout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Readout {
    /// Whether the panel is displayed at all
    pub visible: bool,
    /// Rounded weight percentage of the last touched point
    pub percent: u32,
    /// Status band for `percent`
    pub band: StressBand,
}

impl Readout {
    /// Hidden readout
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Visible readout for `weight`
    pub fn shown(weight: f32) -> Self {
        let percent = weight_percent(weight);
        Self {
            visible: true,
            percent,
            band: StressBand::from_percent(percent),
        }
    }

    /// Headline text, e.g. `Weight: 50%`
    pub fn headline(&self) -> String {
        format!("Weight: {}%", self.percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(StressBand::from_percent(0), StressBand::Safe);
        assert_eq!(StressBand::from_percent(29), StressBand::Safe);
        assert_eq!(StressBand::from_percent(30), StressBand::Warning);
        assert_eq!(StressBand::from_percent(59), StressBand::Warning);
        assert_eq!(StressBand::from_percent(60), StressBand::Danger);
        assert_eq!(StressBand::from_percent(100), StressBand::Danger);
    }

    #[test]
    fn test_labels() {
        assert_eq!(StressBand::Safe.label(), "Safe");
        assert_eq!(StressBand::Warning.label(), "Warning");
        assert_eq!(StressBand::Danger.label(), "Danger!");
    }

    #[test]
    fn test_css_hex() {
        assert_eq!(StressBand::Safe.css_hex(), "#00ff00");
        assert_eq!(StressBand::Warning.css_hex(), "#ffa500");
        assert_eq!(StressBand::Danger.css_hex(), "#ff0000");
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(weight_percent(0.294), 29);
        assert_eq!(weight_percent(0.296), 30);
        assert_eq!(weight_percent(0.5), 50);
        assert_eq!(weight_percent(1.0), 100);
    }

    #[test]
    fn test_shown_readout() {
        let readout = Readout::shown(0.5);
        assert!(readout.visible);
        assert_eq!(readout.percent, 50);
        assert_eq!(readout.band, StressBand::Warning);
        assert_eq!(readout.headline(), "Weight: 50%");
        assert!(!Readout::hidden().visible);
    }
}
