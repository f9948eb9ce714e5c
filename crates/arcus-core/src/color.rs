use derive_more::{Deref, From, Into};
use palette::Srgba;
use palette::rgb::{FromHexError, Srgb};
use serde_with::DeserializeFromStr;
use std::fmt;
use std::str::FromStr;

/// Fill and stroke color of the progress ring.
///
/// Parsed from `#rgb` / `#rrggbb` hex strings (leading `#` optional), which
/// is how it appears in the config file and on the control channel.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr, Deref, From, Into)]
pub struct RingColor(Srgba<u8>);

impl RingColor {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, u8::MAX)
    }

    pub fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self(Srgba::new(red, green, blue, alpha))
    }

    /// Packed `0xAARRGGBB`, the form used in cache keys.
    pub fn argb(&self) -> u32 {
        u32::from_be_bytes([self.0.alpha, self.0.red, self.0.green, self.0.blue])
    }

    /// Components as cairo wants them.
    pub fn to_f64_components(&self) -> (f64, f64, f64, f64) {
        self.0.into_format::<f64, f64>().into_components()
    }
}

impl Default for RingColor {
    fn default() -> Self {
        Self::new(110, 190, 235)
    }
}

impl FromStr for RingColor {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rgb = Srgb::<u8>::from_str(s.trim())?;
        Ok(Self::new(rgb.red, rgb.green, rgb.blue))
    }
}

impl fmt::Display for RingColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            self.0.red, self.0.green, self.0.blue
        )
    }
}
