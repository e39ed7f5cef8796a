use serde_with::DeserializeFromStr;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, DeserializeFromStr)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Multiplies every channel by `factor`, truncating toward zero and
    /// saturating at 255.
    pub fn scaled(&self, factor: f64) -> Rgb {
        let scale = |c: u8| (c as f64 * factor).clamp(0.0, 255.0) as u8;
        Rgb::new(scale(self.r), scale(self.g), scale(self.b))
    }

    pub fn dimmed(&self, factor: f64) -> Rgb {
        self.scaled(factor)
    }

    /// Channels as fractions in `[0, 1]`, the way PDF color operators take them.
    pub fn components(&self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    pub fn luminance(&self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::new(
                ErrorKind::InvalidColor,
                &format!("'{}' is not a '#RRGGBB' color", s),
            ));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| {
                Error::new(ErrorKind::InvalidColor, &format!("'{}': {}", s, e))
            })
        };

        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Lowest and highest value a generated shade channel may take.
pub const SHADE_MIN: u8 = 30;
pub const SHADE_MAX: u8 = 255;

const SHADE_DARKEST: f64 = 0.5;
const SHADE_SPREAD: f64 = 1.1;

/// Derives `count` tints of `base`, darkest first.
///
/// Shade `i` scales every channel by `0.5 + i / (count - 1) * 1.1`, so the
/// first one sits at half the base brightness and the last one at 1.6 times
/// it. Channels are truncated and clamped into `[SHADE_MIN, SHADE_MAX]`. A
/// single shade is the base color itself.
pub fn generate_shades(base: Rgb, count: usize) -> Vec<Rgb> {
    (0..count)
        .map(|i| {
            let factor = if count == 1 {
                1.0
            } else {
                SHADE_DARKEST + (i as f64 / (count - 1) as f64) * SHADE_SPREAD
            };

            let shade = |c: u8| {
                ((c as f64 * factor) as i64).clamp(SHADE_MIN as i64, SHADE_MAX as i64) as u8
            };

            Rgb::new(shade(base.r), shade(base.g), shade(base.b))
        })
        .collect()
}

/// A year's base color together with one shade per month.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    base: Rgb,
    shades: Vec<Rgb>,
}

impl Palette {
    pub fn new(base: Rgb, count: usize) -> Self {
        Palette {
            base,
            shades: generate_shades(base, count),
        }
    }

    pub fn base(&self) -> Rgb {
        self.base
    }

    pub fn shades(&self) -> &[Rgb] {
        &self.shades
    }

    /// Shade for a 1-based month number.
    pub fn shade(&self, month: u32) -> Option<Rgb> {
        (month as usize)
            .checked_sub(1)
            .and_then(|idx| self.shades.get(idx))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.shades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shades.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BERRY: Rgb = Rgb::new(0x8b, 0x45, 0x66);

    #[test]
    fn parse_hex_colors() {
        assert_eq!("#8B4566".parse::<Rgb>().unwrap(), BERRY);
        assert_eq!("8b4566".parse::<Rgb>().unwrap(), BERRY);
        assert_eq!(BERRY.to_string(), "#8B4566");
    }

    #[test]
    fn reject_malformed_colors() {
        for input in ["", "#12345", "#1234567", "#GG0000", "red"] {
            let err = input.parse::<Rgb>().unwrap_err();
            assert!(matches!(err.kind, ErrorKind::InvalidColor), "{}", input);
        }
    }

    #[test]
    fn shades_span_half_to_one_point_six() {
        let shades = generate_shades(BERRY, 12);

        assert_eq!(shades.len(), 12);
        assert_eq!(shades[0], Rgb::new(69, 34, 51));
        assert_eq!(shades[11], Rgb::new(222, 110, 163));
    }

    #[test]
    fn shades_stay_within_bounds() {
        let bases = [
            Rgb::BLACK,
            Rgb::WHITE,
            Rgb::new(0xa8, 0x76, 0x32),
            Rgb::new(0x5a, 0x6a, 0x8b),
        ];

        for base in bases {
            for n in 2..=24 {
                let shades = generate_shades(base, n);
                assert_eq!(shades.len(), n);

                for shade in &shades {
                    for c in [shade.r, shade.g, shade.b] {
                        assert!((SHADE_MIN..=SHADE_MAX).contains(&c));
                    }
                }

                for pair in shades.windows(2) {
                    assert!(pair[0].luminance() <= pair[1].luminance());
                }
            }
        }
    }

    #[test]
    fn dark_channels_are_lifted_to_minimum() {
        let shades = generate_shades(Rgb::new(0xa8, 0x76, 0x32), 12);
        assert_eq!(shades[0], Rgb::new(84, 59, 30));
    }

    #[test]
    fn single_shade_is_base_color() {
        assert_eq!(generate_shades(BERRY, 1), vec![BERRY]);
        assert!(generate_shades(BERRY, 0).is_empty());
    }

    #[test]
    fn dimming_truncates() {
        let shade = generate_shades(BERRY, 12)[0];
        assert_eq!(shade.dimmed(0.4), Rgb::new(27, 13, 20));
        assert_eq!(Rgb::new(255, 1, 2).dimmed(0.4), Rgb::new(102, 0, 0));
    }

    #[test]
    fn palette_lookup_by_month() {
        let palette = Palette::new(BERRY, 12);
        assert_eq!(palette.base(), BERRY);
        assert_eq!(palette.shade(1), Some(palette.shades()[0]));
        assert_eq!(palette.shade(12), Some(palette.shades()[11]));
        assert_eq!(palette.shade(0), None);
        assert_eq!(palette.shade(13), None);
    }
}
