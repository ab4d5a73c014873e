use crate::error::{Result, SpectrogramError};

pub const DEFAULT_GAIN: f64 = -30.0;
pub const DEFAULT_RANGE: f64 = 80.0;
pub const DEFAULT_HUE_MIN: f64 = 2.0 / 3.0;
pub const DEFAULT_HUE_MAX: f64 = 0.0;

/// dB window and hue ramp used to colorize power values.
///
/// Levels at or above `gain` take `hue_min`; levels at or below
/// `gain - range` take `hue_max`. Everything between is mapped linearly.
/// Both hues lie in `[0, 1)`; either may be the larger one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMapping {
    gain: f64,
    range: f64,
    hue_min: f64,
    hue_max: f64,
}

impl ColorMapping {
    pub fn new(gain: f64, range: f64, hue_min: f64, hue_max: f64) -> Result<Self> {
        if ![gain, range, hue_min, hue_max].iter().all(|v| v.is_finite()) {
            return Err(SpectrogramError::NonFiniteMapping);
        }
        if range <= 0.0 {
            return Err(SpectrogramError::InvalidRange(range));
        }
        if let Some(&hue) = [hue_min, hue_max].iter().find(|h| !(0.0..1.0).contains(*h)) {
            return Err(SpectrogramError::HueOutOfRange(hue));
        }
        Ok(Self {
            gain,
            range,
            hue_min,
            hue_max,
        })
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    pub fn hue_min(&self) -> f64 {
        self.hue_min
    }

    pub fn hue_max(&self) -> f64 {
        self.hue_max
    }
}

impl Default for ColorMapping {
    fn default() -> Self {
        Self {
            gain: DEFAULT_GAIN,
            range: DEFAULT_RANGE,
            hue_min: DEFAULT_HUE_MIN,
            hue_max: DEFAULT_HUE_MAX,
        }
    }
}

/// Convert an HSV color (each component in 0.0-1.0) to 8-bit RGB.
///
/// The hue circle is split into six sextants; `h * 6` picks the sextant and
/// its fractional part drives the ramp inside it. Hues of 1.0 and above land
/// in the last sextant.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [u8; 3] {
    let (mut r, mut g, mut b) = (v, v, v);

    if s > 0.0 {
        let scaled = h * 6.0;
        let sextant = scaled.floor().clamp(0.0, 5.0);
        let f = scaled - sextant;
        match sextant as u8 {
            0 => {
                g *= 1.0 - s * (1.0 - f);
                b *= 1.0 - s;
            }
            1 => {
                r *= 1.0 - s * f;
                b *= 1.0 - s;
            }
            2 => {
                r *= 1.0 - s;
                b *= 1.0 - s * (1.0 - f);
            }
            3 => {
                r *= 1.0 - s;
                g *= 1.0 - s * f;
            }
            4 => {
                r *= 1.0 - s * (1.0 - f);
                g *= 1.0 - s;
            }
            _ => {
                g *= 1.0 - s;
                b *= 1.0 - s * f;
            }
        }
    }

    [to_byte(r), to_byte(g), to_byte(b)]
}

// Truncating; `as` saturates out-of-range values and maps NaN to 0.
fn to_byte(channel: f64) -> u8 {
    (f64::from(u8::MAX) * channel) as u8
}

/// Hue selected for a dB level. NaN levels are treated as silence.
pub fn hue_for_level(level: f64, mapping: &ColorMapping) -> f64 {
    let t = (mapping.gain - level) / mapping.range;
    let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
    mapping.hue_min + t * (mapping.hue_max - mapping.hue_min)
}

/// Fully saturated, full-value color for a dB level.
pub fn db_to_color(level: f64, mapping: &ColorMapping) -> [u8; 3] {
    hsv_to_rgb(hue_for_level(level, mapping), 1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(hue_min: f64, hue_max: f64) -> ColorMapping {
        ColorMapping::new(-30.0, 80.0, hue_min, hue_max).unwrap()
    }

    #[test]
    fn zero_saturation_is_grey() {
        for i in 0..=20 {
            let h = i as f64 / 20.0;
            assert_eq!(hsv_to_rgb(h, 0.0, 1.0), [255, 255, 255]);
            assert_eq!(hsv_to_rgb(h, 0.0, 0.5), [127, 127, 127]);
            assert_eq!(hsv_to_rgb(h, 0.0, 0.0), [0, 0, 0]);
        }
    }

    #[test]
    fn channels_stay_below_value() {
        for v in [0.25, 0.5, 1.0] {
            let ceiling = (255.0 * v) as u8;
            for i in 0..=120 {
                let h = i as f64 / 120.0;
                for s in [0.1, 0.5, 1.0] {
                    let rgb = hsv_to_rgb(h, s, v);
                    assert!(rgb.iter().all(|&c| c <= ceiling), "h={h} s={s} v={v} -> {rgb:?}");
                }
            }
        }
    }

    #[test]
    fn primary_hues() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [255, 0, 0]);
        assert_eq!(hsv_to_rgb(1.0 / 6.0, 1.0, 1.0), [255, 255, 0]);
        assert_eq!(hsv_to_rgb(0.5, 1.0, 1.0), [0, 255, 255]);
        assert_eq!(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), [0, 0, 255]);
    }

    #[test]
    fn hue_of_one_wraps_to_red() {
        assert_eq!(hsv_to_rgb(1.0, 1.0, 1.0), [255, 0, 0]);
    }

    #[test]
    fn sextant_fraction_truncates() {
        // h = 1/12 sits halfway through sextant 0: g = 0.5.
        assert_eq!(hsv_to_rgb(1.0 / 12.0, 1.0, 1.0), [255, 127, 0]);
    }

    #[test]
    fn level_at_gain_maps_to_hue_min() {
        let mapping = ramp(0.0, 2.0 / 3.0);
        assert_eq!(hue_for_level(-30.0, &mapping), 0.0);
        assert_eq!(hue_for_level(10.0, &mapping), 0.0);
        assert_eq!(db_to_color(-30.0, &mapping), [255, 0, 0]);
    }

    #[test]
    fn level_below_range_maps_to_hue_max() {
        let mapping = ramp(0.0, 2.0 / 3.0);
        assert_eq!(hue_for_level(-110.0, &mapping), 2.0 / 3.0);
        assert_eq!(hue_for_level(-400.0, &mapping), 2.0 / 3.0);
        assert_eq!(db_to_color(-110.0, &mapping), [0, 0, 255]);
    }

    #[test]
    fn hue_is_monotonic_in_level() {
        let mapping = ramp(0.0, 2.0 / 3.0);
        let mut previous = hue_for_level(20.0, &mapping);
        let mut level = 20.0;
        while level > -150.0 {
            level -= 0.5;
            let hue = hue_for_level(level, &mapping);
            assert!(hue >= previous);
            previous = hue;
        }
    }

    #[test]
    fn reversed_ramp() {
        let mapping = ramp(2.0 / 3.0, 0.0);
        assert_eq!(hue_for_level(-30.0, &mapping), 2.0 / 3.0);
        assert_eq!(hue_for_level(-110.0, &mapping), 0.0);
        assert!((hue_for_level(-70.0, &mapping) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn nan_level_is_quietest() {
        let mapping = ramp(0.0, 2.0 / 3.0);
        assert_eq!(hue_for_level(f64::NAN, &mapping), 2.0 / 3.0);
    }

    #[test]
    fn rejects_bad_range() {
        assert_eq!(
            ColorMapping::new(-30.0, 0.0, 0.0, 0.5),
            Err(SpectrogramError::InvalidRange(0.0))
        );
        assert_eq!(
            ColorMapping::new(-30.0, -5.0, 0.0, 0.5),
            Err(SpectrogramError::InvalidRange(-5.0))
        );
        assert_eq!(
            ColorMapping::new(f64::NAN, 80.0, 0.0, 0.5),
            Err(SpectrogramError::NonFiniteMapping)
        );
    }

    #[test]
    fn rejects_hues_outside_unit_interval() {
        assert_eq!(
            ColorMapping::new(-30.0, 80.0, 5.0, 0.0),
            Err(SpectrogramError::HueOutOfRange(5.0))
        );
        assert_eq!(
            ColorMapping::new(-30.0, 80.0, 0.0, 1.0),
            Err(SpectrogramError::HueOutOfRange(1.0))
        );
        assert_eq!(
            ColorMapping::new(-30.0, 80.0, -0.1, 0.5),
            Err(SpectrogramError::HueOutOfRange(-0.1))
        );
        assert!(ColorMapping::new(-30.0, 80.0, 0.999, 0.0).is_ok());
    }

    #[test]
    fn defaults() {
        let mapping = ColorMapping::default();
        assert_eq!(mapping.gain(), -30.0);
        assert_eq!(mapping.range(), 80.0);
        assert_eq!(mapping.hue_min(), 2.0 / 3.0);
        assert_eq!(mapping.hue_max(), 0.0);
    }
}
