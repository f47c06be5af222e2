//! Rational frame rates and frame-count timecodes.
//!
//! A [`Timecode`] is an integer number of frames at a [`FrameRate`] of
//! `num/den` frames per second. Seconds are converted to frames exactly once,
//! at ingestion; every later operation (add, subtract, compare) happens on
//! integer frame counts, so repeated arithmetic never drifts off the frame
//! grid.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Frames closer than this to a whole frame are treated as exactly on it by
/// the directed (floor/ceil) conversions.
const FRAME_SNAP_EPSILON: f64 = 1e-9;

/// Largest frame count accepted from a floating-point conversion.
const MAX_FRAMES: f64 = 9.0e15;

/// A frame rate of `num/den` frames per second, stored in lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FrameRateRepr", into = "String")]
pub struct FrameRate {
    num: u32,
    den: u32,
}

/// Accepted serialized forms: `"24000/1001"`, `"25"`, or a bare integer.
#[derive(Deserialize)]
#[serde(untagged)]
enum FrameRateRepr {
    Text(String),
    Whole(u32),
}

impl TryFrom<FrameRateRepr> for FrameRate {
    type Error = ModelError;

    fn try_from(repr: FrameRateRepr) -> ModelResult<Self> {
        match repr {
            FrameRateRepr::Text(text) => text.parse(),
            FrameRateRepr::Whole(fps) => FrameRate::new(fps, 1),
        }
    }
}

impl From<FrameRate> for String {
    fn from(rate: FrameRate) -> Self {
        rate.to_string()
    }
}

impl FrameRate {
    /// 24000/1001 (23.976 fps).
    pub const FPS_23_976: FrameRate = FrameRate { num: 24000, den: 1001 };
    /// 24 fps.
    pub const FPS_24: FrameRate = FrameRate { num: 24, den: 1 };
    /// 25 fps.
    pub const FPS_25: FrameRate = FrameRate { num: 25, den: 1 };
    /// 30000/1001 (29.97 fps).
    pub const FPS_29_97: FrameRate = FrameRate { num: 30000, den: 1001 };
    /// 30 fps.
    pub const FPS_30: FrameRate = FrameRate { num: 30, den: 1 };
    /// 48 fps.
    pub const FPS_48: FrameRate = FrameRate { num: 48, den: 1 };
    /// 50 fps.
    pub const FPS_50: FrameRate = FrameRate { num: 50, den: 1 };
    /// 60000/1001 (59.94 fps).
    pub const FPS_59_94: FrameRate = FrameRate { num: 60000, den: 1001 };
    /// 60 fps.
    pub const FPS_60: FrameRate = FrameRate { num: 60, den: 1 };

    /// Create a frame rate, reducing it to lowest terms.
    pub fn new(num: u32, den: u32) -> ModelResult<Self> {
        if num == 0 || den == 0 {
            return Err(ModelError::InvalidFrameRate {
                rate: format!("{num}/{den}"),
            });
        }
        let g = gcd(num as u64, den as u64) as u32;
        Ok(Self {
            num: num / g,
            den: den / g,
        })
    }

    /// Numerator (frames).
    pub fn num(&self) -> u32 {
        self.num
    }

    /// Denominator (seconds).
    pub fn den(&self) -> u32 {
        self.den
    }

    /// Frames per second as a float, for display only.
    pub fn fps(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Nominal integer frame count per second used for timecode display.
    pub fn nominal_fps(&self) -> u32 {
        self.num.div_ceil(self.den)
    }

    /// Duration of one frame as an exact `(numerator, denominator)` of seconds.
    pub fn frame_duration(&self) -> (u32, u32) {
        (self.den, self.num)
    }

    /// Duration of one frame in seconds, for display only.
    pub fn frame_duration_secs(&self) -> f64 {
        self.den as f64 / self.num as f64
    }

    /// Exact (unrounded) frame position of a seconds value.
    fn frames_f64(&self, seconds: f64) -> ModelResult<f64> {
        let frames = seconds * self.num as f64 / self.den as f64;
        if !frames.is_finite() || frames.abs() > MAX_FRAMES {
            return Err(ModelError::NonFiniteSeconds { value: seconds });
        }
        Ok(frames)
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl FromStr for FrameRate {
    type Err = ModelError;

    /// Parse `"num/den"`, an integer, or one of the common NTSC decimal
    /// spellings (`23.976`, `29.97`, `59.94`).
    fn from_str(s: &str) -> ModelResult<Self> {
        let s = s.trim();
        let invalid = || ModelError::InvalidFrameRate {
            rate: s.to_string(),
        };

        if let Some((num, den)) = s.split_once('/') {
            let num = num.trim().parse::<u32>().map_err(|_| invalid())?;
            let den = den.trim().parse::<u32>().map_err(|_| invalid())?;
            return FrameRate::new(num, den);
        }

        match s {
            "23.976" | "23.98" => return Ok(Self::FPS_23_976),
            "29.97" => return Ok(Self::FPS_29_97),
            "59.94" => return Ok(Self::FPS_59_94),
            _ => {}
        }

        if let Ok(whole) = s.parse::<u32>() {
            return FrameRate::new(whole, 1);
        }

        match s.parse::<f64>() {
            Ok(value) if value.fract() == 0.0 && value > 0.0 && value <= u32::MAX as f64 => {
                FrameRate::new(value as u32, 1)
            }
            _ => Err(invalid()),
        }
    }
}

/// A position or length expressed as a whole number of frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timecode {
    frames: i64,
    rate: FrameRate,
}

impl Timecode {
    /// Create a timecode from a frame count.
    pub fn new(frames: i64, rate: FrameRate) -> Self {
        Self { frames, rate }
    }

    /// Zero at the given rate.
    pub fn zero(rate: FrameRate) -> Self {
        Self::new(0, rate)
    }

    /// Convert seconds to the nearest frame (ties round to even).
    pub fn from_seconds(seconds: f64, rate: FrameRate) -> ModelResult<Self> {
        let frames = rate.frames_f64(seconds)?;
        Ok(Self::new(frames.round_ties_even() as i64, rate))
    }

    /// Convert seconds to the last frame boundary at or before them.
    pub fn from_seconds_floor(seconds: f64, rate: FrameRate) -> ModelResult<Self> {
        let frames = snap(rate.frames_f64(seconds)?);
        Ok(Self::new(frames.floor() as i64, rate))
    }

    /// Convert seconds to the first frame boundary at or after them.
    pub fn from_seconds_ceil(seconds: f64, rate: FrameRate) -> ModelResult<Self> {
        let frames = snap(rate.frames_f64(seconds)?);
        Ok(Self::new(frames.ceil() as i64, rate))
    }

    pub fn frames(&self) -> i64 {
        self.frames
    }

    pub fn rate(&self) -> FrameRate {
        self.rate
    }

    /// Seconds as a float. A single division of exact integers, so the
    /// result is the closest `f64` to the true value.
    pub fn to_seconds(&self) -> f64 {
        (self.frames as f64 * self.rate.den as f64) / self.rate.num as f64
    }

    /// Exact seconds as `(numerator, denominator)`: `frames * den / num`.
    pub fn rational_seconds(&self) -> (i64, i64) {
        (self.frames * self.rate.den as i64, self.rate.num as i64)
    }

    /// Add another timecode of the same rate.
    pub fn try_add(self, other: Timecode) -> ModelResult<Timecode> {
        self.ensure_same_rate(&other)?;
        Ok(Self::new(self.frames + other.frames, self.rate))
    }

    /// Subtract another timecode of the same rate.
    pub fn try_sub(self, other: Timecode) -> ModelResult<Timecode> {
        self.ensure_same_rate(&other)?;
        Ok(Self::new(self.frames - other.frames, self.rate))
    }

    /// Shift by a signed number of frames.
    pub fn add_frames(self, frames: i64) -> Timecode {
        Self::new(self.frames + frames, self.rate)
    }

    /// Re-express this timecode at another frame rate, rounding to the
    /// nearest target frame (ties to even).
    pub fn rebase(self, rate: FrameRate) -> Timecode {
        if rate == self.rate {
            return self;
        }
        // frames * den_old / num_old seconds  ->  * num_new / den_new frames
        let numer = self.frames as i128 * self.rate.den as i128 * rate.num as i128;
        let denom = self.rate.num as i128 * rate.den as i128;
        Self::new(div_round_half_even(numer, denom) as i64, rate)
    }

    pub fn ensure_same_rate(&self, other: &Timecode) -> ModelResult<()> {
        if self.rate != other.rate {
            return Err(ModelError::RateMismatch {
                left: self.rate,
                right: other.rate,
            });
        }
        Ok(())
    }
}

impl PartialOrd for Timecode {
    /// Timecodes at different rates are unordered; rebase first.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.rate != other.rate {
            return None;
        }
        Some(self.frames.cmp(&other.frames))
    }
}

impl fmt::Display for Timecode {
    /// Non-drop-frame `HH:MM:SS:FF` using the nominal frame count per second.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fps = self.rate.nominal_fps() as i64;
        let sign = if self.frames < 0 { "-" } else { "" };
        let total = self.frames.abs();
        let ff = total % fps;
        let total_secs = total / fps;
        write!(
            f,
            "{sign}{:02}:{:02}:{:02}:{:02}",
            total_secs / 3600,
            (total_secs % 3600) / 60,
            total_secs % 60,
            ff
        )
    }
}

fn snap(frames: f64) -> f64 {
    let nearest = frames.round();
    if (frames - nearest).abs() < FRAME_SNAP_EPSILON {
        nearest
    } else {
        frames
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Integer division rounding to nearest, ties to even. `denom` must be positive.
fn div_round_half_even(numer: i128, denom: i128) -> i128 {
    let q = numer.div_euclid(denom);
    let r = numer.rem_euclid(denom);
    match (2 * r).cmp(&denom) {
        Ordering::Less => q,
        Ordering::Greater => q + 1,
        Ordering::Equal => {
            if q % 2 == 0 {
                q
            } else {
                q + 1
            }
        }
    }
}
