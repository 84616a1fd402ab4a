use crate::error::{FskError, Result};
use crate::{
    DEFAULT_FREQ0, DEFAULT_FREQ1, DEFAULT_SAMPLE_RATE, DEFAULT_SYMBOL_DURATION, MAX_SLOT_SAMPLES,
    MIN_SLOT_SAMPLES,
};
use std::fmt;
use std::str::FromStr;

/// Encoding mode: what a single slot carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// One bit per slot, two carrier frequencies
    Bit,
    /// One byte per slot, 256 carrier frequencies between `freq0` and `freq1`
    Byte,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Bit => "bit",
            Mode::Byte => "byte",
        }
    }

    /// Largest symbol value valid in this mode
    pub fn max_symbol(&self) -> u32 {
        match self {
            Mode::Bit => 1,
            Mode::Byte => 255,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = FskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bit" => Ok(Mode::Bit),
            "byte" => Ok(Mode::Byte),
            _ => Err(FskError::InvalidMode(s.to_string())),
        }
    }
}

/// Immutable codec configuration shared by the modulator and demodulator
///
/// Both sides must agree on every field; nothing is transmitted in-band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodecParams {
    freq0: f32,
    freq1: f32,
    symbol_duration: f64,
    sample_rate: u32,
}

impl CodecParams {
    /// Validate and build a parameter set.
    ///
    /// Fails with `DurationTooShort` when `symbol_duration * sample_rate`
    /// rounds to fewer than [`MIN_SLOT_SAMPLES`] samples, and with
    /// `InvalidConfig` when it exceeds [`MAX_SLOT_SAMPLES`].
    pub fn new(freq0: f32, freq1: f32, symbol_duration: f64, sample_rate: u32) -> Result<Self> {
        if !freq0.is_finite() || !freq1.is_finite() || freq0 < 0.0 || freq1 < 0.0 {
            return Err(FskError::InvalidConfig(format!(
                "frequencies must be finite and non-negative (freq0={}, freq1={})",
                freq0, freq1
            )));
        }
        if !symbol_duration.is_finite() || symbol_duration <= 0.0 {
            return Err(FskError::InvalidConfig(format!(
                "symbol duration must be positive (got {})",
                symbol_duration
            )));
        }
        if sample_rate == 0 {
            return Err(FskError::InvalidConfig("sample rate must be positive".into()));
        }

        let product = (sample_rate as f64 * symbol_duration).round();
        if product > MAX_SLOT_SAMPLES as f64 {
            return Err(FskError::InvalidConfig(format!(
                "symbol duration {} s at {} Hz gives {} samples per slot (maximum {})",
                symbol_duration, sample_rate, product, MAX_SLOT_SAMPLES
            )));
        }

        let params = Self {
            freq0,
            freq1,
            symbol_duration,
            sample_rate,
        };
        let samples = params.slot_length();
        if samples < MIN_SLOT_SAMPLES {
            return Err(FskError::DurationTooShort {
                samples,
                min: MIN_SLOT_SAMPLES,
            });
        }

        let nyquist = sample_rate as f32 / 2.0;
        if freq0.max(freq1) >= nyquist {
            log::warn!(
                "carrier frequency {} Hz is at or above Nyquist ({} Hz) and will alias",
                freq0.max(freq1),
                nyquist
            );
        }

        Ok(params)
    }

    pub fn freq0(&self) -> f32 {
        self.freq0
    }

    pub fn freq1(&self) -> f32 {
        self.freq1
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples per symbol slot: `round(sample_rate * symbol_duration)`
    pub fn slot_length(&self) -> usize {
        slot_length(self.symbol_duration, self.sample_rate)
    }

    /// Same parameters at a different sample rate (used when a recording's
    /// header disagrees with the configured rate).
    pub fn with_sample_rate(&self, sample_rate: u32) -> Result<Self> {
        Self::new(self.freq0, self.freq1, self.symbol_duration, sample_rate)
    }
}

impl Default for CodecParams {
    fn default() -> Self {
        Self {
            freq0: DEFAULT_FREQ0,
            freq1: DEFAULT_FREQ1,
            symbol_duration: DEFAULT_SYMBOL_DURATION,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

pub(crate) fn slot_length(symbol_duration: f64, sample_rate: u32) -> usize {
    (sample_rate as f64 * symbol_duration).round() as usize
}
