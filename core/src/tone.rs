use crate::error::{FskError, Result};
use crate::params::slot_length;
use crate::MIN_SLOT_SAMPLES;
use std::f64::consts::PI;

/// Generate one symbol's worth of a pure sine tone.
///
/// Length is `round(sample_rate * symbol_duration)`. Every block starts at
/// phase zero, so adjacent slots are not phase-continuous.
pub fn generate_tone(frequency: f32, symbol_duration: f64, sample_rate: u32) -> Result<Vec<f32>> {
    let samples = slot_length(symbol_duration, sample_rate);
    if samples < MIN_SLOT_SAMPLES {
        return Err(FskError::DurationTooShort {
            samples,
            min: MIN_SLOT_SAMPLES,
        });
    }

    let mut tone = vec![0.0f32; samples];
    fill_tone(&mut tone, frequency, sample_rate);
    Ok(tone)
}

/// Write a zero-phase tone into an existing slot buffer.
pub fn fill_tone(slot: &mut [f32], frequency: f32, sample_rate: u32) {
    // Phase is computed in f64: indices reach thousands of radians per slot
    let angular_freq = 2.0 * PI * frequency as f64 / sample_rate as f64;
    for (i, sample) in slot.iter_mut().enumerate() {
        *sample = (angular_freq * i as f64).sin() as f32;
    }
}
