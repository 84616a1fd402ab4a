//! Spectral symbol detection for a single slot
//!
//! Each slot is transformed with a real-input FFT. Every candidate frequency
//! of the active mode is pinned to one spectral bin (the first bin, scanning
//! upward from DC, that lies within [`TOLERANCE_HZ`] of it); the candidate
//! whose bin carries the most energy is the decoded symbol.

use crate::error::{FskError, Result};
use crate::freq_map::FrequencyMap;
use crate::params::{CodecParams, Mode};
use crate::TOLERANCE_HZ;
use realfft::num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// Working buffers for one FFT, reused across slots by a single worker
pub struct SpectrumBuffers {
    input: Vec<f32>,
    output: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

/// Slot decoder with a precomputed candidate → bin table.
///
/// Built once per call and shared read-only between workers.
pub struct SlotDecoder {
    slot_len: usize,
    fft: Arc<dyn RealToComplex<f32>>,
    candidates: Vec<(u8, usize)>,
}

impl SlotDecoder {
    pub fn new(mode: Mode, params: &CodecParams) -> Result<Self> {
        let slot_len = params.slot_length();
        let candidates = resolve_candidate_bins(mode, params)?;

        log::debug!(
            "slot decoder: mode={} slot_len={} candidates={}",
            mode,
            slot_len,
            candidates.len()
        );

        let mut planner = RealFftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(slot_len);

        Ok(Self {
            slot_len,
            fft,
            candidates,
        })
    }

    /// Spectral bin assigned to each candidate symbol, in scan order
    pub fn candidate_bins(&self) -> &[(u8, usize)] {
        &self.candidates
    }

    pub fn make_buffers(&self) -> SpectrumBuffers {
        SpectrumBuffers {
            input: self.fft.make_input_vec(),
            output: self.fft.make_output_vec(),
            scratch: self.fft.make_scratch_vec(),
        }
    }

    /// Decode one slot, allocating fresh FFT buffers
    pub fn decode(&self, block: &[f32]) -> Result<u8> {
        let mut buffers = self.make_buffers();
        self.decode_with(block, &mut buffers)
    }

    /// Decode one slot using caller-owned buffers.
    ///
    /// On exactly equal magnitudes the later candidate wins.
    pub fn decode_with(&self, block: &[f32], buffers: &mut SpectrumBuffers) -> Result<u8> {
        if block.len() < self.slot_len {
            return Err(FskError::IncompleteSlot {
                expected: self.slot_len,
                actual: block.len(),
            });
        }
        if block.len() > self.slot_len {
            return Err(FskError::OversizedSlot {
                expected: self.slot_len,
                actual: block.len(),
            });
        }

        buffers.input.copy_from_slice(block);
        self.fft
            .process_with_scratch(&mut buffers.input, &mut buffers.output, &mut buffers.scratch)
            .map_err(|e| FskError::FftError(format!("forward FFT failed: {:?}", e)))?;

        let mut best_symbol = 0u8;
        let mut best_power = f32::NEG_INFINITY;
        for &(symbol, bin) in &self.candidates {
            let power = buffers.output[bin].norm_sqr();
            if power >= best_power {
                best_power = power;
                best_symbol = symbol;
            }
        }

        Ok(best_symbol)
    }
}

/// Pin every candidate of `mode` to its spectral bin for a slot of
/// `params.slot_length()` samples.
///
/// Fails with `FrequencyUnresolvable` if any candidate has no bin within
/// [`TOLERANCE_HZ`]. The modulator runs the same check so an undecodable
/// waveform is never produced.
pub fn resolve_candidate_bins(mode: Mode, params: &CodecParams) -> Result<Vec<(u8, usize)>> {
    let slot_len = params.slot_length();
    let sample_rate = params.sample_rate();
    let map = FrequencyMap::new(mode, params);

    if mode == Mode::Byte && map.min_spacing() <= 2.0 * TOLERANCE_HZ {
        log::warn!(
            "byte-mode carriers are {:.2} Hz apart, within twice the {} Hz tolerance; decoding may be ambiguous",
            map.min_spacing(),
            TOLERANCE_HZ
        );
    }

    let num_bins = slot_len / 2 + 1;
    map.candidates()
        .map(|(symbol, freq)| {
            find_bin(freq, num_bins, slot_len, sample_rate)
                .map(|bin| (symbol, bin))
                .ok_or(FskError::FrequencyUnresolvable {
                    frequency: freq,
                    resolution: sample_rate as f32 / slot_len as f32,
                })
        })
        .collect()
}

/// First bin `k` in `0..num_bins` with `|k * sample_rate / slot_len - freq| < TOLERANCE_HZ`
fn find_bin(freq: f32, num_bins: usize, slot_len: usize, sample_rate: u32) -> Option<usize> {
    let resolution = sample_rate as f64 / slot_len as f64;
    (0..num_bins).find(|&k| (k as f64 * resolution - freq as f64).abs() < TOLERANCE_HZ as f64)
}

/// Decode a single slot with a one-off decoder.
///
/// Prefer [`SlotDecoder`] when decoding more than one slot.
pub fn decode_slot(block: &[f32], mode: Mode, params: &CodecParams) -> Result<u8> {
    SlotDecoder::new(mode, params)?.decode(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tone::generate_tone;

    #[test]
    fn test_find_bin_exact() {
        // 441-sample slot at 44.1 kHz gives 100 Hz bins
        assert_eq!(find_bin(1000.0, 221, 441, 44100), Some(10));
        assert_eq!(find_bin(2000.0, 221, 441, 44100), Some(20));
    }

    #[test]
    fn test_find_bin_tolerance_is_strict() {
        // bin 10 sits at 1000 Hz: 1009.9 is inside the window, 1010 is not
        assert_eq!(find_bin(1009.9, 221, 441, 44100), Some(10));
        assert_eq!(find_bin(1010.0, 221, 441, 44100), None);
        assert_eq!(find_bin(990.5, 221, 441, 44100), Some(10));
    }

    #[test]
    fn test_find_bin_first_match() {
        // 10 Hz bins: 1005 is within 10 Hz of both 1000 and 1010, lowest wins
        assert_eq!(find_bin(1005.0, 2206, 4410, 44100), Some(100));
    }

    #[test]
    fn test_unresolvable_frequency() {
        // 100 Hz bins cannot place 1050 Hz within 10 Hz of any bin
        let params = CodecParams::new(1050.0, 2000.0, 0.01, 44100).unwrap();
        match SlotDecoder::new(Mode::Bit, &params) {
            Err(FskError::FrequencyUnresolvable { frequency, resolution }) => {
                assert_eq!(frequency, 1050.0);
                assert_eq!(resolution, 100.0);
            }
            other => panic!("expected FrequencyUnresolvable, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_decode_bit_slots() {
        let params = CodecParams::default();
        let decoder = SlotDecoder::new(Mode::Bit, &params).unwrap();
        let zero = generate_tone(1000.0, 0.01, 44100).unwrap();
        let one = generate_tone(2000.0, 0.01, 44100).unwrap();
        assert_eq!(decoder.decode(&zero).unwrap(), 0);
        assert_eq!(decoder.decode(&one).unwrap(), 1);
    }

    #[test]
    fn test_decode_byte_slots() {
        let params = CodecParams::new(500.0, 8150.0, 0.1, 44100).unwrap();
        let decoder = SlotDecoder::new(Mode::Byte, &params).unwrap();
        let mut buffers = decoder.make_buffers();
        for symbol in [0u8, 1, 127, 128, 200, 254, 255] {
            let freq = 500.0 + symbol as f32 * 30.0;
            let tone = generate_tone(freq, 0.1, 44100).unwrap();
            assert_eq!(decoder.decode_with(&tone, &mut buffers).unwrap(), symbol);
        }
    }

    #[test]
    fn test_equal_magnitudes_favor_later_candidate() {
        let params = CodecParams::default();
        let silence = vec![0.0f32; params.slot_length()];
        assert_eq!(decode_slot(&silence, Mode::Bit, &params).unwrap(), 1);

        let byte_params = CodecParams::new(500.0, 8150.0, 0.1, 44100).unwrap();
        let silence = vec![0.0f32; byte_params.slot_length()];
        assert_eq!(decode_slot(&silence, Mode::Byte, &byte_params).unwrap(), 255);
    }

    #[test]
    fn test_incomplete_slot() {
        let params = CodecParams::default();
        let short = vec![0.0f32; 440];
        assert!(matches!(
            decode_slot(&short, Mode::Bit, &params),
            Err(FskError::IncompleteSlot {
                expected: 441,
                actual: 440
            })
        ));
    }

    #[test]
    fn test_oversized_block_is_not_incomplete() {
        let params = CodecParams::default();
        let long = vec![0.0f32; 442];
        match decode_slot(&long, Mode::Bit, &params) {
            Err(FskError::OversizedSlot { expected, actual }) => {
                assert_eq!(expected, 441);
                assert_eq!(actual, 442);
            }
            other => panic!("expected OversizedSlot, got {:?}", other),
        }
    }

    #[test]
    fn test_default_params_cannot_resolve_byte_mode() {
        // 3.9 Hz carrier spacing against 100 Hz bins
        assert!(matches!(
            resolve_candidate_bins(Mode::Byte, &CodecParams::default()),
            Err(FskError::FrequencyUnresolvable { .. })
        ));
        assert_eq!(
            resolve_candidate_bins(Mode::Bit, &CodecParams::default()).unwrap(),
            vec![(0, 10), (1, 20)]
        );
    }

    #[test]
    fn test_candidate_bins_bit_mode() {
        let decoder = SlotDecoder::new(Mode::Bit, &CodecParams::default()).unwrap();
        assert_eq!(decoder.candidate_bins(), &[(0, 10), (1, 20)]);
    }
}
