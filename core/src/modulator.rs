use crate::bits::expand_symbols;
use crate::error::{FskError, Result};
use crate::freq_map::FrequencyMap;
use crate::params::{CodecParams, Mode};
use crate::spectral::resolve_candidate_bins;
use crate::tone::fill_tone;
use crate::workers::{resolve_workers, run_chunked};

/// FSK modulator - turns a byte buffer into one tone per symbol
///
/// Symbols are split into contiguous chunks and each chunk is synthesized on
/// its own worker straight into its slice of the output, so the waveform is
/// identical whatever the worker count.
#[derive(Debug, Clone)]
pub struct Modulator {
    params: CodecParams,
    mode: Mode,
    workers: usize,
}

impl Modulator {
    /// Modulator using every available hardware thread
    pub fn new(params: CodecParams, mode: Mode) -> Self {
        Self {
            params,
            mode,
            workers: 0,
        }
    }

    /// Fix the number of chunks (0 = available parallelism)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn params(&self) -> &CodecParams {
        &self.params
    }

    /// Modulate `data` into `slot_length * symbol_count` samples.
    ///
    /// Empty input yields an empty waveform. Parameters whose carriers the
    /// demodulator could not resolve are rejected up front.
    pub fn modulate(&self, data: &[u8]) -> Result<Vec<f32>> {
        let symbols = expand_symbols(data, self.mode);
        if symbols.is_empty() {
            return Ok(Vec::new());
        }

        resolve_candidate_bins(self.mode, &self.params)?;

        let map = FrequencyMap::new(self.mode, &self.params);
        let slot_len = self.params.slot_length();
        let total = waveform_len(symbols.len(), slot_len)?;
        let sample_rate = self.params.sample_rate();
        let workers = resolve_workers(self.workers, symbols.len());

        log::debug!(
            "modulating {} bytes as {} {} symbols ({} samples/slot, {} workers)",
            data.len(),
            symbols.len(),
            self.mode,
            slot_len,
            workers
        );

        let mut samples = vec![0.0f32; total];
        run_chunked(symbols.len(), slot_len, workers, &mut samples, |range, out| {
            for (&symbol, slot) in symbols[range].iter().zip(out.chunks_exact_mut(slot_len)) {
                fill_tone(slot, map.frequency(symbol)?, sample_rate);
            }
            Ok(())
        })?;

        Ok(samples)
    }
}

fn waveform_len(symbols: usize, slot_len: usize) -> Result<usize> {
    symbols.checked_mul(slot_len).ok_or_else(|| {
        FskError::InvalidConfig(format!(
            "{} symbols of {} samples do not fit in memory",
            symbols, slot_len
        ))
    })
}

/// Modulate a byte buffer with explicit parameters.
///
/// `workers = 0` uses the available hardware parallelism.
pub fn modulate(data: &[u8], mode: Mode, params: &CodecParams, workers: usize) -> Result<Vec<f32>> {
    Modulator::new(*params, mode).with_workers(workers).modulate(data)
}
