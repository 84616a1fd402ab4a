use crate::bits::pack_symbols;
use crate::error::Result;
use crate::params::{CodecParams, Mode};
use crate::spectral::SlotDecoder;
use crate::workers::{resolve_workers, run_chunked};

/// FSK demodulator - recovers bytes from a waveform of fixed-length slots
///
/// Slots are decoded independently; each worker owns a contiguous run of
/// slots and writes its symbols at their original indices.
#[derive(Debug, Clone)]
pub struct Demodulator {
    params: CodecParams,
    mode: Mode,
    workers: usize,
}

impl Demodulator {
    /// Demodulator using every available hardware thread
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

    /// Demodulate a waveform back into bytes.
    ///
    /// Trailing samples that do not fill a whole slot are ignored. In bit mode
    /// a trailing group of fewer than 8 bits is ignored as well.
    pub fn demodulate(&self, samples: &[f32]) -> Result<Vec<u8>> {
        let slot_len = self.params.slot_length();
        let slot_count = samples.len() / slot_len;
        let trailing = samples.len() % slot_len;
        if trailing != 0 {
            log::debug!(
                "discarding {} trailing samples (incomplete slot of {})",
                trailing,
                slot_len
            );
        }
        if slot_count == 0 {
            return Ok(Vec::new());
        }

        let decoder = SlotDecoder::new(self.mode, &self.params)?;
        let workers = resolve_workers(self.workers, slot_count);

        log::debug!(
            "demodulating {} {} slots of {} samples ({} workers)",
            slot_count,
            self.mode,
            slot_len,
            workers
        );

        let mut symbols = vec![0u8; slot_count];
        run_chunked(slot_count, 1, workers, &mut symbols, |range, out| {
            let mut buffers = decoder.make_buffers();
            let start = range.start * slot_len;
            let end = range.end * slot_len;
            for (symbol, slot) in out.iter_mut().zip(samples[start..end].chunks_exact(slot_len)) {
                *symbol = decoder.decode_with(slot, &mut buffers)?;
            }
            Ok(())
        })?;

        if self.mode == Mode::Bit && slot_count % 8 != 0 {
            log::debug!("discarding {} trailing bits", slot_count % 8);
        }

        Ok(pack_symbols(symbols, self.mode))
    }
}

/// Demodulate a waveform with explicit parameters, using all available workers
pub fn demodulate(samples: &[f32], mode: Mode, params: &CodecParams) -> Result<Vec<u8>> {
    Demodulator::new(*params, mode).demodulate(samples)
}
