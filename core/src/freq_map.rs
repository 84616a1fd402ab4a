use crate::error::{FskError, Result};
use crate::params::{CodecParams, Mode};

/// Map a symbol to its carrier frequency in Hz.
///
/// Bit mode: `0 -> freq0`, `1 -> freq1`.
/// Byte mode: `freq0 + symbol * (freq1 - freq0) / 255`, so symbol 0 sits on
/// `freq0` and symbol 255 on `freq1`.
pub fn frequency_of(symbol: u32, mode: Mode, freq0: f32, freq1: f32) -> Result<f32> {
    if symbol > mode.max_symbol() {
        return Err(FskError::InvalidSymbol {
            symbol,
            mode: mode.as_str(),
            max: mode.max_symbol(),
        });
    }

    Ok(match mode {
        Mode::Bit => {
            if symbol == 0 {
                freq0
            } else {
                freq1
            }
        }
        // Multiply before dividing so evenly spaced maps stay exact in f32
        Mode::Byte => freq0 + (symbol as f32) * (freq1 - freq0) / 255.0,
    })
}

/// Ordered `(symbol, frequency)` table for one mode, built once per call.
#[derive(Debug, Clone)]
pub struct FrequencyMap {
    mode: Mode,
    table: Vec<f32>,
}

impl FrequencyMap {
    pub fn new(mode: Mode, params: &CodecParams) -> Self {
        let (freq0, freq1) = (params.freq0(), params.freq1());
        let table = match mode {
            Mode::Bit => vec![freq0, freq1],
            Mode::Byte => (0..=255u32)
                .map(|s| freq0 + (s as f32) * (freq1 - freq0) / 255.0)
                .collect(),
        };
        Self { mode, table }
    }

    /// Frequency for a symbol already known to be in range.
    ///
    /// Symbols produced by [`crate::bits::expand_symbols`] always are.
    pub fn frequency(&self, symbol: u8) -> Result<f32> {
        self.table
            .get(symbol as usize)
            .copied()
            .ok_or(FskError::InvalidSymbol {
                symbol: symbol as u32,
                mode: self.mode.as_str(),
                max: self.mode.max_symbol(),
            })
    }

    /// Candidates in scan order (ascending symbol value)
    pub fn candidates(&self) -> impl Iterator<Item = (u8, f32)> + '_ {
        self.table.iter().enumerate().map(|(s, &f)| (s as u8, f))
    }

    /// Distance in Hz between adjacent candidate frequencies
    pub fn min_spacing(&self) -> f32 {
        let span = (self.table[self.table.len() - 1] - self.table[0]).abs();
        span / (self.table.len() - 1) as f32
    }
}
