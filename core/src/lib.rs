//! Binary data <-> audio tone codec using frequency-shift keying
//!
//! Each symbol (a bit, or a whole byte) is sent as a fixed-length slot of a
//! pure sine tone. Decoding compares the spectral magnitude of every candidate
//! frequency in each slot and picks the strongest.

pub mod error;
pub mod params;
pub mod freq_map;
pub mod tone;
pub mod bits;
pub mod workers;
pub mod spectral;
pub mod modulator;
pub mod demodulator;

pub use demodulator::{demodulate, Demodulator};
pub use error::{FskError, Result};
pub use freq_map::{frequency_of, FrequencyMap};
pub use modulator::{modulate, Modulator};
pub use params::{CodecParams, Mode};
pub use spectral::{decode_slot, SlotDecoder};
pub use tone::generate_tone;

// Default codec configuration
pub const DEFAULT_FREQ0: f32 = 1000.0; // Hz, bit 0 / lowest byte carrier
pub const DEFAULT_FREQ1: f32 = 2000.0; // Hz, bit 1 / highest byte carrier
pub const DEFAULT_SYMBOL_DURATION: f64 = 0.01; // seconds per slot
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// A spectral bin must lie strictly within this distance of a candidate
/// frequency to represent it.
pub const TOLERANCE_HZ: f32 = 10.0;

/// Shortest slot, in samples, the tone generator accepts
pub const MIN_SLOT_SAMPLES: usize = 8;

/// Longest slot, in samples, a parameter set may describe
pub const MAX_SLOT_SAMPLES: usize = u32::MAX as usize;
