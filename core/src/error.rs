use thiserror::Error;

#[derive(Debug, Error)]
pub enum FskError {
    #[error("Input source {path} unavailable: {reason}")]
    SourceUnavailable { path: String, reason: String },

    #[error("Output sink {path} unavailable: {reason}")]
    SinkUnavailable { path: String, reason: String },

    #[error("Invalid mode {0:?} (expected \"bit\" or \"byte\")")]
    InvalidMode(String),

    #[error("Invalid symbol {symbol} for {mode} mode (expected 0..={max})")]
    InvalidSymbol { symbol: u32, mode: &'static str, max: u32 },

    #[error("Symbol duration too short: {samples} samples per slot (minimum {min})")]
    DurationTooShort { samples: usize, min: usize },

    #[error("Incomplete slot: expected {expected} samples, got {actual}")]
    IncompleteSlot { expected: usize, actual: usize },

    #[error("Oversized slot: expected {expected} samples, got {actual}")]
    OversizedSlot { expected: usize, actual: usize },

    #[error("No spectral bin within tolerance of {frequency} Hz (bin resolution {resolution} Hz)")]
    FrequencyUnresolvable { frequency: f32, resolution: f32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("FFT error: {0}")]
    FftError(String),
}

pub type Result<T> = std::result::Result<T, FskError>;
