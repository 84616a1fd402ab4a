//! File and WAV collaborators for the codec
//!
//! Outputs are written to a temporary file next to the destination and only
//! renamed into place once complete, so a failed run leaves nothing behind.

use crate::CliError;
use fskwave_core::FskError;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Sample format used when writing WAV output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavEncoding {
    Pcm16,
    Float32,
}

pub fn read_bytes(path: &Path) -> Result<Vec<u8>, FskError> {
    std::fs::read(path).map_err(|e| FskError::SourceUnavailable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub fn write_bytes(path: &Path, data: &[u8]) -> Result<(), FskError> {
    let mut tmp = staging_file(path)?;
    tmp.write_all(data).map_err(|e| sink_error(path, e))?;
    persist(tmp, path)
}

/// Read a WAV file as mono `f32` samples in [-1, 1] plus its sample rate.
///
/// Multichannel input is averaged down to mono.
pub fn read_wav(path: &Path) -> Result<(u32, Vec<f32>), CliError> {
    let mut reader = hound::WavReader::open(path).map_err(|e| match e {
        hound::Error::IoError(io) => CliError::Codec(FskError::SourceUnavailable {
            path: path.display().to_string(),
            reason: io.to_string(),
        }),
        other => CliError::Wav(other),
    })?;

    let spec = reader.spec();
    log::info!(
        "Read WAV: {} Hz, {} channels, {} bits",
        spec.sample_rate,
        spec.channels,
        spec.bits_per_sample
    );

    let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader.samples::<f32>().collect::<Result<_, _>>()?,
        (SampleFormat::Int, bits @ (8 | 16 | 24 | 32)) => {
            let scale = (1u64 << (bits - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
        (format, bits) => {
            return Err(CliError::UnsupportedFormat(format!(
                "{:?} with {} bits per sample",
                format, bits
            )))
        }
    };

    Ok((spec.sample_rate, to_mono(&interleaved, spec.channels as usize)))
}

/// Write mono samples as a WAV file.
///
/// PCM output clamps to [-1, 1] before scaling to i16.
pub fn write_wav(
    path: &Path,
    sample_rate: u32,
    samples: &[f32],
    encoding: WavEncoding,
) -> Result<(), CliError> {
    let spec = match encoding {
        WavEncoding::Pcm16 => WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        },
        WavEncoding::Float32 => WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        },
    };

    let mut tmp = staging_file(path)?;
    {
        let mut writer = WavWriter::new(tmp.as_file_mut(), spec)?;
        match encoding {
            WavEncoding::Pcm16 => {
                for &sample in samples {
                    writer.write_sample((sample.clamp(-1.0, 1.0) * 32767.0) as i16)?;
                }
            }
            WavEncoding::Float32 => {
                for &sample in samples {
                    writer.write_sample(sample)?;
                }
            }
        }
        writer.finalize()?;
    }
    persist(tmp, path)?;
    Ok(())
}

/// Average interleaved frames down to a single channel
pub fn to_mono(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

fn staging_file(path: &Path) -> Result<NamedTempFile, FskError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    NamedTempFile::new_in(dir).map_err(|e| sink_error(path, e))
}

fn persist(tmp: NamedTempFile, path: &Path) -> Result<(), FskError> {
    tmp.persist(path).map_err(|e| sink_error(path, e.error))?;
    Ok(())
}

fn sink_error(path: &Path, e: std::io::Error) -> FskError {
    FskError::SinkUnavailable {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}
