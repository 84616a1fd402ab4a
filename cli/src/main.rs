mod audio;

use audio::WavEncoding;
use clap::{Args, Parser, Subcommand};
use fskwave_core::{
    CodecParams, Demodulator, FskError, Mode, Modulator, DEFAULT_FREQ0, DEFAULT_FREQ1,
    DEFAULT_SAMPLE_RATE, DEFAULT_SYMBOL_DURATION,
};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Codec(#[from] FskError),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Unsupported WAV format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Parser)]
#[command(name = "fskwave")]
#[command(about = "Convert binary files to FSK audio tones and back")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a binary file into a WAV file
    Encode {
        /// Input binary file
        #[arg(value_name = "INPUT.BIN")]
        input: PathBuf,

        /// Output WAV file
        #[arg(value_name = "OUTPUT.WAV")]
        output: PathBuf,

        /// Write 32-bit float samples instead of 16-bit PCM
        #[arg(long)]
        float: bool,

        #[command(flatten)]
        codec: CodecArgs,
    },

    /// Decode a WAV file back into binary data
    Decode {
        /// Input WAV file
        #[arg(value_name = "INPUT.WAV")]
        input: PathBuf,

        /// Output binary file
        #[arg(value_name = "OUTPUT.BIN")]
        output: PathBuf,

        #[command(flatten)]
        codec: CodecArgs,
    },
}

#[derive(Args, Debug, Clone)]
struct CodecArgs {
    /// Symbol mode: "bit" (two tones) or "byte" (256 tones)
    #[arg(short, long, default_value = "bit")]
    mode: Mode,

    /// Frequency for bit 0, or lowest byte frequency (Hz)
    #[arg(long, default_value_t = DEFAULT_FREQ0)]
    freq0: f32,

    /// Frequency for bit 1, or highest byte frequency (Hz)
    #[arg(long, default_value_t = DEFAULT_FREQ1)]
    freq1: f32,

    /// Duration of each bit/byte tone (seconds)
    #[arg(short, long, default_value_t = DEFAULT_SYMBOL_DURATION)]
    duration: f64,

    /// Sample rate (Hz)
    #[arg(short = 'r', long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Worker threads (0 = one per CPU)
    #[arg(short = 'j', long, default_value_t = 0)]
    workers: usize,
}

impl CodecArgs {
    fn params(&self) -> Result<CodecParams, FskError> {
        CodecParams::new(self.freq0, self.freq1, self.duration, self.sample_rate)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Encode {
            input,
            output,
            float,
            codec,
        } => encode_command(&input, &output, float, &codec),
        Commands::Decode {
            input,
            output,
            codec,
        } => decode_command(&input, &output, &codec),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn encode_command(
    input_path: &PathBuf,
    output_path: &PathBuf,
    float: bool,
    codec: &CodecArgs,
) -> Result<(), CliError> {
    let params = codec.params()?;

    let data = audio::read_bytes(input_path)?;
    println!("Read {} bytes from {}", data.len(), input_path.display());

    let samples = Modulator::new(params, codec.mode)
        .with_workers(codec.workers)
        .modulate(&data)?;
    println!(
        "Encoded to {} audio samples ({} mode, {} samples per symbol)",
        samples.len(),
        codec.mode,
        params.slot_length()
    );

    let encoding = if float {
        WavEncoding::Float32
    } else {
        WavEncoding::Pcm16
    };
    audio::write_wav(output_path, params.sample_rate(), &samples, encoding)?;

    println!("Wrote {}", output_path.display());
    println!("Binary-to-audio conversion complete.");
    Ok(())
}

fn decode_command(
    input_path: &PathBuf,
    output_path: &PathBuf,
    codec: &CodecArgs,
) -> Result<(), CliError> {
    let mut params = codec.params()?;

    let (sample_rate, samples) = audio::read_wav(input_path)?;
    println!("Extracted {} samples", samples.len());

    if sample_rate != params.sample_rate() {
        log::warn!(
            "WAV sample rate {} Hz differs from configured {} Hz; using the file's rate",
            sample_rate,
            params.sample_rate()
        );
        params = params.with_sample_rate(sample_rate)?;
    }

    let data = Demodulator::new(params, codec.mode)
        .with_workers(codec.workers)
        .demodulate(&samples)?;
    println!("Decoded {} bytes", data.len());

    audio::write_bytes(output_path, &data)?;
    println!("Wrote {} bytes to {}", data.len(), output_path.display());
    println!("Audio-to-binary conversion complete.");
    Ok(())
}
