use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_fskwave(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fskwave"))
        .args(args)
        .output()
        .expect("Failed to execute fskwave")
}

fn combined_output(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string() + &String::from_utf8_lossy(&output.stdout)
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is valid UTF-8")
}

#[test]
fn test_encode_then_decode_bit_mode() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("message.txt");
    let wav = dir.path().join("message.wav");
    let decoded = dir.path().join("decoded.bin");
    fs::write(&input, "Test message").unwrap();

    let output = run_fskwave(&["encode", path_str(&input), path_str(&wav)]);
    assert!(output.status.success(), "encode failed: {}", combined_output(&output));
    assert!(combined_output(&output).contains("Encoded"));

    // 12 bytes * 8 bits * 441 samples * 2 bytes per sample, plus header
    let size = fs::metadata(&wav).expect("WAV not created").len();
    assert!(size > 84_672, "File too small: {} bytes", size);
    assert!(size < 90_000, "File too large: {} bytes", size);

    let output = run_fskwave(&["decode", path_str(&wav), path_str(&decoded)]);
    assert!(output.status.success(), "decode failed: {}", combined_output(&output));
    assert!(combined_output(&output).contains("Decoded 12 bytes"));

    assert_eq!(fs::read(&decoded).unwrap(), b"Test message");
}

#[test]
fn test_encode_then_decode_byte_mode_float() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data.bin");
    let wav = dir.path().join("data.wav");
    let decoded = dir.path().join("data.out");
    let data: Vec<u8> = (0..=255u8).rev().step_by(5).collect();
    fs::write(&input, &data).unwrap();

    let codec_flags = [
        "--mode", "byte", "--freq0", "500", "--freq1", "8150", "--duration", "0.1",
    ];

    let mut args = vec!["encode", path_str(&input), path_str(&wav), "--float"];
    args.extend_from_slice(&codec_flags);
    let output = run_fskwave(&args);
    assert!(output.status.success(), "encode failed: {}", combined_output(&output));

    let reader = hound::WavReader::open(&wav).unwrap();
    assert_eq!(reader.spec().sample_format, hound::SampleFormat::Float);
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.len() as usize, data.len() * 4410);

    let mut args = vec!["decode", path_str(&wav), path_str(&decoded)];
    args.extend_from_slice(&codec_flags);
    let output = run_fskwave(&args);
    assert!(output.status.success(), "decode failed: {}", combined_output(&output));

    assert_eq!(fs::read(&decoded).unwrap(), data);
}

#[test]
fn test_worker_flag_produces_identical_wav() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bin");
    let one = dir.path().join("one.wav");
    let many = dir.path().join("many.wav");
    fs::write(&input, b"parallel").unwrap();

    let output = run_fskwave(&["encode", path_str(&input), path_str(&one), "-j", "1"]);
    assert!(output.status.success());
    let output = run_fskwave(&["encode", path_str(&input), path_str(&many), "-j", "8"]);
    assert!(output.status.success());

    assert_eq!(fs::read(&one).unwrap(), fs::read(&many).unwrap());
}

#[test]
fn test_decode_missing_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.wav");
    let out = dir.path().join("out.bin");

    let output = run_fskwave(&["decode", path_str(&missing), path_str(&out)]);
    assert!(!output.status.success());
    assert!(
        combined_output(&output).contains("unavailable"),
        "unexpected output: {}",
        combined_output(&output)
    );
    assert!(!out.exists(), "output written despite failure");
}

#[test]
fn test_invalid_mode_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bin");
    let wav = dir.path().join("out.wav");
    fs::write(&input, b"x").unwrap();

    let output = run_fskwave(&["encode", path_str(&input), path_str(&wav), "--mode", "nibble"]);
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("nibble"));
    assert!(!wav.exists());
}

#[test]
fn test_too_short_duration_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bin");
    let wav = dir.path().join("out.wav");
    fs::write(&input, b"x").unwrap();

    let output = run_fskwave(&[
        "encode",
        path_str(&input),
        path_str(&wav),
        "--duration",
        "0.0001",
    ]);
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("too short"));
    assert!(!wav.exists());
}

#[test]
fn test_byte_mode_with_default_carriers_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bin");
    let wav = dir.path().join("out.wav");
    fs::write(&input, b"x").unwrap();

    let output = run_fskwave(&["encode", path_str(&input), path_str(&wav), "--mode", "byte"]);
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("No spectral bin"));
    assert!(!wav.exists());
}
