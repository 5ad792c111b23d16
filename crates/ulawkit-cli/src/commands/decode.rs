//! Decode command implementation
//!
//! Expands raw 8 kHz μ-law into a 16-bit mono WAV at the requested rate.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::process::ExitCode;

use ulawkit_dsp::{wav, Transcoder, TELEPHONY_RATE};

use super::report::{digest, error_codes, CliError, CommandOutput};
use crate::cli_args::DecodeArgs;

/// Outcome of one decode run.
#[derive(Debug, Clone, Serialize)]
pub struct DecodeReport {
    pub input: String,
    pub output: String,
    pub input_bytes: usize,
    pub sample_rate: u32,
    pub samples: usize,
    pub duration_seconds: f64,
    pub resampled: bool,
    pub blake3: String,
}

/// Run the decode command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(args: &DecodeArgs) -> Result<ExitCode> {
    if args.json {
        let output = match execute(args) {
            Ok(report) => CommandOutput::success(report),
            Err(e) => CommandOutput::failure(&e),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(if output.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        })
    } else {
        let report = execute(args)?;
        print_summary(&report);
        Ok(ExitCode::SUCCESS)
    }
}

fn execute(args: &DecodeArgs) -> Result<DecodeReport> {
    let ulaw = fs::read(&args.input).map_err(|e| {
        CliError::new(
            error_codes::FILE_READ,
            format!("Failed to read input file {}: {}", args.input, e),
        )
    })?;

    let decoded = Transcoder::new()
        .decode(&ulaw, args.sample_rate, args.window_size)
        .with_context(|| format!("Failed to decode {}", args.input))?;
    let wav_bytes = wav::mono_wav(&decoded.samples, decoded.sample_rate);

    fs::write(&args.output, &wav_bytes).map_err(|e| {
        CliError::new(
            error_codes::FILE_WRITE,
            format!("Failed to write output file {}: {}", args.output, e),
        )
    })?;

    Ok(DecodeReport {
        input: args.input.clone(),
        output: args.output.clone(),
        input_bytes: ulaw.len(),
        sample_rate: decoded.sample_rate,
        samples: decoded.samples.len(),
        duration_seconds: decoded.samples.len() as f64 / decoded.sample_rate as f64,
        resampled: decoded.sample_rate != TELEPHONY_RATE,
        blake3: digest(&wav_bytes),
    })
}

fn print_summary(report: &DecodeReport) {
    println!("{}", "Decoded:".cyan().bold());
    println!(
        "  {} {} ({} bytes)",
        "Input:".dimmed(),
        report.input,
        report.input_bytes
    );
    println!("  {} {}", "Output:".dimmed(), report.output);
    println!(
        "  {} {} samples at {} Hz, {:.2}s{}",
        "Audio:".dimmed(),
        report.samples,
        report.sample_rate,
        report.duration_seconds,
        if report.resampled { " (resampled)" } else { "" }
    );
    println!("  {} {}", "BLAKE3:".dimmed(), &report.blake3[..16]);
    println!("\n{}", "Done.".green().bold());
}
