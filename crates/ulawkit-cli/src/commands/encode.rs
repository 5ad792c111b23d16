//! Encode command implementation
//!
//! Reads a WAV file, runs the telephony pipeline and writes raw 8 kHz μ-law.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::process::ExitCode;

use ulawkit_dsp::wav::{self, PcmFormat};
use ulawkit_dsp::{AudioConfig, Stage, Transcoder};

use super::report::{digest, error_codes, CliError, CommandOutput};
use crate::cli_args::EncodeArgs;

/// Outcome of one encode run.
#[derive(Debug, Clone, Serialize)]
pub struct EncodeReport {
    pub input: String,
    pub output: String,
    pub input_format: PcmFormat,
    pub input_frames: usize,
    pub duration_seconds: f64,
    pub output_rate: u32,
    pub output_bytes: usize,
    pub stages: Vec<Stage>,
    pub config: AudioConfig,
    pub blake3: String,
}

/// Run the encode command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(args: &EncodeArgs) -> Result<ExitCode> {
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

/// Resolves the profile: config file or named profile, then flag overrides.
pub fn resolve_config(args: &EncodeArgs) -> Result<AudioConfig> {
    let base = match (&args.config, &args.profile) {
        (Some(path), _) => {
            let text = fs::read_to_string(path).map_err(|e| {
                CliError::new(
                    error_codes::FILE_READ,
                    format!("Failed to read config file {}: {}", path, e),
                )
            })?;
            serde_json::from_str(&text).map_err(|e| {
                CliError::new(
                    error_codes::CONFIG_PARSE,
                    format!("Failed to parse config file {}: {}", path, e),
                )
            })?
        }
        (None, Some(name)) => AudioConfig::profile(name)?,
        (None, None) => AudioConfig::default(),
    };

    let config = args.overrides.apply(base);
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn execute(args: &EncodeArgs) -> Result<EncodeReport> {
    let config = resolve_config(args)?;

    let bytes = fs::read(&args.input).map_err(|e| {
        CliError::new(
            error_codes::FILE_READ,
            format!("Failed to read input file {}: {}", args.input, e),
        )
    })?;

    let input = wav::read_pcm(&bytes).with_context(|| format!("Failed to parse {}", args.input))?;
    log::debug!(
        "{}: {} channel(s), {} Hz, {}-bit, {:.2}s",
        args.input,
        input.format.channels,
        input.format.sample_rate,
        input.format.bits_per_sample,
        input.duration_seconds()
    );

    let result = Transcoder::new()
        .encode(&input.samples, input.format, &config)
        .with_context(|| format!("Failed to encode {}", args.input))?;

    fs::write(&args.output, &result.data).map_err(|e| {
        CliError::new(
            error_codes::FILE_WRITE,
            format!("Failed to write output file {}: {}", args.output, e),
        )
    })?;

    Ok(EncodeReport {
        input: args.input.clone(),
        output: args.output.clone(),
        input_format: input.format,
        input_frames: input.frames(),
        duration_seconds: input.duration_seconds(),
        output_rate: result.sample_rate,
        output_bytes: result.data.len(),
        blake3: digest(&result.data),
        stages: result.stages,
        config,
    })
}

fn print_summary(report: &EncodeReport) {
    println!("{}", "Encoded:".cyan().bold());
    println!("  {} {}", "Input:".dimmed(), report.input);
    println!(
        "  {} {} ch, {} Hz, {}-bit, {:.2}s",
        "Format:".dimmed(),
        report.input_format.channels,
        report.input_format.sample_rate,
        report.input_format.bits_per_sample,
        report.duration_seconds
    );
    println!("  {} {}", "Output:".dimmed(), report.output);
    println!(
        "  {} {} bytes at {} Hz",
        "Size:".dimmed(),
        report.output_bytes,
        report.output_rate
    );
    let stages: Vec<String> = report.stages.iter().map(|s| s.to_string()).collect();
    println!("  {} {}", "Stages:".dimmed(), stages.join(" -> "));
    println!("  {} {}", "BLAKE3:".dimmed(), &report.blake3[..16]);
    println!("\n{}", "Done.".green().bold());
}
