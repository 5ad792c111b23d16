//! CLI argument definitions for the ulawkit command-line interface.
//!
//! All `#[derive(Parser)]`, `#[derive(Subcommand)]` and `#[derive(Args)]` types
//! are defined here, keeping `main.rs` focused on dispatch logic.

use clap::{Args, Parser, Subcommand};
use ulawkit_dsp::{AntiAliasingType, AudioConfig};

/// ulawkit - WAV to 8 kHz G.711 μ-law for telephony, and back
#[derive(Debug, Parser)]
#[command(name = "ulawkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log every pipeline stage (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a WAV file into raw 8 kHz mono μ-law
    Encode(EncodeArgs),

    /// Convert raw 8 kHz μ-law into a 16-bit mono WAV file
    Decode(DecodeArgs),
}

#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Path to the input WAV file
    #[arg(short, long)]
    pub input: String,

    /// Path to write the μ-law output
    #[arg(short, long)]
    pub output: String,

    /// Named profile to start from (default, voice)
    #[arg(long, value_parser = ["default", "voice"])]
    pub profile: Option<String>,

    /// JSON profile file; missing fields fall back to the default profile
    #[arg(long, conflicts_with = "profile")]
    pub config: Option<String>,

    #[command(flatten)]
    pub overrides: ConfigOverrides,

    /// Output machine-readable JSON (no colored output)
    #[arg(long)]
    pub json: bool,
}

/// Per-option overrides applied on top of the selected profile.
#[derive(Debug, Default, Args)]
pub struct ConfigOverrides {
    /// Low-pass cutoff in Hz (0 disables)
    #[arg(long, value_name = "HZ")]
    pub low_pass: Option<f64>,

    /// High-pass cutoff in Hz (0 disables)
    #[arg(long, value_name = "HZ")]
    pub high_pass: Option<f64>,

    /// Normalization peak, 0.0-1.0 (0 disables)
    #[arg(long, value_name = "PEAK")]
    pub normalize: Option<f64>,

    /// Compression ratio, >= 1.0 (1.0 disables)
    #[arg(long, value_name = "RATIO")]
    pub compress_ratio: Option<f64>,

    /// Compression threshold, 0.0-1.0 of full scale
    #[arg(long, value_name = "LEVEL")]
    pub compress_threshold: Option<f64>,

    /// Resampling window half-width
    #[arg(long, value_name = "N")]
    pub window_size: Option<usize>,

    /// Anti-aliasing cutoff as a fraction of the target Nyquist
    #[arg(long, value_name = "RATIO")]
    pub anti_aliasing_ratio: Option<f64>,

    /// Anti-aliasing filter (simple, butterworth, bessel, chebyshev, or 0-3)
    #[arg(long, value_name = "TYPE")]
    pub anti_aliasing_type: Option<AntiAliasingType>,

    /// Filter order, 2-6
    #[arg(long, value_name = "N")]
    pub filter_order: Option<u32>,

    /// Chebyshev passband ripple in dB
    #[arg(long, value_name = "DB")]
    pub chebyshev_ripple: Option<f64>,

    /// Treat the input as this rate regardless of its header
    #[arg(long, value_name = "HZ")]
    pub input_sample_rate: Option<u32>,

    /// Keep channel 0 instead of averaging all channels
    #[arg(long)]
    pub no_force_mono: bool,
}

impl ConfigOverrides {
    /// Applies every override that was given.
    pub fn apply(&self, mut config: AudioConfig) -> AudioConfig {
        if let Some(v) = self.low_pass {
            config.low_pass_cutoff = v;
        }
        if let Some(v) = self.high_pass {
            config.high_pass_cutoff = v;
        }
        if let Some(v) = self.normalize {
            config.normalize_peak = v;
        }
        if let Some(v) = self.compress_ratio {
            config.compression_ratio = v;
        }
        if let Some(v) = self.compress_threshold {
            config.compression_threshold = v;
        }
        if let Some(v) = self.window_size {
            config.resampling_window_size = v;
        }
        if let Some(v) = self.anti_aliasing_ratio {
            config.anti_aliasing_cutoff_ratio = v;
        }
        if let Some(v) = self.anti_aliasing_type {
            config.anti_aliasing_type = v;
        }
        if let Some(v) = self.filter_order {
            config.filter_order = v;
        }
        if let Some(v) = self.chebyshev_ripple {
            config.chebyshev_ripple = v;
        }
        if let Some(v) = self.input_sample_rate {
            config.input_sample_rate = v;
        }
        if self.no_force_mono {
            config.force_mono = false;
        }
        config
    }
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Path to the raw μ-law input
    #[arg(short, long)]
    pub input: String,

    /// Path to write the WAV output
    #[arg(short, long)]
    pub output: String,

    /// Output sample rate in Hz
    #[arg(long, default_value_t = 8000, value_name = "HZ")]
    pub sample_rate: u32,

    /// Resampling window half-width
    #[arg(long, default_value_t = 64, value_name = "N")]
    pub window_size: usize,

    /// Output machine-readable JSON (no colored output)
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_parses_encode() {
        let cli = Cli::try_parse_from(["ulawkit", "encode", "-i", "in.wav", "-o", "out.ulaw"])
            .unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Encode(args) => {
                assert_eq!(args.input, "in.wav");
                assert_eq!(args.output, "out.ulaw");
                assert!(args.profile.is_none());
                assert!(args.config.is_none());
                assert!(!args.json);
                assert_eq!(args.overrides.apply(AudioConfig::default()), AudioConfig::default());
            }
            _ => panic!("expected encode command"),
        }
    }

    #[test]
    fn test_cli_parses_encode_overrides() {
        let cli = Cli::try_parse_from([
            "ulawkit",
            "encode",
            "--input",
            "in.wav",
            "--output",
            "out.ulaw",
            "--profile",
            "voice",
            "--low-pass",
            "3000",
            "--high-pass",
            "0",
            "--anti-aliasing-type",
            "2",
            "--filter-order",
            "3",
            "--window-size",
            "24",
            "--no-force-mono",
            "--verbose",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Encode(args) => {
                assert_eq!(args.profile.as_deref(), Some("voice"));
                let config = args.overrides.apply(AudioConfig::voice());
                assert_eq!(config.low_pass_cutoff, 3000.0);
                assert_eq!(config.high_pass_cutoff, 0.0);
                assert_eq!(config.anti_aliasing_type, AntiAliasingType::Bessel);
                assert_eq!(config.filter_order, 3);
                assert_eq!(config.resampling_window_size, 24);
                assert!(!config.force_mono);
                // Untouched fields keep the profile's values
                assert_eq!(config.normalize_peak, 0.9);
            }
            _ => panic!("expected encode command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_profile() {
        let result = Cli::try_parse_from([
            "ulawkit", "encode", "-i", "a.wav", "-o", "b.ulaw", "--profile", "studio",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_filter_type() {
        let result = Cli::try_parse_from([
            "ulawkit",
            "encode",
            "-i",
            "a.wav",
            "-o",
            "b.ulaw",
            "--anti-aliasing-type",
            "elliptic",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_profile_conflicts_with_config() {
        let result = Cli::try_parse_from([
            "ulawkit",
            "encode",
            "-i",
            "a.wav",
            "-o",
            "b.ulaw",
            "--profile",
            "voice",
            "--config",
            "p.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_decode_defaults() {
        let cli =
            Cli::try_parse_from(["ulawkit", "decode", "-i", "in.ulaw", "-o", "out.wav"]).unwrap();
        match cli.command {
            Commands::Decode(args) => {
                assert_eq!(args.input, "in.ulaw");
                assert_eq!(args.output, "out.wav");
                assert_eq!(args.sample_rate, 8000);
                assert_eq!(args.window_size, 64);
                assert!(!args.json);
            }
            _ => panic!("expected decode command"),
        }
    }

    #[test]
    fn test_cli_requires_input_and_output() {
        let err = Cli::try_parse_from(["ulawkit", "decode", "-i", "in.ulaw"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("--output"));
    }
}
