// framesieve-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use framesieve_core::OracleFailurePolicy;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Framesieve: keyframe extraction for lecture-style videos",
    long_about = "Decodes each listed video into stills with ffmpeg and keeps only \
                  the frames a similarity oracle does not consider static."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug-level logging (decoder output, per-frame scores)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Also write log lines to this file
    #[arg(long, global = true, value_name = "LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extracts non-static keyframes from every video in a list
    Extract(ExtractArgs),
}

#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Text file listing one video path per line
    #[arg(short = 'i', long = "input", required = true, value_name = "VIDEO_LIST")]
    pub video_list: PathBuf,

    /// Root directory of the output tree
    #[arg(short = 'o', long = "output", required = true, value_name = "OUTPUT_DIR")]
    pub output_root: PathBuf,

    /// Similarity threshold; frames scoring at or above it are dropped
    #[arg(short = 't', long = "threshold", required = true, value_name = "FLOAT")]
    pub threshold: f64,

    /// Address of the similarity oracle (host:port or URL)
    #[arg(
        short = 'a',
        long = "addr",
        required = true,
        value_name = "ADDR",
        env = "FRAMESIEVE_ORACLE_ADDR"
    )]
    pub oracle_addr: String,

    /// Timeout in seconds for one oracle request
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub oracle_timeout: u64,

    /// Wall-clock limit in seconds for one decoder run (0 = unlimited)
    #[arg(long, value_name = "SECS", default_value_t = 3600)]
    pub decode_timeout: u64,

    /// Number of videos decoded concurrently
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub decode_jobs: usize,

    /// Number of videos scored concurrently
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub retention_jobs: usize,

    /// What to do with a frame the oracle could not score: retain or drop
    #[arg(long, value_name = "POLICY", default_value = "retain")]
    pub on_oracle_error: OracleFailurePolicy,
}
