//! Implementation of the 'extract' subcommand.
//!
//! Turns the parsed arguments into a core configuration, checks that the
//! decoder is installed, runs the pipeline against ffmpeg and the HTTP
//! oracle, and prints the run summary.

use crate::cli::ExtractArgs;
use crate::error::CliResult;

use framesieve_core::{
    CoreConfig, CoreConfigBuilder, CoreError, PipelineSummary, check_dependency, format_duration,
    percentage,
};

use console::style;
use log::{info, warn};
use std::time::Duration;

/// Builds the core configuration from the command-line arguments.
pub fn build_config(args: &ExtractArgs) -> CoreConfig {
    let decode_timeout = match args.decode_timeout {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };

    CoreConfigBuilder::new()
        .video_list(args.video_list.clone())
        .output_root(args.output_root.clone())
        .threshold(args.threshold)
        .oracle_addr(&args.oracle_addr)
        .oracle_timeout(Duration::from_secs(args.oracle_timeout))
        .decode_timeout(decode_timeout)
        .decode_jobs(args.decode_jobs)
        .retention_jobs(args.retention_jobs)
        .on_oracle_error(args.on_oracle_error)
        .build()
}

/// Runs the extract command and returns the pipeline summary.
///
/// Configuration problems abort before any video is touched. A missing
/// ffmpeg only produces a warning: every video then fails its decode stage
/// and is reported as such.
pub fn run_extract(args: &ExtractArgs) -> CliResult<PipelineSummary> {
    let config = build_config(args);
    config.validate()?;

    info!("Video list: {}", config.video_list.display());
    info!("Output root: {}", config.output_root.display());
    info!(
        "Threshold: {} | Oracle: {} | On oracle error: {}",
        config.threshold, config.oracle_addr, config.on_oracle_error
    );

    match check_dependency("ffmpeg") {
        Ok(()) => info!("External dependency check passed."),
        Err(CoreError::DependencyNotFound(name)) => {
            warn!("'{}' was not found on the PATH; every video will fail to decode.", name)
        }
        Err(e) => warn!("Could not verify ffmpeg: {}", e),
    }

    let summary = framesieve_core::run_default(&config)?;
    print_summary(&summary);
    Ok(summary)
}

/// Prints the per-video outcome table and totals to stdout.
pub fn print_summary(summary: &PipelineSummary) {
    println!();
    println!("{}", style("Extraction Summary").bold());
    println!("{}", style("=".repeat(40)).cyan());

    if summary.videos_listed == 0 {
        println!("{}", style("No videos listed; nothing to do.").yellow());
    }

    for result in &summary.completed {
        let report = &result.report;
        println!(
            "{} {}",
            style(format!("[{}]", result.task.index)).bold(),
            result.task.source_path.display()
        );
        println!(
            "  Kept:     {} of {} ({:.1}%)",
            style(report.retained).green().bold(),
            report.frames_seen,
            percentage(report.retained, report.frames_seen)
        );
        if report.oracle_failures + report.unreadable + report.write_failures > 0 {
            println!(
                "  Problems: {} oracle, {} unreadable, {} write",
                style(report.oracle_failures).yellow(),
                style(report.unreadable).yellow(),
                style(report.write_failures).yellow()
            );
        }
        println!("  Output:   {}", result.task.output_dir.display());
    }

    for failure in &summary.failures {
        println!(
            "{} {} {} ({} failed)",
            style(format!("[{}]", failure.task.index)).bold(),
            style("[FAIL]").red().bold(),
            failure.task.source_path.display(),
            failure.stage
        );
        // Decoder error tails span several lines; keep the first one here
        if let Some(first_line) = failure.error.lines().next() {
            println!("  {}", style(first_line).dim());
        }
    }

    println!("{}", style("-".repeat(40)).cyan());
    println!(
        "Videos:  {} listed, {} decoded, {} completed, {} failed",
        summary.videos_listed,
        summary.videos_decoded,
        summary.completed.len(),
        summary.failures.len()
    );
    println!(
        "Frames:  {} kept of {}",
        style(summary.frames_retained()).green().bold(),
        summary.frames_seen()
    );
    println!("Elapsed: {}", format_duration(summary.elapsed));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use framesieve_core::OracleFailurePolicy;
    use std::path::PathBuf;

    fn extract_args(extra: &[&str]) -> ExtractArgs {
        let mut argv = vec![
            "framesieve",
            "extract",
            "-i",
            "list.txt",
            "-o",
            "out",
            "-t",
            "0.75",
            "-a",
            "oracle:9000",
        ];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Extract(args) => args,
        }
    }

    #[test]
    fn test_build_config_maps_arguments() {
        let config = build_config(&extract_args(&[
            "--decode-jobs",
            "3",
            "--on-oracle-error",
            "drop",
        ]));

        assert_eq!(config.video_list, PathBuf::from("list.txt"));
        assert_eq!(config.output_root, PathBuf::from("out"));
        assert_eq!(config.threshold, 0.75);
        assert_eq!(config.oracle_addr, "oracle:9000");
        assert_eq!(config.oracle_timeout, Duration::from_secs(30));
        assert_eq!(config.decode_timeout, Some(Duration::from_secs(3600)));
        assert_eq!(config.decode_jobs, 3);
        assert_eq!(config.retention_jobs, 1);
        assert_eq!(config.on_oracle_error, OracleFailurePolicy::Drop);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_decode_timeout_means_unlimited() {
        let config = build_config(&extract_args(&["--decode-timeout", "0"]));
        assert_eq!(config.decode_timeout, None);
    }

    #[test]
    fn test_zero_jobs_fail_validation() {
        let args = extract_args(&["--retention-jobs", "0"]);
        let result = run_extract(&args);
        assert!(matches!(result, Err(CoreError::Config(_))));
    }
}
