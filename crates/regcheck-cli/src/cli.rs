//! CLI argument definitions for regcheck.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use regcheck_report::ReportFormat;

#[derive(Parser)]
#[command(
    name = "regcheck",
    version,
    about = "Regulatory submission checker - validate XPT, SDF and ASNT files",
    long_about = "Validate a regulatory submission folder.\n\n\
                  Checks SAS Transport datasets (.xpt), SD molecule files (.sdf) and\n\
                  assessment files (.asnt), plus file integrity for each of them,\n\
                  and writes text, CSV and JSON reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate every submission file under a directory.
    Validate(ValidateArgs),

    /// List supported file formats and the checks run on each.
    Formats,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Submission folder to scan recursively.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Directory for report files (default: <DIR>).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Report formats to write.
    #[arg(long = "format", value_enum, default_value = "all")]
    pub format: ReportFormatArg,

    /// Validate and print the summary without writing report files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Skip encoding detection for assessment files.
    ///
    /// The encoding is then reported as `unknown`, which draws an
    /// `Encoding` warning on every assessment file.
    #[arg(long = "no-encoding-detection")]
    pub no_encoding_detection: bool,
}

/// CLI report format choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Text,
    Csv,
    Json,
    All,
}

impl ReportFormatArg {
    pub fn formats(self) -> Vec<ReportFormat> {
        match self {
            ReportFormatArg::Text => vec![ReportFormat::Text],
            ReportFormatArg::Csv => vec![ReportFormat::Csv],
            ReportFormatArg::Json => vec![ReportFormat::Json],
            ReportFormatArg::All => ReportFormat::ALL.to_vec(),
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_validate_defaults() {
        let cli = Cli::try_parse_from(["regcheck", "validate", "submission"]).unwrap();
        let Command::Validate(args) = cli.command else {
            panic!("expected validate command");
        };
        assert_eq!(args.dir, PathBuf::from("submission"));
        assert_eq!(args.format, ReportFormatArg::All);
        assert!(args.output_dir.is_none());
        assert!(!args.dry_run);
        assert!(!args.no_encoding_detection);
    }

    #[test]
    fn test_format_selection() {
        assert_eq!(ReportFormatArg::Csv.formats(), vec![ReportFormat::Csv]);
        assert_eq!(ReportFormatArg::All.formats().len(), 3);
    }
}
