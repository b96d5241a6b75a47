//! mag3to2: CLI tool for converting magfield3 coil inputs to magfield2

use anyhow::{Context, Result};
use clap::Parser;
use coil_convert::{convert_file, ConversionConfig};
use std::fs;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "mag3to2")]
#[command(about = "Convert a magfield3 coil input file into a new magfield2 input file")]
#[command(version)]
struct Args {
    /// magfield3 input file
    input: PathBuf,

    /// magfield2 output file (must not exist)
    output: PathBuf,

    /// Colinearity tolerance per unit-vector component (0 = exact)
    #[arg(long, default_value = "0")]
    tolerance: f64,

    /// Fail instead of converting when coils are not colinear
    #[arg(long)]
    require_colinear: bool,

    /// Write a JSON conversion report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let config = ConversionConfig {
        colinearity_tolerance: args.tolerance,
        require_colinear: args.require_colinear,
    };

    let report = convert_file(&args.input, &args.output, &config)
        .with_context(|| format!("Failed to convert {:?} to {:?}", args.input, args.output))?;

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report file: {:?}", path))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_one_argument_is_a_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        let result = Args::try_parse_from([OsStr::new("mag3to2"), input.as_os_str()]);
        assert!(result.is_err());
        assert!(!input.exists());
    }

    #[test]
    fn test_three_arguments_is_a_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = ["a", "b", "c"].iter().map(|n| dir.path().join(n)).collect();
        let mut argv = vec![PathBuf::from("mag3to2")];
        argv.extend(paths.iter().cloned());

        let result = Args::try_parse_from(&argv);
        assert!(result.is_err());
        assert!(paths.iter().all(|p| !p.exists()));
    }

    #[test]
    fn test_two_arguments_use_defaults() {
        let args = Args::try_parse_from(["mag3to2", "coils.in", "coils.out"]).unwrap();
        assert_eq!(args.input, PathBuf::from("coils.in"));
        assert_eq!(args.output, PathBuf::from("coils.out"));
        assert_eq!(args.tolerance, 0.0);
        assert!(!args.require_colinear);
        assert!(args.report.is_none());
        assert!(!args.verbose);
    }
}
