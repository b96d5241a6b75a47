//! peakfit: CLI tool for measuring peak widths in a histogram JSON file

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use peak_tools::{
    fit_lorentzian, literal_fwhm, FitRange, FitterSettings, Histogram1D, LorentzianBounds,
    RangeUnits, SimplexFitter,
};
use std::fs;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "peakfit")]
#[command(about = "Measure the width of a peak in a binned histogram")]
#[command(version)]
struct Args {
    /// Histogram JSON file: {"low": .., "high": .., "contents": [..]}
    histogram: PathBuf,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    method: Method,
}

#[derive(ClapArgs, Debug)]
struct RangeArgs {
    /// Lower limit of the interval
    #[arg(long)]
    low: f64,

    /// Upper limit of the interval
    #[arg(long)]
    high: f64,

    /// Interpret the limits as bin numbers instead of x-axis values
    #[arg(long)]
    bins: bool,
}

impl RangeArgs {
    fn range(&self) -> FitRange {
        let units = if self.bins { RangeUnits::Bins } else { RangeUnits::Axis };
        FitRange {
            low: self.low,
            high: self.high,
            units,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Method {
    /// Literal full width at half maximum
    Fwhm {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Fit a single Lorentzian
    Lorentzian {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(long, default_value = "0")]
        min_area: f64,

        #[arg(long, default_value = "1e6")]
        max_area: f64,

        /// Starting area (default: midpoint of the limits)
        #[arg(long)]
        start_area: Option<f64>,

        #[arg(long, default_value = "0")]
        min_fwhm: f64,

        #[arg(long, default_value = "1e6")]
        max_fwhm: f64,

        /// Starting FWHM (default: midpoint of the limits)
        #[arg(long)]
        start_fwhm: Option<f64>,

        /// Iteration limit for the fitter
        #[arg(long, default_value = "5000")]
        max_iterations: u64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let json = fs::read_to_string(&args.histogram)
        .with_context(|| format!("Failed to read histogram file: {:?}", args.histogram))?;
    let hist: Histogram1D = serde_json::from_str(&json).context("Failed to parse histogram")?;

    let output = match args.method {
        Method::Fwhm { range } => {
            let fwhm = literal_fwhm(&hist, &range.range()).context("FWHM measurement failed")?;
            serde_json::json!({ "fwhm": fwhm })
        }
        Method::Lorentzian {
            range,
            min_area,
            max_area,
            start_area,
            min_fwhm,
            max_fwhm,
            start_fwhm,
            max_iterations,
        } => {
            let bounds = LorentzianBounds {
                min_area,
                max_area,
                start_area,
                min_fwhm,
                max_fwhm,
                start_fwhm,
            };
            let fitter = SimplexFitter::new(FitterSettings {
                max_iterations,
                ..FitterSettings::default()
            });
            let fit = fit_lorentzian(&hist, &range.range(), &bounds, &fitter)
                .context("Lorentzian fit failed")?;
            serde_json::to_value(fit.to_map())?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
