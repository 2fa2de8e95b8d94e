//! Defines command-line interface options using `clap` for the RuGeoid application.

use clap::Parser;
use ru_geoid::tides::{ReferenceEllipsoid, TideSystem};
use std::path::PathBuf;

/// A CLI tool for reading gravity models and evaluating Legendre polynomials
#[derive(Parser, Debug)]
#[command(
    version,
    name = "RuGeoid",
    about = "App for working with ICGEM gravity field models"
)]
pub struct Args {
    /// Path to the gfc model file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Truncation degree. Defaults to the max_degree declared in the file.
    #[arg(short, long)]
    pub lmax: Option<usize>,

    /// Tide system of the output coefficients: tide_free, mean_tide or zero_tide
    #[arg(long, default_value = "tide_free", value_parser = parse_tide_arg)]
    pub tide: TideSystem,

    /// Reference ellipsoid for the tide conversion: WGS84 or GRS80
    #[arg(long, default_value = "WGS84", value_parser = parse_ellipsoid_arg)]
    pub ellipsoid: ReferenceEllipsoid,

    /// Token marking coefficient lines
    #[arg(long, default_value = "gfc")]
    pub flag: String,

    /// List the coefficients of one degree
    #[arg(long)]
    pub describe_degree: Option<usize>,

    /// Print the model summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the (truncated, tide-converted) model to a gfc file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Evaluate normalized Legendre polynomials up to this degree
    #[arg(long)]
    pub legendre: Option<usize>,

    /// Colatitudes in degrees for --legendre, comma separated
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub colatitude: Vec<f64>,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Number of threads for Legendre evaluation. Defaults to number of CPU cores.
    #[arg(short = 't', long)]
    pub threads: Option<usize>,
}

fn parse_tide_arg(s: &str) -> Result<TideSystem, String> {
    s.parse::<TideSystem>().map_err(|e| e.to_string())
}

fn parse_ellipsoid_arg(s: &str) -> Result<ReferenceEllipsoid, String> {
    s.parse::<ReferenceEllipsoid>().map_err(|e| e.to_string())
}
