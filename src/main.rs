//! Entry point for the RuGeoid application.
//! Handles CLI parsing and logging setup, then reads a model and/or evaluates Legendre polynomials.

use clap::Parser;
use env_logger::Env;
use ndarray::Array1;
use ru_geoid::gravity_model::{read_icgem_harmonics, GfcWriter, ReadOptions};
use ru_geoid::legendre::legendre_polynomials_in;
use ru_geoid::metadata::{describe_degree, model_summary, print_metadata};
use ru_geoid::parallel::{get_parallel_info, ParallelConfig};

mod cli;

use cli::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    println!(
        r#"
------------------------------------------------------------------
             ____        ____            _     _
            |  _ \ _   _/ ___| ___  ___ (_) __| |
            | |_) | | | | |  _ / _ \/ _ \| |/ _` |
            |  _ <| |_| | |_| |  __/ (_) | | (_| |
            |_| \_\\__,_|\____|\___|\___/|_|\__,_|
                  Rust-based gravity model tool
------------------------------------------------------------------
                        "#
    );

    let parallel = ParallelConfig::new(args.threads);
    if args.verbose {
        get_parallel_info().log();
    }

    if args.file.is_none() && args.legendre.is_none() {
        eprintln!("Nothing to do: pass --file <model.gfc> and/or --legendre <LMAX> --colatitude <deg,...>");
        return Ok(());
    }

    if let Some(path) = &args.file {
        let options = ReadOptions {
            lmax: args.lmax,
            tide: args.tide,
            flag: args.flag.clone(),
            ellipsoid: args.ellipsoid,
        };
        let model = read_icgem_harmonics(path, &options)?;
        println!("Successfully read gravity model: {}", path.display());

        if args.json {
            println!("{}", serde_json::to_string_pretty(&model_summary(&model))?);
        } else {
            print_metadata(&model);
        }

        if let Some(degree) = args.describe_degree {
            describe_degree(&model, degree)?;
        }

        if let Some(output_path) = &args.output {
            GfcWriter::new(&model).with_flag(&args.flag).write(output_path)?;
            println!("Saved model to {}", output_path.display());
        }
    }

    if let Some(lmax) = args.legendre {
        if args.colatitude.is_empty() {
            return Err("--legendre requires at least one --colatitude value".into());
        }
        let x: Array1<f64> = args
            .colatitude
            .iter()
            .map(|theta| theta.to_radians().cos())
            .collect();
        let (pl, dpl) = legendre_polynomials_in(&parallel, lmax, x.view())?;

        for (j, theta) in args.colatitude.iter().enumerate() {
            println!("\n Colatitude {}°", theta);
            println!("=====================");
            for l in 0..=lmax {
                println!("   l={:<5} P={:>22.15e} dP={:>22.15e}", l, pl[[l, j]], dpl[[l, j]]);
            }
        }
    }

    Ok(())
}
