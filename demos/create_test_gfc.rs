//! Creates a sample GRAZ-style gfc file for testing RuGeoid functionality.
//!
//! Coefficients follow Kaula's rule of thumb (10⁻⁵ / l²) with a deterministic
//! pseudo-random sign pattern, so the file looks like a real monthly solution.

use ru_geoid::gravity_model::{read_icgem_harmonics, ReadOptions};
use ru_geoid::tides::TideSystem;
use std::fmt::Write as _;
use std::path::Path;

const LMAX: usize = 60;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_path = Path::new("ITSG-Grace2018_n60_2009-05.gfc");

    println!("Creating test gfc file: {}", output_path.display());

    let mut contents = String::new();
    writeln!(contents, "begin_of_head ==========================================")?;
    writeln!(contents, "product_type             gravity_field")?;
    writeln!(contents, "modelname                ITSG-Grace2018_n60_2009-05")?;
    writeln!(contents, "earth_gravity_constant   0.3986004415E+15")?;
    writeln!(contents, "radius                   0.6378136300E+07")?;
    writeln!(contents, "max_degree               {}", LMAX)?;
    writeln!(contents, "norm                     fully_normalized")?;
    writeln!(contents, "tide_system              tide_free")?;
    writeln!(contents, "errors                   formal")?;
    writeln!(contents, "key   L    M         C                   S               sigma C             sigma S")?;
    writeln!(contents, "end_of_head ============================================")?;

    for l in 0..=LMAX {
        for m in 0..=l {
            let (c, s) = match (l, m) {
                (0, 0) => (1.0, 0.0),
                (1, _) => (0.0, 0.0),
                (2, 0) => (-4.841_652_176_3e-4, 0.0),
                _ => {
                    let kaula = 1.0e-5 / (l * l) as f64;
                    let phase = (l * 31 + m * 17) as f64;
                    let s = if m == 0 { 0.0 } else { kaula * phase.cos() };
                    (kaula * phase.sin(), s)
                }
            };
            let sigma = 1.0e-12 * (l as f64 + 1.0);
            // Fortran exponent markers, as many providers still write them
            let line = format!("gfc {:>5} {:>5} {:>20.12e} {:>20.12e} {:>12.4e} {:>12.4e}", l, m, c, s, sigma, sigma)
                .replace('e', "D");
            writeln!(contents, "{}", line)?;
        }
    }

    std::fs::write(output_path, contents)?;
    println!("Wrote degree {} model", LMAX);

    // Read it back to show the filename-derived epoch
    let model = read_icgem_harmonics(output_path, &ReadOptions::new().with_tide(TideSystem::MeanTide))?;
    println!("   Format: {}", model.source_format);
    println!("   C20 (mean tide): {:e}", model.clm[[2, 0]]);
    if let Some(epoch) = model.epoch {
        println!("   Mid-month: {:.6}", epoch.time);
        println!("   Julian start/end: {:.1} / {:.1}", epoch.start, epoch.end);
    }

    Ok(())
}
