//! Simple benchmark showing the benefit of evaluating Legendre polynomials in parallel.
//!
//! Runs the same evaluation inside a one-thread pool and inside a pool that
//! uses every available core.

use ndarray::Array1;
use ru_geoid::legendre::legendre_polynomials_in;
use ru_geoid::parallel::ParallelConfig;
use std::time::Instant;

fn time_evaluation(lmax: usize, x: &Array1<f64>, config: ParallelConfig) -> f64 {
    let start = Instant::now();
    let (pl, _dpl) = legendre_polynomials_in(&config, lmax, x.view()).expect("thread pool");
    let duration = start.elapsed();
    println!("   P_lmax at first point: {:.6e}", pl[[lmax, 0]]);

    duration.as_secs_f64()
}

fn main() {
    println!("RuGeoid Legendre Benchmark");
    println!("==========================\n");

    let available_threads = num_cpus::get();
    println!("System has {} logical CPU cores available\n", available_threads);

    let cases = [(360, 10_000), (720, 20_000), (2190, 20_000)];

    for (lmax, points) in cases {
        // colatitudes from just off the north pole to just off the south pole
        let x: Array1<f64> = Array1::linspace(0.1_f64, 179.9, points).mapv(|t| t.to_radians().cos());

        println!("Degree {} at {} points:", lmax, points);
        println!("-------------------------------------------");

        println!("Sequential (1 thread):");
        let seq_time = time_evaluation(lmax, &x, ParallelConfig::with_threads(1));
        println!("   Duration: {:.3} seconds\n", seq_time);

        println!("Parallel ({} threads):", available_threads);
        let par_time = time_evaluation(lmax, &x, ParallelConfig::all_cores());
        println!("   Duration: {:.3} seconds", par_time);

        println!("   Speedup: {:.2}x\n", seq_time / par_time);
    }
}
