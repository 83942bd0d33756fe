//! Groundwater kernel and scheduler benchmarks.
//!
//! Times one kernel call per `calc_method` across domain sizes, then a
//! full scheduled run. Uses std::time::Instant, a deterministic LCG for
//! data, and std::hint::black_box to prevent dead-code elimination.
//!
//! Run with `cargo run --release -p prmsgw-core --features bench --bin bench`.

use std::hint::black_box;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use prmsgw_core::forcing::ForcingData;
use prmsgw_core::groundwater::kernel::{self, KernelInputs};
use prmsgw_core::groundwater::params::Parameters;
use prmsgw_core::groundwater::run;
use prmsgw_core::{BudgetType, CalcMethod, Result, RunConfig};

const REPEATS: usize = 7;

/// Simple LCG PRNG for deterministic data generation.
fn lcg(seed: u64) -> impl FnMut() -> f64 {
    let mut state = seed;
    move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as f64 / (1u64 << 31) as f64
    }
}

fn make_params(nhru: usize, seed: u64) -> Result<Parameters> {
    let mut next = lcg(seed);
    let area: Vec<f64> = (0..nhru).map(|_| 10.0 + next() * 5000.0).collect();
    let inflow_coef = (0..nhru).map(|_| 0.001 + next() * 0.2).collect();
    let sink_coef = (0..nhru).map(|_| next() * 0.01).collect();
    let storage_init = (0..nhru).map(|_| next() * 5.0).collect();
    Parameters::from_area(area, inflow_coef, sink_coef, storage_init)
}

fn make_inflows(len: usize, seed: u64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut next = lcg(seed);
    let soil = (0..len).map(|_| next() * 0.3).collect();
    let ssr = (0..len).map(|_| next() * 0.1).collect();
    let seep = (0..len).map(|_| next() * 0.01).collect();
    (soil, ssr, seep)
}

/// Run a closure `REPEATS` times, return the median duration.
fn median_time<F: FnMut()>(mut f: F) -> Duration {
    let mut times: Vec<Duration> = (0..REPEATS)
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed()
        })
        .collect();
    times.sort();
    times[REPEATS / 2]
}

fn bench_kernel(sizes: &[usize]) -> Result<Vec<(String, usize, Duration)>> {
    let mut results = Vec::new();

    for &nhru in sizes {
        let params = make_params(nhru, 42)?;
        let (soil, ssr, seep) = make_inflows(nhru, 43);
        let inputs = KernelInputs {
            area: &params.area,
            soil_to_gw: &soil,
            ssr_to_gw: &ssr,
            dprst_seep: &seep,
            storage_prev: &params.storage_init,
            inflow_coef: &params.inflow_coef,
            sink_coef: &params.sink_coef,
            unit_conv: &params.unit_conv,
        };

        for method in [CalcMethod::Serial, CalcMethod::Parallel] {
            // Warmup
            black_box(kernel::calculate(&inputs, method, 1e-10)?);

            let dur = median_time(|| {
                black_box(kernel::calculate(&inputs, method, 1e-10).ok());
            });
            results.push((format!("kernel/{method}"), nhru, dur));
        }
    }
    Ok(results)
}

fn bench_run(nhru: usize, n_steps: usize) -> Result<Vec<(String, usize, Duration)>> {
    let params = make_params(nhru, 7)?;
    let (soil, ssr, seep) = make_inflows(nhru * n_steps, 8);
    let forcing = ForcingData::new(nhru, soil, ssr, seep)?;
    let mut results = Vec::new();

    for method in [CalcMethod::Serial, CalcMethod::Parallel] {
        let config = RunConfig::default()
            .with_calc_method(method)
            .with_budget_type(BudgetType::None);

        black_box(run::run(&params, &forcing, None, &config)?);

        let dur = median_time(|| {
            black_box(run::run(&params, &forcing, None, &config).ok());
        });
        results.push((format!("run/{method}"), nhru * n_steps, dur));
    }
    Ok(results)
}

fn bench() -> Result<()> {
    println!("Groundwater Reservoir Benchmarks");
    println!("============================================================");
    println!("{:<18} {:>9}   {:>12}", "Case", "N", "Median (ms)");
    println!("--------------------------------------------");

    let mut all_results = Vec::new();
    all_results.extend(bench_kernel(&[1_000, 100_000, 1_000_000])?);
    all_results.extend(bench_run(10_000, 365)?);

    for (case, n, dur) in &all_results {
        let ms = dur.as_secs_f64() * 1000.0;
        println!("{:<18} {:>9}      {:>8.3}", case, n, ms);
    }

    println!("============================================================");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match bench() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("benchmark failed: {e}");
            ExitCode::FAILURE
        }
    }
}
