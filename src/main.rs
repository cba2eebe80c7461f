use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use structopt::StructOpt;

use ising_live::config::SimulationArgs;
use ising_live::observables::{energy_per_spin, magnetization};
use ising_live::plot::draw_trace_chart;
use ising_live::render::{lattice_image, Palette};
use ising_live::runner::{run_schedule, Schedule, TraceRegisterer};
use ising_live::Simulation;

#[derive(Debug, StructOpt)]
#[structopt(name = "ising_live", about = "Headless Metropolis run of the 2D Ising model")]
struct Args {
    #[structopt(flatten)]
    simulation: SimulationArgs,
    /// number of sweeps to run
    #[structopt(long, default_value = "1000")]
    sweeps: usize,
    /// ramp the temperature linearly to this value over the run
    #[structopt(long)]
    final_temperature: Option<f64>,
    /// directory for trace.csv, trace.png and lattice.png
    #[structopt(long, parse(from_os_str), default_value = "results")]
    output: PathBuf,
    /// pixels per site in lattice.png
    #[structopt(long, default_value = "4")]
    scale: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::from_args();
    let config = args.simulation.to_config()?;
    log::info!("{:?}", config);

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))
            .context("installing Ctrl-C handler")?;
    }

    let mut simulation = Simulation::from_config(&config);
    let mut trace = TraceRegisterer::new();
    let schedule = Schedule {
        sweeps: args.sweeps,
        final_temperature: args.final_temperature,
    };
    let done = run_schedule(&mut simulation, &schedule, &mut trace, &stop);

    let parameters = simulation.parameters();
    log::info!(
        "finished {} sweeps at T = {:.3}, H = {:.3}: m = {:.4}, E/N² = {:.4}",
        done,
        parameters.temperature,
        parameters.field,
        magnetization(simulation.lattice()),
        energy_per_spin(simulation.lattice(), parameters.field)
    );

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    trace.save_csv(args.output.join("trace.csv"))?;
    draw_trace_chart(&trace.points, args.output.join("trace.png"))?;

    let image_path = args.output.join("lattice.png");
    lattice_image(simulation.lattice(), &Palette::default(), args.scale)
        .save(&image_path)
        .with_context(|| format!("writing {}", image_path.display()))?;

    log::info!("results written to {}", args.output.display());
    Ok(())
}
