use std::fmt::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;

use crate::controller::Parameters;
use crate::lattice::Lattice;
use crate::metropolis::SweepStats;
use crate::observables::{energy_per_spin, magnetization};
use crate::rng::RandomSource;
use crate::simulation::Simulation;

pub trait SweepRegisterer {
    fn register(&mut self, sweep: usize, lattice: &Lattice, parameters: Parameters, stats: SweepStats);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracePoint {
    pub sweep: usize,
    pub temperature: f64,
    pub field: f64,
    pub magnetization: f64,
    pub energy: f64,
    pub acceptance: f64,
}

#[derive(Debug, Default)]
pub struct TraceRegisterer {
    pub points: Vec<TracePoint>,
}

impl TraceRegisterer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_csv(&self, filename: impl AsRef<Path>) -> anyhow::Result<()> {
        let mut buffer = String::new();
        writeln!(buffer, "sweep,temperature,field,magnetization,energy,acceptance")?;
        for p in &self.points {
            writeln!(
                buffer,
                "{},{:.6},{:.6},{:.6},{:.6},{:.6}",
                p.sweep, p.temperature, p.field, p.magnetization, p.energy, p.acceptance
            )?;
        }

        let filename = filename.as_ref();
        std::fs::write(filename, buffer)
            .with_context(|| format!("writing trace to {}", filename.display()))
    }
}

impl SweepRegisterer for TraceRegisterer {
    fn register(&mut self, sweep: usize, lattice: &Lattice, parameters: Parameters, stats: SweepStats) {
        self.points.push(TracePoint {
            sweep,
            temperature: parameters.temperature,
            field: parameters.field,
            magnetization: magnetization(lattice),
            energy: energy_per_spin(lattice, parameters.field),
            acceptance: stats.acceptance_rate(),
        });
    }
}

/// How many sweeps to run, optionally ramping the temperature linearly
/// towards `final_temperature` over the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schedule {
    pub sweeps: usize,
    pub final_temperature: Option<f64>,
}

/// Runs the schedule sweep by sweep. `stop` is only checked between sweeps,
/// a started sweep always completes. Returns the number of sweeps run.
pub fn run_schedule<R: RandomSource>(
    simulation: &mut Simulation<R>,
    schedule: &Schedule,
    registerer: &mut impl SweepRegisterer,
    stop: &AtomicBool,
) -> usize {
    let initial = simulation.parameters().temperature;
    let ramp = schedule
        .final_temperature
        .filter(|_| schedule.sweeps > 0)
        .map(|target| (target - initial) / schedule.sweeps as f64);

    let report_every = (schedule.sweeps / 10).max(1);

    measure_time::info_time!("{} sweeps", schedule.sweeps);
    for sweep in 0..schedule.sweeps {
        if stop.load(Ordering::Relaxed) {
            log::warn!("stop requested after {} sweeps", sweep);
            return sweep;
        }

        if let Some(step) = ramp {
            let controller = simulation.controller_mut();
            if step >= 0.0 {
                controller.increase_temperature(step);
            } else {
                controller.decrease_temperature(-step);
            }
        }

        let stats = {
            measure_time::debug_time!("sweep {}", sweep);
            simulation.sweep()
        };
        registerer.register(sweep, simulation.lattice(), simulation.parameters(), stats);

        if (sweep + 1) % report_every == 0 {
            let parameters = simulation.parameters();
            log::info!(
                "sweep {} / {}: T = {:.3}, H = {:.3}, m = {:.4}, acceptance = {:.3}",
                sweep + 1,
                schedule.sweeps,
                parameters.temperature,
                parameters.field,
                magnetization(simulation.lattice()),
                stats.acceptance_rate()
            );
        }
    }

    schedule.sweeps
}
