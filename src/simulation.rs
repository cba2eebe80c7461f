use crate::config::SimulationConfig;
use crate::controller::{Controller, Controls, Parameters};
use crate::lattice::Lattice;
use crate::metropolis::{metropolis_sweep, SweepStats};
use crate::rng::{sim_rng, RandomSource, SimRng};

/// Lattice, parameters and random source threaded through every update.
pub struct Simulation<R = SimRng> {
    lattice: Lattice,
    controller: Controller,
    rng: R,
}

impl Simulation<SimRng> {
    pub fn from_config(config: &SimulationConfig) -> Self {
        let mut rng = sim_rng(config.seed);
        let lattice = Lattice::random(config.size, &mut rng);
        let controller = Controller::new(config.parameters, config.limits);
        Self::new(lattice, controller, rng)
    }
}

impl<R: RandomSource> Simulation<R> {
    pub fn new(lattice: Lattice, controller: Controller, rng: R) -> Self {
        Self {
            lattice,
            controller,
            rng,
        }
    }

    /// One frame: apply the held controls, then run a full sweep.
    pub fn advance(&mut self, controls: &Controls) -> SweepStats {
        self.controller.apply(controls);
        self.sweep()
    }

    pub fn sweep(&mut self) -> SweepStats {
        let Parameters { temperature, field } = self.controller.parameters();
        metropolis_sweep(&mut self.lattice, temperature, field, &mut self.rng)
    }

    #[inline(always)]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    #[inline(always)]
    pub fn parameters(&self) -> Parameters {
        self.controller.parameters()
    }

    #[inline(always)]
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    #[inline(always)]
    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }
}
