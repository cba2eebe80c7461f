pub mod config;
pub mod controller;
pub mod energy;
pub mod lattice;
pub mod metropolis;
pub mod observables;
pub mod plot;
pub mod render;
pub mod rng;
pub mod runner;
pub mod simulation;

pub use controller::{ControlKey, ControlLimits, Controller, Controls, Parameters};
pub use lattice::{Lattice, LatticeError, Spin};
pub use metropolis::{metropolis_sweep, SweepStats};
pub use simulation::Simulation;
