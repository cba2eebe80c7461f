use std::time::Duration;

use anyhow::ensure;
use structopt::StructOpt;

use crate::controller::{ControlLimits, Parameters};

pub const DEFAULT_SIZE: usize = 150;
/// Onsager's critical temperature of the square lattice, `2 / ln(1 + √2)`.
pub const CRITICAL_TEMPERATURE: f64 = 2.269;
pub const TEMPERATURE_STEP: f64 = 0.05;
pub const TEMPERATURE_FLOOR: f64 = 0.01;
pub const TEMPERATURE_CEILING: f64 = 10.0;
pub const FIELD_STEP: f64 = 0.05;
pub const FIELD_BOUND: f64 = 2.0;
pub const DEFAULT_FPS: u64 = 60;
pub const MAX_FPS: u64 = 1000;

/// Time between frames for a target rate, clamped to `1..=MAX_FPS`.
pub fn frame_period(fps: u64) -> Duration {
    Duration::from_micros(1_000_000 / fps.clamp(1, MAX_FPS))
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub size: usize,
    pub parameters: Parameters,
    pub limits: ControlLimits,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            parameters: Parameters {
                temperature: CRITICAL_TEMPERATURE,
                field: 0.0,
            },
            limits: ControlLimits::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, StructOpt)]
pub struct SimulationArgs {
    /// lattice side length, the lattice holds size² spins
    #[structopt(long, default_value = "150")]
    pub size: usize,
    /// initial temperature
    #[structopt(long, default_value = "2.269", allow_hyphen_values = true)]
    pub temperature: f64,
    /// initial external field
    #[structopt(long, default_value = "0.0", allow_hyphen_values = true)]
    pub field: f64,
    /// seed for the random source, taken from the OS when omitted
    #[structopt(long)]
    pub seed: Option<u64>,
    #[structopt(long, default_value = "0.05")]
    pub temperature_step: f64,
    #[structopt(long, default_value = "0.05")]
    pub field_step: f64,
    /// temperature clamp, zero or less disables it
    #[structopt(long, default_value = "10.0", allow_hyphen_values = true)]
    pub max_temperature: f64,
    /// symmetric field clamp, zero or less disables it
    #[structopt(long, default_value = "2.0", allow_hyphen_values = true)]
    pub max_field: f64,
}

impl SimulationArgs {
    pub fn to_config(&self) -> anyhow::Result<SimulationConfig> {
        ensure!(self.size > 0, "lattice size must be at least 1");
        ensure!(
            self.temperature.is_finite() && self.temperature > 0.0,
            "temperature must be positive, got {}",
            self.temperature
        );
        ensure!(self.field.is_finite(), "field must be finite");
        ensure!(
            [self.temperature_step, self.field_step]
                .iter()
                .all(|step| step.is_finite() && *step > 0.0),
            "control steps must be positive and finite"
        );
        ensure!(
            self.max_temperature.is_finite() && self.max_field.is_finite(),
            "clamps must be finite"
        );

        let temperature_ceiling = Some(self.max_temperature).filter(|&t| t > 0.0);
        if let Some(ceiling) = temperature_ceiling {
            ensure!(
                ceiling > TEMPERATURE_FLOOR,
                "max temperature must exceed the floor {TEMPERATURE_FLOOR}"
            );
        }

        Ok(SimulationConfig {
            size: self.size,
            parameters: Parameters {
                temperature: self.temperature,
                field: self.field,
            },
            limits: ControlLimits {
                temperature_step: self.temperature_step,
                temperature_floor: TEMPERATURE_FLOOR,
                temperature_ceiling,
                field_step: self.field_step,
                field_bound: Some(self.max_field).filter(|&h| h > 0.0),
            },
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> SimulationArgs {
        SimulationArgs::from_iter(std::iter::once("ising").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults_match_constants() {
        let config = parse(&[]).to_config().unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_clamps_can_be_disabled() {
        let config = parse(&["--max-temperature", "0", "--max-field", "-1", "--seed", "4"])
            .to_config()
            .unwrap();
        assert_eq!(config.limits.temperature_ceiling, None);
        assert_eq!(config.limits.field_bound, None);
        assert_eq!(config.seed, Some(4));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(parse(&["--size", "0"]).to_config().is_err());
        assert!(parse(&["--temperature", "0"]).to_config().is_err());
        assert!(parse(&["--temperature", "-1.5"]).to_config().is_err());
        assert!(parse(&["--field-step", "0"]).to_config().is_err());
        assert!(parse(&["--field-step", "inf", "--max-field", "0"]).to_config().is_err());
        assert!(parse(&["--temperature-step", "inf"]).to_config().is_err());
        assert!(parse(&["--temperature-step", "NaN"]).to_config().is_err());
        assert!(parse(&["--max-temperature", "0.005"]).to_config().is_err());
    }

    #[test]
    fn test_frame_period_is_never_zero() {
        assert_eq!(frame_period(DEFAULT_FPS), Duration::from_micros(16_666));
        assert_eq!(frame_period(0), Duration::from_secs(1));
        assert_eq!(frame_period(u64::MAX), Duration::from_millis(1));
        assert!(frame_period(2_000_000) > Duration::ZERO);
    }

    #[test]
    fn test_negative_field() {
        let config = parse(&["--field", "-0.75"]).to_config().unwrap();
        assert_eq!(config.parameters.field, -0.75);
    }
}
