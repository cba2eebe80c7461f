use crate::energy::delta_energy;
use crate::lattice::Lattice;
use crate::rng::RandomSource;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Energy rule evaluations, one per trial.
    pub trials: usize,
    pub accepted: usize,
}

impl SweepStats {
    pub fn acceptance_rate(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.accepted as f64 / self.trials as f64
        }
    }
}

/// Metropolis acceptance probability `min(1, exp(-dE / T))`.
#[inline(always)]
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta <= 0.0 {
        1.0
    } else {
        (-delta / temperature).exp()
    }
}

/// One sweep: `N²` single-spin-flip trials on sites drawn with replacement.
///
/// Downhill flips are taken without consuming a uniform draw; uphill flips
/// are taken when `u < exp(-dE / T)`.
///
/// # Panics
/// If `temperature` is not strictly positive.
pub fn metropolis_sweep(
    lattice: &mut Lattice,
    temperature: f64,
    field: f64,
    rng: &mut impl RandomSource,
) -> SweepStats {
    assert!(
        temperature > 0.0,
        "temperature must be positive, got {temperature}"
    );

    let size = lattice.size();
    let mut stats = SweepStats::default();

    for _ in 0..lattice.site_count() {
        let row = rng.site_index(size);
        let col = rng.site_index(size);

        let spin = lattice.spin_at(row, col).value();
        let neighbors = lattice.neighbor_sum_at(row, col);
        let delta = delta_energy(spin, neighbors, field);
        stats.trials += 1;

        let accept = delta <= 0.0 || rng.unit_interval() < (-delta / temperature).exp();
        if accept {
            lattice.flip_at(row, col);
            stats.accepted += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Spin;
    use crate::rng::sim_rng;
    use std::collections::VecDeque;

    /// Replays fixed draws and fails loudly when the sampler asks for more.
    struct Scripted {
        sites: VecDeque<usize>,
        units: VecDeque<f64>,
    }

    impl Scripted {
        fn new(sites: &[usize], units: &[f64]) -> Self {
            Self {
                sites: sites.iter().copied().collect(),
                units: units.iter().copied().collect(),
            }
        }
    }

    impl RandomSource for Scripted {
        fn site_index(&mut self, size: usize) -> usize {
            let site = self.sites.pop_front().expect("unexpected site draw");
            assert!(site < size);
            site
        }

        fn unit_interval(&mut self) -> f64 {
            self.units.pop_front().expect("unexpected uniform draw")
        }

        fn coin(&mut self) -> bool {
            unreachable!()
        }
    }

    #[test]
    fn test_acceptance_probability() {
        assert_eq!(acceptance_probability(0.0, 0.01), 1.0);
        assert_eq!(acceptance_probability(-8.0, 0.01), 1.0);
        assert_eq!(acceptance_probability(-4.0, 1e6), 1.0);

        let temps = [0.01, 0.5, 1.0, 2.269, 5.0, 100.0];
        for delta in [0.5, 4.0, 8.0] {
            let probs: Vec<_> = temps
                .iter()
                .map(|&t| acceptance_probability(delta, t))
                .collect();
            for pair in probs.windows(2) {
                assert!(pair[0] < pair[1], "{probs:?}");
            }
            assert!(probs.iter().all(|&p| p < 1.0));
        }
    }

    #[test]
    fn test_uphill_flip_uses_uniform_draw() {
        // 1x1 torus: the site is its own four neighbors, dE = 8 for spin up.
        let mut lat = Lattice::uniform(1, Spin::Up);
        let mut rng = Scripted::new(&[0, 0], &[0.5]);
        let stats = metropolis_sweep(&mut lat, 1.0, 0.0, &mut rng);
        assert_eq!(stats, SweepStats { trials: 1, accepted: 0 });
        assert_eq!(lat.get(0, 0).unwrap(), Spin::Up);
        assert!(rng.units.is_empty());

        // exp(-8) ≈ 3.35e-4
        let mut rng = Scripted::new(&[0, 0], &[3.0e-4]);
        let stats = metropolis_sweep(&mut lat, 1.0, 0.0, &mut rng);
        assert_eq!(stats.accepted, 1);
        assert_eq!(lat.get(0, 0).unwrap(), Spin::Down);
    }

    #[test]
    fn test_downhill_flip_skips_uniform_draw() {
        // Field -5 pulls the lone up spin down: dE = 2 * (4 - 5) = -2.
        let mut lat = Lattice::uniform(1, Spin::Up);
        let mut rng = Scripted::new(&[0, 0], &[]);
        let stats = metropolis_sweep(&mut lat, 0.01, -5.0, &mut rng);
        assert_eq!(stats.accepted, 1);
        assert_eq!(lat.get(0, 0).unwrap(), Spin::Down);
    }

    #[test]
    fn test_sweep_runs_n_squared_trials() {
        let mut rng = sim_rng(Some(1));
        for size in [1, 2, 7, 32] {
            let mut lat = Lattice::random(size, &mut rng);
            let stats = metropolis_sweep(&mut lat, 2.269, 0.3, &mut rng);
            assert_eq!(stats.trials, size * size);
            assert!(stats.accepted <= stats.trials);
        }
    }

    #[test]
    fn test_cold_ordered_lattice_stays_ordered() {
        let mut rng = sim_rng(Some(2024));
        let mut lat = Lattice::uniform(4, Spin::Up);
        for _ in 0..100 {
            let stats = metropolis_sweep(&mut lat, 0.01, 0.0, &mut rng);
            assert_eq!(stats.accepted, 0);
        }
        assert_eq!(lat, Lattice::uniform(4, Spin::Up));
    }

    #[test]
    fn test_hot_lattice_loses_order() {
        let mut rng = sim_rng(Some(77));
        let mut lat = Lattice::uniform(4, Spin::Up);

        for _ in 0..100 {
            metropolis_sweep(&mut lat, 1000.0, 0.0, &mut rng);
        }

        let sweeps = 4000;
        let mut up = 0usize;
        for _ in 0..sweeps {
            metropolis_sweep(&mut lat, 1000.0, 0.0, &mut rng);
            up += lat.count_up();
        }
        let fraction = up as f64 / (sweeps * lat.site_count()) as f64;
        assert!((fraction - 0.5).abs() < 0.05, "fraction up = {fraction}");
    }

    #[test]
    fn test_strong_field_aligns_spins() {
        let mut rng = sim_rng(Some(8));
        let mut lat = Lattice::uniform(16, Spin::Down);
        for _ in 0..300 {
            metropolis_sweep(&mut lat, 2.0, 2.0, &mut rng);
        }
        assert!(lat.count_up() as f64 / lat.site_count() as f64 > 0.9);
    }

    #[test]
    #[should_panic(expected = "temperature must be positive")]
    fn test_zero_temperature_is_a_contract_failure() {
        let mut rng = sim_rng(Some(0));
        let mut lat = Lattice::uniform(3, Spin::Up);
        metropolis_sweep(&mut lat, 0.0, 0.0, &mut rng);
    }
}
