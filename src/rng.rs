use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

pub type SimRng = Xoshiro256StarStar;

/// Random draws the lattice and the sampler consume.
pub trait RandomSource {
    /// Uniform on `0..size`.
    fn site_index(&mut self, size: usize) -> usize;
    /// Uniform on `[0, 1)`.
    fn unit_interval(&mut self) -> f64;
    fn coin(&mut self) -> bool;
}

impl<R: Rng + ?Sized> RandomSource for R {
    #[inline(always)]
    fn site_index(&mut self, size: usize) -> usize {
        self.gen_range(0..size)
    }

    #[inline(always)]
    fn unit_interval(&mut self) -> f64 {
        self.gen::<f64>()
    }

    #[inline(always)]
    fn coin(&mut self) -> bool {
        self.gen_bool(0.5)
    }
}

pub fn sim_rng(seed: Option<u64>) -> SimRng {
    match seed {
        Some(seed) => SimRng::seed_from_u64(seed),
        None => SimRng::from_entropy(),
    }
}
