use image::{Rgb, RgbImage};
use itertools::Itertools;

use crate::controller::Parameters;
use crate::lattice::{Lattice, Spin};

pub type Rgb8 = [u8; 3];

pub const SPIN_UP_COLOR: Rgb8 = [255, 50, 50];
pub const SPIN_DOWN_COLOR: Rgb8 = [50, 50, 255];

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Palette {
    pub up: Rgb8,
    pub down: Rgb8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            up: SPIN_UP_COLOR,
            down: SPIN_DOWN_COLOR,
        }
    }
}

impl Palette {
    #[inline(always)]
    pub fn color(&self, spin: Spin) -> Rgb8 {
        match spin {
            Spin::Up => self.up,
            Spin::Down => self.down,
        }
    }
}

/// Horizontal stretch of equal spins within one row.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SpinRun {
    pub start: usize,
    pub len: usize,
    pub spin: Spin,
}

/// # Panics
/// If `row` is not below `lattice.size()`.
pub fn row_runs(lattice: &Lattice, row: usize) -> Vec<SpinRun> {
    let mut start = 0;
    lattice
        .row(row)
        .dedup_with_count()
        .map(|(len, spin)| {
            let run = SpinRun { start, len, spin };
            start += len;
            run
        })
        .collect()
}

/// Lattice snapshot with every site painted as a `scale`×`scale` block.
pub fn lattice_image(lattice: &Lattice, palette: &Palette, scale: u32) -> RgbImage {
    let scale = scale.max(1);
    let side = lattice.size() as u32 * scale;
    let sites: Vec<Rgb8> = lattice.spins().map(|s| palette.color(s)).collect();
    let size = lattice.size();

    RgbImage::from_fn(side, side, |x, y| {
        let row = (y / scale) as usize;
        let col = (x / scale) as usize;
        Rgb(sites[row * size + col])
    })
}

/// Side in pixels of a lattice drawn at `scale`, saturating at `u32::MAX`.
pub fn window_side(size: usize, scale: u32) -> u32 {
    u32::try_from(size)
        .unwrap_or(u32::MAX)
        .saturating_mul(scale.max(1))
}

pub fn status_line(parameters: Parameters) -> String {
    format!(
        "Ising Model | Temp: {:.2} | Field: {:.2}",
        parameters.temperature, parameters.field
    )
}
