use std::path::Path;

use anyhow::Context;
use plotters::prelude::*;

use crate::runner::TracePoint;

/// Magnetization and energy per spin against sweep index.
pub fn draw_trace_chart(points: &[TracePoint], filename: impl AsRef<Path>) -> anyhow::Result<()> {
    let filename = filename.as_ref();
    let root_drawing_area = BitMapBackend::new(filename, (1024, 768)).into_drawing_area();
    root_drawing_area.fill(&WHITE)?;

    let sweeps = points.len().max(1);
    let (min_energy, max_energy) = points
        .iter()
        .map(|p| p.energy)
        .fold((f64::MAX, f64::MIN), |(lo, hi), e| (lo.min(e), hi.max(e)));
    let (min_energy, max_energy) = if min_energy <= max_energy {
        (min_energy - 0.1, max_energy + 0.1)
    } else {
        (-2.1, 2.1)
    };

    let (upper, lower) = root_drawing_area.split_vertically(384);

    let mut magn_ctx = ChartBuilder::on(&upper)
        .caption("Magnetization", ("sans-serif", 30))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(0..sweeps, -1.05..1.05)?;

    magn_ctx
        .configure_mesh()
        .y_desc("m")
        .x_desc("Sweep")
        .axis_desc_style(("sans-serif", 20))
        .draw()?;

    magn_ctx.draw_series(LineSeries::new(
        points.iter().map(|p| (p.sweep, p.magnetization)),
        &RED,
    ))?;

    let mut energy_ctx = ChartBuilder::on(&lower)
        .caption("Energy per spin", ("sans-serif", 30))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(0..sweeps, min_energy..max_energy)?;

    energy_ctx
        .configure_mesh()
        .y_desc("E / N²")
        .x_desc("Sweep")
        .axis_desc_style(("sans-serif", 20))
        .draw()?;

    energy_ctx.draw_series(LineSeries::new(
        points.iter().map(|p| (p.sweep, p.energy)),
        &BLUE,
    ))?;

    root_drawing_area
        .present()
        .with_context(|| format!("writing chart to {}", filename.display()))
}
