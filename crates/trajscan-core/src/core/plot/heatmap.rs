use crate::core::analysis::matrix::DistanceMatrix;
use plotters::prelude::*;
use plotters_svg::SVGBackend;
use std::path::Path;
use thiserror::Error;

const FIGURE_WIDTH: u32 = 800;
const FIGURE_HEIGHT: u32 = 600;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Failed to render figure: {0}")]
    Render(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Anchor points of the viridis color map, evenly spaced on [0, 1].
const VIRIDIS_ANCHORS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

fn viridis(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (VIRIDIS_ANCHORS.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(VIRIDIS_ANCHORS.len() - 1);
    let frac = scaled - lower as f64;

    let (r0, g0, b0) = VIRIDIS_ANCHORS[lower];
    let (r1, g1, b1) = VIRIDIS_ANCHORS[upper];
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// Renders a distance matrix as a viridis heatmap SVG.
///
/// Cell colors are scaled to the matrix min/max (the zero diagonal anchors
/// the low end, as in the usual heatmap convention). An empty matrix renders
/// a placeholder figure instead of failing.
///
/// # Arguments
///
/// * `path` - Destination file (SVG).
/// * `matrix` - The symmetric distance matrix to draw.
/// * `title` - Figure caption.
pub fn render_distance_heatmap(
    path: &Path,
    matrix: &DistanceMatrix,
    title: &str,
) -> Result<(), PlotError> {
    let root = SVGBackend::new(path, (FIGURE_WIDTH, FIGURE_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::Render(e.to_string()))?;

    if matrix.is_empty() {
        root.draw(&Text::new(
            "No atoms to plot",
            (
                (FIGURE_WIDTH / 2) as i32,
                (FIGURE_HEIGHT / 2) as i32,
            ),
            ("sans-serif", 20).into_font().color(&BLACK),
        ))
        .map_err(|e| PlotError::Render(e.to_string()))?;
        root.present().map_err(|e| PlotError::Render(e.to_string()))?;
        return Ok(());
    }

    let n = matrix.len();
    let (min, max) = matrix.min_max().unwrap_or((0.0, 0.0));
    let range = max - min;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..n, 0..n)
        .map_err(|e| PlotError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Atom Index")
        .y_desc("Atom Index")
        .draw()
        .map_err(|e| PlotError::Render(e.to_string()))?;

    for i in 0..n {
        for j in 0..n {
            let value = matrix.get(i, j).unwrap_or(0.0);
            let t = if range > 0.0 { (value - min) / range } else { 0.0 };
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(j, i), (j + 1, i + 1)],
                    viridis(t).filled(),
                )))
                .map_err(|e| PlotError::Render(e.to_string()))?;
        }
    }

    root.present().map_err(|e| PlotError::Render(e.to_string()))?;
    Ok(())
}
