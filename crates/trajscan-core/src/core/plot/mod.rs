//! Figure generation for distance heatmaps.
//!
//! Uses the plotters SVG backend so that rendering has no system font
//! dependencies.

pub mod heatmap;
