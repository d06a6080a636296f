//! # trajscan Core Library
//!
//! A library for scanning VASP molecular-dynamics trajectories (XDATCAR files)
//! for element-pair contacts that satisfy a distance threshold, and for emitting
//! per-frame distance heatmaps together with a consolidated report.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers with a clear separation of concerns:
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`Structure`,
//!   `Lattice`), file format readers and writers (POSCAR, XDATCAR), the
//!   pairwise-distance analysis primitives, and figure rendering.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer.
//!   It ties the `core` pieces together into a complete scan over a trajectory:
//!   frame extraction, pair filtering, heatmap rendering, and report writing.
//!
//! Long-running workflows report their progress through the callback-based
//! [`progress`] module so that frontends can attach their own indicators.

pub mod core;
pub mod progress;
pub mod workflows;
