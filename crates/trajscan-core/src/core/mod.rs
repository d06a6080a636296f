//! # Core Module
//!
//! This module provides the fundamental building blocks for trajectory
//! analysis in trajscan, serving as the computational core of the library.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! aspects of the analysis:
//!
//! - **Structure Representation** ([`models`]) - Lattices, sites, and periodic structures
//! - **File I/O** ([`io`]) - Reading/writing VASP POSCAR and XDATCAR files and reports
//! - **Pair Analysis** ([`analysis`]) - Element-pair selection and pairwise-distance scans
//! - **Figure Rendering** ([`plot`]) - Per-frame distance heatmaps
//!
//! ## Key Capabilities
//!
//! - **Periodic distance computation** under the minimum-image convention,
//!   valid for arbitrary (including skewed) cells
//! - **Frame-by-frame trajectory decoding** with precise, line-numbered
//!   parse errors
//! - **Threshold-based pair filtering** with inclusive comparisons on both
//!   sides of the cutoff

pub mod analysis;
pub mod io;
pub mod models;
pub mod plot;
