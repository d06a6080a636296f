//! # Workflows Module
//!
//! This module provides the high-level entry points that orchestrate a
//! complete analysis over a trajectory.
//!
//! A workflow owns the full pipeline: it validates the configuration, walks
//! the trajectory frame by frame, delegates to the [`crate::core`] primitives
//! for distances, filtering, POSCAR dumps and figures, and writes the
//! consolidated reports at the end. Frontends only construct the inputs and
//! consume the returned summary.

pub mod scan;
