//! Provides input/output functionality for VASP structure files and reports.
//!
//! This module contains readers and writers for the file formats the scanner
//! touches: single-structure POSCAR files, multi-frame XDATCAR trajectories,
//! and the consolidated contact reports (plain text and CSV). A unified
//! trait-based interface covers the single-structure formats.

pub mod poscar;
pub mod report;
pub mod traits;
pub mod xdatcar;
