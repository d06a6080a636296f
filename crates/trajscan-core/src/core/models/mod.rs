//! # Core Models Module
//!
//! This module contains the fundamental data structures used to represent
//! periodic crystal structures in trajscan.
//!
//! ## Key Components
//!
//! - [`element`] - The table of known chemical element symbols and symbol normalization
//! - [`lattice`] - The periodic cell: lattice vectors and coordinate conversions
//! - [`site`] - A single atomic site: element symbol plus fractional coordinates
//! - [`structure`] - A complete snapshot: lattice plus an ordered list of sites
//!
//! Structures are immutable value types; a trajectory is simply a sequence of
//! structures sharing one header (see [`crate::core::io::xdatcar`]).

pub mod element;
pub mod lattice;
pub mod site;
pub mod structure;
