//! Provides the pairwise-distance analysis primitives.
//!
//! This module contains the element-pair selection and threshold types parsed
//! from user input ([`pairs`]) and the full distance-matrix computation used
//! for heatmap rendering ([`matrix`]). Both operate on a single
//! [`Structure`](crate::core::models::structure::Structure); iterating over
//! trajectory frames is the workflow layer's job.

pub mod matrix;
pub mod pairs;
