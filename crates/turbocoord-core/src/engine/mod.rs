//! # Engine Module
//!
//! This module implements the sampling-and-orientation engine: everything between
//! the raw input structures and the assembled candidate conformers.
//!
//! ## Architecture
//!
//! - **Sphere Sampling** ([`sphere`]) - Deterministic Fibonacci-lattice point sets
//! - **Clash Filtering** ([`clash`]) - Distance-cutoff rejection of points and conformers
//! - **Conformer Assembly** ([`assembly`]) - Ligand orientation and composite construction
//! - **Configuration** ([`config`]) - Validated generation parameters
//! - **Progress Monitoring** ([`progress`]) - Progress reporting callbacks
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! Each sample point is processed independently over immutable input templates, so
//! the per-point loop in [`crate::workflows`] parallelizes without shared state.

pub mod assembly;
pub mod clash;
pub mod config;
pub mod error;
pub mod progress;
pub mod sphere;
