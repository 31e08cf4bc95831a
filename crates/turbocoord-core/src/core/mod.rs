//! # Core Module
//!
//! This module provides the fundamental building blocks for pose enumeration in
//! TurboCoord, serving as the computational foundation of the library.
//!
//! ## Overview
//!
//! The core module implements the data structures, numerical geometry, and file I/O
//! required to represent a substrate/ligand pair and to build candidate composite
//! geometries from them. Everything here is stateless and side-effect free; the
//! stateful orchestration lives in [`crate::engine`] and [`crate::workflows`].
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, structures, and reference axes
//! - **File I/O** ([`io`]) - Reading/writing the XYZ coordinate format with mobility tagging
//! - **Numerical Geometry** ([`utils`]) - Axis alignment rotations and distance matrices

pub mod io;
pub mod models;
pub mod utils;
