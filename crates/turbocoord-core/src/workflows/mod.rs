//! # Workflows Module
//!
//! This module provides the high-level entry points that orchestrate the complete
//! pose-enumeration procedure.
//!
//! ## Overview
//!
//! Workflows tie the `core` and `engine` layers together: they load and recenter
//! the input structures, sample the placement sphere, filter clashing points,
//! orient and assemble one conformer per surviving point, and serialize the
//! results to deterministically named files. They are the only layer that touches
//! the filesystem on behalf of the caller.
//!
//! - **Generation Workflow** ([`generate`]) - The full load-sample-orient-write
//!   pipeline, plus a sample-sphere preview dump for visual inspection.

pub mod generate;
