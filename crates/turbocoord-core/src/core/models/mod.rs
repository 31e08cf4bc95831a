//! # Core Models Module
//!
//! This module contains the data structures used to represent molecular geometry in
//! TurboCoord.
//!
//! ## Overview
//!
//! The models are deliberately minimal: an atom is an element symbol plus a position,
//! and a structure is an ordered, non-empty sequence of atoms. Structures loaded from
//! disk are treated as read-only templates; every candidate pose owns independent
//! copies of the coordinates it perturbs.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom representation and per-atom mobility tagging
//! - [`structure`] - Ordered atom sequences, origin recentering, and reference axes

pub mod atom;
pub mod structure;
