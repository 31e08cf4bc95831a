//! # TurboCoord Core Library
//!
//! A geometry engine for enumerating candidate ligand-binding poses around a
//! coordination complex, prior to downstream quantum-chemistry optimization.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`Atom`, `Structure`),
//!   pure numerical geometry (axis alignment, distance matrices), and coordinate-file I/O.
//!
//! - **[`engine`]: The Logic Core.** Implements the sampling-and-orientation pipeline
//!   pieces: the Fibonacci sphere sampler, the clash filter, conformer assembly, and
//!   the engine configuration.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing layer.
//!   It ties the `engine` and `core` together to execute the complete generation
//!   procedure: load, sample, filter, orient, assemble, and serialize.

pub mod core;
pub mod engine;
pub mod workflows;
