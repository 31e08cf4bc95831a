use crate::core::io::xyz::XyzError;
use crate::core::models::structure::StructureError;
use crate::core::utils::geometry::GeometryError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Sphere sampling requires at least 2 points, got {requested}")]
    InsufficientSamples { requested: usize },

    #[error("Sphere radius must be positive, got {value}")]
    NonPositiveRadius { value: f64 },

    #[error("Clash cutoff must be positive, got {value}")]
    NonPositiveCutoff { value: f64 },

    #[error("Geometry error: {source}")]
    Geometry {
        #[from]
        source: GeometryError,
    },

    #[error("Invalid structure: {source}")]
    Structure {
        #[from]
        source: StructureError,
    },

    #[error("Failed to load '{path}': {source}", path = path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: XyzError,
    },

    #[error("Failed to write '{path}': {source}", path = path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: XyzError,
    },
}
