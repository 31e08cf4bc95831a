use nalgebra::Point3;
use std::str::FromStr;

/// Describes whether an atom may move during downstream geometry optimization.
///
/// The external DFT tool's coordinate converter understands a per-atom mobility
/// column: `-1` marks an atom as frozen (held fixed) and `0` marks it as free to
/// relax. Tagging is optional at serialization time; plain output carries no
/// mobility column at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mobility {
    /// The atom is held fixed during optimization.
    Frozen,
    /// The atom is free to relax.
    #[default]
    Free,
}

impl Mobility {
    /// Returns the integer tag the coordinate converter expects for this mobility.
    pub fn tag(&self) -> i32 {
        match self {
            Mobility::Frozen => -1,
            Mobility::Free => 0,
        }
    }
}

impl FromStr for Mobility {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "frozen" | "fixed" | "-1" => Ok(Mobility::Frozen),
            "free" | "labile" | "0" => Ok(Mobility::Free),
            _ => Err(()),
        }
    }
}

/// Represents an atom in a structure.
///
/// An atom is an immutable value: an element symbol and a position in Angstroms.
/// Identity is positional (the index in the owning [`Structure`]), never by
/// reference, so atoms can be freely copied between structures without aliasing
/// concerns.
///
/// [`Structure`]: crate::core::models::structure::Structure
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element symbol (e.g., "O", "C", "Yb").
    pub element: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` from an element symbol and a position.
    pub fn new(element: &str, position: Point3<f64>) -> Self {
        Self {
            element: element.to_string(),
            position,
        }
    }
}
