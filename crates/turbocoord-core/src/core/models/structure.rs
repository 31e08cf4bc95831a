use super::atom::Atom;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StructureError {
    #[error("A structure must contain at least one atom")]
    Empty,

    #[error("Atom {index} ('{element}') has a non-finite coordinate")]
    NonFinitePosition { index: usize, element: String },

    #[error("Axis atom index {index} is out of bounds for a structure of {len} atoms")]
    AxisIndexOutOfBounds { index: usize, len: usize },
}

/// An ordered, non-empty sequence of atoms.
///
/// Order is significant: the first atom conventionally defines the local origin,
/// and downstream sampling assumes the structure has been recentered so that atom 0
/// sits at `(0, 0, 0)` (see [`Structure::recenter_to_first_atom`]). Structures
/// loaded from disk are read-only templates; orientation never mutates them but
/// produces fresh copies instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    atoms: Vec<Atom>,
}

impl Structure {
    /// Builds a structure from an atom list, validating the model invariants:
    /// the list is non-empty and every position is finite.
    pub fn new(atoms: Vec<Atom>) -> Result<Self, StructureError> {
        if atoms.is_empty() {
            return Err(StructureError::Empty);
        }
        for (index, atom) in atoms.iter().enumerate() {
            if !atom.position.iter().all(|c| c.is_finite()) {
                return Err(StructureError::NonFinitePosition {
                    index,
                    element: atom.element.clone(),
                });
            }
        }
        Ok(Self { atoms })
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Collects the atom positions into a plain coordinate list.
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.atoms.iter().map(|a| a.position).collect()
    }

    /// Returns a copy of this structure translated so that its first atom sits at
    /// the origin.
    ///
    /// Sample points are generated on a sphere centered at the substrate's origin
    /// atom, so both the substrate and the ligand template must pass through this
    /// before entering the pipeline.
    pub fn recenter_to_first_atom(&self) -> Self {
        let origin = self.atoms[0].position;
        let shift = origin.coords;
        let atoms = self
            .atoms
            .iter()
            .map(|a| Atom {
                element: a.element.clone(),
                position: a.position - shift,
            })
            .collect();
        Self { atoms }
    }

    /// Derives the ligand reference axis described by `spec`.
    ///
    /// The axis is `position[tip] - midpoint(position[base.0], position[base.1])`,
    /// optionally negated. The result is NOT normalized; alignment callers
    /// normalize explicitly.
    pub fn reference_axis(&self, spec: &AxisSpec) -> Result<Vector3<f64>, StructureError> {
        let len = self.atoms.len();
        for index in [spec.tip, spec.base.0, spec.base.1] {
            if index >= len {
                return Err(StructureError::AxisIndexOutOfBounds { index, len });
            }
        }
        let tip = self.atoms[spec.tip].position.coords;
        let base_a = self.atoms[spec.base.0].position.coords;
        let base_b = self.atoms[spec.base.1].position.coords;
        let axis = tip - (base_a + base_b) / 2.0;
        Ok(if spec.negate { -axis } else { axis })
    }
}

/// Names the three ligand atoms that define the reference axis, plus the sign
/// convention to apply before alignment.
///
/// For a bent ligand like THF the tip is the coordinating heteroatom and the base
/// pair are its two bonded neighbors, giving an axis along the local symmetry
/// direction. Whether the axis points out of or into the ligand depends on the
/// atom order in the input file, so the sign is an explicit caller decision
/// rather than something the engine infers.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisSpec {
    /// Index of the atom at the tip of the axis.
    pub tip: usize,
    /// Indices of the two atoms whose midpoint anchors the axis.
    pub base: (usize, usize),
    /// Negate the axis before alignment.
    pub negate: bool,
}

impl Default for AxisSpec {
    fn default() -> Self {
        Self {
            tip: 0,
            base: (1, 2),
            negate: true,
        }
    }
}
