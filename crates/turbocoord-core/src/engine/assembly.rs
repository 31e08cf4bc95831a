use crate::core::models::atom::Atom;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::{distance_matrix, rotation_aligning};
use crate::engine::error::EngineError;
use nalgebra::{DMatrix, Point3, Vector3};

/// Rotates a ligand template so its reference axis points along the direction of
/// `target`, then translates it so its local origin lands on `target`.
///
/// The transform is applied in the ligand's own frame: rotate about the origin
/// first, translate second. The template is never mutated; the returned
/// structure owns an independent coordinate copy.
///
/// # Errors
///
/// Fails when the reference axis or the target direction is degenerate
/// (zero-length).
pub fn orient_ligand(
    template: &Structure,
    reference_axis: &Vector3<f64>,
    target: &Point3<f64>,
) -> Result<Structure, EngineError> {
    let rotation = rotation_aligning(reference_axis, &target.coords)?;

    let atoms = template
        .atoms()
        .iter()
        .map(|atom| {
            Atom::new(
                &atom.element,
                rotation * atom.position + target.coords,
            )
        })
        .collect();

    Ok(Structure::new(atoms)?)
}

/// One candidate composite geometry: the substrate plus a ligand copy oriented
/// toward a single sample point.
///
/// A conformer owns everything it holds. Substrate atoms are copied unchanged;
/// the ligand is a freshly oriented copy, never a reference to the shared
/// template. The distance matrix spans the substrate-then-ligand concatenation
/// and is recomputed for every conformer.
#[derive(Debug, Clone)]
pub struct Conformer {
    substrate: Structure,
    ligand: Structure,
    sample_point: Point3<f64>,
    distance_matrix: DMatrix<f64>,
}

impl Conformer {
    /// Assembles a conformer from the input templates and one sample point.
    pub fn assemble(
        substrate: &Structure,
        ligand_template: &Structure,
        reference_axis: &Vector3<f64>,
        sample_point: Point3<f64>,
    ) -> Result<Self, EngineError> {
        let ligand = orient_ligand(ligand_template, reference_axis, &sample_point)?;

        let mut positions = substrate.positions();
        positions.extend(ligand.positions());
        let distance_matrix = distance_matrix(&positions);

        Ok(Self {
            substrate: substrate.clone(),
            ligand,
            sample_point,
            distance_matrix,
        })
    }

    pub fn substrate(&self) -> &Structure {
        &self.substrate
    }

    pub fn ligand(&self) -> &Structure {
        &self.ligand
    }

    pub fn sample_point(&self) -> Point3<f64> {
        self.sample_point
    }

    pub fn distance_matrix(&self) -> &DMatrix<f64> {
        &self.distance_matrix
    }

    /// The concatenated atom list, substrate first, ligand second.
    pub fn atoms(&self) -> Vec<Atom> {
        let mut atoms = self.substrate.atoms().to_vec();
        atoms.extend_from_slice(self.ligand.atoms());
        atoms
    }

    /// The smallest distance between any substrate atom and any ligand atom,
    /// read from the off-diagonal block of the distance matrix.
    pub fn min_substrate_ligand_distance(&self) -> f64 {
        let n_substrate = self.substrate.len();
        let n_total = self.distance_matrix.nrows();
        let mut min = f64::INFINITY;
        for i in 0..n_substrate {
            for j in n_substrate..n_total {
                let dist = self.distance_matrix[(i, j)];
                if dist < min {
                    min = dist;
                }
            }
        }
        min
    }

    /// Applies the clash predicate to the assembled pose: the conformer survives
    /// only if every substrate-ligand distance is strictly above `cutoff`.
    pub fn clears_contact_cutoff(&self, cutoff: f64) -> bool {
        self.min_substrate_ligand_distance() > cutoff
    }
}
