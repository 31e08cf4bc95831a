use crate::core::io::traits::CoordinateFile;
use crate::core::models::atom::{Atom, Mobility};
use crate::core::models::structure::{Structure, StructureError};
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },

    #[error("Atom count mismatch: header declares {expected} atoms, found {found}")]
    AtomCountMismatch { expected: usize, found: usize },

    #[error("Mobility tag count ({tags}) does not match atom count ({atoms})")]
    TagCountMismatch { atoms: usize, tags: usize },

    #[error("Invalid structure: {0}")]
    Structure(#[from] StructureError),
}

#[derive(Debug, Error)]
pub enum XyzParseErrorKind {
    #[error("Invalid atom count in header (value: '{value}')")]
    InvalidAtomCount { value: String },
    #[error("Expected '<element> <x> <y> <z>', found {found} fields")]
    WrongFieldCount { found: usize },
    #[error("Invalid coordinate (value: '{value}')")]
    InvalidCoordinate { value: String },
    #[error("Missing header line")]
    MissingHeader,
}

/// The XYZ coordinate text format.
///
/// Layout: first line is the atom count, second line is a comment (ignored on
/// read, written blank), then one whitespace-separated `element x y z` line per
/// atom. On write the fields are fixed-width (element left-justified in 2
/// columns, coordinates right-justified with 5 decimals in 15 columns) because
/// the downstream coordinate converter parses by column.
pub struct XyzFile;

impl XyzFile {
    /// Writes atoms with a per-atom mobility column between the element and the
    /// coordinates: `-1` frozen, `0` free, centered in a 4-character field.
    ///
    /// # Errors
    ///
    /// Fails if `tags` and `atoms` differ in length, or on write failure.
    pub fn write_tagged_to(
        atoms: &[Atom],
        tags: &[Mobility],
        writer: &mut impl Write,
    ) -> Result<(), XyzError> {
        if atoms.len() != tags.len() {
            return Err(XyzError::TagCountMismatch {
                atoms: atoms.len(),
                tags: tags.len(),
            });
        }
        writeln!(writer, "{}", atoms.len())?;
        writeln!(writer)?;
        for (atom, tag) in atoms.iter().zip(tags) {
            writeln!(writer, "{}", tagged_line(atom, *tag))?;
        }
        Ok(())
    }

    /// Writes atoms without a mobility column.
    pub fn write_atoms_to(atoms: &[Atom], writer: &mut impl Write) -> Result<(), XyzError> {
        writeln!(writer, "{}", atoms.len())?;
        writeln!(writer)?;
        for atom in atoms {
            writeln!(writer, "{}", plain_line(atom))?;
        }
        Ok(())
    }
}

fn plain_line(atom: &Atom) -> String {
    format!(
        "{:<2}{:>15.5}{:>15.5}{:>15.5}",
        atom.element, atom.position.x, atom.position.y, atom.position.z
    )
}

fn tagged_line(atom: &Atom, mobility: Mobility) -> String {
    format!(
        "{:<2}{:^4}{:>15.5}{:>15.5}{:>15.5}",
        atom.element,
        mobility.tag(),
        atom.position.x,
        atom.position.y,
        atom.position.z
    )
}

impl CoordinateFile for XyzFile {
    type Error = XyzError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error> {
        let mut lines = reader.lines();

        let header = lines.next().ok_or(XyzError::Parse {
            line: 1,
            kind: XyzParseErrorKind::MissingHeader,
        })??;
        let expected: usize = header.trim().parse().map_err(|_| XyzError::Parse {
            line: 1,
            kind: XyzParseErrorKind::InvalidAtomCount {
                value: header.trim().to_string(),
            },
        })?;

        // Comment line; absent only in a truncated file.
        if lines.next().transpose()?.is_none() {
            return Err(XyzError::AtomCountMismatch { expected, found: 0 });
        }

        let mut atoms = Vec::with_capacity(expected);
        for (offset, line_res) in lines.enumerate() {
            let line_num = offset + 3;
            let line = line_res?;
            if line.trim().is_empty() {
                continue;
            }
            if atoms.len() == expected {
                return Err(XyzError::AtomCountMismatch {
                    expected,
                    found: expected + 1,
                });
            }
            atoms.push(parse_atom_line(&line, line_num)?);
        }

        if atoms.len() != expected {
            return Err(XyzError::AtomCountMismatch {
                expected,
                found: atoms.len(),
            });
        }

        Ok(Structure::new(atoms)?)
    }

    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error> {
        Self::write_atoms_to(structure.atoms(), writer)
    }
}

fn parse_atom_line(line: &str, line_num: usize) -> Result<Atom, XyzError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::WrongFieldCount {
                found: fields.len(),
            },
        });
    }
    let mut coords = [0.0f64; 3];
    for (i, field) in fields[1..].iter().enumerate() {
        coords[i] = field.parse().map_err(|_| XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::InvalidCoordinate {
                value: field.to_string(),
            },
        })?;
    }
    Ok(Atom::new(
        fields[0],
        Point3::new(coords[0], coords[1], coords[2]),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    fn read_str(content: &str) -> Result<Structure, XyzError> {
        let mut reader = BufReader::new(Cursor::new(content));
        XyzFile::read_from(&mut reader)
    }

    #[test]
    fn reads_a_well_formed_file() {
        let content = "3\nwater-ish\nO 0.0 0.0 0.0\nH 0.9572 0.0 0.0\nH -0.2399 0.9266 0.0\n";
        let structure = read_str(content).unwrap();

        assert_eq!(structure.len(), 3);
        assert_eq!(structure.atoms()[0].element, "O");
        assert_eq!(structure.atoms()[1].position.x, 0.9572);
        assert_eq!(structure.atoms()[2].position.y, 0.9266);
    }

    #[test]
    fn tolerates_trailing_blank_lines() {
        let content = "1\n\nO 1.0 2.0 3.0\n\n\n";
        let structure = read_str(content).unwrap();
        assert_eq!(structure.len(), 1);
    }

    #[test]
    fn rejects_invalid_atom_count_header() {
        let result = read_str("three\n\nO 0.0 0.0 0.0\n");
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                line: 1,
                kind: XyzParseErrorKind::InvalidAtomCount { .. }
            })
        ));
    }

    #[test]
    fn rejects_too_few_atom_lines() {
        let result = read_str("3\n\nO 0.0 0.0 0.0\n");
        assert!(matches!(
            result,
            Err(XyzError::AtomCountMismatch {
                expected: 3,
                found: 1
            })
        ));
    }

    #[test]
    fn rejects_too_many_atom_lines() {
        let result = read_str("1\n\nO 0.0 0.0 0.0\nH 1.0 0.0 0.0\n");
        assert!(matches!(
            result,
            Err(XyzError::AtomCountMismatch { expected: 1, .. })
        ));
    }

    #[test]
    fn rejects_a_malformed_coordinate_with_its_line_number() {
        let result = read_str("1\n\nO 0.0 oops 0.0\n");
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                line: 3,
                kind: XyzParseErrorKind::InvalidCoordinate { .. }
            })
        ));
    }

    #[test]
    fn rejects_a_line_with_the_wrong_field_count() {
        let result = read_str("1\n\nO 0.0 0.0\n");
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                line: 3,
                kind: XyzParseErrorKind::WrongFieldCount { found: 3 }
            })
        ));
    }

    #[test]
    fn plain_output_is_byte_stable() {
        let atoms = vec![
            Atom::new("O", Point3::new(0.0, 0.0, 0.0)),
            Atom::new("H", Point3::new(1.0, -2.5, 3.14159)),
        ];
        let mut buffer = Vec::new();
        XyzFile::write_atoms_to(&atoms, &mut buffer).unwrap();

        let expected = "2\n\n\
             O         0.00000        0.00000        0.00000\n\
             H         1.00000       -2.50000        3.14159\n";
        assert_eq!(String::from_utf8(buffer).unwrap(), expected);
    }

    #[test]
    fn tagged_output_centers_the_mobility_column() {
        let atoms = vec![
            Atom::new("O", Point3::new(0.0, 0.0, 0.0)),
            Atom::new("C", Point3::new(1.0, 1.0, 1.0)),
        ];
        let tags = vec![Mobility::Frozen, Mobility::Free];
        let mut buffer = Vec::new();
        XyzFile::write_tagged_to(&atoms, &tags, &mut buffer).unwrap();

        let expected = "2\n\n\
             O  -1         0.00000        0.00000        0.00000\n\
             C  0          1.00000        1.00000        1.00000\n";
        assert_eq!(String::from_utf8(buffer).unwrap(), expected);
    }

    #[test]
    fn tagged_write_rejects_mismatched_tag_count() {
        let atoms = vec![Atom::new("O", Point3::new(0.0, 0.0, 0.0))];
        let mut buffer = Vec::new();
        let result = XyzFile::write_tagged_to(&atoms, &[], &mut buffer);
        assert!(matches!(
            result,
            Err(XyzError::TagCountMismatch { atoms: 1, tags: 0 })
        ));
    }

    #[test]
    fn round_trip_preserves_coordinates() {
        let atoms = vec![
            Atom::new("Yb", Point3::new(0.0, 0.0, 0.0)),
            Atom::new("O", Point3::new(2.25, -1.0, 0.5)),
        ];
        let structure = Structure::new(atoms).unwrap();
        let mut buffer = Vec::new();
        XyzFile::write_to(&structure, &mut buffer).unwrap();

        let reparsed = read_str(&String::from_utf8(buffer).unwrap()).unwrap();
        assert_eq!(reparsed, structure);
    }
}
