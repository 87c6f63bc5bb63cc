use crate::io::{Format, error::Error, util};
use crate::model::trajectory::XyzTrajectory;
use ndarray::Array3;
use std::io::BufRead;

fn is_atom_line(tokens: &[&str]) -> bool {
    tokens.len() >= 4 && tokens[0] != "Atoms."
}

/// Type labels of the first snapshot, one per atom.
pub fn read_types<R: BufRead>(reader: R) -> Result<Vec<String>, Error> {
    let mut lines = util::LineReader::new(reader);
    let mut types = Vec::new();

    while let Some((_, line)) = lines.next_line()? {
        let tokens = util::tokens(line);
        if is_atom_line(&tokens) {
            types.push(tokens[0].to_string());
        } else if !types.is_empty() {
            break;
        }
    }

    if types.is_empty() {
        return Err(Error::EmptyTrajectory {
            format: Format::Xyz,
        });
    }
    Ok(types)
}

/// Reads every snapshot. A snapshot starts at the first atom line after a
/// run of non-atom lines; all snapshots must hold the same number of atoms.
pub fn read<R: BufRead>(reader: R) -> Result<XyzTrajectory, Error> {
    let mut lines = util::LineReader::new(reader);
    let mut scan = Scan::default();

    while let Some((line_no, line)) = lines.next_line()? {
        let tokens = util::tokens(line);
        if !is_atom_line(&tokens) {
            scan.end_block()?;
            continue;
        }

        if !scan.in_block {
            scan.begin_block(line_no);
        }
        for token in &tokens[1..4] {
            let value = util::parse_f64(token).ok_or_else(|| {
                Error::parse(
                    Format::Xyz,
                    line_no,
                    format!("invalid coordinate '{}'", token),
                )
            })?;
            scan.positions.push(value);
        }
        if scan.snapshots == 1 {
            scan.types.push(tokens[0].to_string());
        }
        scan.block_atoms += 1;
    }
    scan.end_block()?;

    if scan.snapshots == 0 {
        return Err(Error::EmptyTrajectory {
            format: Format::Xyz,
        });
    }

    let num_atoms = scan.types.len();
    let positions = Array3::from_shape_vec((scan.snapshots, num_atoms, 3), scan.positions)
        .map_err(|e| Error::InconsistentShape(e.to_string()))?;

    tracing::debug!(
        snapshots = scan.snapshots,
        atoms = num_atoms,
        "parsed xyz trajectory"
    );

    Ok(XyzTrajectory {
        types: scan.types,
        positions,
    })
}

#[derive(Default)]
struct Scan {
    types: Vec<String>,
    positions: Vec<f64>,
    snapshots: usize,
    in_block: bool,
    block_start: usize,
    block_atoms: usize,
}

impl Scan {
    fn begin_block(&mut self, line_no: usize) {
        self.in_block = true;
        self.snapshots += 1;
        self.block_start = line_no;
        self.block_atoms = 0;
    }

    fn end_block(&mut self) -> Result<(), Error> {
        if !self.in_block {
            return Ok(());
        }
        self.in_block = false;
        if self.snapshots > 1 && self.block_atoms != self.types.len() {
            return Err(Error::parse(
                Format::Xyz,
                self.block_start,
                format!(
                    "snapshot {} has {} atoms, expected {}",
                    self.snapshots - 1,
                    self.block_atoms,
                    self.types.len()
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TWO_FRAMES: &str = "\
3
Atoms. Timestep: 0
O 0.0000 0.0000 0.0000
H 0.9572 0.0000 0.0000
H -0.2400 0.9266 0.0000
3
Atoms. Timestep: 1
O 0.1000 0.0000 0.0000
C 1.0572 0.0000 0.0000
N -0.1400 0.9266 0.0000
";

    #[test]
    fn reads_types_of_first_snapshot_only() {
        let types = read_types(Cursor::new(TWO_FRAMES)).expect("read types");
        assert_eq!(types, vec!["O", "H", "H"]);
    }

    #[test]
    fn reads_all_snapshots() {
        let xyz = read(Cursor::new(TWO_FRAMES)).expect("read xyz");
        assert_eq!(xyz.positions.shape(), &[2, 3, 3]);
        assert_eq!(xyz.types, vec!["O", "H", "H"]);
        assert_eq!(xyz.positions[[0, 1, 0]], 0.9572);
        assert_eq!(xyz.positions[[1, 2, 1]], 0.9266);
        assert_eq!(xyz.positions[[1, 0, 0]], 0.1);
    }

    #[test]
    fn extra_columns_and_blank_separators_are_tolerated() {
        let text = "2\n\nAr 1 2 3 0.5\nAr 4 5 6 0.5\n\n\n2\ncomment\nAr 7 8 9\nAr 1 1 1\n";
        let xyz = read(Cursor::new(text)).expect("read xyz");
        assert_eq!(xyz.positions.shape(), &[2, 2, 3]);
        assert_eq!(xyz.positions[[1, 0, 2]], 9.0);
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = read(Cursor::new("0\nAtoms. Timestep: 0\n")).unwrap_err();
        assert!(matches!(
            err,
            Error::EmptyTrajectory {
                format: Format::Xyz
            }
        ));
        assert!(matches!(
            read_types(Cursor::new("")).unwrap_err(),
            Error::EmptyTrajectory { .. }
        ));
    }

    #[test]
    fn rejects_changing_atom_count() {
        let text = "2\nc\nA 0 0 0\nA 1 1 1\n1\nc\nA 2 2 2\n";
        let err = read(Cursor::new(text)).unwrap_err();
        assert!(matches!(
            err,
            Error::Parse {
                format: Format::Xyz,
                line: 7,
                ..
            }
        ));
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        let text = "1\nc\nA 0 zero 0\n";
        let err = read(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));
    }
}
