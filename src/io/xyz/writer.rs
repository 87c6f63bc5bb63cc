use crate::io::error::Error;
use crate::model::trajectory::XyzTrajectory;
use ndarray::Axis;
use std::io::Write;

/// Writes one block per snapshot: atom count, a timestep comment carrying the
/// snapshot index, then `type x y z` with four decimals.
pub fn write<W: Write>(mut writer: W, trajectory: &XyzTrajectory) -> Result<(), Error> {
    let (_, num_atoms, components) = trajectory.positions.dim();
    if components != 3 {
        return Err(Error::InconsistentShape(format!(
            "positions have {} components per atom, expected 3",
            components
        )));
    }
    if trajectory.types.len() != num_atoms {
        return Err(Error::InconsistentShape(format!(
            "{} type labels for {} atoms",
            trajectory.types.len(),
            num_atoms
        )));
    }

    for (s, snap) in trajectory.positions.axis_iter(Axis(0)).enumerate() {
        writeln!(writer, "{}", num_atoms)?;
        writeln!(writer, "Atoms. Timestep: {}", s)?;
        for (label, p) in trajectory.types.iter().zip(snap.outer_iter()) {
            writeln!(writer, "{} {:.4} {:.4} {:.4}", label, p[0], p[1], p[2])?;
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::xyz::reader;
    use ndarray::{Array3, array};
    use std::io::Cursor;

    fn sample() -> XyzTrajectory {
        XyzTrajectory {
            types: vec!["O".into(), "H".into(), "H".into()],
            positions: array![
                [[0.0, 0.0, 0.0], [0.95721, 0.0, 0.0], [-0.24, 0.92663, 0.0]],
                [[0.1, 0.0, 0.0], [1.05721, 0.0, 0.0], [-0.14, 0.92663, 0.0]],
            ],
        }
    }

    #[test]
    fn writes_expected_layout() {
        let mut buf = Vec::new();
        write(&mut buf, &sample()).expect("write xyz");
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "3");
        assert_eq!(lines[1], "Atoms. Timestep: 0");
        assert_eq!(lines[3], "H 0.9572 0.0000 0.0000");
        assert_eq!(lines[6], "Atoms. Timestep: 1");
        assert_eq!(lines[9], "H -0.1400 0.9266 0.0000");
    }

    #[test]
    fn writes_and_reads_roundtrip() {
        let xyz = sample();
        let mut buf = Vec::new();
        write(&mut buf, &xyz).expect("write xyz");
        let parsed = reader::read(Cursor::new(buf)).expect("read xyz");

        assert_eq!(parsed.types, xyz.types);
        assert_eq!(parsed.positions.shape(), xyz.positions.shape());
        for (a, b) in xyz.positions.iter().zip(parsed.positions.iter()) {
            assert!((a - b).abs() < 5e-5);
        }
    }

    #[test]
    fn rejects_type_count_mismatch() {
        let xyz = XyzTrajectory {
            types: vec!["O".into()],
            positions: Array3::zeros((1, 2, 3)),
        };
        let err = write(Vec::new(), &xyz).unwrap_err();
        assert!(matches!(err, Error::InconsistentShape(_)));
    }
}
