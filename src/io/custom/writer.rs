use crate::io::{CustomData, error::Error};
use crate::model::fields::CustomFields;
use crate::model::trajectory::CustomTrajectory;
use crate::model::types::{Boundary, SimulationBox};
use crate::project;
use ndarray::{ArrayView2, Axis};
use std::io::Write;

/// Anything that can be written as a custom dump.
pub trait CustomSource {
    fn write_custom<W: Write>(
        &self,
        writer: W,
        default_boundary: Option<&Boundary>,
    ) -> Result<(), Error>;
}

impl CustomSource for CustomTrajectory {
    fn write_custom<W: Write>(&self, writer: W, _: Option<&Boundary>) -> Result<(), Error> {
        write(writer, self)
    }
}

impl CustomSource for CustomFields {
    fn write_custom<W: Write>(
        &self,
        writer: W,
        default_boundary: Option<&Boundary>,
    ) -> Result<(), Error> {
        write_fields(writer, self, default_boundary)
    }
}

impl CustomSource for CustomData {
    fn write_custom<W: Write>(
        &self,
        writer: W,
        default_boundary: Option<&Boundary>,
    ) -> Result<(), Error> {
        match self {
            CustomData::Raw(t) => t.write_custom(writer, default_boundary),
            CustomData::Split(f) => f.write_custom(writer, default_boundary),
        }
    }
}

/// Writes a raw trajectory, one header+body block per snapshot.
pub fn write<W: Write>(writer: W, trajectory: &CustomTrajectory) -> Result<(), Error> {
    let columns: Vec<ArrayView2<'_, f64>> = trajectory.data.axis_iter(Axis(2)).collect();
    if columns.len() != trajectory.header.num_columns() {
        return Err(Error::InconsistentShape(format!(
            "data holds {} columns but the header names {}",
            columns.len(),
            trajectory.header.num_columns()
        )));
    }
    write_columns(
        writer,
        &trajectory.header.column_names,
        &columns,
        &trajectory.header.simulation_box,
        &trajectory.header.boundary,
        trajectory.timesteps.as_deref(),
    )
}

/// Writes projected fields, rebuilding the raw columns in `column_names` order.
///
/// `default_boundary` is used only when `fields.boundary` is `None`; if both
/// are missing the write fails with [`Error::MalformedInput`].
pub fn write_fields<W: Write>(
    writer: W,
    fields: &CustomFields,
    default_boundary: Option<&Boundary>,
) -> Result<(), Error> {
    let boundary = fields
        .boundary
        .as_ref()
        .or(default_boundary)
        .ok_or_else(|| {
            Error::MalformedInput("no boundary given and no default boundary configured".into())
        })?;

    let merged = project::merge(&fields.fields, &fields.column_names)?;
    let columns: Vec<ArrayView2<'_, f64>> = merged.iter().map(|c| c.view()).collect();

    write_columns(
        writer,
        &fields.column_names,
        &columns,
        &fields.simulation_box,
        boundary,
        fields.timesteps.as_deref(),
    )
}

fn write_columns<W: Write>(
    mut writer: W,
    column_names: &[String],
    columns: &[ArrayView2<'_, f64>],
    simulation_box: &SimulationBox,
    boundary: &Boundary,
    timesteps: Option<&[i64]>,
) -> Result<(), Error> {
    let (num_snapshots, num_atoms) = check_shapes(columns)?;
    if let Some(ts) = timesteps.filter(|ts| ts.len() != num_snapshots) {
        return Err(Error::InconsistentShape(format!(
            "{} timesteps given for {} snapshots",
            ts.len(),
            num_snapshots
        )));
    }

    let names = column_names.join(" ");
    let mut line = String::new();

    for snap in 0..num_snapshots {
        let timestep = timesteps.map_or(0, |ts| ts[snap]);

        writeln!(writer, "ITEM: TIMESTEP")?;
        writeln!(writer, "{}", timestep)?;
        writeln!(writer, "ITEM: NUMBER OF ATOMS")?;
        writeln!(writer, "{}", num_atoms)?;
        writeln!(writer, "ITEM: BOX BOUNDS {}", boundary)?;
        for [lo, hi] in simulation_box.bounds {
            writeln!(writer, "{} {}", lo, hi)?;
        }
        writeln!(writer, "ITEM: ATOMS {}", names)?;

        for atom in 0..num_atoms {
            line.clear();
            for (k, column) in columns.iter().enumerate() {
                if k > 0 {
                    line.push(' ');
                }
                line.push_str(&column[[snap, atom]].to_string());
            }
            writeln!(writer, "{}", line)?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn check_shapes(columns: &[ArrayView2<'_, f64>]) -> Result<(usize, usize), Error> {
    let first = columns
        .first()
        .ok_or_else(|| Error::MalformedInput("no columns to write".into()))?;
    let (num_snapshots, num_atoms) = first.dim();

    for column in columns {
        let (snaps, atoms) = column.dim();
        if snaps != num_snapshots {
            return Err(Error::InconsistentShape(format!(
                "inconsistent number of snapshots: {} vs {}",
                snaps, num_snapshots
            )));
        }
        if atoms != num_atoms {
            return Err(Error::InconsistentShape(format!(
                "inconsistent number of atoms: {} vs {}",
                atoms, num_atoms
            )));
        }
    }
    Ok((num_snapshots, num_atoms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::custom::reader;
    use crate::model::fields::{Field, ProjectedFields};
    use crate::project::split_trajectory;
    use ndarray::{Array3, array};
    use std::io::Cursor;

    const MINIMAL: &str = "\
ITEM: TIMESTEP
0
ITEM: NUMBER OF ATOMS
2
ITEM: BOX BOUNDS pp pp pp
0 10
0 10
0 10
ITEM: ATOMS id x y z
1 0.5 1.25 -2
2 3 4.75 9.5
";

    fn to_string(buf: Vec<u8>) -> String {
        String::from_utf8(buf).expect("utf8 output")
    }

    #[test]
    fn read_then_write_reproduces_text() {
        let traj = reader::read(Cursor::new(MINIMAL), true).expect("read custom");
        let mut buf = Vec::new();
        write(&mut buf, &traj).expect("write custom");
        assert_eq!(to_string(buf), MINIMAL);
    }

    #[test]
    fn projected_fields_write_identically() {
        let traj = reader::read(Cursor::new(MINIMAL), true).expect("read custom");
        let fields = split_trajectory(traj).expect("split");
        assert!(fields.fields.position().is_some());

        let mut buf = Vec::new();
        write_fields(&mut buf, &fields, None).expect("write fields");
        assert_eq!(to_string(buf), MINIMAL);
    }

    #[test]
    fn roundtrip_preserves_metadata_and_data() {
        let traj = reader::read(Cursor::new(MINIMAL), true).expect("read custom");
        let mut buf = Vec::new();
        write(&mut buf, &traj).expect("write custom");
        let back = reader::read(Cursor::new(buf), true).expect("read back");
        assert_eq!(back.header, traj.header);
        assert_eq!(back.data, traj.data);
    }

    #[test]
    fn missing_timesteps_default_to_zero() {
        let mut traj = reader::read(Cursor::new(MINIMAL), true).expect("read custom");
        traj.timesteps = None;
        let mut buf = Vec::new();
        write(&mut buf, &traj).expect("write custom");
        assert_eq!(to_string(buf).lines().nth(1), Some("0"));
    }

    fn hand_built(fields: ProjectedFields, boundary: Option<Boundary>) -> CustomFields {
        CustomFields {
            num_atoms: 2,
            boundary,
            simulation_box: SimulationBox::new([[0.0, 1.0]; 3]),
            column_names: vec!["id".into(), "x".into(), "y".into(), "z".into()],
            timesteps: None,
            fields,
        }
    }

    #[test]
    fn missing_boundary_requires_default() {
        let mut fields = ProjectedFields::new();
        fields.set_id(array![[1, 2]]);
        fields.set_position(Array3::zeros((1, 2, 3)));
        let custom = hand_built(fields, None);

        let err = write_fields(Vec::new(), &custom, None).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));

        let mut buf = Vec::new();
        write_fields(&mut buf, &custom, Some(&Boundary::new("ff", "ff", "ff")))
            .expect("write with default boundary");
        assert!(to_string(buf).contains("ITEM: BOX BOUNDS ff ff ff\n"));
    }

    #[test]
    fn rejects_inconsistent_snapshot_counts() {
        let mut fields = ProjectedFields::new();
        fields.set_id(array![[1, 2]]);
        fields.set_position(Array3::zeros((2, 2, 3)));
        let err = write_fields(Vec::new(), &hand_built(fields, Some(Boundary::periodic())), None)
            .unwrap_err();
        assert!(matches!(err, Error::InconsistentShape(_)));
    }

    #[test]
    fn rejects_inconsistent_atom_counts() {
        let mut fields = ProjectedFields::new();
        fields.insert("id", Field::Id(array![[1, 2, 3]]));
        fields.set_position(Array3::zeros((1, 2, 3)));
        let err = write_fields(Vec::new(), &hand_built(fields, Some(Boundary::periodic())), None)
            .unwrap_err();
        assert!(matches!(err, Error::InconsistentShape(_)));
    }

    #[test]
    fn missing_column_surfaces_projection_error() {
        let mut fields = ProjectedFields::new();
        fields.set_id(array![[1, 2]]);
        let err = write_fields(Vec::new(), &hand_built(fields, Some(Boundary::periodic())), None)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Projection(project::Error::MissingField { .. })
        ));
    }
}
