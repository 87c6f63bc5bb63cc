use super::types::{Boundary, SimulationBox};
use ndarray::{Array3, ArrayView2, Axis};

/// Header metadata shared by every snapshot of a custom dump.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomHeader {
    pub num_atoms: usize,
    pub boundary: Boundary,
    pub simulation_box: SimulationBox,
    pub column_names: Vec<String>,
}

impl CustomHeader {
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.column_names.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names.iter().position(|c| c == name)
    }

    #[inline]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }
}

/// A fully materialized custom dump.
///
/// `data` is indexed `[snapshot, atom, column]`, with columns in
/// `header.column_names` order.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomTrajectory {
    pub header: CustomHeader,
    pub timesteps: Option<Vec<i64>>,
    pub data: Array3<f64>,
}

impl CustomTrajectory {
    #[inline]
    pub fn num_snapshots(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    #[inline]
    pub fn num_atoms(&self) -> usize {
        self.header.num_atoms
    }

    /// One column as a `[snapshot, atom]` view.
    pub fn column(&self, name: &str) -> Option<ArrayView2<'_, f64>> {
        self.header
            .column_index(name)
            .map(|idx| self.data.index_axis(Axis(2), idx))
    }
}

/// A materialized xyz trajectory.
///
/// `positions` is indexed `[snapshot, atom, xyz]`; `types` holds one label per
/// atom, taken from the first snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct XyzTrajectory {
    pub types: Vec<String>,
    pub positions: Array3<f64>,
}

impl XyzTrajectory {
    #[inline]
    pub fn num_snapshots(&self) -> usize {
        self.positions.len_of(Axis(0))
    }

    #[inline]
    pub fn num_atoms(&self) -> usize {
        self.positions.len_of(Axis(1))
    }

    /// Indices of the atoms whose type label is one of `selected`, in atom order.
    pub fn indices_of_types<S: AsRef<str>>(&self, selected: &[S]) -> Vec<usize> {
        self.types
            .iter()
            .enumerate()
            .filter(|(_, t)| selected.iter().any(|s| s.as_ref() == t.as_str()))
            .map(|(i, _)| i)
            .collect()
    }

    /// Positions of the selected atom types as `[snapshot, selected_atom, xyz]`.
    pub fn positions_of_types<S: AsRef<str>>(&self, selected: &[S]) -> Array3<f64> {
        let indices = self.indices_of_types(selected);
        self.positions.select(Axis(1), &indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample_header() -> CustomHeader {
        CustomHeader {
            num_atoms: 2,
            boundary: Boundary::periodic(),
            simulation_box: SimulationBox::new([[0.0, 1.0]; 3]),
            column_names: vec!["id".into(), "x".into(), "y".into(), "z".into()],
        }
    }

    #[test]
    fn column_view_follows_header_order() {
        let traj = CustomTrajectory {
            header: sample_header(),
            timesteps: None,
            data: array![[[1.0, 0.1, 0.2, 0.3], [2.0, 0.4, 0.5, 0.6]]],
        };

        assert_eq!(traj.num_snapshots(), 1);
        assert_eq!(traj.column("y").unwrap(), array![[0.2, 0.5]]);
        assert!(traj.column("vx").is_none());
        assert_eq!(traj.header.column_index("z"), Some(3));
    }

    #[test]
    fn positions_of_types_keeps_atom_order() {
        let xyz = XyzTrajectory {
            types: vec!["O".into(), "H".into(), "H".into()],
            positions: array![[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]],
        };

        assert_eq!(xyz.indices_of_types(&["H"]), vec![1, 2]);
        let hs = xyz.positions_of_types(&["H"]);
        assert_eq!(hs.shape(), &[1, 2, 3]);
        assert_eq!(hs[[0, 1, 1]], 1.0);
        assert_eq!(xyz.positions_of_types(&["C"]).shape(), &[1, 0, 3]);
    }
}
