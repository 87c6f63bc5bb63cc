use super::trajectory::CustomHeader;
use super::types::{Boundary, SimulationBox};
use ndarray::{Array2, Array3, Axis};
use std::collections::BTreeMap;

pub const POSITION: &str = "position";
pub const VELOCITY: &str = "velocity";
pub const ID: &str = "id";

/// A named per-atom quantity after projection.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// `[snapshot, atom]`
    Scalar(Array2<f64>),
    /// `[snapshot, atom]`, whole-number values of an `id` column.
    Id(Array2<i64>),
    /// `[snapshot, atom, component]`
    Vector(Array3<f64>),
}

impl Field {
    pub fn kind(&self) -> &'static str {
        match self {
            Field::Scalar(_) => "scalar",
            Field::Id(_) => "id",
            Field::Vector(_) => "vector",
        }
    }

    #[inline]
    pub fn num_snapshots(&self) -> usize {
        match self {
            Field::Scalar(a) => a.len_of(Axis(0)),
            Field::Id(a) => a.len_of(Axis(0)),
            Field::Vector(a) => a.len_of(Axis(0)),
        }
    }

    #[inline]
    pub fn num_atoms(&self) -> usize {
        match self {
            Field::Scalar(a) => a.len_of(Axis(1)),
            Field::Id(a) => a.len_of(Axis(1)),
            Field::Vector(a) => a.len_of(Axis(1)),
        }
    }
}

/// Projected fields keyed by name.
///
/// Well-known fields have typed accessors; everything else goes through
/// [`ProjectedFields::get`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedFields {
    fields: BTreeMap<String, Field>,
}

impl ProjectedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, field: Field) -> Option<Field> {
        self.fields.insert(name.into(), field)
    }

    pub fn remove(&mut self, name: &str) -> Option<Field> {
        self.fields.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn scalar(&self, name: &str) -> Option<&Array2<f64>> {
        match self.fields.get(name) {
            Some(Field::Scalar(a)) => Some(a),
            _ => None,
        }
    }

    pub fn vector(&self, name: &str) -> Option<&Array3<f64>> {
        match self.fields.get(name) {
            Some(Field::Vector(a)) => Some(a),
            _ => None,
        }
    }

    pub fn position(&self) -> Option<&Array3<f64>> {
        self.vector(POSITION)
    }

    pub fn velocity(&self) -> Option<&Array3<f64>> {
        self.vector(VELOCITY)
    }

    pub fn id(&self) -> Option<&Array2<i64>> {
        match self.fields.get(ID) {
            Some(Field::Id(a)) => Some(a),
            _ => None,
        }
    }

    pub fn set_position(&mut self, position: Array3<f64>) {
        self.insert(POSITION, Field::Vector(position));
    }

    pub fn set_velocity(&mut self, velocity: Array3<f64>) {
        self.insert(VELOCITY, Field::Vector(velocity));
    }

    pub fn set_id(&mut self, id: Array2<i64>) {
        self.insert(ID, Field::Id(id));
    }
}

impl<'a> IntoIterator for &'a ProjectedFields {
    type Item = (&'a String, &'a Field);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Projected counterpart of a custom trajectory.
///
/// `boundary` is optional so callers can assemble fields by hand; the writer
/// then needs a default boundary from its options.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomFields {
    pub num_atoms: usize,
    pub boundary: Option<Boundary>,
    pub simulation_box: SimulationBox,
    pub column_names: Vec<String>,
    pub timesteps: Option<Vec<i64>>,
    pub fields: ProjectedFields,
}

impl CustomFields {
    pub fn from_header(
        header: CustomHeader,
        timesteps: Option<Vec<i64>>,
        fields: ProjectedFields,
    ) -> Self {
        Self {
            num_atoms: header.num_atoms,
            boundary: Some(header.boundary),
            simulation_box: header.simulation_box,
            column_names: header.column_names,
            timesteps,
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn typed_accessors_match_field_kind() {
        let mut fields = ProjectedFields::new();
        fields.set_position(Array3::zeros((1, 2, 3)));
        fields.set_id(array![[1, 2]]);
        fields.insert("q", Field::Scalar(array![[0.5, -0.5]]));

        assert_eq!(fields.len(), 3);
        assert_eq!(fields.position().unwrap().shape(), &[1, 2, 3]);
        assert_eq!(fields.id().unwrap(), array![[1i64, 2]]);
        assert!(fields.velocity().is_none());
        assert!(fields.scalar(ID).is_none());
        assert_eq!(fields.scalar("q").unwrap()[[0, 1]], -0.5);
        assert_eq!(fields.names().collect::<Vec<_>>(), vec!["id", "position", "q"]);
    }

    #[test]
    fn field_reports_leading_dimensions() {
        let field = Field::Vector(Array3::zeros((4, 7, 3)));
        assert_eq!(field.num_snapshots(), 4);
        assert_eq!(field.num_atoms(), 7);
        assert_eq!(field.kind(), "vector");
    }
}
