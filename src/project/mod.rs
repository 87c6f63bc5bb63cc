//! Projection between raw custom-dump columns and named fields.
//!
//! [`split`] turns the `[snapshot, atom, column]` block of a custom trajectory
//! into one field per column, folding `x,y,z` into `position` and `vx,vy,vz`
//! into `velocity` when all three components are present. [`merge`] is the
//! inverse and rebuilds the columns a writer needs, slicing components back
//! out of the vector fields.

mod error;

pub use error::Error;

use crate::model::fields::{CustomFields, Field, ID, POSITION, ProjectedFields, VELOCITY};
use crate::model::trajectory::CustomTrajectory;
use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};

const POSITION_COLUMNS: [&str; 3] = ["x", "y", "z"];
const VELOCITY_COLUMNS: [&str; 3] = ["vx", "vy", "vz"];

/// Projects `data` (`[snapshot, atom, column]`) into named fields.
pub fn split(data: ArrayView3<'_, f64>, column_names: &[String]) -> Result<ProjectedFields, Error> {
    if data.len_of(Axis(2)) != column_names.len() {
        return Err(Error::ShapeMismatch {
            expected: column_names.len(),
            found: data.len_of(Axis(2)),
        });
    }

    let index_of = |name: &str| column_names.iter().position(|c| c == name);
    let triple = |names: [&str; 3]| -> Option<[usize; 3]> {
        Some([index_of(names[0])?, index_of(names[1])?, index_of(names[2])?])
    };

    let position = triple(POSITION_COLUMNS);
    let velocity = triple(VELOCITY_COLUMNS);

    let mut fields = ProjectedFields::new();
    for (idx, name) in column_names.iter().enumerate() {
        let folded = (position.is_some() && POSITION_COLUMNS.contains(&name.as_str()))
            || (velocity.is_some() && VELOCITY_COLUMNS.contains(&name.as_str()));
        if folded {
            continue;
        }

        let column = data.index_axis(Axis(2), idx);
        let field = if name == ID {
            Field::Id(to_ids(column)?)
        } else {
            Field::Scalar(column.to_owned())
        };
        fields.insert(name.clone(), field);
    }

    if let Some(indices) = position {
        fields.set_position(data.select(Axis(2), &indices));
    }
    if let Some(indices) = velocity {
        fields.set_velocity(data.select(Axis(2), &indices));
    }

    Ok(fields)
}

/// Consumes a raw trajectory and returns its projected form without the raw data.
pub fn split_trajectory(trajectory: CustomTrajectory) -> Result<CustomFields, Error> {
    let fields = split(trajectory.data.view(), &trajectory.header.column_names)?;
    Ok(CustomFields::from_header(
        trajectory.header,
        trajectory.timesteps,
        fields,
    ))
}

/// Rebuilds one `[snapshot, atom]` column per entry of `column_order`.
pub fn merge<S: AsRef<str>>(
    fields: &ProjectedFields,
    column_order: &[S],
) -> Result<Vec<Array2<f64>>, Error> {
    column_order
        .iter()
        .map(|name| merge_column(fields, name.as_ref()))
        .collect()
}

fn merge_column(fields: &ProjectedFields, name: &str) -> Result<Array2<f64>, Error> {
    if let Some(field) = fields.get(name) {
        return match field {
            Field::Scalar(a) => Ok(a.clone()),
            Field::Id(a) => Ok(a.mapv(|v| v as f64)),
            Field::Vector(_) => Err(Error::FieldKind {
                name: name.to_string(),
                expected: "scalar",
                found: field.kind(),
            }),
        };
    }

    let (source_field, component) = match derived_component(name) {
        Some(found) => found,
        None => {
            return Err(Error::MissingField {
                name: name.to_string(),
                source_field: None,
            });
        }
    };

    let vector = match fields.get(source_field) {
        Some(Field::Vector(v)) => v,
        Some(other) => {
            return Err(Error::FieldKind {
                name: source_field.to_string(),
                expected: "vector",
                found: other.kind(),
            });
        }
        None => {
            return Err(Error::MissingField {
                name: name.to_string(),
                source_field: Some(source_field),
            });
        }
    };

    vector_component(vector, component).ok_or_else(|| Error::TooFewComponents {
        name: source_field.to_string(),
        needed: component + 1,
        found: vector.len_of(Axis(2)),
    })
}

fn derived_component(name: &str) -> Option<(&'static str, usize)> {
    if let Some(k) = POSITION_COLUMNS.iter().position(|c| *c == name) {
        return Some((POSITION, k));
    }
    VELOCITY_COLUMNS
        .iter()
        .position(|c| *c == name)
        .map(|k| (VELOCITY, k))
}

/// Component `k` of a `[snapshot, atom, component]` field as `[snapshot, atom]`.
pub fn vector_component(vector: &Array3<f64>, k: usize) -> Option<Array2<f64>> {
    (k < vector.len_of(Axis(2))).then(|| vector.index_axis(Axis(2), k).to_owned())
}

fn to_ids(column: ArrayView2<'_, f64>) -> Result<Array2<i64>, Error> {
    for ((snapshot, atom), &value) in column.indexed_iter() {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(Error::NonIntegerId {
                snapshot,
                atom,
                value,
            });
        }
    }
    Ok(column.mapv(|v| v as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn sample_data() -> Array3<f64> {
        // id type x y z vx vy vz
        array![
            [
                [1.0, 1.0, 0.1, 0.2, 0.3, -1.0, -2.0, -3.0],
                [2.0, 2.0, 0.4, 0.5, 0.6, -4.0, -5.0, -6.0],
            ],
            [
                [1.0, 1.0, 1.1, 1.2, 1.3, 1.0, 2.0, 3.0],
                [2.0, 2.0, 1.4, 1.5, 1.6, 4.0, 5.0, 6.0],
            ],
        ]
    }

    #[test]
    fn split_folds_complete_triples_into_vectors() {
        let columns = names(&["id", "type", "x", "y", "z", "vx", "vy", "vz"]);
        let fields = split(sample_data().view(), &columns).unwrap();

        assert_eq!(
            fields.names().collect::<Vec<_>>(),
            vec!["id", "position", "type", "velocity"]
        );
        assert!(!fields.contains("x"));
        assert!(!fields.contains("vz"));

        let position = fields.position().unwrap();
        assert_eq!(position.shape(), &[2, 2, 3]);
        assert_eq!(position[[1, 0, 2]], 1.3);
        assert_eq!(fields.velocity().unwrap()[[0, 1, 1]], -5.0);
        assert_eq!(fields.id().unwrap(), array![[1i64, 2], [1, 2]]);
        assert_eq!(fields.scalar("type").unwrap().shape(), &[2, 2]);
    }

    #[test]
    fn split_keeps_incomplete_triples_as_scalars() {
        let columns = names(&["x", "y", "vx"]);
        let data = array![[[1.0, 2.0, 3.0]]];
        let fields = split(data.view(), &columns).unwrap();

        assert!(fields.position().is_none());
        assert!(fields.velocity().is_none());
        assert_eq!(fields.scalar("x").unwrap(), array![[1.0]]);
        assert_eq!(fields.scalar("vx").unwrap(), array![[3.0]]);
    }

    #[test]
    fn split_rejects_fractional_ids() {
        let columns = names(&["id", "x"]);
        let data = array![[[1.0, 0.0], [2.5, 0.0]]];
        let err = split(data.view(), &columns).unwrap_err();
        assert_eq!(
            err,
            Error::NonIntegerId {
                snapshot: 0,
                atom: 1,
                value: 2.5
            }
        );
    }

    #[test]
    fn split_rejects_column_count_mismatch() {
        let err = split(Array3::zeros((1, 1, 2)).view(), &names(&["x"])).unwrap_err();
        assert_eq!(err, Error::ShapeMismatch { expected: 1, found: 2 });
    }

    #[test]
    fn merge_inverts_split() {
        let columns = names(&["id", "type", "x", "y", "z", "vx", "vy", "vz"]);
        let data = sample_data();
        let fields = split(data.view(), &columns).unwrap();
        let merged = merge(&fields, &columns).unwrap();

        assert_eq!(merged.len(), columns.len());
        for (k, column) in merged.iter().enumerate() {
            assert_eq!(column, &data.index_axis(Axis(2), k));
        }
    }

    #[test]
    fn merge_prefers_direct_columns_over_vector_components() {
        let mut fields = ProjectedFields::new();
        fields.set_position(Array3::from_elem((1, 1, 3), 7.0));
        fields.insert("x", Field::Scalar(array![[-1.0]]));

        let merged = merge(&fields, &["x", "y"]).unwrap();
        assert_eq!(merged[0], array![[-1.0]]);
        assert_eq!(merged[1], array![[7.0]]);
    }

    #[test]
    fn merge_reports_missing_sources() {
        let fields = ProjectedFields::new();
        assert_eq!(
            merge(&fields, &["vy"]).unwrap_err(),
            Error::MissingField {
                name: "vy".into(),
                source_field: Some(VELOCITY)
            }
        );

        let err = merge(&fields, &["q"]).unwrap_err();
        assert_eq!(
            err,
            Error::MissingField {
                name: "q".into(),
                source_field: None
            }
        );
        assert_eq!(err.to_string(), "the field 'q' was not provided");
    }

    #[test]
    fn merge_rejects_wrong_field_kind() {
        let mut fields = ProjectedFields::new();
        fields.insert(POSITION, Field::Scalar(array![[0.0]]));
        let err = merge(&fields, &["x"]).unwrap_err();
        assert!(matches!(err, Error::FieldKind { expected: "vector", .. }));
    }
}
