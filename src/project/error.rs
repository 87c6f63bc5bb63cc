use thiserror::Error;

/// Errors raised while projecting raw columns into named fields or back.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// A column requested for merging is absent, and so is the vector field
    /// it could have been sliced from (if it has one).
    #[error("the field '{name}' was not provided{}", also_missing(.source_field))]
    MissingField {
        name: String,
        source_field: Option<&'static str>,
    },

    #[error("id value {value} at snapshot {snapshot}, atom {atom} is not a whole number")]
    NonIntegerId {
        snapshot: usize,
        atom: usize,
        value: f64,
    },

    #[error("field '{name}' is a {found} field, expected {expected}")]
    FieldKind {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("data holds {found} columns but {expected} column names were given")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("vector field '{name}' has {found} components, need at least {needed}")]
    TooFewComponents {
        name: String,
        needed: usize,
        found: usize,
    },
}

fn also_missing(source_field: &Option<&'static str>) -> String {
    match source_field {
        Some(field) => format!(" (nor '{}')", field),
        None => String::new(),
    }
}
