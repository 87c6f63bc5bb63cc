//! Data model for materialized trajectories.
//!
//! - [`types`] – Boundary codes and the orthogonal simulation box.
//! - [`trajectory`] – Raw custom-dump and xyz trajectories backed by `ndarray`
//!   arrays with axis order `[snapshot, atom, column]`.
//! - [`fields`] – Named projected fields (`position`, `velocity`, `id`, ...)
//!   derived from raw custom columns.
//!
//! Raw trajectories come straight from the readers or the binary cache;
//! projected fields are produced by [`crate::project::split`] and consumed by
//! the custom writer through [`crate::project::merge`].

pub mod fields;
pub mod trajectory;
pub mod types;
