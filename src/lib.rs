//! Readers, writers and a binary sidecar cache for LAMMPS `custom` dump and
//! multi-snapshot xyz trajectories.
//!
//! Text trajectories are materialized into `ndarray` arrays indexed
//! `[snapshot, atom, column]`. Because parsing large dumps is slow, the numeric
//! payload can be cached next to the source file as a NumPy `.npy` sidecar
//! that is reused for as long as it is not older than the text file.
//!
//! # Quick Start
//!
//! ```no_run
//! use lmpio::{LoadOptions, load_custom, write_custom, CustomWriteOptions};
//!
//! let options = LoadOptions {
//!     split_fields: true,
//!     ..Default::default()
//! };
//! let dump = load_custom("run.dump", &options)?;
//! let fields = dump.fields().expect("split requested");
//!
//! if let Some(position) = fields.fields.position() {
//!     println!("{} snapshots of {} atoms", position.shape()[0], position.shape()[1]);
//! }
//!
//! write_custom("copy", fields, &CustomWriteOptions::default())?;
//! # Ok::<(), lmpio::Error>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] — Loader facade, cache, and per-format readers/writers
//! - [`project`] — Projection of raw columns into `position`/`velocity`/`id`
//!   fields and back
//!
//! # Data Types
//!
//! - [`CustomHeader`] — Atom count, boundary, box, and column names
//! - [`CustomTrajectory`] — Header plus the raw `[snapshot, atom, column]` data
//! - [`XyzTrajectory`] — Per-atom type labels plus `[snapshot, atom, xyz]` positions
//! - [`CustomFields`] / [`ProjectedFields`] / [`Field`] — Projected named fields
//! - [`Boundary`] / [`SimulationBox`] — Cell description

mod model;

pub mod io;
pub mod project;

pub use model::fields::{CustomFields, Field, ID, POSITION, ProjectedFields, VELOCITY};
pub use model::trajectory::{CustomHeader, CustomTrajectory, XyzTrajectory};
pub use model::types::{Boundary, ParseBoundaryError, SimulationBox};

pub use io::{
    CacheOptions, CustomData, CustomSource, CustomWriteOptions, Error, Format, LoadOptions,
    XyzWriteOptions, load_custom, load_pos_of_type, load_xyz, read_custom, read_specs, read_xyz,
    read_xyz_atomtypes, write_custom, write_xyz,
};

pub use project::Error as ProjectionError;
