//! Reading, caching and writing of trajectory files.
//!
//! The `load_*` functions consult the binary sidecar cache first and fall back
//! to a full text parse; the `read_*` functions always parse the text. Cache
//! problems (stale, unreadable, or inconsistent sidecars) are never reported
//! to the caller: they are logged and the text file is parsed instead.

use std::fmt;
use std::path::{Path, PathBuf};

use ndarray::{Array3, Ix3};

use crate::model::fields::CustomFields;
use crate::model::trajectory::{CustomHeader, CustomTrajectory, XyzTrajectory};
use crate::model::types::Boundary;
use crate::project;

pub mod cache;
pub mod custom;
pub mod error;
pub mod util;
pub mod xyz;

pub use custom::writer::CustomSource;
pub use error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Custom,
    Xyz,
}

impl Format {
    /// `.xyz` (any case) is xyz; everything else is treated as a custom dump.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xyz") => Format::Xyz,
            _ => Format::Custom,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Custom => write!(f, "custom"),
            Format::Xyz => write!(f, "xyz"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    /// Write the sidecar after a full parse.
    pub save: bool,
    /// Use an up-to-date sidecar instead of parsing the text.
    pub use_existing: bool,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            save: true,
            use_existing: true,
        }
    }
}

impl CacheOptions {
    pub fn disabled() -> Self {
        Self {
            save: false,
            use_existing: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub cache: CacheOptions,
    pub sort_by_id: bool,
    pub split_fields: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            cache: CacheOptions::default(),
            sort_by_id: true,
            split_fields: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomWriteOptions {
    /// Appended to the output name unless it already ends with it.
    pub extension: Option<String>,
    pub append: bool,
    /// Used when the data carries no boundary of its own.
    pub default_boundary: Option<Boundary>,
}

impl Default for CustomWriteOptions {
    fn default() -> Self {
        Self {
            extension: Some("custom".to_string()),
            append: false,
            default_boundary: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XyzWriteOptions {
    pub add_extension: bool,
}

impl Default for XyzWriteOptions {
    fn default() -> Self {
        Self {
            add_extension: true,
        }
    }
}

/// A loaded custom dump, either raw or projected into named fields.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomData {
    Raw(CustomTrajectory),
    Split(CustomFields),
}

impl CustomData {
    pub fn raw(&self) -> Option<&CustomTrajectory> {
        match self {
            CustomData::Raw(t) => Some(t),
            CustomData::Split(_) => None,
        }
    }

    pub fn fields(&self) -> Option<&CustomFields> {
        match self {
            CustomData::Raw(_) => None,
            CustomData::Split(f) => Some(f),
        }
    }

    pub fn into_raw(self) -> Option<CustomTrajectory> {
        match self {
            CustomData::Raw(t) => Some(t),
            CustomData::Split(_) => None,
        }
    }

    /// Projected fields, splitting a raw trajectory if needed.
    pub fn into_fields(self) -> Result<CustomFields, Error> {
        match self {
            CustomData::Raw(t) => Ok(project::split_trajectory(t)?),
            CustomData::Split(f) => Ok(f),
        }
    }

    pub fn column_names(&self) -> &[String] {
        match self {
            CustomData::Raw(t) => &t.header.column_names,
            CustomData::Split(f) => &f.column_names,
        }
    }

    pub fn timesteps(&self) -> Option<&[i64]> {
        match self {
            CustomData::Raw(t) => t.timesteps.as_deref(),
            CustomData::Split(f) => f.timesteps.as_deref(),
        }
    }
}

/// Parses the header of the first snapshot only.
pub fn read_specs(path: impl AsRef<Path>) -> Result<CustomHeader, Error> {
    custom::reader::read_header(util::open_input(path.as_ref())?)
}

/// Parses the whole custom dump.
///
/// Only `sort_by_id` and `split_fields` apply; `options.cache` is ignored and
/// no sidecar is read or written.
pub fn read_custom(path: impl AsRef<Path>, options: &LoadOptions) -> Result<CustomData, Error> {
    let trajectory = parse_custom(path.as_ref(), options.sort_by_id)?;
    finish_custom(trajectory, options.split_fields)
}

/// Loads a custom dump through its `_custom.npy` sidecar when that is up to
/// date, otherwise parses the text and (optionally) refreshes the sidecar.
pub fn load_custom(path: impl AsRef<Path>, options: &LoadOptions) -> Result<CustomData, Error> {
    let path = path.as_ref();
    let sidecar = cache::cache_path(path, Format::Custom);

    let cached = if options.cache.use_existing && cache::is_valid(path, &sidecar) {
        cached_custom(path, &sidecar)?
    } else {
        None
    };

    let trajectory = match cached {
        Some(trajectory) => trajectory,
        None => {
            let trajectory = parse_custom(path, options.sort_by_id)?;
            if options.cache.save {
                store(&sidecar, &trajectory.data);
            }
            trajectory
        }
    };

    finish_custom(trajectory, options.split_fields)
}

/// Writes `data` to `path` (with the configured extension appended) and
/// returns the path actually written.
pub fn write_custom<T: CustomSource>(
    path: impl AsRef<Path>,
    data: &T,
    options: &CustomWriteOptions,
) -> Result<PathBuf, Error> {
    let path = match options.extension.as_deref() {
        Some(ext) => util::ensure_extension(path.as_ref(), ext),
        None => path.as_ref().to_path_buf(),
    };
    let writer = util::create_output(&path, options.append)?;
    data.write_custom(writer, options.default_boundary.as_ref())?;
    Ok(path)
}

/// Parses the whole xyz file, ignoring any cache.
pub fn read_xyz(path: impl AsRef<Path>) -> Result<XyzTrajectory, Error> {
    let path = path.as_ref();
    tracing::info!("reading '{}'", path.display());
    xyz::reader::read(util::open_input(path)?)
}

/// Type labels of the first snapshot of an xyz file.
pub fn read_xyz_atomtypes(path: impl AsRef<Path>) -> Result<Vec<String>, Error> {
    xyz::reader::read_types(util::open_input(path.as_ref())?)
}

/// Loads an xyz file through its `_xyz.npy` sidecar when that is up to date.
pub fn load_xyz(path: impl AsRef<Path>, options: &CacheOptions) -> Result<XyzTrajectory, Error> {
    let path = path.as_ref();
    let sidecar = cache::cache_path(path, Format::Xyz);

    if options.use_existing && cache::is_valid(path, &sidecar) {
        if let Some(trajectory) = cached_xyz(path, &sidecar)? {
            return Ok(trajectory);
        }
    }

    let trajectory = read_xyz(path)?;
    if options.save {
        store(&sidecar, &trajectory.positions);
    }
    Ok(trajectory)
}

/// Positions `[snapshot, atom, xyz]` of the atoms whose type is in `selected`.
pub fn load_pos_of_type<S: AsRef<str>>(
    path: impl AsRef<Path>,
    selected: &[S],
    options: &CacheOptions,
) -> Result<Array3<f64>, Error> {
    Ok(load_xyz(path, options)?.positions_of_types(selected))
}

/// Writes an xyz trajectory and returns the path actually written.
pub fn write_xyz(
    path: impl AsRef<Path>,
    trajectory: &XyzTrajectory,
    options: &XyzWriteOptions,
) -> Result<PathBuf, Error> {
    let path = if options.add_extension {
        util::ensure_extension(path.as_ref(), "xyz")
    } else {
        path.as_ref().to_path_buf()
    };
    xyz::writer::write(util::create_output(&path, false)?, trajectory)?;
    Ok(path)
}

fn parse_custom(path: &Path, sort_by_id: bool) -> Result<CustomTrajectory, Error> {
    tracing::info!("reading '{}'", path.display());
    custom::reader::read(util::open_input(path)?, sort_by_id)
}

fn finish_custom(trajectory: CustomTrajectory, split: bool) -> Result<CustomData, Error> {
    if split {
        Ok(CustomData::Split(project::split_trajectory(trajectory)?))
    } else {
        Ok(CustomData::Raw(trajectory))
    }
}

fn cached_custom(path: &Path, sidecar: &Path) -> Result<Option<CustomTrajectory>, Error> {
    let header = read_specs(path)?;
    tracing::info!("loading data from '{}'", sidecar.display());

    let data = match cache::load::<Ix3>(sidecar) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("ignoring cache '{}': {}", sidecar.display(), e);
            return Ok(None);
        }
    };

    let (_, atoms, columns) = data.dim();
    if atoms != header.num_atoms || columns != header.num_columns() {
        tracing::warn!(
            "ignoring cache '{}': shape {:?} does not match {} atoms x {} columns",
            sidecar.display(),
            data.shape(),
            header.num_atoms,
            header.num_columns()
        );
        return Ok(None);
    }

    Ok(Some(CustomTrajectory {
        header,
        timesteps: None,
        data,
    }))
}

fn cached_xyz(path: &Path, sidecar: &Path) -> Result<Option<XyzTrajectory>, Error> {
    let types = read_xyz_atomtypes(path)?;
    tracing::info!("loading positions from '{}'", sidecar.display());

    let positions = match cache::load::<Ix3>(sidecar) {
        Ok(positions) => positions,
        Err(e) => {
            tracing::warn!("ignoring cache '{}': {}", sidecar.display(), e);
            return Ok(None);
        }
    };

    let (_, atoms, components) = positions.dim();
    if atoms != types.len() || components != 3 {
        tracing::warn!(
            "ignoring cache '{}': shape {:?} does not match {} atoms",
            sidecar.display(),
            positions.shape(),
            types.len()
        );
        return Ok(None);
    }

    Ok(Some(XyzTrajectory { types, positions }))
}

fn store(sidecar: &Path, data: &Array3<f64>) {
    if let Err(e) = cache::save(sidecar, data) {
        tracing::warn!("could not write cache '{}': {}", sidecar.display(), e);
    }
}
