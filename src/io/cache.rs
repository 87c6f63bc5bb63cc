//! Binary sidecar cache for the numeric payload of a trajectory.
//!
//! Arrays are stored in the NumPy `.npy` format (`<f8`), so a sidecar written
//! here loads with `numpy.load` and vice versa. Only the payload is cached;
//! header metadata is always reparsed from the text file.

use super::{Format, error::Error, util};
use ndarray::{Array, ArrayBase, ArrayView, Data, Dimension};
use ndarray_npy::{ViewNpyExt, WriteNpyExt};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::mem;
use std::path::{Path, PathBuf};

pub const CUSTOM_SUFFIX: &str = "_custom.npy";
pub const XYZ_SUFFIX: &str = "_xyz.npy";

/// Sidecar path for `source`: the extension is replaced by the format's suffix.
pub fn cache_path(source: &Path, format: Format) -> PathBuf {
    let suffix = match format {
        Format::Custom => CUSTOM_SUFFIX,
        Format::Xyz => XYZ_SUFFIX,
    };
    util::with_suffix(source, suffix)
}

/// `true` iff the sidecar exists and is not older than its source.
pub fn is_valid(source: &Path, cache: &Path) -> bool {
    match (util::modified(cache), util::modified(source)) {
        (Ok(cache_time), Ok(source_time)) => cache_time >= source_time,
        _ => false,
    }
}

/// Writes `array` to `path`, replacing any existing file.
pub fn save<S, D>(path: &Path, array: &ArrayBase<S, D>) -> Result<(), Error>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let mut writer = BufWriter::new(File::create(path)?);
    array.write_npy(&mut writer).map_err(|e| Error::Io {
        source: io::Error::other(e.to_string()),
    })?;
    writer.flush()?;

    tracing::debug!(path = %path.display(), shape = ?array.shape(), "wrote cache");
    Ok(())
}

/// Reads an array of rank `D` from `path`.
///
/// The file is viewed in place before anything is copied, so the shape in its
/// header is checked against the bytes actually present. Any structural
/// problem (bad magic, unsupported dtype, short or long payload, wrong rank)
/// is reported as [`Error::CacheCorrupt`].
pub fn load<D: Dimension>(path: &Path) -> Result<Array<f64, D>, Error> {
    let mut raw = Vec::new();
    util::open_input(path)?.read_to_end(&mut raw)?;
    let corrupt = |details: String| Error::cache_corrupt(path, details);

    // Viewing needs the payload aligned for f64.
    let align = mem::align_of::<f64>();
    let mut buf = vec![0u8; raw.len() + align];
    let offset = buf.as_ptr().align_offset(align);
    if offset >= align {
        return Err(corrupt("cannot align payload buffer".into()));
    }
    let bytes = &mut buf[offset..offset + raw.len()];
    bytes.copy_from_slice(&raw);

    let view = ArrayView::<f64, D>::view_npy(bytes).map_err(|e| corrupt(e.to_string()))?;
    Ok(view.as_standard_layout().into_owned())
}
