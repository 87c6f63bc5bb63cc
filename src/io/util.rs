use super::error::Error;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Splits a line into whitespace-delimited tokens; runs of blanks yield no
/// empty tokens.
pub fn tokens(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Line-at-a-time reader that keeps track of the 1-based line number.
pub struct LineReader<R> {
    reader: R,
    buf: String,
    line_no: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line_no: 0,
        }
    }

    /// Returns the next line number and line without its terminator, or
    /// `None` at EOF.
    pub fn next_line(&mut self) -> Result<Option<(usize, &str)>, Error> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        Ok(Some((self.line_no, self.buf.trim_end_matches(['\n', '\r']))))
    }

    /// Line number of the line most recently returned by [`next_line`](Self::next_line).
    #[inline]
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

pub fn parse_f64(token: &str) -> Option<f64> {
    token.parse::<f64>().ok()
}

pub fn open_input(path: &Path) -> Result<BufReader<File>, Error> {
    File::open(path).map(BufReader::new).map_err(|e| not_found_or(e, path))
}

pub fn create_output(path: &Path, append: bool) -> Result<BufWriter<File>, Error> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .append(append)
        .truncate(!append)
        .open(path)?;
    Ok(BufWriter::new(file))
}

pub fn modified(path: &Path) -> Result<SystemTime, Error> {
    let meta = std::fs::metadata(path).map_err(|e| not_found_or(e, path))?;
    Ok(meta.modified()?)
}

fn not_found_or(e: io::Error, path: &Path) -> Error {
    if e.kind() == io::ErrorKind::NotFound {
        Error::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        Error::Io { source: e }
    }
}

/// Replaces the extension of `path` with `suffix`, e.g. `run.dump` + `_custom.npy`
/// gives `run_custom.npy`.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default();
    path.with_file_name(format!("{}{}", stem.to_string_lossy(), suffix))
}

/// Appends `.{extension}` unless the file name already ends with it
/// (case-insensitive). A leading dot in `extension` is optional.
pub fn ensure_extension(path: &Path, extension: &str) -> PathBuf {
    let ext = extension.trim_start_matches('.').to_lowercase();
    if ext.is_empty() {
        return path.to_path_buf();
    }
    let dotted = format!(".{ext}");
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if name.ends_with(&dotted) {
        path.to_path_buf()
    } else {
        let mut s = path.as_os_str().to_os_string();
        s.push(&dotted);
        PathBuf::from(s)
    }
}
