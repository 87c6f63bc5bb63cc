//! LAMMPS `custom` dump files: repeating 9-line headers, each followed by one
//! line per atom with the columns named in the `ITEM: ATOMS` line.

pub mod reader;
pub mod writer;

pub(crate) const HEADER_LINES: usize = 9;
