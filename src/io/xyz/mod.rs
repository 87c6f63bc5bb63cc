//! Multi-snapshot xyz files: each snapshot is a run of `type x y z` lines,
//! separated by count and comment lines.

pub mod reader;
pub mod writer;
