use super::HEADER_LINES;
use crate::io::{Format, error::Error, util};
use crate::model::trajectory::{CustomHeader, CustomTrajectory};
use crate::model::types::{Boundary, SimulationBox};
use ndarray::Array3;
use std::io::BufRead;

const PREALLOC_ATOMS: usize = 4096;

struct BlockHeader {
    header: CustomHeader,
    timestep: Option<i64>,
}

/// Parses only the first header block.
pub fn read_header<R: BufRead>(reader: R) -> Result<CustomHeader, Error> {
    let mut lines = util::LineReader::new(reader);
    read_block_header(&mut lines)?
        .map(|block| block.header)
        .ok_or_else(|| Error::header(1, "input is empty"))
}

/// Parses every snapshot block until EOF.
///
/// With `sort_by_id` and an `id` column present, the rows of each snapshot are
/// ordered by ascending id.
pub fn read<R: BufRead>(reader: R, sort_by_id: bool) -> Result<CustomTrajectory, Error> {
    let mut lines = util::LineReader::new(reader);
    let first = read_block_header(&mut lines)?.ok_or_else(|| Error::header(1, "input is empty"))?;

    let header = first.header;
    let num_atoms = header.num_atoms;
    let num_columns = header.num_columns();
    let id_column = sort_by_id.then(|| header.column_index("id")).flatten();

    let mut data = Vec::new();
    let mut timesteps = vec![first.timestep];
    let mut snapshot = 0;

    loop {
        let rows = read_rows(&mut lines, snapshot, num_atoms, num_columns)?;
        match id_column {
            Some(col) => data.extend(sort_rows(&rows, num_columns, col)),
            None => data.extend(rows),
        }
        snapshot += 1;

        let Some(block) = read_block_header(&mut lines)? else {
            break;
        };
        let block_start = lines.line_no() + 1 - HEADER_LINES;
        if block.header.num_atoms != num_atoms {
            return Err(Error::header(
                block_start + 3,
                format!(
                    "snapshot {} has {} atoms, expected {}",
                    snapshot, block.header.num_atoms, num_atoms
                ),
            ));
        }
        if block.header.column_names != header.column_names {
            return Err(Error::header(
                block_start + 8,
                format!("snapshot {} changes the column names", snapshot),
            ));
        }
        timesteps.push(block.timestep);
    }

    let data = Array3::from_shape_vec((snapshot, num_atoms, num_columns), data)
        .map_err(|e| Error::InconsistentShape(e.to_string()))?;

    tracing::debug!(
        snapshots = snapshot,
        atoms = num_atoms,
        columns = num_columns,
        "parsed custom dump"
    );

    Ok(CustomTrajectory {
        header,
        timesteps: timesteps.into_iter().collect(),
        data,
    })
}

fn read_block_header<R: BufRead>(
    lines: &mut util::LineReader<R>,
) -> Result<Option<BlockHeader>, Error> {
    let mut raw: Vec<String> = Vec::with_capacity(HEADER_LINES);
    for i in 0..HEADER_LINES {
        match lines.next_line()? {
            Some((_, line)) => raw.push(line.to_string()),
            None if i == 0 => return Ok(None),
            None => {
                return Err(Error::header(
                    lines.line_no() + 1,
                    format!("header block truncated after {} lines", i),
                ));
            }
        }
    }
    let start = lines.line_no() + 1 - HEADER_LINES;

    let timestep = match util::tokens(&raw[1])[..] {
        [value] => value.parse::<i64>().ok(),
        _ => None,
    };

    let num_atoms = match util::tokens(&raw[3])[..] {
        [value] => value
            .parse::<usize>()
            .map_err(|_| Error::header(start + 3, format!("invalid atom count '{}'", value)))?,
        _ => return Err(Error::header(start + 3, "expected a single atom count")),
    };

    let boundary_tokens = util::tokens(&raw[4]);
    if boundary_tokens.len() != 6 || boundary_tokens[..3] != ["ITEM:", "BOX", "BOUNDS"] {
        return Err(Error::header(
            start + 4,
            "expected 'ITEM: BOX BOUNDS' followed by three boundary codes",
        ));
    }
    let boundary = Boundary::from_tokens(&boundary_tokens[3..])
        .map_err(|e| Error::header(start + 4, e.to_string()))?;

    let mut bounds = [[0.0; 2]; 3];
    for (axis, slot) in bounds.iter_mut().enumerate() {
        let line_no = start + 5 + axis;
        *slot = match util::tokens(&raw[5 + axis])[..] {
            [lo, hi] => match (util::parse_f64(lo), util::parse_f64(hi)) {
                (Some(lo), Some(hi)) => [lo, hi],
                _ => return Err(Error::header(line_no, "box bounds must be numeric")),
            },
            _ => return Err(Error::header(line_no, "expected a lo/hi pair of box bounds")),
        };
    }

    let column_tokens = util::tokens(&raw[8]);
    if column_tokens.len() < 3 || column_tokens[0] != "ITEM:" || column_tokens[1] != "ATOMS" {
        return Err(Error::header(
            start + 8,
            "expected 'ITEM: ATOMS' followed by column names",
        ));
    }
    let column_names = column_tokens[2..].iter().map(|s| s.to_string()).collect();

    Ok(Some(BlockHeader {
        header: CustomHeader {
            num_atoms,
            boundary,
            simulation_box: SimulationBox::new(bounds),
            column_names,
        },
        timestep,
    }))
}

fn read_rows<R: BufRead>(
    lines: &mut util::LineReader<R>,
    snapshot: usize,
    num_atoms: usize,
    num_columns: usize,
) -> Result<Vec<f64>, Error> {
    // The atom count is untrusted until the rows are actually there.
    let mut rows = Vec::with_capacity(num_atoms.min(PREALLOC_ATOMS) * num_columns);
    for found in 0..num_atoms {
        let Some((line_no, line)) = lines.next_line()? else {
            return Err(Error::ShortSnapshot {
                snapshot,
                expected: num_atoms,
                found,
            });
        };
        let before = rows.len();
        for token in util::tokens(line) {
            let value = util::parse_f64(token).ok_or_else(|| {
                Error::parse(
                    Format::Custom,
                    line_no,
                    format!("invalid numeric value '{}'", token),
                )
            })?;
            rows.push(value);
        }
        let count = rows.len() - before;
        if count != num_columns {
            return Err(Error::parse(
                Format::Custom,
                line_no,
                format!("expected {} values, found {}", num_columns, count),
            ));
        }
    }
    Ok(rows)
}

fn sort_rows(rows: &[f64], num_columns: usize, id_column: usize) -> Vec<f64> {
    let mut order: Vec<&[f64]> = rows.chunks_exact(num_columns).collect();
    order.sort_by(|a, b| a[id_column].total_cmp(&b[id_column]));
    order.concat()
}
