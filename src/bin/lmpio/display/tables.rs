use std::collections::BTreeMap;
use std::io::Write;

use lmpio::{CustomHeader, XyzTrajectory};

use crate::util::text::truncate;

const INDENT: &str = "  ";
const KEY_W: usize = 16;
const VAL_W: usize = 40;

pub fn print_custom_summary(
    out: &mut impl Write,
    header: &CustomHeader,
    num_snapshots: usize,
    timesteps: Option<&[i64]>,
) {
    let bx = &header.simulation_box;
    let mut rows = vec![
        ("Format", "custom".to_string()),
        ("Atoms", header.num_atoms.to_string()),
        ("Snapshots", num_snapshots.to_string()),
        ("Columns", header.column_names.join(" ")),
        ("Boundary", header.boundary.to_string()),
    ];
    for (axis, label) in ["Box x", "Box y", "Box z"].into_iter().enumerate() {
        rows.push((label, format!("{} {}", bx.lo(axis), bx.hi(axis))));
    }
    if let Some(ts) = timesteps.filter(|ts| !ts.is_empty()) {
        rows.push(("Timesteps", format!("{} .. {}", ts[0], ts[ts.len() - 1])));
    }

    print_kv_table(out, "Trajectory Summary", &rows);
}

pub fn print_xyz_summary(out: &mut impl Write, trajectory: &XyzTrajectory) {
    let rows = vec![
        ("Format", "xyz".to_string()),
        ("Atoms", trajectory.num_atoms().to_string()),
        ("Snapshots", trajectory.num_snapshots().to_string()),
    ];
    print_kv_table(out, "Trajectory Summary", &rows);

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for t in &trajectory.types {
        *counts.entry(t.as_str()).or_insert(0) += 1;
    }
    let mut sorted: Vec<_> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    print_distribution_table(out, "Type Distribution", &sorted, trajectory.num_atoms());
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let _ = writeln!(out, "{}┌─ {} ─┐", INDENT, title);
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(KEY_W + 2),
        v_line = "─".repeat(VAL_W + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<KEY_W$} │ {:<VAL_W$} │",
            INDENT,
            truncate(key, KEY_W),
            truncate(val, VAL_W),
        );
    }

    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(KEY_W + 2),
        v_line = "─".repeat(VAL_W + 2)
    );
}

fn print_distribution_table(
    out: &mut impl Write,
    title: &str,
    data: &[(&str, usize)],
    total: usize,
) {
    let name_w = 10usize;
    let count_w = 8usize;
    let dist_w = KEY_W + VAL_W - name_w - count_w;
    let max_bar_width = dist_w.saturating_sub(8).min(20);

    let _ = writeln!(out, "{}┌─ {} ─┐", INDENT, title);
    let _ = writeln!(
        out,
        "{}┌{}┬{}┬{}┐",
        INDENT,
        "─".repeat(name_w + 2),
        "─".repeat(count_w + 2),
        "─".repeat(dist_w + 2)
    );

    for (name, count) in data.iter().take(15) {
        let pct = if total == 0 {
            0.0
        } else {
            (*count as f64 / total as f64) * 100.0
        };
        let dist_cell = format!("{}  {:>5.1}%", make_bar(pct, max_bar_width), pct);
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            INDENT,
            truncate(name, name_w),
            count,
            dist_cell,
        );
    }

    if data.len() > 15 {
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            INDENT,
            "...",
            "...",
            format!("({} more types)", data.len() - 15),
        );
    }

    let _ = writeln!(
        out,
        "{}└{}┴{}┴{}┘",
        INDENT,
        "─".repeat(name_w + 2),
        "─".repeat(count_w + 2),
        "─".repeat(dist_w + 2)
    );
}

fn make_bar(pct: f64, max_width: usize) -> String {
    let filled = ((pct / 100.0) * max_width as f64).round() as usize;
    let empty = max_width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
