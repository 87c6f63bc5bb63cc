use anyhow::{Context, Result, bail};
use lmpio::{
    CacheOptions, CustomTrajectory, CustomWriteOptions, Format, LoadOptions, XyzTrajectory,
    XyzWriteOptions, load_custom, load_xyz, write_custom, write_xyz,
};
use ndarray::Array3;

use crate::cli::ConvertArgs;
use crate::display::{Context as DisplayContext, Progress};

const TOTAL_STEPS: u8 = 2;

pub fn run_convert(args: ConvertArgs, ctx: DisplayContext) -> Result<()> {
    let input_format = Format::from_path(&args.input);
    let output_format = Format::from_path(&args.output);

    if input_format == Format::Xyz && output_format == Format::Custom {
        bail!(
            "Cannot write '{}' as a custom dump: xyz input carries no box, boundary or columns",
            args.output.display()
        );
    }

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);
    let load_context = || format!("Failed to load '{}'", args.input.display());
    let write_context = || format!("Failed to write '{}'", args.output.display());

    progress.step("Reading trajectory");
    let written = match input_format {
        Format::Custom => {
            let options = LoadOptions {
                sort_by_id: !args.no_sort,
                ..LoadOptions::default()
            };
            let trajectory = load_custom(&args.input, &options)
                .with_context(load_context)?
                .into_raw()
                .context("custom data was projected into fields")?;
            progress.complete_step(
                "Reading trajectory",
                &[summary(trajectory.num_snapshots(), trajectory.num_atoms())],
            );

            progress.step("Writing output");
            match output_format {
                Format::Custom => {
                    let options = CustomWriteOptions {
                        extension: None,
                        ..CustomWriteOptions::default()
                    };
                    write_custom(&args.output, &trajectory, &options).with_context(write_context)?
                }
                Format::Xyz => {
                    let xyz = custom_to_xyz(&trajectory, &args.type_column)?;
                    write_xyz(&args.output, &xyz, &XyzWriteOptions { add_extension: false })
                        .with_context(write_context)?
                }
            }
        }
        Format::Xyz => {
            let trajectory =
                load_xyz(&args.input, &CacheOptions::default()).with_context(load_context)?;
            progress.complete_step(
                "Reading trajectory",
                &[summary(trajectory.num_snapshots(), trajectory.num_atoms())],
            );

            progress.step("Writing output");
            write_xyz(&args.output, &trajectory, &XyzWriteOptions { add_extension: false })
                .with_context(write_context)?
        }
    };
    progress.complete_step("Writing output", &[written.display().to_string()]);

    progress.finish();
    Ok(())
}

fn summary(snapshots: usize, atoms: usize) -> String {
    format!("{} snapshots × {} atoms", snapshots, atoms)
}

/// Builds an xyz trajectory from the `x y z` columns, labelling atoms with the
/// first snapshot's values of `type_column`.
fn custom_to_xyz(trajectory: &CustomTrajectory, type_column: &str) -> Result<XyzTrajectory> {
    let header = &trajectory.header;
    let missing = |name: &str| {
        format!(
            "Column '{}' is required for xyz output (have: {})",
            name,
            header.column_names.join(" ")
        )
    };

    let types = trajectory
        .column(type_column)
        .with_context(|| missing(type_column))?;
    let mut axes = [0usize; 3];
    for (slot, name) in axes.iter_mut().zip(["x", "y", "z"]) {
        *slot = header.column_index(name).with_context(|| missing(name))?;
    }

    let labels = types
        .outer_iter()
        .next()
        .map(|row| row.iter().map(|&v| type_label(v)).collect())
        .unwrap_or_default();

    let (snapshots, atoms, _) = trajectory.data.dim();
    let positions = Array3::from_shape_fn((snapshots, atoms, 3), |(s, a, k)| {
        trajectory.data[[s, a, axes[k]]]
    });

    Ok(XyzTrajectory {
        types: labels,
        positions,
    })
}

fn type_label(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
