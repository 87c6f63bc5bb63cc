use anyhow::{Context, Result};
use lmpio::io::cache;
use lmpio::{Format, LoadOptions, read_custom, read_xyz};

use crate::cli::CacheArgs;
use crate::display::{Context as DisplayContext, Progress};

const TOTAL_STEPS: u8 = 2;

pub fn run_cache(args: CacheArgs, ctx: DisplayContext) -> Result<()> {
    let format = Format::from_path(&args.input);
    let sidecar = cache::cache_path(&args.input, format);
    let read_context = || format!("Failed to parse '{}'", args.input.display());

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Parsing trajectory");
    let data = match format {
        Format::Custom => {
            let options = LoadOptions {
                sort_by_id: !args.no_sort,
                ..LoadOptions::default()
            };
            read_custom(&args.input, &options)
                .with_context(read_context)?
                .into_raw()
                .context("custom data was projected into fields")?
                .data
        }
        Format::Xyz => read_xyz(&args.input).with_context(read_context)?.positions,
    };
    let (snapshots, atoms, width) = data.dim();
    progress.complete_step(
        "Parsing trajectory",
        &[format!("{} snapshots × {} atoms × {}", snapshots, atoms, width)],
    );

    progress.step("Writing cache");
    cache::save(&sidecar, &data)
        .with_context(|| format!("Failed to write cache '{}'", sidecar.display()))?;
    progress.complete_step("Writing cache", &[sidecar.display().to_string()]);

    progress.finish();
    Ok(())
}
