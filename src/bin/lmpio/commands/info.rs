use std::io;

use anyhow::{Context, Result};
use lmpio::{CacheOptions, Format, LoadOptions, load_custom, load_xyz};

use crate::cli::InfoArgs;
use crate::display::{Context as DisplayContext, Progress, print_custom_summary, print_xyz_summary};

pub fn run_info(args: InfoArgs, ctx: DisplayContext) -> Result<()> {
    let cache = if args.no_cache {
        CacheOptions::disabled()
    } else {
        CacheOptions::default()
    };

    let mut progress = Progress::new(ctx.interactive, 1);
    progress.step("Loading trajectory");

    let mut out = io::stdout().lock();
    match Format::from_path(&args.input) {
        Format::Custom => {
            let options = LoadOptions {
                cache,
                ..LoadOptions::default()
            };
            let trajectory = load_custom(&args.input, &options)
                .with_context(|| format!("Failed to load '{}'", args.input.display()))?
                .into_raw()
                .context("custom data was projected into fields")?;
            progress.complete_step("Loading trajectory", &[]);
            progress.finish();

            print_custom_summary(
                &mut out,
                &trajectory.header,
                trajectory.num_snapshots(),
                trajectory.timesteps.as_deref(),
            );
        }
        Format::Xyz => {
            let trajectory = load_xyz(&args.input, &cache)
                .with_context(|| format!("Failed to load '{}'", args.input.display()))?;
            progress.complete_step("Loading trajectory", &[]);
            progress.finish();

            print_xyz_summary(&mut out, &trajectory);
        }
    }

    Ok(())
}
