mod cache;
mod convert;
mod info;

use cache::run_cache;
use convert::run_convert;
use info::run_info;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Info(args) => run_info(args, ctx),
        Command::Cache(args) => run_cache(args, ctx),
        Command::Convert(args) => run_convert(args, ctx),
    }
}
