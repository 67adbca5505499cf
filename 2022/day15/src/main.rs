use anyhow::Result;
use clap::Parser;
use day15::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    toolkit::cli::dispatch(
        &args.common,
        |path| day15::part_one(path, args.row),
        |path| day15::part_two(path, args.max_coord),
    )
}
