use anyhow::Result;

fn main() -> Result<()> {
    toolkit::cli::run(day12::part_one, day12::part_two)
}
