use anyhow::Result;

fn main() -> Result<()> {
    toolkit::cli::run(day9::part_one, day9::part_two)
}
