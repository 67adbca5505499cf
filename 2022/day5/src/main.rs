use anyhow::Result;

fn main() -> Result<()> {
    toolkit::cli::run(day5::part_one, day5::part_two)
}
