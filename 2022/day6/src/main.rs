use anyhow::Result;

fn main() -> Result<()> {
    toolkit::cli::run(day6::part_one, day6::part_two)
}
