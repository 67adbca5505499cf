use anyhow::Result;

fn main() -> Result<()> {
    toolkit::cli::run(day3::part_one, day3::part_two)
}
