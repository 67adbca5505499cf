use anyhow::Result;

fn main() -> Result<()> {
    toolkit::cli::run(day2::part_one, day2::part_two)
}
