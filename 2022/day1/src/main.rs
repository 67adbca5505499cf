use anyhow::Result;

fn main() -> Result<()> {
    toolkit::cli::run(day1::part_one, day1::part_two)
}
