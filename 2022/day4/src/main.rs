use anyhow::Result;

fn main() -> Result<()> {
    toolkit::cli::run(day4::part_one, day4::part_two)
}
