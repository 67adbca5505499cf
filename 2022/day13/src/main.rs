use anyhow::Result;

fn main() -> Result<()> {
    toolkit::cli::run(day13::part_one, day13::part_two)
}
