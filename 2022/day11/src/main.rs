use anyhow::Result;

fn main() -> Result<()> {
    toolkit::cli::run(day11::part_one, day11::part_two)
}
