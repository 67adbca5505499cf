use anyhow::Result;

fn main() -> Result<()> {
    toolkit::cli::run(day14::part_one, day14::part_two)
}
