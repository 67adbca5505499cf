use anyhow::Result;

fn main() -> Result<()> {
    toolkit::cli::run(day7::part_one, day7::part_two)
}
