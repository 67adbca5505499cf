use anyhow::Result;

fn main() -> Result<()> {
    toolkit::cli::run(day8::part_one, day8::part_two)
}
