use anyhow::Result;

fn main() -> Result<()> {
    toolkit::cli::run(day10::part_one, day10::part_two)
}
