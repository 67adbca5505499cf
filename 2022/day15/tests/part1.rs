use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part1_output_right_answer() {
    let mut cmd = Command::cargo_bin("day15").unwrap();
    cmd.arg("inputs_example.txt").arg("one").args(["--row", "10"]);

    cmd.assert().success().stdout(str::diff("26\n"));
}
