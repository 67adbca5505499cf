use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part1_output_right_answer() {
    let mut cmd = Command::cargo_bin("day3").unwrap();
    cmd.arg("inputs_example.txt").arg("one");

    cmd.assert().success().stdout(str::diff("157\n"));
}
