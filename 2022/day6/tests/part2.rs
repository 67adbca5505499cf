use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part2_output_right_answer() {
    let mut cmd = Command::cargo_bin("day6").unwrap();
    cmd.arg("inputs_example.txt").arg("two");

    cmd.assert().success().stdout(str::diff("19\n23\n23\n"));
}
