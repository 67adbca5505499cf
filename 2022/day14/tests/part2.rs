use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part2_output_right_answer() {
    let mut cmd = Command::cargo_bin("day14").unwrap();
    cmd.arg("inputs_example.txt").arg("two");

    cmd.assert().success().stdout(str::diff("93\n"));
}
