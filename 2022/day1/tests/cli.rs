use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn missing_input_path_is_reported() {
    let mut cmd = Command::cargo_bin("day1").unwrap();

    cmd.assert()
        .success()
        .stdout(str::is_empty())
        .stderr(str::contains("must provide input file"));
}

#[test]
fn missing_part_is_reported() {
    let mut cmd = Command::cargo_bin("day1").unwrap();
    cmd.arg("inputs_example.txt");

    cmd.assert()
        .success()
        .stdout(str::is_empty())
        .stderr(str::contains("must provide part 'one' or 'two'"));
}

#[test]
fn unknown_part_prints_nothing() {
    let mut cmd = Command::cargo_bin("day1").unwrap();
    cmd.arg("inputs_example.txt").arg("three");

    cmd.assert().success().stdout(str::is_empty());
}

#[test]
fn malformed_input_fails() {
    let mut cmd = Command::cargo_bin("day1").unwrap();
    cmd.arg("inputs_malformed.txt").arg("one");

    cmd.assert()
        .failure()
        .stdout(str::is_empty())
        .stderr(str::contains("Invalid text(lots) for calories."));
}

#[test]
fn missing_input_file_fails() {
    let mut cmd = Command::cargo_bin("day1").unwrap();
    cmd.arg("no_such_inputs.txt").arg("two");

    cmd.assert()
        .failure()
        .stderr(str::contains("Failed to open given file(no_such_inputs.txt)."));
}
