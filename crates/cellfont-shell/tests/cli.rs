use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn help_lists_options() {
    Command::cargo_bin("cellfont")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--font"))
        .stdout(contains("--scale"));
}

#[test]
fn zero_scale_is_rejected() {
    Command::cargo_bin("cellfont")
        .unwrap()
        .args(["--scale", "0"])
        .assert()
        .failure()
        .stderr(contains("--scale"));
}

#[test]
fn non_numeric_cols_is_rejected() {
    Command::cargo_bin("cellfont")
        .unwrap()
        .args(["--cols", "wide"])
        .assert()
        .failure();
}
