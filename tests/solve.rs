use assert_cmd::Command;
use predicates::prelude::predicate::str;

// The example file holds two machines:
//   [##] (0) (1) (0,1) {2,3}  -> light minimum 1, counter minimum 3
//   [.#] (1) (0,1) {4,4}      -> light minimum 1, counter minimum 4

#[test]
fn solve_reports_both_totals() {
    let mut cmd = Command::cargo_bin("machine-solver").unwrap();
    cmd.arg("solve").arg("tests/data/example.txt");

    cmd.assert()
        .success()
        .stdout(str::contains("\"lightPressTotal\": 2"))
        .stdout(str::contains("\"resolvedSum\": 7"))
        .stdout(str::contains("\"resolvedCount\": 2"))
        .stdout(str::contains("\"unresolved\": []"));
}

#[test]
fn solve_reads_machines_from_stdin() {
    let mut cmd = Command::cargo_bin("machine-solver").unwrap();
    cmd.arg("solve").arg("--stdin");
    cmd.write_stdin("(0) (1) (0,1) {2,3}\n");

    cmd.assert()
        .success()
        .stdout(str::contains("\"resolvedSum\": 3"))
        .stdout(str::contains("\"lightPressTotal\": 0"));
}

#[test]
fn tiny_node_limit_leaves_machines_unresolved() {
    let mut cmd = Command::cargo_bin("machine-solver").unwrap();
    cmd.arg("solve")
        .arg("tests/data/example.txt")
        .arg("--node-limit")
        .arg("1");

    // Unresolved machines flip the exit code and stay out of the sum.
    cmd.assert()
        .failure()
        .stdout(str::contains("\"resolvedSum\": 0"))
        .stdout(str::contains("\"resolvedCount\": 0"))
        .stderr(str::contains("budget exceeded"));
}

#[test]
fn cache_overrides_search() {
    let mut cmd = Command::cargo_bin("machine-solver").unwrap();
    cmd.arg("solve")
        .arg("tests/data/example.txt")
        .arg("--cache")
        .arg("tests/data/cache.json");

    cmd.assert()
        .success()
        .stdout(str::contains("\"resolvedSum\": 104"))
        .stdout(str::contains("\"cachedCount\": 1"))
        .stderr(str::contains("machine 1: cached => 100"));
}

#[test]
fn infeasible_machine_aborts_the_run() {
    let mut cmd = Command::cargo_bin("machine-solver").unwrap();
    cmd.arg("solve").arg("tests/data/infeasible.txt");

    cmd.assert()
        .failure()
        .stderr(str::contains("infeasible"));
}

#[test]
fn malformed_line_aborts_input_loading() {
    let mut cmd = Command::cargo_bin("machine-solver").unwrap();
    cmd.arg("solve").arg("--stdin");
    cmd.write_stdin("(0) (1)\n");

    cmd.assert()
        .failure()
        .stderr(str::contains("line 1"));
}
