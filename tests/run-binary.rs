use assert_cmd::prelude::*;
use std::process::Command;

fn binary() -> Command {
    Command::cargo_bin("sokoban-search").unwrap()
}

#[test]
fn run_beam_xsb() {
    let output = r"Solving levels/01-one-way.txt using beam-search with the manhattan heuristic...
Expanded states: 5
Iterations: 4
Restarts: 0
Largest frontier: 2

Found solution:
#######
#@ $ .#
#######

#######
# @$ .#
#######

#######
#  @$.#
#######

#######
#   @*#
#######

3 moves
";

    binary()
        .arg("levels/01-one-way.txt")
        .assert()
        .success()
        .stdout(output)
        .stderr("");
}

#[test]
fn run_lrta_custom() {
    let output = r"Solving levels/06-custom.txt using lrta-star with the manhattan heuristic...
Expanded states: 5
Iterations: 3
Trials: 1
Learned estimates: 5

Found solution:
<><><><><><><>
<>P   B    _<>
<><><><><><><>

<><><><><><><>
<>  P B    _<>
<><><><><><><>

<><><><><><><>
<>    P B  _<>
<><><><><><><>

<><><><><><><>
<>      P B_<>
<><><><><><><>

3 moves
";

    binary()
        .arg("--method")
        .arg("lrta")
        .arg("--custom")
        .arg("levels/06-custom.txt")
        .assert()
        .success()
        .stdout(output)
        .stderr("");
}

#[test]
fn run_unsolvable_quiet() {
    let output = r"Solving levels/05-no-solution.txt using lrta-star with the improved heuristic...
Expanded states: 21
Iterations: 6
Trials: 3
Learned estimates: 7

No solution found, best attempt:
2 moves
";

    // the box starts in a corner so every move looks infinitely bad,
    // each trial takes the first one twice
    binary()
        .args(&["-m", "lrta", "--heuristic", "improved"])
        .args(&["--max-restarts", "3", "--max-steps", "2"])
        .arg("--quiet")
        .arg("levels/05-no-solution.txt")
        .assert()
        .success()
        .stdout(output)
        .stderr("");
}

#[test]
fn run_compare() {
    binary()
        .arg("--compare")
        .arg("levels/01-one-way.txt")
        .assert()
        .success()
        .stderr("");
}

#[test]
fn run_mismatched_hungarian() {
    binary()
        .args(&["--heuristic", "hungarian", "levels/07-extra-goal.txt"])
        .assert()
        .failure()
        .stdout("")
        .stderr("Can't use the hungarian heuristic: Dimension mismatch - 1 boxes but 2 targets, can't assign boxes to targets\n");
}

#[test]
fn run_missing_file() {
    binary()
        .arg("levels/does-not-exist.txt")
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn run_bad_args() {
    // doesn't check stderr, the order clap reports conflicts in isn't fixed
    binary()
        .arg("--custom")
        .arg("--xsb")
        .arg("levels/01-one-way.txt")
        .assert()
        .failure()
        .stdout("");

    binary()
        .args(&["--beam-width", "wide", "levels/01-one-way.txt"])
        .assert()
        .failure()
        .stdout("");

    binary()
        .args(&["--randomness", "-1", "levels/01-one-way.txt"])
        .assert()
        .failure()
        .stdout("");
}
