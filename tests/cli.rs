use assert_cmd::prelude::*;
use std::process::Command;

#[test]
fn advise_prints_a_recommendation_as_json() {
    let mut cmd = Command::cargo_bin("holdem-advisor").expect("binary exists");
    cmd.args([
        "advise",
        "--hero",
        "As Ks",
        "--pot",
        "10",
        "--call",
        "5",
        "--raise",
        "15",
        "--fold-prob",
        "0.35",
        "--trials",
        "300",
        "--json",
    ]);

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("recommended"))
        .stdout(predicates::str::contains("equity"));
}

#[test]
fn advise_is_deterministic_across_runs() {
    let run = || {
        let mut cmd = Command::cargo_bin("holdem-advisor").expect("binary exists");
        cmd.args([
            "advise", "--hero", "Qh Qd", "--trials", "400", "--seed", "7", "--json",
        ]);
        cmd.output().expect("command runs")
    };

    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn malformed_hero_cards_are_rejected() {
    let mut cmd = Command::cargo_bin("holdem-advisor").expect("binary exists");
    cmd.args(["advise", "--hero", "Xs Ks", "--trials", "50"]);

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("invalid rank character"));
}

#[test]
fn short_board_is_rejected() {
    let mut cmd = Command::cargo_bin("holdem-advisor").expect("binary exists");
    cmd.args([
        "advise", "--hero", "As Ks", "--board", "Qh 7d", "--trials", "50",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("board must have 0, 3, 4 or 5"));
}
