// Copyright (c) The route-conformance Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the process driver and the runner pipeline, using a
//! fake planner script in place of the real binary.

#![cfg(unix)]

use camino::Utf8PathBuf;
use camino_tempfile::Utf8TempDir;
use conformance_runner::{
    driver::{self, ExecutionOutcome, TransportFailureKind},
    list::{QueryMode, Scenario},
    runner::{RunEvent, ScenarioRunnerBuilder},
    validator::FailureKind,
};
use std::{os::unix::fs::PermissionsExt, time::Duration};

/// Writes an executable `/bin/sh` script posing as the planner.
fn fake_planner(dir: &Utf8TempDir, body: &str) -> Utf8PathBuf {
    let path = dir.path().join("optimizer");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

#[tokio::test]
async fn captures_stdout_and_stderr_combined() {
    let dir = Utf8TempDir::new().unwrap();
    let program = fake_planner(
        &dir,
        r#"echo "Total Time: 5.0 minutes"
echo "warning: slow map load" >&2
echo "Stops: 3 stops""#,
    );

    let outcome = driver::drive(&program, "2\n1\nA\n3\n", Duration::from_secs(5)).await;
    let ExecutionOutcome::RawText(text) = outcome else {
        panic!("expected raw text, got {outcome:?}");
    };
    assert!(text.contains("Total Time: 5.0"), "{text}");
    assert!(text.contains("Stops: 3"), "{text}");
    assert!(text.contains("slow map load"), "{text}");
}

#[tokio::test]
async fn transcript_reaches_the_child_verbatim() {
    let dir = Utf8TempDir::new().unwrap();
    let program = fake_planner(&dir, "cat");

    let transcript = "2\n2\nGarden Park\nBus Stop\n3\n";
    let outcome = driver::drive(&program, transcript, Duration::from_secs(5)).await;
    let ExecutionOutcome::RawText(text) = outcome else {
        panic!("expected raw text, got {outcome:?}");
    };
    assert_eq!(text, transcript);
}

#[tokio::test]
async fn missing_executable_short_circuits() {
    let dir = Utf8TempDir::new().unwrap();
    let program = dir.path().join("no-such-binary");

    let outcome = driver::drive(&program, "1\n1\nA\n3\n", Duration::from_secs(5)).await;
    assert!(matches!(
        outcome,
        ExecutionOutcome::TransportFailure(TransportFailureKind::ExecutableMissing)
    ));
}

#[tokio::test]
async fn timeout_kills_the_child_and_discards_output() {
    let dir = Utf8TempDir::new().unwrap();
    let program = fake_planner(
        &dir,
        r#"echo "Total Time: 5.0"
sleep 60"#,
    );

    let outcome = driver::drive(&program, "1\n1\nA\n3\n", Duration::from_millis(250)).await;
    // Output printed before the deadline is not reused.
    assert!(matches!(
        outcome,
        ExecutionOutcome::TransportFailure(TransportFailureKind::Timeout)
    ));
}

#[tokio::test]
async fn nonzero_exit_status_still_yields_raw_text() {
    let dir = Utf8TempDir::new().unwrap();
    let program = fake_planner(
        &dir,
        r#"echo "Total Time: 2.0"
exit 7"#,
    );

    let outcome = driver::drive(&program, "2\n1\nA\n3\n", Duration::from_secs(5)).await;
    let ExecutionOutcome::RawText(text) = outcome else {
        panic!("expected raw text, got {outcome:?}");
    };
    assert!(text.contains("Total Time: 2.0"), "{text}");
}

#[tokio::test]
async fn run_continues_past_a_timed_out_scenario() {
    let dir = Utf8TempDir::new().unwrap();
    // Mode "1" (flexible) hangs; mode "2" (fixed) answers.
    let program = fake_planner(
        &dir,
        r#"read mode
if [ "$mode" = "1" ]; then sleep 60; fi
echo "Total Time: 2.0 minutes"
echo "Stops: 2""#,
    );

    let hangs = Scenario::new("hangs", QueryMode::FlexibleOrder, ["A", "B"], 2.0, 2.0);
    let answers = Scenario::new("answers", QueryMode::FixedOrder, ["A", "B"], 2.0, 2.0);
    let scenarios = [&hangs, &answers];

    let runner = ScenarioRunnerBuilder::new()
        .set_timeout(Duration::from_millis(300))
        .build(program);

    let mut seen = Vec::new();
    let results = runner
        .run(scenarios, |event| {
            let line = match &event {
                RunEvent::RunStarted { total } => format!("started {total}"),
                RunEvent::ScenarioStarted {
                    current, scenario, ..
                } => format!("running {current} {}", scenario.name()),
                RunEvent::ScenarioFinished {
                    current, result, ..
                } => format!("finished {current} {} {}", result.scenario().name(), result.passed()),
            };
            seen.push(line);
        })
        .await;

    assert_eq!(results.len(), 2);
    assert!(!results[0].passed());
    assert_eq!(results[0].failure(), Some(FailureKind::Timeout));
    assert!(results[1].passed(), "second scenario: {:?}", results[1]);
    assert_eq!(results[1].actual_time(), Some(2.0));
    assert_eq!(results[1].actual_stops(), Some(2));

    assert_eq!(
        seen,
        [
            "started 2",
            "running 1 hangs",
            "finished 1 hangs false",
            "running 2 answers",
            "finished 2 answers true",
        ],
    );
}

#[tokio::test]
async fn rejection_output_flows_through_the_pipeline() {
    let dir = Utf8TempDir::new().unwrap();
    let program = fake_planner(&dir, r#"echo "Error: location is not reachable""#);

    let expected = Scenario::new("expected", QueryMode::FixedOrder, ["A", "Z"], 0.0, 0.0)
        .expect_rejection();
    let unexpected = Scenario::new("unexpected", QueryMode::FixedOrder, ["A", "B"], 2.0, 2.0);

    let runner = ScenarioRunnerBuilder::new().build(program);
    let results = runner.run([&expected, &unexpected], |_| {}).await;

    assert!(results[0].passed());
    assert!(!results[1].passed());
    assert_eq!(results[1].failure(), Some(FailureKind::UnexpectedRejection));
}
