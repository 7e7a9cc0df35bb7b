//! Integration tests for project and task commands via the CLI.
//!
//! Every invocation starts from the mock seed, so multi-step scenarios run
//! through `collab session`.

mod common;

use common::TestEnv;
use predicates::prelude::*;

// === Project Tests ===

#[test]
fn test_project_list_json() {
    TestEnv::new()
        .collab()
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\":3"))
        .stdout(predicate::str::contains("\"name\":\"E-commerce Platform Revamp\""));
}

#[test]
fn test_project_list_human() {
    TestEnv::new()
        .collab()
        .args(["project", "list", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 project(s):"))
        .stdout(predicate::str::contains("[1] E-commerce Platform Revamp (agile) - 25% done"));
}

#[test]
fn test_project_create() {
    TestEnv::new()
        .collab()
        .args([
            "project",
            "create",
            "Partner Portal",
            "-d",
            "Self-service portal for partners",
            "-m",
            "scrum",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\":\"Partner Portal\""))
        .stdout(predicate::str::contains("\"methodology\":\"scrum\""))
        .stdout(predicate::str::contains("\"owner_id\":\"currentUser\""));
}

#[test]
fn test_project_create_short_name_rejected() {
    TestEnv::new()
        .collab()
        .args(["project", "create", "AB", "-d", "A long enough description"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"field\":\"name\""));
}

#[test]
fn test_project_show_unknown() {
    TestEnv::new()
        .collab()
        .args(["project", "show", "99", "-H"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Entity not found"));
}

#[test]
fn test_project_progress() {
    TestEnv::new()
        .collab()
        .args(["project", "progress", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\":4"))
        .stdout(predicate::str::contains("\"completed\":1"))
        .stdout(predicate::str::contains("\"percentage\":25"));
}

#[test]
fn test_created_project_listed_first_in_session() {
    let env = TestEnv::new();
    env.collab()
        .args(["session", "-H"])
        .write_stdin(
            "project create 'Partner Portal' -d 'Self-service portal for partners'\n\
             project list\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("4 project(s):\n  [p"))
        .stdout(predicate::str::contains("Partner Portal (agile) - 0% done, 1 member(s)"));
}

// === Task Tests ===

#[test]
fn test_task_list_mine() {
    TestEnv::new()
        .collab()
        .args(["task", "list", "--mine", "--status", "todo", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 task(s):"))
        .stdout(predicate::str::contains("t4"))
        .stdout(predicate::str::contains("t5"));
}

#[test]
fn test_task_list_bad_status() {
    TestEnv::new()
        .collab()
        .args(["task", "list", "--status", "blocked"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"error\""));
}

#[test]
fn test_task_create_requires_assignee() {
    TestEnv::new()
        .collab()
        .args(["task", "create", "1", "Write release notes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"field\":\"assignee_ids\""))
        .stderr(predicate::str::contains("Select at least one assignee."));
}

#[test]
fn test_task_create_with_team_member() {
    TestEnv::new()
        .collab()
        .args([
            "task",
            "create",
            "1",
            "Write release notes",
            "-a",
            "user3",
            "-d",
            "Summarize the revamp",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\":\"Write release notes\""))
        .stdout(predicate::str::contains("\"status\":\"todo\""));
}

#[test]
fn test_task_create_non_member_rejected() {
    TestEnv::new()
        .collab()
        .args(["task", "create", "1", "Client review", "-a", "user5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("assignee_ids"));
}

#[test]
fn test_task_toggle() {
    TestEnv::new()
        .collab()
        .args(["task", "toggle", "t3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"from\":\"todo\""))
        .stdout(predicate::str::contains("\"to\":\"done\""));
}

#[test]
fn test_task_toggle_twice_resets_in_session() {
    TestEnv::new()
        .collab()
        .arg("session")
        .write_stdin("task toggle t2\ntask toggle t2\ntask show t2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"from\":\"inprogress\",\"to\":\"done\""))
        .stdout(predicate::str::contains("\"from\":\"done\",\"to\":\"todo\""));
}

#[test]
fn test_task_toggle_restore_behavior() {
    TestEnv::new()
        .collab()
        .args(["--toggle-behavior", "restore", "session"])
        .write_stdin("task toggle t2\ntask toggle t2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"from\":\"done\",\"to\":\"inprogress\""));
}

#[test]
fn test_task_status() {
    TestEnv::new()
        .collab()
        .args(["task", "status", "t1", "archived", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task t1: Done -> Archived"));
}
