//! Integration tests for authentication, profile, navigation and config.

mod common;

use common::TestEnv;
use predicates::prelude::*;

// === Auth Tests ===

#[test]
fn test_login_navigates_to_dashboard() {
    TestEnv::new()
        .collab()
        .args(["login", "-e", "alicia@collabcut.dev", "-p", "secret1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"navigation\":{\"outcome\":\"allowed\",\"path\":\"/dashboard\"}",
        ));
}

#[test]
fn test_login_short_password() {
    TestEnv::new()
        .collab()
        .args(["login", "-e", "alicia@collabcut.dev", "-p", "abc", "-H"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("password: Password must be at least 6 characters."));
}

#[test]
fn test_register_password_mismatch() {
    TestEnv::new()
        .collab()
        .args([
            "register", "-n", "Grace", "-e", "grace@example.com", "-p", "abcdefgh", "-c",
            "abcdefgX", "-t", "investor",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Passwords do not match."));
}

#[test]
fn test_logout_then_guarded_page_redirects() {
    TestEnv::new()
        .collab()
        .arg("session")
        .write_stdin("logout\nnavigate /timeline\nproject list\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"requested\":\"/timeline\",\"outcome\":\"redirect\",\"path\":\"/login\"",
        ))
        .stderr(predicate::str::contains("\"redirect\":\"/login\""));
}

#[test]
fn test_login_after_logout_restores_access() {
    TestEnv::new()
        .collab()
        .args(["session", "-H"])
        .write_stdin("logout\nlogin -e alicia@collabcut.dev -p secret1\nproject list\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 project(s):"));
}

// === Profile Tests ===

#[test]
fn test_profile_update_keeps_omitted_fields() {
    TestEnv::new()
        .collab()
        .args(["session", "-H"])
        .write_stdin("profile update --bio 'Keeps the revamp on track.'\nprofile show\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile updated for Alicia Gómez"))
        .stdout(predicate::str::contains("  Email: alicia@collabcut.dev"))
        .stdout(predicate::str::contains("  Bio: Keeps the revamp on track."));
}

#[test]
fn test_profile_update_short_new_password() {
    TestEnv::new()
        .collab()
        .args(["profile", "update", "--new-password", "short", "--confirm-new-password", "short"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("new_password"));
}

// === Navigation Tests ===

#[test]
fn test_nav_marks_active_link() {
    TestEnv::new()
        .collab()
        .args(["nav", "--current", "/projects/1", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* Projects"));
}

#[test]
fn test_navigate_unknown_page() {
    TestEnv::new()
        .collab()
        .args(["navigate", "/billing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Page not found: /billing"));
}

// === Session Tests ===

#[test]
fn test_session_continues_after_errors() {
    TestEnv::new()
        .collab()
        .args(["session", "-H"])
        .write_stdin(
            "# comment lines are skipped\n\
             \n\
             task toggle nope\n\
             bogus command\n\
             chat send general \"unterminated\n\
             session\n\
             task toggle t3\n\
             exit\n\
             task toggle t3\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Task t3: To do -> Done"))
        .stdout(predicate::str::contains("Done -> To do").not())
        .stderr(predicate::str::contains("Unterminated"))
        .stderr(predicate::str::contains("Already in an interactive session"));
}

// === Config Tests ===

#[test]
fn test_config_file_sets_human_output() {
    TestEnv::with_config("output-format \"human\"\n")
        .collab()
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 project(s):"));
}

#[test]
fn test_config_file_sets_user() {
    TestEnv::with_config("current-user \"user2\"\n")
        .collab()
        .args(["profile", "show", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Roberto (RO)"));
}

#[test]
fn test_env_user_overrides_config() {
    TestEnv::with_config("current-user \"user2\"\n")
        .collab()
        .env("COLLAB_USER", "user3")
        .args(["profile", "show", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Carol (CA)"));
}

#[test]
fn test_cli_user_overrides_env() {
    TestEnv::new()
        .collab()
        .env("COLLAB_USER", "user3")
        .args(["--user", "user5", "profile", "show", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Elena Ruiz (ER)"));
}

#[test]
fn test_blank_cli_user_rejected() {
    TestEnv::new()
        .collab()
        .args(["--user", "", "profile", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--user cannot be empty"));
}

#[test]
fn test_no_seed_starts_empty() {
    TestEnv::new()
        .collab()
        .args(["--no-seed", "project", "list", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects."));
}

#[test]
fn test_invalid_config_reported() {
    TestEnv::with_config("chat-group-window 100000\n")
        .collab()
        .args(["project", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
