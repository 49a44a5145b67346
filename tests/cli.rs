//! Command-line tests that run the binary without a live backend.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Nothing listens on the discard port, so any request fails fast.
const DEAD_BACKEND: &str = "http://127.0.0.1:9/api";

/// Helper to create a taskboard Command isolated in its own config directory
fn taskboard(config_dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("taskboard");
    cmd.env("TASKBOARD_CONFIG_DIR", config_dir.path())
        .env("TASKBOARD_BACKEND_URL", DEAD_BACKEND)
        .env_remove("TASKBOARD_PASSWORD")
        .env_remove("TASKBOARD_LOG");
    cmd
}

mod cli_basics {
    use super::*;

    #[test]
    fn help_lists_commands() {
        let dir = TempDir::new().unwrap();
        taskboard(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("board"))
            .stdout(predicate::str::contains("dashboard"));
    }

    #[test]
    fn version() {
        let dir = TempDir::new().unwrap();
        taskboard(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn completions_for_bash() {
        let dir = TempDir::new().unwrap();
        taskboard(&dir)
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("taskboard"));
    }

    #[test]
    fn unknown_status_is_rejected_by_parser() {
        let dir = TempDir::new().unwrap();
        taskboard(&dir)
            .args(["board", "move", "1", "archived"])
            .assert()
            .failure();
    }
}

mod session {
    use super::*;

    #[test]
    fn whoami_without_session() {
        let dir = TempDir::new().unwrap();
        taskboard(&dir)
            .arg("whoami")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not logged in"));
    }

    #[test]
    fn board_requires_login() {
        let dir = TempDir::new().unwrap();
        taskboard(&dir)
            .arg("board")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not logged in"));
    }

    #[test]
    fn logout_without_session_succeeds() {
        let dir = TempDir::new().unwrap();
        taskboard(&dir)
            .arg("logout")
            .assert()
            .success()
            .stdout(predicate::str::contains("Logged out"));
    }

    #[test]
    fn logout_clears_session_when_backend_is_down() {
        let dir = TempDir::new().unwrap();
        let session = dir.path().join("session.json");
        fs::write(
            &session,
            r#"{"email":"dev@example.com","fullName":"Dev","role":"DEVELOPER","token":"not-a-jwt"}"#,
        )
        .unwrap();

        taskboard(&dir).arg("logout").assert().success();

        assert!(!session.exists());
    }

    #[test]
    fn whoami_reads_saved_session_without_token() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("session.json"),
            r#"{"email":"lead@example.com","fullName":"Lee Lead","role":"LEAD_DEVELOPER","token":"secret-token"}"#,
        )
        .unwrap();

        taskboard(&dir)
            .args(["whoami", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("lead@example.com"))
            .stdout(predicate::str::contains("secret-token").not());
    }

    #[test]
    fn team_is_lead_only() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("session.json"),
            r#"{"email":"dev@example.com","fullName":"Dev","role":"DEVELOPER","token":"not-a-jwt"}"#,
        )
        .unwrap();

        taskboard(&dir)
            .args(["team", "overview"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Lead Developer"));
    }
}

mod validation {
    use super::*;

    #[test]
    fn register_rejects_weak_password_before_any_request() {
        let dir = TempDir::new().unwrap();
        taskboard(&dir)
            .args([
                "register",
                "--full-name",
                "Ada Obi",
                "--email",
                "ada@example.com",
                "--password",
                "password",
                "--role",
                "developer",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Password needs"));
    }

    #[test]
    fn reset_password_mismatch() {
        let dir = TempDir::new().unwrap();
        taskboard(&dir)
            .args([
                "reset-password",
                "--token",
                "abc123",
                "--password",
                "Sup3r$ecret",
                "--confirm",
                "Sup3r$ecreT",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Passwords do not match."));
    }

    #[test]
    fn forgot_password_needs_email() {
        let dir = TempDir::new().unwrap();
        taskboard(&dir)
            .args(["forgot-password", " "])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Please enter your email above first."));
    }

    #[test]
    fn login_against_unreachable_backend() {
        let dir = TempDir::new().unwrap();
        taskboard(&dir)
            .args([
                "login",
                "--email",
                "dev@example.com",
                "--password",
                "Sup3r$ecret",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Login failed. Please try again."));

        assert!(!dir.path().join("session.json").exists());
    }
}
