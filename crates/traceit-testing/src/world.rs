//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating isolated data directories
//! - Spinning up a `MockCampus` backend per test
//! - Executing CLI commands with the data dir and backend origin injected

use anyhow::{Context, Result};
use assert_cmd::Command;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::server::MockCampus;

/// Declarative test environment: an isolated data dir plus a live mock
/// backend.
///
/// # Example
/// ```no_run
/// use traceit_testing::TestWorld;
///
/// let world = TestWorld::new();
/// world.seed_admin();
/// let result = world.run(&["auth", "status"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    server: MockCampus,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

pub const ADMIN_EMAIL: &str = "admin@campus.edu";
pub const ADMIN_PASSWORD: &str = "admin-pass";

impl TestWorld {
    /// Create a new isolated test environment with a running mock backend.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".traceit");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self {
            temp_dir,
            data_dir,
            server: MockCampus::spawn(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn server(&self) -> &MockCampus {
        &self.server
    }

    pub fn api_url(&self) -> String {
        self.server.url()
    }

    /// Seed the default admin account; returns its user id.
    pub fn seed_admin(&self) -> String {
        self.server
            .seed_user("Moderator", ADMIN_EMAIL, ADMIN_PASSWORD, "admin")
    }

    /// Seed a student account with a predictable password; returns its id.
    pub fn seed_student(&self, email: &str) -> String {
        self.server.seed_user("Student", email, "student-pass", "student")
    }

    /// Run the CLI with the data dir and backend origin injected.
    pub fn run(&self, args: &[&str]) -> Result<CommandResult> {
        let mut cmd = Command::cargo_bin("traceit").context("traceit binary not built")?;
        cmd.arg("--data-dir")
            .arg(&self.data_dir)
            .arg("--api-url")
            .arg(self.api_url())
            .args(args);

        let output = cmd.output().context("Failed to run traceit")?;
        Ok(CommandResult {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Sign in as the seeded admin.
    pub fn login_admin(&self) -> Result<CommandResult> {
        self.run(&[
            "auth", "login", "--email", ADMIN_EMAIL, "--password", ADMIN_PASSWORD, "--role",
            "admin",
        ])
    }

    /// Sign in as a seeded student.
    pub fn login_student(&self, email: &str) -> Result<CommandResult> {
        self.run(&[
            "auth",
            "login",
            "--email",
            email,
            "--password",
            "student-pass",
        ])
    }

    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join("session.toml")
    }
}

/// Captured outcome of one CLI invocation.
pub struct CommandResult {
    success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.success
    }

    pub fn stdout_contains(&self, needle: &str) -> bool {
        self.stdout.contains(needle)
    }

    pub fn stderr_contains(&self, needle: &str) -> bool {
        self.stderr.contains(needle)
    }

    /// Parse stdout as JSON (for `--format json` invocations).
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.stdout).context("stdout was not valid JSON")
    }
}
