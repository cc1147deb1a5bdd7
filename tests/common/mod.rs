//! Common test utilities for flashpack CLI tests.
//!
//! Provides `TestEnv`: an isolated project directory plus helpers to run the
//! flashpack binary against it.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running a flashpack CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test environment with a temp project directory
pub struct TestEnv {
    /// Temporary directory for the project
    pub project_root: TempDir,
    /// Path to the flashpack binary
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: TempDir::new().expect("failed to create temp dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_flashpack")),
        }
    }

    /// Get path relative to project root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Write a file under the project root, creating parent directories
    pub fn write_file(&self, relative: &str, content: &str) {
        self.write_bytes(relative, content.as_bytes());
    }

    /// Write raw bytes under the project root, creating parent directories
    pub fn write_bytes(&self, relative: &str, content: &[u8]) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dirs");
        }
        std::fs::write(path, content).expect("failed to write test file");
    }

    /// Read a file under the project root
    pub fn read_file(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).expect("failed to read test file")
    }

    /// Run flashpack in this environment from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.project_root.path(), args)
    }

    /// Run flashpack from a specific directory
    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        let output = Command::new(&self.bin)
            .current_dir(cwd)
            .args(args)
            .output()
            .expect("Failed to execute flashpack");

        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
