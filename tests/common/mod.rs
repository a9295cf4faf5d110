//! Common test infrastructure for tmdr integration tests.
//!
//! Provides:
//! - TestProject: Temp directory with optional tmdr.toml and dataset files
//! - Output assertion helpers

use std::process::{Command, Output};

/// Small dataset used by tests that need predictable contents.
#[allow(dead_code)]
pub const SAMPLE_CSV: &str = "\
Acronym,Definition
ABG,Arterial Blood Gas – Measures oxygen and carbon dioxide in arterial blood
HIV,Human Immunodeficiency Virus – Virus that attacks the immune system
HIB,Haemophilus influenzae type b
HIT,Heparin-Induced Thrombocytopenia – Immune reaction to heparin
BROKEN
CT,Computed Tomography – Cross-sectional imaging
";

/// A scratch working directory for running tmdr in isolation.
pub struct TestProject {
    pub dir: tempfile::TempDir,
}

impl TestProject {
    /// Create an empty project (no config, built-in dataset)
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Create a project with `acronyms.csv` containing SAMPLE_CSV
    #[allow(dead_code)]
    pub fn with_sample_data() -> Self {
        let project = Self::empty();
        project.write_file("acronyms.csv", SAMPLE_CSV);
        project
    }

    /// Write a file relative to the project root
    pub fn write_file(&self, relative: &str, contents: &str) {
        std::fs::write(self.path(relative), contents)
            .unwrap_or_else(|_| panic!("Failed to write {}", relative));
    }

    /// Run tmdr command with isolated environment
    pub fn run_tmdr(&self, args: &[&str]) -> Output {
        self.run_tmdr_with_env(args, &[])
    }

    /// Run tmdr with extra environment variables
    pub fn run_tmdr_with_env(&self, args: &[&str], envs: &[(&str, &str)]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_tmdr"))
            .args(args)
            .current_dir(self.dir.path())
            // Isolate environment
            .env_clear()
            .env("HOME", self.dir.path())
            .env("PATH", std::env::var("PATH").unwrap_or_default())
            .envs(envs.iter().copied())
            .output()
            .expect("Failed to execute tmdr")
    }

    /// Run tmdr and assert success
    #[allow(dead_code)]
    pub fn run_tmdr_ok(&self, args: &[&str]) -> Output {
        let output = self.run_tmdr(args);
        assert!(
            output.status.success(),
            "tmdr {:?} failed (exit {:?}):\nstdout: {}\nstderr: {}",
            args,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }

    /// Run tmdr and assert failure with specific exit code
    #[allow(dead_code)]
    pub fn run_tmdr_fails(&self, args: &[&str], expected_code: i32) -> Output {
        let output = self.run_tmdr(args);
        assert_eq!(
            output.status.code(),
            Some(expected_code),
            "tmdr {:?} expected exit {} but got {:?}:\nstdout: {}\nstderr: {}",
            args,
            expected_code,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }

    /// Get path to a file in the project
    pub fn path(&self, relative: &str) -> std::path::PathBuf {
        self.dir.path().join(relative)
    }
}

// ============================================================================
// Output assertion helpers
// ============================================================================

/// Parse JSON output and return the value
#[allow(dead_code)]
pub fn parse_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| {
        panic!(
            "Invalid JSON output:\n{}\nstderr: {}\nError: {}",
            stdout,
            String::from_utf8_lossy(&output.stderr),
            e
        )
    })
}

/// Assert stdout contains a substring
#[allow(dead_code)]
pub fn assert_stdout_contains(output: &Output, expected: &str) {
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(expected),
        "Expected stdout to contain '{}':\n{}",
        expected,
        stdout
    );
}

/// Assert stderr contains a substring
#[allow(dead_code)]
pub fn assert_stderr_contains(output: &Output, expected: &str) {
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(expected),
        "Expected stderr to contain '{}':\n{}",
        expected,
        stderr
    );
}

/// Get stdout as string
#[allow(dead_code)]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}
