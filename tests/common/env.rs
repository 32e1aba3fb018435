//! Test environment builder for isolated Rubicon testing.
//!
//! Provides `TestEnv` - temp directories for the project, the home directory
//! and a toolchain root with fake Ruby installations, plus helpers to run
//! the Rubicon CLI against them.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

use super::windows::WindowsCompatExt;

/// Result of running a Rubicon CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as a single JSON document.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(self.stdout.trim()).unwrap_or_else(|e| {
            panic!(
                "stdout is not JSON ({}).\nstdout:\n{}\nstderr:\n{}",
                e, self.stdout, self.stderr
            )
        })
    }
}

/// Isolated test environment with temp directories.
pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    /// Scanned instead of the version-manager defaults
    pub toolchain_root: TempDir,
    rubicon_bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home_dir.path().join(relative)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.project_path(".rubicon/settings.toml")
    }

    /// Run rubicon from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.project_root.path(), args)
    }

    /// Run rubicon from the project root with extra env vars.
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, env_vars)
    }

    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        self.run_from_with_env(cwd, args, &[])
    }

    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut cmd = Command::new(&self.rubicon_bin);
        cmd.current_dir(cwd)
            .args(args)
            .with_test_home(self.home_dir.path())
            .env("RUBICON_TOOLCHAIN_ROOTS", self.toolchain_root.path());

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute rubicon");
        output_to_result(output)
    }

    pub fn read_settings(&self) -> String {
        std::fs::read_to_string(self.settings_path()).unwrap_or_default()
    }

    pub fn read_settings_toml(&self) -> toml::Table {
        toml::from_str(&self.read_settings()).expect("settings file should be valid TOML")
    }

    pub fn write_settings(&self, content: &str) {
        self.write_project_file(".rubicon/settings.toml", content);
    }

    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        write_file(&self.project_path(relative_path), content);
    }

    pub fn write_home_file(&self, relative_path: &str, content: &str) {
        write_file(&self.home_path(relative_path), content);
    }

    pub fn create_project_dir(&self, relative: &str) {
        std::fs::create_dir_all(self.project_path(relative)).expect("Failed to create directory");
    }

    /// Lay out `<toolchain_root>/<id>/bin/ruby`.
    pub fn install_ruby(&self, id: &str) {
        install_ruby_under(self.toolchain_root.path(), id);
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

/// Lay out `<root>/<id>/bin/ruby` so the install scanner picks it up.
pub fn install_ruby_under(root: &Path, id: &str) {
    write_file(&root.join(id).join("bin").join("ruby"), "#!/bin/sh\n");
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    rubies: Vec<String>,
    settings: Option<String>,
    user_config: Option<String>,
    project_dirs: Vec<String>,
    gemfile: bool,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self {
            rubies: Vec::new(),
            settings: None,
            user_config: None,
            project_dirs: Vec::new(),
            gemfile: true,
        }
    }

    /// Install a fake Ruby with this id under the toolchain root.
    pub fn with_ruby(mut self, id: &str) -> Self {
        self.rubies.push(id.to_string());
        self
    }

    /// Pre-existing `.rubicon/settings.toml`.
    pub fn with_settings(mut self, content: &str) -> Self {
        self.settings = Some(content.to_string());
        self
    }

    /// `~/.config/rubicon/config.toml`.
    pub fn with_user_config(mut self, content: &str) -> Self {
        self.user_config = Some(content.to_string());
        self
    }

    pub fn with_project_dir(mut self, relative: &str) -> Self {
        self.project_dirs.push(relative.to_string());
        self
    }

    /// Leave out the Gemfile that marks the project root.
    pub fn without_gemfile(mut self) -> Self {
        self.gemfile = false;
        self
    }

    pub fn build(self) -> TestEnv {
        let env = TestEnv {
            project_root: TempDir::new().expect("Failed to create project dir"),
            home_dir: TempDir::new().expect("Failed to create home dir"),
            toolchain_root: TempDir::new().expect("Failed to create toolchain root"),
            rubicon_bin: PathBuf::from(env!("CARGO_BIN_EXE_rubicon")),
        };

        if self.gemfile {
            env.write_project_file("Gemfile", "source \"https://rubygems.org\"\n");
        }
        for id in &self.rubies {
            env.install_ruby(id);
        }
        for dir in &self.project_dirs {
            env.create_project_dir(dir);
        }
        if let Some(settings) = &self.settings {
            env.write_settings(settings);
        }
        if let Some(config) = &self.user_config {
            env.write_home_file(".config/rubicon/config.toml", config);
        }
        env
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}
