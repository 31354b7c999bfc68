use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Runs the `dayplan` binary against a throwaway database
pub struct CliTestHarness {
    temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");

        Self { temp_dir, db_path }
    }

    /// A command wired to this harness' database. It runs inside the temp
    /// directory so a stray `dayplan.toml` in the workspace is never read.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("dayplan").expect("Failed to find dayplan binary");
        cmd.current_dir(self.temp_dir.path())
            .env("DAYPLAN_DATABASE_PATH", &self.db_path)
            .env_remove("DAYPLAN_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    #[allow(dead_code)]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Stdout of a successful run as a string
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self.run_success(args).get_output().stdout.clone();
        String::from_utf8(output).expect("stdout is not UTF-8")
    }
}

pub mod assertions {
    use predicates::prelude::*;
    use predicates::str::ContainsPredicate;

    pub fn task_created() -> ContainsPredicate {
        predicate::str::contains("Created task")
    }

    pub fn no_tasks() -> ContainsPredicate {
        predicate::str::contains("No tasks found.")
    }
}
