#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use checklist::{Storage, Store};
use serde_json::Value;
use tempfile::TempDir;

/// Scratch data + config directories for driving the binary.
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::tempdir()?;
        fs::create_dir_all(dir.path().join("data"))?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.config_path();
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn write_data_file(&self, name: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.data_dir().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn storage(&self) -> Storage {
        Storage::new(self.data_dir())
    }

    pub fn load(&self) -> checklist::Result<Store> {
        self.storage().load()
    }

    /// Binary invocation pinned to this env's data dir and config file.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("checklist").expect("binary");
        cmd.env_remove("RUST_LOG")
            .env("CHECKLIST_DIR", self.data_dir())
            .env("CHECKLIST_CONFIG", self.config_path());
        cmd
    }

    /// Run a command line (e.g. `"tag 0 errand"`) and require success.
    pub fn run(&self, line: &str) {
        self.cmd().arg(line).assert().success();
    }

    /// Run a command line with `--json` and return the `data` payload.
    pub fn run_json(&self, line: &str) -> Result<Value, Box<dyn std::error::Error>> {
        let output = self.cmd().arg("--json").arg(line).output()?;
        assert!(output.status.success(), "{line} failed: {output:?}");
        let value: Value = serde_json::from_slice(&output.stdout)?;
        Ok(value["data"].clone())
    }
}
