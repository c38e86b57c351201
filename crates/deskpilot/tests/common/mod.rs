#![allow(dead_code)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

pub fn deskpilot_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("deskpilot"))
}

/// A throwaway `DESKPILOT_HOME`.
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = deskpilot_cmd();
        cmd.env("DESKPILOT_HOME", self.path()).env_remove("DESKPILOT_LOG");
        cmd
    }

    pub fn write_recipe(&self, name: &str, body: &str) {
        let dir = self.path().join("recipes");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}.json", name)), body).unwrap();
    }

    pub fn write_recording(&self, stem: &str, body: &str) {
        let dir = self.path().join("recordings");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}.json", stem)), body).unwrap();
    }
}

pub const LOGIN_RECIPE: &str = r#"{
  "name": "login",
  "description": "Sign in",
  "params": {"user": null},
  "steps": [
    {"method": "click", "params": {"target": "Username"}},
    {"method": "type", "params": {"text": "{{user}}"}}
  ]
}"#;

pub const DEMO_RECORDING: &str = r#"{
  "duration": 3.5,
  "name": "demo",
  "recordedAt": "2024-06-01T08:30:05Z",
  "steps": [
    {
      "context": {"app": "Notes"},
      "description": "Focused Notes",
      "method": "focus",
      "params": {"app": "Notes"},
      "success": true,
      "timestamp": "2024-06-01T08:30:06Z"
    },
    {
      "description": "Missing 'key' param",
      "method": "press",
      "params": {},
      "success": false,
      "timestamp": "2024-06-01T08:30:07Z"
    },
    {
      "description": "Typed 5 characters",
      "method": "type",
      "params": {"text": "hello"},
      "success": true,
      "timestamp": "2024-06-01T08:30:08Z"
    }
  ]
}"#;
