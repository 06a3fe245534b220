//! Mask file validation tests
//!
//! Drives 'mask check' and 'mask init' end-to-end against fixture files

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Test fixture holding a temporary mask directory
struct MaskFixture {
    temp_dir: TempDir,
}

impl MaskFixture {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }
}

fn chatmask_cmd() -> Command {
    Command::cargo_bin("chatmask").unwrap()
}

const VALID_JSON: &str = r#"[
  {
    "avatar": "1f9d1-200d-1f3eb",
    "name": "Proofreader",
    "context": [
      { "id": "pr-0", "role": "user", "content": "Proofread my text.", "date": "" }
    ],
    "modelConfig": {
      "model": "gpt-3.5-turbo",
      "temperature": 0.5,
      "max_tokens": 2000,
      "presence_penalty": 0,
      "frequency_penalty": 0,
      "sendMemory": false,
      "historyMessageCount": 4,
      "compressMessageLengthThreshold": 1000
    },
    "lang": "en",
    "builtin": false,
    "createdAt": 1688899480524
  }
]"#;

const VALID_TOML: &str = r#"
[[masks]]
avatar = "1f9d1-200d-1f3eb"
name = "Summarizer"
lang = "en"
builtin = false
createdAt = 1688899480524

[[masks.context]]
id = "sum-0"
role = "user"
content = "Summarize the following text."
date = ""

[masks.modelConfig]
model = "gpt-3.5-turbo"
temperature = 1.0
max_tokens = 1000
presence_penalty = 0.0
frequency_penalty = 0.0
sendMemory = false
historyMessageCount = 0
compressMessageLengthThreshold = 1000
"#;

// ─────────────────────────────────────────────────────────────────
// Check: Valid Files
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_check_valid_json_file() {
    let fixture = MaskFixture::new();
    let path = fixture.write("export.json", VALID_JSON);

    chatmask_cmd()
        .arg("mask")
        .arg("check")
        .arg(path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 mask(s) OK"))
        .stdout(predicate::str::contains("all valid"));
}

#[test]
fn test_check_valid_toml_file() {
    let fixture = MaskFixture::new();
    let path = fixture.write("summarizer.toml", VALID_TOML);

    chatmask_cmd()
        .arg("mask")
        .arg("check")
        .arg(path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("all valid"));
}

#[test]
fn test_check_mask_dir_from_env() {
    let fixture = MaskFixture::new();
    fixture.write("a.json", VALID_JSON);
    fixture.write("b.toml", VALID_TOML);

    chatmask_cmd()
        .env("CHATMASK_MASK_DIR", fixture.dir())
        .arg("mask")
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Checked 2 mask(s) in 2 file(s)"));
}

#[test]
fn test_check_empty_mask_dir() {
    let fixture = MaskFixture::new();

    chatmask_cmd()
        .env("CHATMASK_MASK_DIR", fixture.dir())
        .arg("mask")
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("No mask files found"));
}

// ─────────────────────────────────────────────────────────────────
// Check: Invalid Files
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_check_invalid_mask_lists_every_violation() {
    let fixture = MaskFixture::new();
    let broken = VALID_JSON
        .replace("\"max_tokens\": 2000", "\"max_tokens\": 0")
        .replace("\"temperature\": 0.5", "\"temperature\": 2.01");
    let path = fixture.write("broken.json", &broken);

    chatmask_cmd()
        .arg("mask")
        .arg("check")
        .arg(path.to_str().unwrap())
        .assert()
        .failure()
        .code(30)
        .stdout(predicate::str::contains("modelConfig.temperature"))
        .stdout(predicate::str::contains("modelConfig.max_tokens"))
        .stderr(predicate::str::contains("E302"));
}

#[test]
fn test_check_negative_history_count() {
    let fixture = MaskFixture::new();
    let broken = VALID_JSON.replace("\"historyMessageCount\": 4", "\"historyMessageCount\": -1");
    let path = fixture.write("negative.json", &broken);

    chatmask_cmd()
        .arg("mask")
        .arg("check")
        .arg(path.to_str().unwrap())
        .assert()
        .failure()
        .stdout(predicate::str::contains("modelConfig.historyMessageCount"));
}

#[test]
fn test_check_unparseable_file() {
    let fixture = MaskFixture::new();
    let path = fixture.write("garbage.toml", "this is not a mask table");

    chatmask_cmd()
        .arg("mask")
        .arg("check")
        .arg(path.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("E301"));
}

#[test]
fn test_check_invalid_role_fails_at_parse() {
    let fixture = MaskFixture::new();
    let broken = VALID_JSON.replace("\"role\": \"user\"", "\"role\": \"narrator\"");
    let path = fixture.write("role.json", &broken);

    chatmask_cmd()
        .arg("mask")
        .arg("check")
        .arg(path.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("E301"));
}

// ─────────────────────────────────────────────────────────────────
// Init
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_init_then_check() {
    let fixture = MaskFixture::new();
    let path = fixture.dir().join("new.toml");

    chatmask_cmd()
        .arg("mask")
        .arg("init")
        .arg(path.to_str().unwrap())
        .arg("--name")
        .arg("Fresh Mask")
        .arg("--lang")
        .arg("en")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mask file created"));

    chatmask_cmd()
        .arg("mask")
        .arg("check")
        .arg(path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("all valid"));
}

#[test]
fn test_init_refuses_overwrite_without_force() {
    let fixture = MaskFixture::new();
    let path = fixture.dir().join("taken.toml");

    chatmask_cmd()
        .arg("mask")
        .arg("init")
        .arg(path.to_str().unwrap())
        .assert()
        .success();

    chatmask_cmd()
        .arg("mask")
        .arg("init")
        .arg(path.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    chatmask_cmd()
        .arg("mask")
        .arg("init")
        .arg(path.to_str().unwrap())
        .arg("--force")
        .assert()
        .success();
}
