//! User mask files: list, load, check, and scaffold.
//!
//! User-authored masks live as files in a mask directory and must pass the
//! same validation contract as built-ins. Files are TOML `[[masks]]` tables
//! or JSON arrays (the export format of the web client).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::types::{ChatRole, MaskFile, MaskPreset, ModelConfig, SeedMessage};
use super::validate::ValidationReport;

// ─────────────────────────────────────────────────────────────────
// Check Outcome
// ─────────────────────────────────────────────────────────────────

/// Result of validating every mask in one file.
#[derive(Debug)]
pub struct CheckOutcome {
    /// File that was checked.
    pub path: PathBuf,

    /// How many masks the file contains.
    pub total: usize,

    /// Mask name and violation report for each failing mask.
    pub failures: Vec<(String, ValidationReport)>,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────
// Mask Loader
// ─────────────────────────────────────────────────────────────────

/// Loads and checks user-authored mask files from a directory.
pub struct MaskLoader {
    mask_dir: PathBuf,
}

impl MaskLoader {
    /// Create a loader over the given mask directory.
    pub fn new(mask_dir: PathBuf) -> Self {
        Self { mask_dir }
    }

    /// Create with the default directory (~/.chatmask/masks).
    pub fn with_defaults() -> Self {
        let mask_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".chatmask")
            .join("masks");
        Self::new(mask_dir)
    }

    /// Get the mask directory.
    pub fn mask_dir(&self) -> &Path {
        &self.mask_dir
    }

    /// Mask files (*.toml, *.json) in the mask directory, sorted by path.
    ///
    /// A missing directory is an empty list, not an error.
    pub fn list_files(&self) -> Result<Vec<PathBuf>> {
        if !self.mask_dir.exists() {
            debug!(path = %self.mask_dir.display(), "Mask directory does not exist");
            return Ok(Vec::new());
        }

        let mut files: Vec<PathBuf> = fs::read_dir(&self.mask_dir)
            .map_err(|e| Error::IoRead {
                path: self.mask_dir.clone(),
                source: e,
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| matches!(ext, "toml" | "json"))
                    .unwrap_or(false)
            })
            .collect();
        files.sort();
        Ok(files)
    }

    /// Load every mask from one file, in declaration order.
    pub fn load_file(&self, path: &Path) -> Result<Vec<MaskPreset>> {
        let content = fs::read_to_string(path).map_err(|e| Error::IoRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        match ext {
            "toml" => {
                let table: MaskFile = toml::from_str(&content)
                    .map_err(|e| Error::mask_parse(path, e.to_string()))?;
                Ok(table.masks)
            }
            "json" => {
                // Exports are a bare array; the TOML-equivalent object
                // form ({"masks": [...]}) is accepted too.
                match serde_json::from_str::<Vec<MaskPreset>>(&content) {
                    Ok(masks) => Ok(masks),
                    Err(array_err) => serde_json::from_str::<MaskFile>(&content)
                        .map(|f| f.masks)
                        .map_err(|_| Error::mask_parse(path, array_err.to_string())),
                }
            }
            other => Err(Error::mask_parse(
                path,
                format!("unsupported extension '{}', expected toml or json", other),
            )),
        }
    }

    /// Load one file and validate every mask in it.
    pub fn check_file(&self, path: &Path) -> Result<CheckOutcome> {
        let masks = self.load_file(path)?;
        let total = masks.len();

        let failures = masks
            .into_iter()
            .filter_map(|mask| mask.validate().err().map(|report| (mask.name, report)))
            .collect();

        Ok(CheckOutcome {
            path: path.to_path_buf(),
            total,
            failures,
        })
    }

    /// Check every mask file in the mask directory.
    pub fn check_all(&self) -> Result<Vec<CheckOutcome>> {
        let mut outcomes = Vec::new();
        for path in self.list_files()? {
            outcomes.push(self.check_file(&path)?);
        }
        Ok(outcomes)
    }

    // ─────────────────────────────────────────────────────────────
    // Scaffold
    // ─────────────────────────────────────────────────────────────

    /// Write a starter mask file for authoring.
    ///
    /// The generated mask passes validation as-is so the author starts
    /// from a working file. Refuses to overwrite without `force`.
    pub fn scaffold(path: &Path, name: &str, lang: &str, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(Error::IoWrite {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "file already exists, use --force to overwrite",
                ),
            });
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let seed_id = format!("seed-{}", &uuid::Uuid::new_v4().to_string()[..8]);
        let mask = MaskPreset {
            avatar: "1f916".to_string(),
            name: name.to_string(),
            context: vec![SeedMessage {
                id: seed_id,
                role: ChatRole::User,
                content: "Describe the persona or task for this mask here.".to_string(),
                date: String::new(),
            }],
            model_config: ModelConfig::default(),
            lang: lang.to_string(),
            builtin: false,
            created_at: Utc::now().timestamp_millis(),
        };

        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        let content = match ext {
            "json" => serde_json::to_string_pretty(&vec![mask])?,
            _ => toml::to_string_pretty(&MaskFile { masks: vec![mask] })?,
        };

        fs::write(path, content).map_err(|e| Error::IoWrite {
            path: path.to_path_buf(),
            source: e,
        })?;

        info!(path = %path.display(), "Mask file created");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_loader() -> (MaskLoader, TempDir) {
        let tmp = TempDir::new().unwrap();
        let loader = MaskLoader::new(tmp.path().join("masks"));
        (loader, tmp)
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

    #[test]
    fn test_list_files_missing_dir_is_empty() {
        let (loader, _tmp) = test_loader();
        assert!(loader.list_files().unwrap().is_empty());
    }

    #[test]
    fn test_list_files_filters_and_sorts() {
        let (loader, _tmp) = test_loader();
        fs::create_dir_all(loader.mask_dir()).unwrap();
        fs::write(loader.mask_dir().join("b.toml"), "masks = []").unwrap();
        fs::write(loader.mask_dir().join("a.json"), "[]").unwrap();
        fs::write(loader.mask_dir().join("notes.txt"), "ignored").unwrap();

        let files = loader.list_files().unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.json"));
        assert!(files[1].ends_with("b.toml"));
    }

    #[test]
    fn test_load_json_export() {
        let (loader, _tmp) = test_loader();
        fs::create_dir_all(loader.mask_dir()).unwrap();
        let path = loader.mask_dir().join("export.json");
        fs::write(&path, VALID_JSON).unwrap();

        let masks = loader.load_file(&path).unwrap();
        assert_eq!(masks.len(), 1);
        assert_eq!(masks[0].name, "Proofreader");
        assert!(masks[0].validate().is_ok());
    }

    #[test]
    fn test_load_unsupported_extension() {
        let (loader, _tmp) = test_loader();
        fs::create_dir_all(loader.mask_dir()).unwrap();
        let path = loader.mask_dir().join("masks.yaml");
        fs::write(&path, "masks: []").unwrap();

        let err = loader.load_file(&path).unwrap_err();
        assert!(matches!(err, Error::MaskParse { .. }));
    }

    #[test]
    fn test_check_file_reports_all_violations() {
        let (loader, _tmp) = test_loader();
        fs::create_dir_all(loader.mask_dir()).unwrap();
        let path = loader.mask_dir().join("broken.json");
        let broken = VALID_JSON
            .replace("\"max_tokens\": 2000", "\"max_tokens\": 0")
            .replace("\"temperature\": 0.5", "\"temperature\": 3.0");
        fs::write(&path, broken).unwrap();

        let outcome = loader.check_file(&path).unwrap();
        assert_eq!(outcome.total, 1);
        assert!(!outcome.passed());
        assert_eq!(outcome.failures[0].0, "Proofreader");
        assert_eq!(outcome.failures[0].1.len(), 2);
    }

    #[test]
    fn test_scaffold_then_check() {
        let (loader, _tmp) = test_loader();
        let path = loader.mask_dir().join("new.toml");
        MaskLoader::scaffold(&path, "My Mask", "en", false).unwrap();

        let outcome = loader.check_file(&path).unwrap();
        assert_eq!(outcome.total, 1);
        assert!(outcome.passed());

        let masks = loader.load_file(&path).unwrap();
        assert_eq!(masks[0].name, "My Mask");
        assert_eq!(masks[0].lang, "en");
        assert!(!masks[0].builtin);
        assert!(masks[0].context[0].id.starts_with("seed-"));
    }

    #[test]
    fn test_scaffold_refuses_overwrite() {
        let (loader, _tmp) = test_loader();
        let path = loader.mask_dir().join("new.toml");
        MaskLoader::scaffold(&path, "My Mask", "en", false).unwrap();

        assert!(MaskLoader::scaffold(&path, "Other", "en", false).is_err());
        assert!(MaskLoader::scaffold(&path, "Other", "en", true).is_ok());

        let masks = loader.load_file(&path).unwrap();
        assert_eq!(masks[0].name, "Other");
    }

    #[test]
    fn test_check_all() {
        let (loader, _tmp) = test_loader();
        fs::create_dir_all(loader.mask_dir()).unwrap();
        fs::write(loader.mask_dir().join("good.json"), VALID_JSON).unwrap();
        MaskLoader::scaffold(&loader.mask_dir().join("more.toml"), "More", "en", false).unwrap();

        let outcomes = loader.check_all().unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.passed()));
    }
}
