// src/config.rs

use serde::Deserialize;
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::error::{PickstatError, Result};

/// Default config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "pickstat.yaml";

/// Number of header lines in front of the income data.
pub const DEFAULT_PREAMBLE_LINES: usize = 7;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub questions_path: PathBuf,
    pub income_path: PathBuf,
    pub income_preamble_lines: usize,
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            questions_path: PathBuf::from("questions.csv"),
            income_path: PathBuf::from("12241-0001_en.csv"),
            income_preamble_lines: DEFAULT_PREAMBLE_LINES,
            export_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(PickstatError::data_load(path, e)),
        };
        let cfg = Self::from_yaml(&text).map_err(|source| PickstatError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // an empty document deserializes to unit, not a map
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_gives_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let cfg = Config::load(dir.path().join("nope.yaml"))?;
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.income_preamble_lines, 7);
        Ok(())
    }

    #[test]
    fn partial_yaml_overrides_fields() -> Result<()> {
        let mut f = NamedTempFile::new()?;
        writeln!(f, "questions_path: data/q.csv")?;
        writeln!(f, "income_preamble_lines: 3")?;
        let cfg = Config::load(f.path())?;
        assert_eq!(cfg.questions_path, PathBuf::from("data/q.csv"));
        assert_eq!(cfg.income_preamble_lines, 3);
        assert_eq!(cfg.income_path, PathBuf::from("12241-0001_en.csv"));
        Ok(())
    }

    #[test]
    fn bad_yaml_is_config_error() -> Result<()> {
        let mut f = NamedTempFile::new()?;
        writeln!(f, "income_preamble_lines: [oops")?;
        let err = Config::load(f.path()).unwrap_err();
        assert!(matches!(err, PickstatError::Config { .. }));
        Ok(())
    }

    #[test]
    fn empty_yaml_gives_defaults() {
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }
}
