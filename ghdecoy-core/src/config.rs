use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{env, fs, path::PathBuf};
use tracing::{debug, warn};

use crate::synthesize::{DEFAULT_MAX_SHADE, DEFAULT_MIN_DAYS, SynthesisOptions};

const DEFAULT_REPO: &str = "decoy";

#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub account whose calendar is read and pushed to. Falls back to `$USER`.
    pub user: Option<String>,
    /// Name of the repository the decoy commits are pushed to.
    pub repo: String,
    /// Directory the decoy repository and its script are created in.
    pub work_dir: PathBuf,
    /// Shortest run of empty days that gets filled.
    pub min_days: usize,
    /// Highest shade (1..=4) a synthetic day can reach.
    pub max_shade: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    user: Option<String>,
    repo: Option<String>,
    work_dir: Option<PathBuf>,
    min_days: Option<usize>,
    max_shade: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user: env::var("USER").ok().filter(|u| !u.is_empty()),
            repo: DEFAULT_REPO.to_string(),
            work_dir: env::temp_dir(),
            min_days: DEFAULT_MIN_DAYS,
            max_shade: DEFAULT_MAX_SHADE,
        }
    }
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native)
    /// and apply defaults for everything the file leaves out.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config()?;
        Ok(Self::default().merge(file_config))
    }

    /// Synthesis options after range checks. An out-of-range shade falls back
    /// to the default of 4 and a zero gap length to 1.
    pub fn synthesis_options(&self) -> SynthesisOptions {
        let max_shade = if (1..=DEFAULT_MAX_SHADE).contains(&self.max_shade) {
            self.max_shade
        } else {
            warn!(
                max_shade = self.max_shade,
                "max shade must be within 1..=4, using {DEFAULT_MAX_SHADE}"
            );
            DEFAULT_MAX_SHADE
        };
        let min_days = if self.min_days == 0 {
            warn!("minimum gap length must be at least 1, using {DEFAULT_MIN_DAYS}");
            DEFAULT_MIN_DAYS
        } else {
            self.min_days
        };
        SynthesisOptions {
            min_days,
            max_shade,
        }
    }

    fn merge(self, file: FileConfig) -> Self {
        Self {
            user: file.user.or(self.user),
            repo: file.repo.unwrap_or(self.repo),
            work_dir: file.work_dir.unwrap_or(self.work_dir),
            min_days: file.min_days.unwrap_or(self.min_days),
            max_shade: file.max_shade.unwrap_or(self.max_shade),
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("ghdecoy")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("ghdecoy").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            debug!(path = %path.display(), "reading config");
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}
