use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use kondi_util::errors::{KondiError, KondiResult};

/// Which application model a resolution produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// Production model: no test-scoped project dependencies, no
    /// conditional dev dependencies.
    #[default]
    Prod,
    /// Test model: also includes the project's test-scoped dependencies.
    Test,
    /// Development model: conditional dev dependencies may activate.
    Dev,
}

impl ResolutionMode {
    pub fn includes_test_scope(self) -> bool {
        self == ResolutionMode::Test
    }

    pub fn activates_dev_dependencies(self) -> bool {
        self == ResolutionMode::Dev
    }
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResolutionMode::Prod => "prod",
            ResolutionMode::Test => "test",
            ResolutionMode::Dev => "dev",
        };
        f.write_str(s)
    }
}

impl FromStr for ResolutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prod" => Ok(ResolutionMode::Prod),
            "test" => Ok(ResolutionMode::Test),
            "dev" => Ok(ResolutionMode::Dev),
            other => Err(format!(
                "unknown resolution mode '{other}' (expected prod, test or dev)"
            )),
        }
    }
}

/// Resolution settings from `[resolve]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolveConfig {
    #[serde(default)]
    pub mode: Option<ResolutionMode>,
}

/// Global user configuration loaded from `~/.kondi/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub resolve: ResolveConfig,
}

impl GlobalConfig {
    /// Load the global configuration, or return defaults if the file doesn't exist.
    pub fn load() -> KondiResult<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from an explicit path, or return defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> KondiResult<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| KondiError::Config {
            message: format!("Failed to read global config: {e}"),
        })?;
        toml::from_str(&content).map_err(|e| KondiError::Config {
            message: format!("Failed to parse global config: {e}"),
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Mode configured globally, `prod` when unset.
    pub fn mode(&self) -> ResolutionMode {
        self.resolve.mode.unwrap_or_default()
    }
}

/// Returns the path to the kondi data directory (`$KONDI_HOME` or `~/.kondi/`).
pub fn dirs_path() -> PathBuf {
    if let Ok(home) = std::env::var("KONDI_HOME") {
        return PathBuf::from(home);
    }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".kondi")
}
