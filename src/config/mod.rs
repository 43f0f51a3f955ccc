use crate::core::aggregate::DEFAULT_BUCKET_WIDTH;
use crate::core::date::TimeFrame;
use crate::core::permission::{EDIT_WINDOW_DAYS, EditPolicy};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Environment variable overriding the configuration directory.
pub const HOME_ENV: &str = "PRODLOG_HOME";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_edit_window_days")]
    pub edit_window_days: u32,
    #[serde(default = "default_bucket_width")]
    pub bucket_width: u32,
    #[serde(default = "default_timeframe")]
    pub default_timeframe: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_edit_window_days() -> u32 {
    EDIT_WINDOW_DAYS
}
fn default_bucket_width() -> u32 {
    DEFAULT_BUCKET_WIDTH
}
fn default_timeframe() -> String {
    "month".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            edit_window_days: default_edit_window_days(),
            bucket_width: default_bucket_width(),
            default_timeframe: default_timeframe(),
            separator_char: default_separator_char(),
        }
    }

    /// Return the configuration directory: `$PRODLOG_HOME` when set,
    /// otherwise the platform default.
    pub fn config_dir() -> PathBuf {
        if let Ok(custom) = env::var(HOME_ENV)
            && !custom.trim().is_empty()
        {
            return PathBuf::from(custom);
        }

        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("prodlog")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".prodlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("prodlog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("prodlog.sqlite")
    }

    /// A `--db` value: `~` expanded, bare names placed in the config dir.
    pub fn resolve_database(name: &str) -> PathBuf {
        let p = crate::utils::path::expand_tilde(name);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Return the file holding the logged-in identity
    pub fn session_file() -> PathBuf {
        Self::config_dir().join("session.json")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Edit policy built from `edit_window_days`.
    pub fn edit_policy(&self) -> EditPolicy {
        EditPolicy::new(self.edit_window_days)
    }

    /// Reporting preset used when the command line names none.
    pub fn timeframe(&self) -> AppResult<TimeFrame> {
        TimeFrame::from_config(&self.default_timeframe).ok_or_else(|| {
            AppError::Config(format!(
                "unknown default_timeframe '{}'",
                self.default_timeframe
            ))
        })
    }

    /// Keys of the current schema that are missing from the config file.
    pub fn missing_keys() -> AppResult<Vec<String>> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let on_disk: Value = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        let expected = serde_yaml::to_value(Self::default())
            .map_err(|e| AppError::Config(e.to_string()))?;

        let (Some(disk), Some(all)) = (on_disk.as_mapping(), expected.as_mapping()) else {
            return Ok(Vec::new());
        };

        Ok(all
            .keys()
            .filter(|k| !disk.contains_key(*k))
            .filter_map(|k| k.as_str().map(str::to_string))
            .collect())
    }

    /// Initialize the configuration directory, config file and DB file.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => Self::resolve_database(&name),
            None => Self::database_file(),
        };

        let config = Self::with_database(db_path.clone());

        if !is_test {
            config.save()?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }

    pub fn save(&self) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))?;
        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }
}
