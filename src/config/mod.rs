//! Configuration management for sales-loader
//!
//! Handles loading, saving, and validating configuration from TOML files.

mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Warehouse connection configuration
    #[serde(default)]
    pub warehouse: WarehouseConfig,

    /// Load job configuration
    #[serde(default)]
    pub load: LoadConfig,

    /// Paths configuration (internal, not user-editable)
    #[serde(skip)]
    pub paths: PathsConfig,
}

/// Warehouse connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseConfig {
    /// PostgreSQL host
    #[serde(default = "default_warehouse_host")]
    pub host: String,

    /// PostgreSQL port
    #[serde(default = "default_warehouse_port")]
    pub port: u16,

    /// Database name
    #[serde(default = "default_warehouse_database")]
    pub database: String,

    /// Database user
    #[serde(default = "default_warehouse_user")]
    pub user: String,

    /// Environment variable name holding the database password
    #[serde(default = "default_warehouse_password_env")]
    pub password_env: String,
}

/// Load job configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Destination table name
    #[serde(default = "default_table_name")]
    pub table: String,

    /// Path to the CSV extract
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
}

/// Internal paths configuration
#[derive(Debug, Clone, Default)]
pub struct PathsConfig {
    /// Base directory for sales-loader data
    pub base_dir: PathBuf,

    /// Path to config file
    pub config_file: PathBuf,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            host: default_warehouse_host(),
            port: default_warehouse_port(),
            database: default_warehouse_database(),
            user: default_warehouse_user(),
            password_env: default_warehouse_password_env(),
        }
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            table: default_table_name(),
            csv_path: default_csv_path(),
        }
    }
}

impl Config {
    /// Get the default base directory for sales-loader (~/.sales-loader)
    pub fn default_base_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sales-loader")
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        Self::default_base_dir().join("config.toml")
    }

    /// Initialize paths configuration
    fn init_paths(&mut self, base_dir: Option<PathBuf>) {
        let base = base_dir.unwrap_or_else(Self::default_base_dir);
        self.paths = PathsConfig {
            config_file: base.join("config.toml"),
            base_dir: base,
        };
    }

    /// Load configuration from a specific file path
    pub fn load(config_path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", config_path);

        if !config_path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        let content = std::fs::read_to_string(config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        // Set up paths based on config file location
        let base = config_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf();
        config.paths = PathsConfig {
            config_file: config_path.to_path_buf(),
            base_dir: base,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default location
    pub fn load_default() -> Result<Self> {
        Self::load(&Self::default_config_path())
    }

    /// Load configuration from a specific base directory
    pub fn load_from(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = Config::default();
        config.init_paths(base_dir);

        if config.paths.config_file.exists() {
            debug!("Loading config from {:?}", config.paths.config_file);
            let content = std::fs::read_to_string(&config.paths.config_file)?;
            let mut loaded: Config = toml::from_str(&content)?;
            loaded.paths = config.paths;
            config = loaded;
        } else {
            debug!("No config file found, using defaults");
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.paths.config_file.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&self.paths.config_file, content)?;
        info!("Saved config to {:?}", self.paths.config_file);
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.warehouse.host.is_empty() {
            return Err(Error::Config("warehouse.host must not be empty".to_string()));
        }

        if self.warehouse.database.is_empty() {
            return Err(Error::Config(
                "warehouse.database must not be empty".to_string(),
            ));
        }

        if self.warehouse.user.is_empty() {
            return Err(Error::Config("warehouse.user must not be empty".to_string()));
        }

        if !is_valid_table_name(&self.load.table) {
            return Err(Error::Config(format!(
                "load.table is not a valid identifier: {}",
                self.load.table
            )));
        }

        Ok(())
    }
}

impl WarehouseConfig {
    /// Get the database password from the configured environment variable
    pub fn password(&self) -> Option<String> {
        std::env::var(&self.password_env).ok()
    }
}

/// Table names are interpolated into DDL, so they must be plain identifiers.
pub fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.warehouse.port, 5432);
        assert_eq!(config.load.table, "food_sales");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.init_paths(Some(tmp.path().to_path_buf()));
        config.load.table = "test_sales".to_string();
        config.warehouse.port = 5433;

        config.save().unwrap();
        assert!(config.paths.config_file.exists());

        let loaded = Config::load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(loaded.load.table, "test_sales");
        assert_eq!(loaded.warehouse.port, 5433);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        // Invalid: table name with SQL metacharacters
        config.load.table = "food_sales; DROP TABLE x".to_string();
        assert!(config.validate().is_err());

        // Fix it
        config.load.table = "food_sales_v2".to_string();
        assert!(config.validate().is_ok());

        // Invalid: empty user
        config.warehouse.user = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_table_name_rules() {
        assert!(is_valid_table_name("food_sales"));
        assert!(is_valid_table_name("_staging"));
        assert!(!is_valid_table_name("1sales"));
        assert!(!is_valid_table_name(""));
        assert!(!is_valid_table_name("sales\"; --"));
    }
}
