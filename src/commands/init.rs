//! Init command implementation

use crate::config::Config;
use crate::error::{Error, Result};
use std::path::PathBuf;
use tracing::info;

/// Initialize sales-loader: write a default config file.
///
/// The written file carries the connection defaults resolved from the
/// `WAREHOUSE_POSTGRES_*` environment at init time, making the effective
/// configuration explicit and editable.
pub async fn cmd_init(base_dir: Option<PathBuf>, force: bool) -> Result<()> {
    let mut config = Config::default();

    let base = base_dir.unwrap_or_else(Config::default_base_dir);
    config.paths.config_file = base.join("config.toml");
    config.paths.base_dir = base;

    if config.paths.config_file.exists() && !force {
        return Err(Error::Config(format!(
            "Already initialized at {}",
            config.paths.config_file.display()
        )));
    }

    config.validate()?;
    config.save()?;

    info!("Initialized at {:?}", config.paths.base_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_writes_config() {
        let tmp = TempDir::new().unwrap();
        cmd_init(Some(tmp.path().to_path_buf()), false).await.unwrap();
        assert!(tmp.path().join("config.toml").exists());
    }

    #[tokio::test]
    async fn test_init_refuses_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        cmd_init(Some(tmp.path().to_path_buf()), false).await.unwrap();

        let err = cmd_init(Some(tmp.path().to_path_buf()), false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        // --force overwrites
        cmd_init(Some(tmp.path().to_path_buf()), true).await.unwrap();
    }
}
