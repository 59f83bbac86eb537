//! CLI execution context.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context as _, Result};
use parts_db::Db;
use parts_market::store::SqliteProductStore;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve_path(&cwd, path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Search timeout from `database.query_timeout_ms`.
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.config.database.query_timeout_ms)
    }

    /// Fail on configuration errors, printing every problem found.
    ///
    /// Warnings are only shown with `--verbose`.
    pub fn check_config(&self) -> Result<()> {
        let (errors, warnings) = self.config.validate();
        for warning in &warnings {
            self.output.debug(&format!("Config warning: {warning}"));
        }
        if errors.is_empty() {
            return Ok(());
        }
        for error in &errors {
            self.output.error(&format!("Config error: {error}"));
        }
        let source = self
            .config_path
            .as_ref()
            .map_or_else(|| "defaults".to_string(), |p| p.display().to_string());
        bail!("Invalid configuration ({source}): {} error(s)", errors.len())
    }

    /// Check the configuration, then open the configured database as a
    /// product store.
    pub async fn open_store(&self) -> Result<SqliteProductStore> {
        self.check_config()?;
        let settings = &self.config.database;
        self.output.debug(&format!("Opening {}", settings.url));

        let db = Db::open(&settings.url, settings.max_connections)
            .await
            .with_context(|| format!("Failed to open database: {}", settings.url))?;
        Ok(SqliteProductStore::new(db))
    }
}

/// Find config file in directory tree.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

/// Resolve a path relative to the working directory.
pub fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
