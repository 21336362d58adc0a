//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use cardshop_commerce::ExchangeRate;
use cardshop_data::{CatalogAssembler, RequestPacer, ScryfallClient, TimeoutConfig};

use crate::config::CardshopConfig;
use crate::output::Output;

/// Config file names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["cardshop.toml", ".cardshop.toml", "cardshop.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CardshopConfig,
    /// Where the configuration came from, if a file was found.
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

        let (config, config_path) = if let Some(path) = config_path {
            (CardshopConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match Self::find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (CardshopConfig::default(), None),
            }
        };

        match &config_path {
            Some(path) => tracing::debug!(path = %path.display(), "Using config file"),
            None => tracing::debug!("No config file found, using defaults"),
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(PathBuf, CardshopConfig)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CardshopConfig::load(config_path.to_str()?) {
                        return Some((config_path, config));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory relative paths in the config are resolved against.
    pub fn base_dir(&self) -> PathBuf {
        self.config_path
            .as_ref()
            .and_then(|p| p.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| self.resolve_path(&p.to_string_lossy()))
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// The inventory source path.
    pub fn inventory_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.config.inventory.path);
        if path.is_absolute() {
            path
        } else {
            self.base_dir().join(path)
        }
    }

    /// Build the metadata lookup client.
    pub fn lookup_client(&self) -> Result<ScryfallClient> {
        let lookup = &self.config.lookup;
        ScryfallClient::builder()
            .base_url(&lookup.base_url)
            .user_agent(&lookup.user_agent)
            .timeout(TimeoutConfig::from_total(lookup.timeout()))
            .build()
            .context("Failed to create lookup client")
    }

    /// Build the catalog assembler.
    pub fn assembler(&self) -> CatalogAssembler {
        let lookup = &self.config.lookup;
        CatalogAssembler::new()
            .with_pacer(RequestPacer::new(lookup.request_interval()))
            .with_lookup_timeout(lookup.timeout())
            .with_exchange_rate(ExchangeRate::new(self.config.pricing.exchange_rate))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}
