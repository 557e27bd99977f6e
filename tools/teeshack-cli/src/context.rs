//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use teeshack_auth::AuthService;
use teeshack_cache::Cache;
use teeshack_commerce::cart::{CartStore, PricingPolicy};
use teeshack_commerce::reviews::ReviewBoard;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory relative paths in the config resolve against.
    pub base_dir: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, base_dir) = if let Some(path) = config_path {
            let config = CliConfig::load(path)?;
            let base = Path::new(path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| cwd.join(p))
                .unwrap_or_else(|| cwd.clone());
            (config, base)
        } else {
            Self::find_config(&cwd).unwrap_or_else(|| (CliConfig::default(), cwd.clone()))
        };

        tracing::debug!(base = %base_dir.display(), "configuration loaded");
        Ok(Self {
            config,
            output,
            cwd,
            base_dir,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config, current)),
                        Err(e) => tracing::warn!(path = %config_path.display(), error = %e, "skipping config"),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the config base directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.base_dir.join(path)
        }
    }

    /// Directory of the file-backed key-value slot.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// Open the storefront cache.
    pub fn cache(&self) -> Result<Cache> {
        let dir = self.storage_dir();
        Cache::open_dir(&dir).with_context(|| format!("Failed to open storage: {}", dir.display()))
    }

    /// Cart restored from storage, persisting every change back.
    pub fn cart_store(&self) -> Result<CartStore> {
        let currency = self.config.pricing.currency()?;
        Ok(CartStore::restore(self.cache()?, currency))
    }

    pub fn pricing_policy(&self) -> Result<PricingPolicy> {
        self.config.pricing.policy()
    }

    pub fn auth(&self) -> Result<AuthService> {
        Ok(AuthService::restore(self.cache()?))
    }

    /// Built-in reviews plus those written from this storage.
    pub fn reviews(&self) -> Result<ReviewBoard> {
        Ok(ReviewBoard::restore(self.cache()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("teeshack.toml"), "[storage]\ndir = \"state\"\n").unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, base) = Context::find_config(&nested).unwrap();
        assert_eq!(config.storage.dir, "state");
        assert_eq!(base, root.path());
    }

    #[test]
    fn test_storage_resolves_against_config_dir() {
        let root = tempfile::tempdir().unwrap();
        let ctx = Context {
            config: CliConfig::default(),
            output: Output::new(false, true),
            cwd: root.path().join("elsewhere"),
            base_dir: root.path().to_path_buf(),
        };

        assert_eq!(ctx.storage_dir(), root.path().join(".teeshack"));
        assert_eq!(ctx.resolve_path("/abs/dir"), PathBuf::from("/abs/dir"));
    }

    #[test]
    fn test_cart_round_trips_through_storage() {
        let root = tempfile::tempdir().unwrap();
        let ctx = Context {
            config: CliConfig::default(),
            output: Output::new(false, true),
            cwd: root.path().to_path_buf(),
            base_dir: root.path().to_path_buf(),
        };

        let mut store = ctx.cart_store().unwrap();
        store.add_item(
            "7".into(),
            "Logo Tee",
            teeshack_commerce::money::Money::from_decimal(25.0, Default::default()),
            "",
            "L",
            "White",
        );

        let restored = ctx.cart_store().unwrap();
        assert_eq!(restored.total_items(), 1);
        assert!(root.path().join(".teeshack").join("teeshack_cart.json").exists());
    }
}
