//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_core::catalog::ProductFeed;
use storefront_core::Storefront;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Feed path given on the command line.
    pub feed_override: Option<String>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(
        config_path: Option<&str>,
        feed_override: Option<String>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            feed_override,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Load the product feed: `--feed`, then `store.feed`, then the sample.
    pub fn load_feed(&self) -> Result<ProductFeed> {
        let path = self
            .feed_override
            .as_deref()
            .or(self.config.store.feed.as_deref());

        let Some(path) = path else {
            self.output.debug("Using bundled sample feed");
            return ProductFeed::sample().context("Bundled sample feed is invalid");
        };

        let resolved = self.resolve_path(path);
        self.output
            .debug(&format!("Loading feed: {}", resolved.display()));
        let content = std::fs::read_to_string(&resolved)
            .with_context(|| format!("Failed to read feed: {}", resolved.display()))?;

        let feed = if path.ends_with(".toml") {
            ProductFeed::from_toml_str(&content)
        } else {
            ProductFeed::from_json_str(&content)
        };
        feed.with_context(|| format!("Failed to parse feed: {}", resolved.display()))
    }

    /// Build a storefront from the configured feed and tax rate.
    pub fn storefront(&self) -> Result<Storefront> {
        let feed = self.load_feed()?;
        let tax_rate = self.config.tax_rate()?;
        Storefront::with_tax_rate(&feed, tax_rate).context("Failed to seed the catalog")
    }
}
