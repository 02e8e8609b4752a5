//! View configuration.
//!
//! ```toml
//! auto_refresh = false
//! prefix = "_app_"
//! binding = "detached"
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// How a view is bound to the host store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingMode {
    /// Reads and writes go straight to the host store.
    #[default]
    Live,

    /// The view works on a private copy taken at open and replaces the
    /// host store's contents with it at teardown.
    Detached,
}

/// Settings for a [`SessionView`](crate::SessionView).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Rewrite the expiry sentinel at teardown
    pub auto_refresh: bool,

    /// Prefix reserving keys for bookkeeping entries
    pub prefix: String,

    /// Binding mode
    pub binding: BindingMode,
}

impl SessionConfig {
    /// Prefix used when none is configured
    pub const DEFAULT_PREFIX: &'static str = "_&_session_";

    /// Parse a config from TOML. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: SessionConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings a view cannot work with.
    ///
    /// An empty prefix would mark every key internal.
    pub fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() {
            return Err(Error::InvalidConfig("prefix must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_refresh: true,
            prefix: Self::DEFAULT_PREFIX.to_string(),
            binding: BindingMode::Live,
        }
    }
}
