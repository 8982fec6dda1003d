//! Engine configuration
//!
//! Read from a TOML file. Every key is optional:
//!
//! ```toml
//! idempotency_ttl_secs = 86400
//! sort_key_warn_len = 64
//! busy_timeout_ms = 5000
//! ```

use std::path::Path;
use std::time::Duration;

use lexoboard_core::errors::{ExError, ExErrorKind};
use lexoboard_core::ops::idempotency::DEFAULT_TTL_SECS;
use lexoboard_core::ops::IdempotencyGuard;
use serde::{Deserialize, Serialize};

/// Sort keys longer than this are logged at warn level
pub const DEFAULT_SORT_KEY_WARN_LEN: usize = 64;

/// Default wait for a locked database, in milliseconds
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

// Ten years; keeps the TTL inside chrono's representable range.
const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// How long a cached idempotent response can be replayed
    pub idempotency_ttl_secs: u64,
    pub sort_key_warn_len: usize,
    pub busy_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            idempotency_ttl_secs: DEFAULT_TTL_SECS.unsigned_abs(),
            sort_key_warn_len: DEFAULT_SORT_KEY_WARN_LEN,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl EngineConfig {
    /// Load and validate a config file
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, `Config` if it does not parse or a
    /// value is out of range.
    pub fn load(path: &Path) -> Result<Self, ExError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("config_load")
                .with_message(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate config text
    ///
    /// # Errors
    ///
    /// `Config` if the text does not parse or a value is out of range.
    pub fn from_toml_str(text: &str) -> Result<Self, ExError> {
        let config: EngineConfig =
            toml::from_str(text).map_err(|e| config_error(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// `Config` naming the first out-of-range value.
    pub fn validate(&self) -> Result<(), ExError> {
        if self.sort_key_warn_len == 0 {
            return Err(config_error("sort_key_warn_len must be at least 1"));
        }
        if self.idempotency_ttl_secs > MAX_TTL_SECS {
            return Err(config_error(format!(
                "idempotency_ttl_secs must not exceed {}",
                MAX_TTL_SECS
            )));
        }
        Ok(())
    }

    pub fn idempotency_guard(&self) -> IdempotencyGuard {
        let secs = self.idempotency_ttl_secs.min(MAX_TTL_SECS) as i64;
        IdempotencyGuard::new(chrono::Duration::seconds(secs))
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

fn config_error(message: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Config)
        .with_op("config_load")
        .with_message(message)
}
