//! Idempotent-write guard
//!
//! A client retrying a write after a lost response sends the same opaque
//! token again. The guard runs the write at most once per (token, scope) and
//! answers every later request with the first response, byte for byte, until
//! the entry is older than the TTL.
//!
//! The guard works on the same unit of work as the write it wraps, so the
//! lookup, the write and the record commit or roll back together. A failed
//! write records nothing.

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::store::IdempotencyLedger;
use crate::errors::{BoardError, Result};

/// Default lifetime of a cached response
pub const DEFAULT_TTL_SECS: i64 = 24 * 60 * 60;

/// Outcome status of a write, mirroring the HTTP status a transport would send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpStatus {
    /// A new entity was created
    Created,
    /// An existing entity was changed
    Ok,
}

impl OpStatus {
    pub fn code(&self) -> u16 {
        match self {
            OpStatus::Created => 201,
            OpStatus::Ok => 200,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            201 => Some(OpStatus::Created),
            200 => Some(OpStatus::Ok),
            _ => None,
        }
    }
}

/// Cache key: the client token plus the operation it was sent with
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdempotencyKey {
    pub token: String,
    /// Normalized operation scope, e.g. `card_move/<board>/<card>`
    pub scope: String,
}

impl IdempotencyKey {
    pub fn new(token: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            scope: scope.into(),
        }
    }
}

/// A response as first returned to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub status: OpStatus,
    /// Serialized JSON body
    pub body: String,
    pub recorded_at: DateTime<Utc>,
}

/// Result of a guarded write
#[derive(Debug, Clone, PartialEq)]
pub struct IdempotentOutcome<T> {
    pub status: OpStatus,
    /// JSON body; identical across replays of one token
    pub body: String,
    /// The body decoded back into the entity
    pub value: T,
    /// `true` if the write was skipped and a cached response returned
    pub replayed: bool,
}

/// Deduplicates writes by client token
#[derive(Debug, Clone, Copy)]
pub struct IdempotencyGuard {
    ttl: Duration,
}

impl Default for IdempotencyGuard {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_TTL_SECS))
    }
}

impl IdempotencyGuard {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Run `op` unless a live response is already cached for `(token, scope)`
    ///
    /// Without a token (or with an empty one) `op` always runs and nothing is
    /// recorded. With a token, a cached entry younger than the TTL is
    /// replayed; otherwise `op` runs and its response replaces any expired
    /// entry.
    ///
    /// # Errors
    ///
    /// Returns `op`'s error unchanged, ledger errors, or `Serialization` if
    /// the body cannot be encoded or a cached body cannot be decoded.
    pub fn run<U, T, F>(
        &self,
        uow: &mut U,
        token: Option<&str>,
        scope: &str,
        status: OpStatus,
        now: DateTime<Utc>,
        op: F,
    ) -> Result<IdempotentOutcome<T>>
    where
        U: IdempotencyLedger + ?Sized,
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut U) -> Result<T>,
    {
        let token = match token.filter(|t| !t.is_empty()) {
            Some(t) => t,
            None => {
                let value = op(uow)?;
                let body = serde_json::to_string(&value)?;
                return Ok(IdempotentOutcome {
                    status,
                    body,
                    value,
                    replayed: false,
                });
            }
        };

        let key = IdempotencyKey::new(token, scope);
        if let Some(cached) = uow.lookup(&key)? {
            if now - cached.recorded_at < self.ttl {
                tracing::debug!(scope = scope, "replaying cached response");
                let value = serde_json::from_str(&cached.body).map_err(|e| {
                    BoardError::Serialization {
                        message: format!("cached body for {} is unreadable: {}", scope, e),
                    }
                })?;
                return Ok(IdempotentOutcome {
                    status: cached.status,
                    body: cached.body,
                    value,
                    replayed: true,
                });
            }
        }

        let value = op(uow)?;
        let body = serde_json::to_string(&value)?;
        uow.record(
            &key,
            &CachedResponse {
                status,
                body: body.clone(),
                recorded_at: now,
            },
        )?;
        Ok(IdempotentOutcome {
            status,
            body,
            value,
            replayed: false,
        })
    }

    /// Drop every entry that can no longer be replayed
    ///
    /// # Errors
    ///
    /// Returns ledger errors.
    pub fn purge<U: IdempotencyLedger + ?Sized>(
        &self,
        ledger: &mut U,
        now: DateTime<Utc>,
    ) -> Result<usize> {
        ledger.purge_expired(now - self.ttl)
    }
}
