//! Correlation types for request tracking and tracing
//!
//! These types carry per-request metadata from the calling layer into the
//! engine: the ids used to correlate log lines and errors, and the
//! client-supplied idempotency token used to deduplicate retried writes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! correlation_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Fresh time-ordered id (UUIDv7)
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Wrap an id received from upstream
            pub fn from_string(s: String) -> Self {
                Self(s)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

correlation_id!(
    /// Identifies one request as it crosses the engine boundary
    RequestId
);

correlation_id!(
    /// Groups the requests of one client-side action
    TraceId
);

/// Per-request metadata handed from the calling layer to the engine
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub trace_id: Option<TraceId>,
    /// Opaque client token; writes sharing a token (and operation) run at most once
    pub idempotency_token: Option<String>,
}

impl RequestContext {
    /// Context with a fresh request id and nothing else
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn with_idempotency_token(mut self, token: impl Into<String>) -> Self {
        self.idempotency_token = Some(token.into());
        self
    }

    /// The idempotency token, if one was supplied and is non-empty
    pub fn idempotency_token(&self) -> Option<&str> {
        self.idempotency_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}
