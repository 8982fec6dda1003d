use crate::position::AnchorSide;
use lexoboard_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using BoardError
pub type Result<T> = std::result::Result<T, BoardError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can use for
/// programmatic handling. `PreconditionFailed` is the only kind that means
/// "refetch and retry"; every other client-side kind is a permanent rejection
/// of the request as sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Ordering
    InvalidSortKey,
    InvalidRange,
    InvalidAnchor,

    // Move coordination
    InvalidMove,
    NotFound,
    PreconditionFailed,
    ValidationError,

    // Access (enforced by the calling layer's role collaborator)
    Forbidden,

    // Integration/IO
    Config,
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidSortKey => "ERR_INVALID_SORT_KEY",
            ExErrorKind::InvalidRange => "ERR_INVALID_RANGE",
            ExErrorKind::InvalidAnchor => "ERR_INVALID_ANCHOR",
            ExErrorKind::InvalidMove => "ERR_INVALID_MOVE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::PreconditionFailed => "ERR_PRECONDITION_FAILED",
            ExErrorKind::ValidationError => "ERR_VALIDATION",
            ExErrorKind::Forbidden => "ERR_FORBIDDEN",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the caller should refetch state and retry the request
    pub fn is_retryable(&self) -> bool {
        matches!(self, ExErrorKind::PreconditionFailed)
    }
}

/// Canonical structured error type returned across the engine boundary
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    anchor: Option<AnchorSide>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            anchor: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Record which anchor of the request was rejected
    pub fn with_anchor(mut self, side: AnchorSide) -> Self {
        self.anchor = Some(side);
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the rejected anchor side, if any
    pub fn anchor(&self) -> Option<AnchorSide> {
        self.anchor
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the trace ID context, if any
    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(anchor) = self.anchor {
            write!(f, " (anchor: {})", anchor)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for ordering and move operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    // ===== Ordering Errors =====
    /// Sort key is empty or contains a symbol outside `[0-9a-z]`
    #[error("Invalid sort key {key:?}: {reason}")]
    InvalidSortKey { key: String, reason: String },

    /// No key exists strictly between the bounds
    #[error("Invalid sort key range ({left:?}, {right:?}): {reason}")]
    InvalidRange {
        left: Option<String>,
        right: Option<String>,
        reason: String,
    },

    /// Anchor does not name a usable sibling under the target parent
    #[error("Invalid {side} anchor {anchor_id} under parent {parent_id}: {reason}")]
    InvalidAnchor {
        side: AnchorSide,
        anchor_id: String,
        parent_id: String,
        reason: String,
    },

    // ===== Move Errors =====
    /// Card move would leave its board
    #[error("Invalid move of card {card_id}: {reason}")]
    InvalidMove { card_id: String, reason: String },

    /// Card version no longer matches the caller's expectation
    #[error("Card {card_id} is at version {actual_version}, expected {expected_version}")]
    PreconditionFailed {
        card_id: String,
        expected_version: u64,
        actual_version: u64,
    },

    // ===== Structural Errors =====
    /// Board not found in store
    #[error("Board not found: {board_id}")]
    BoardNotFound { board_id: String },

    /// Column not found on the given board
    #[error("Column {column_id} not found on board {board_id}")]
    ColumnNotFound { column_id: String, board_id: String },

    /// Card not found in store
    #[error("Card not found: {card_id}")]
    CardNotFound { card_id: String },

    // ===== Validation Errors =====
    /// Field failed validation (length, blank)
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Actor's role does not permit writes
    #[error("Actor {actor_id} with role {role} may not modify the board")]
    Forbidden { actor_id: String, role: String },

    // ===== Integration Errors =====
    /// Store read or write failed
    #[error("Persistence error in {op}: {message}")]
    Persistence { op: String, message: String },

    /// Serialization or deserialization failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl BoardError {
    /// Canonical kind for this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            BoardError::InvalidSortKey { .. } => ExErrorKind::InvalidSortKey,
            BoardError::InvalidRange { .. } => ExErrorKind::InvalidRange,
            BoardError::InvalidAnchor { .. } => ExErrorKind::InvalidAnchor,
            BoardError::InvalidMove { .. } => ExErrorKind::InvalidMove,
            BoardError::PreconditionFailed { .. } => ExErrorKind::PreconditionFailed,
            BoardError::BoardNotFound { .. }
            | BoardError::ColumnNotFound { .. }
            | BoardError::CardNotFound { .. } => ExErrorKind::NotFound,
            BoardError::Validation { .. } => ExErrorKind::ValidationError,
            BoardError::Forbidden { .. } => ExErrorKind::Forbidden,
            BoardError::Persistence { .. } => ExErrorKind::Persistence,
            BoardError::Serialization { .. } => ExErrorKind::Serialization,
        }
    }
}

impl From<BoardError> for ExError {
    fn from(err: BoardError) -> Self {
        let base = ExError::new(err.kind()).with_message(err.to_string());
        match err {
            BoardError::InvalidSortKey { key, .. } => base.with_entity_id(key),
            BoardError::InvalidRange { .. } => base,
            BoardError::InvalidAnchor {
                side, anchor_id, ..
            } => base.with_entity_id(anchor_id).with_anchor(side),
            BoardError::InvalidMove { card_id, .. } => base.with_entity_id(card_id),
            BoardError::PreconditionFailed { card_id, .. } => base.with_entity_id(card_id),
            BoardError::BoardNotFound { board_id } => base.with_entity_id(board_id),
            BoardError::ColumnNotFound { column_id, .. } => base.with_entity_id(column_id),
            BoardError::CardNotFound { card_id } => base.with_entity_id(card_id),
            BoardError::Validation { .. } => base,
            BoardError::Forbidden { actor_id, .. } => base.with_entity_id(actor_id),
            BoardError::Persistence { op, .. } => base.with_op(op),
            BoardError::Serialization { .. } => base,
        }
    }
}

/// Conversion from serde_json::Error to BoardError
impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        BoardError::Serialization {
            message: err.to_string(),
        }
    }
}
