use serde::{Deserialize, Serialize};

use crate::errors::{BoardError, Result};

/// Board membership role, resolved by the caller before any engine call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Writer,
    Reader,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Writer => "writer",
            Role::Reader => "reader",
        }
    }

    /// Whether this role may create or move columns and cards
    pub fn can_write(&self) -> bool {
        matches!(self, Role::Admin | Role::Writer)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "writer" => Ok(Role::Writer),
            "reader" => Ok(Role::Reader),
            other => Err(BoardError::Validation {
                field: "role".to_string(),
                reason: format!("unknown role '{}'", other),
            }),
        }
    }
}

/// An authenticated caller with its role on the target board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    /// Gate for write operations
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` for a `Reader`.
    pub fn require_writer(&self) -> Result<()> {
        if self.role.can_write() {
            Ok(())
        } else {
            Err(BoardError::Forbidden {
                actor_id: self.id.clone(),
                role: self.role.to_string(),
            })
        }
    }
}
