//! Submission gateway boundary.
//!
//! The controller never talks HTTP itself. It hands the draft to an
//! [`OrderGateway`] and receives either an [`Outcome`] (the endpoint answered
//! with a `{ message }` body, success or failure) or a [`GatewayError`]
//! (anything without that shape, surfaced to the host as a fault).

use pzo_schemas::OrderDraft;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Success,
    Failure,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Success => "success",
            OutcomeKind::Failure => "failure",
        }
    }
}

/// Result of the most recent submission, shown as a single banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub message: String,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Failure,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == OutcomeKind::Success
    }
}

// ---------------------------------------------------------------------------
// GatewayError
// ---------------------------------------------------------------------------

/// A submission that produced no usable `{ message }` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Connection, DNS, TLS or other transport-level failure.
    Transport(String),
    /// The endpoint answered but the body was not `{ message: string }`.
    Decode { status: u16, detail: String },
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Transport(msg) => write!(f, "order transport error: {msg}"),
            GatewayError::Decode { status, detail } => {
                write!(f, "order response decode error status={status}: {detail}")
            }
        }
    }
}

impl std::error::Error for GatewayError {}

// ---------------------------------------------------------------------------
// OrderGateway
// ---------------------------------------------------------------------------

/// Order-creation endpoint contract.
///
/// One call = one request. Implementations must not retry; a failure
/// response becomes `Ok(Outcome::failure(..))`, not an error.
#[async_trait::async_trait]
pub trait OrderGateway: Send + Sync {
    /// Short name for logs (e.g. `"http"`).
    fn name(&self) -> &'static str;

    async fn submit(&self, draft: &OrderDraft) -> Result<Outcome, GatewayError>;
}
