//! Error types for engine communication.

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Error raised while talking to the timetabling engine.
///
/// Transport and status errors keep the request URL and, for status
/// errors, the raw response body: failures are surfaced to the user
/// verbatim and the body is usually the only diagnostic the engine gives.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The request never produced a response (connection refused, DNS,
    /// timeout, ...).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The engine answered with a non-success status.
    #[error("engine returned HTTP {status} for {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The response body did not decode into the expected shape.
    #[error("failed to decode {what} from {url}: {source}")]
    Decode {
        url: String,
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be serialized.
    #[error("failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A client-side precondition failed (nothing loaded, no score yet).
    #[error("{0}")]
    State(String),
}

impl EngineError {
    pub(crate) fn state(message: impl Into<String>) -> Self {
        EngineError::State(message.into())
    }

    /// True for failures of the transport itself, which force the polling
    /// state machine back to not-solving.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            EngineError::Transport { .. } | EngineError::Status { .. }
        )
    }
}
