use std::io;
use std::time::Duration;

use thiserror::Error;

use super::types::{ErrorKind, ProbeStage, SmtpReply};
use crate::mx::MxError;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Resolution(#[from] MxError),
    #[error("connection to {host} failed: {source}")]
    Connect {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("{host} refused the session: {reply}")]
    Greeting { host: String, reply: SmtpReply },
    #[error("{stage} timed out after {timeout_ms} ms")]
    Timeout { stage: ProbeStage, timeout_ms: u64 },
    #[error("I/O error during {stage}: {source}")]
    Io {
        stage: ProbeStage,
        #[source]
        source: io::Error,
    },
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl ProbeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Resolution(_) => ErrorKind::Resolution,
            Self::Connect { .. } | Self::Greeting { .. } | Self::Io { .. } => {
                ErrorKind::Connection
            }
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Protocol(_) => ErrorKind::Protocol,
        }
    }

    /// Maps a socket error to the taxonomy: read/write/connect deadlines become
    /// [`ProbeError::Timeout`], connect failures keep the host for context.
    pub(crate) fn from_io(
        stage: ProbeStage,
        host: &str,
        source: io::Error,
        timeout: Option<Duration>,
    ) -> Self {
        if matches!(
            source.kind(),
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
        ) {
            let timeout_ms = timeout.map_or(0, |t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX));
            return Self::Timeout { stage, timeout_ms };
        }
        match stage {
            ProbeStage::Connect => Self::Connect {
                host: host.to_string(),
                source,
            },
            _ => Self::Io { stage, source },
        }
    }

    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }
}
