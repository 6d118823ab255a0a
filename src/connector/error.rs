// ABOUTME: Error types returned by the bind handshake on both sides of the wire
// ABOUTME: BindError carries the SMSC's command_status; ConnectError covers every failure path

use crate::codec::CodecError;
use crate::datatypes::{BindingType, CommandStatus};
use std::io;
use std::time::Duration;
use thiserror::Error;

/// The remote end answered the bind with a non-Ok command_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("binding error ({command_status}): {}", .command_status.description())]
pub struct BindError {
    pub command_status: CommandStatus,
}

impl BindError {
    pub fn new(command_status: CommandStatus) -> Self {
        Self { command_status }
    }
}

/// Why a `connect()` call did not produce a bound connection.
///
/// The stream is always closed before one of these is returned.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The dialer could not open a stream to the SMSC
    #[error(transparent)]
    Dial(io::Error),

    /// Reading, parsing or writing a PDU failed
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Peer closed the stream before sending the PDU we were waiting for
    #[error("Connection closed unexpectedly")]
    ConnectionClosed,

    #[error("Bind handshake timed out after {0:?}")]
    Timeout(Duration),

    /// The SMSC rejected our bind request
    #[error(transparent)]
    Bind(#[from] BindError),

    /// The user check rejected the client's credentials
    #[error("authentication failed for system_id: {system_id}")]
    AuthenticationFailed { system_id: String },

    /// A server connector was run without a user check installed
    #[error("no user check configured, refusing bind")]
    MissingUserCheck,

    #[error("binding type mismatch: expected {expected}, requested {requested}")]
    BindingTypeMismatch {
        expected: BindingType,
        requested: BindingType,
    },

    /// `connect()` was called again on a server connector whose stream was
    /// already handed out
    #[error("accepted stream already consumed")]
    StreamConsumed,
}

impl ConnectError {
    /// Command status of a remote bind rejection
    pub fn command_status(&self) -> Option<CommandStatus> {
        match self {
            ConnectError::Bind(err) => Some(err.command_status),
            _ => None,
        }
    }
}

/// Result type alias for bind handshakes
pub type ConnectResult<T> = Result<T, ConnectError>;
