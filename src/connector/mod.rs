// ABOUTME: Bind handshake connectors turning a raw stream into a bound SMPP session
// ABOUTME: ClientConnector dials and binds, ServerConnector authenticates an accepted stream

mod auth;
mod client;
mod dialer;
mod error;
mod server;

pub use auth::Auth;
pub use client::{ClientConnector, ClientOptions, bind_request};
pub use dialer::{Dialer, TcpDialer};
pub use error::{BindError, ConnectError, ConnectResult};
pub use server::{ServerConfig, ServerConnector, UserCheck};

use crate::codec::Frame;
use crate::connection::Connection;
use crate::datatypes::BindingType;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

/// How long a connector waits for the peer's half of the bind exchange
pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// Sequence number of the bind request, the first PDU of every session
pub const BIND_SEQUENCE_NUMBER: u32 = 1;

/// Capabilities shared by the client and server side of a bind.
///
/// A successful `connect()` yields a `Connection` with the negotiated system
/// id and binding type recorded. On any failure the stream has already been
/// closed when the error is returned.
pub trait Connector {
    type Stream: AsyncRead + AsyncWrite + Unpin;

    /// Run the bind handshake to completion
    async fn connect(&mut self) -> ConnectResult<Connection<Self::Stream>>;

    /// Role of the session. Always known on the client; on the server it is
    /// known once configured or once a bind has succeeded.
    fn bind_type(&self) -> Option<BindingType>;
}

/// Read frames until `accept` takes one. Everything it hands back is
/// discarded.
pub(crate) async fn await_frame<S, T, F>(
    connection: &mut Connection<S>,
    mut accept: F,
) -> ConnectResult<T>
where
    S: AsyncRead + AsyncWrite + Unpin,
    F: FnMut(Frame) -> Result<T, Frame>,
{
    loop {
        let Some(frame) = connection.read_frame().await? else {
            return Err(ConnectError::ConnectionClosed);
        };

        match accept(frame) {
            Ok(value) => return Ok(value),
            Err(other) => {
                debug!(
                    pdu = other.name(),
                    command_id = %format_args!("{:#010x}", other.command_id()),
                    sequence_number = other.sequence_number(),
                    "discarding PDU received during bind"
                );
            }
        }
    }
}

/// Close a connection on a failure path. The handshake error is what gets
/// reported, so a failed shutdown is only logged.
pub(crate) async fn close_quietly<S>(connection: Connection<S>)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    if let Err(err) = connection.close().await {
        debug!(error = %err, "error closing connection after failed bind");
    }
}
