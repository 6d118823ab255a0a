// ABOUTME: SMSC side of the bind handshake over an already-accepted stream
// ABOUTME: Authenticates the bind request through a UserCheck and answers with the matching response

use super::{
    ConnectError, ConnectResult, Connector, DEFAULT_HANDSHAKE_TIMEOUT, await_frame, close_quietly,
};
use crate::codec::{CodecError, Frame};
use crate::connection::Connection;
use crate::datatypes::{BindRequest, BindResponse, BindingType, CommandStatus, InterfaceVersion};
use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Decides whether a bind request may proceed.
///
/// Implemented for any `Fn(&str, &str, SocketAddr) -> bool`, called with the
/// requested system id, the password and the peer address.
pub trait UserCheck: Send + Sync {
    fn check(&self, system_id: &str, password: &str, peer_addr: SocketAddr) -> bool;
}

impl<F> UserCheck for F
where
    F: Fn(&str, &str, SocketAddr) -> bool + Send + Sync,
{
    fn check(&self, system_id: &str, password: &str, peer_addr: SocketAddr) -> bool {
        self(system_id, password, peer_addr)
    }
}

/// Server-side handshake settings
#[derive(Clone)]
pub struct ServerConfig {
    /// Our own identity, sent back in every successful bind response
    pub system_id: String,
    pub user_check: Option<Arc<dyn UserCheck>>,
    /// Only accept binds for this role. `None` accepts any.
    pub binding_type: Option<BindingType>,
    /// Status sent when the user check refuses a bind
    pub reject_status: CommandStatus,
    pub handshake_timeout: Duration,
}

impl ServerConfig {
    pub fn new(system_id: impl Into<String>) -> Self {
        Self {
            system_id: system_id.into(),
            user_check: None,
            binding_type: None,
            reject_status: CommandStatus::InvalidSystemId,
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
        }
    }

    pub fn with_user_check<F>(mut self, user_check: F) -> Self
    where
        F: Fn(&str, &str, SocketAddr) -> bool + Send + Sync + 'static,
    {
        self.user_check = Some(Arc::new(user_check));
        self
    }

    pub fn with_binding_type(mut self, binding_type: BindingType) -> Self {
        self.binding_type = Some(binding_type);
        self
    }

    pub fn with_reject_status(mut self, reject_status: CommandStatus) -> Self {
        self.reject_status = reject_status;
        self
    }

    pub fn with_handshake_timeout(mut self, handshake_timeout: Duration) -> Self {
        self.handshake_timeout = handshake_timeout;
        self
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("system_id", &self.system_id)
            .field("user_check", &self.user_check.is_some())
            .field("binding_type", &self.binding_type)
            .field("reject_status", &self.reject_status)
            .field("handshake_timeout", &self.handshake_timeout)
            .finish()
    }
}

/// Server connector for one accepted stream.
///
/// The stream is handed to the `Connection` on the first `connect()`; a
/// second call fails with `ConnectError::StreamConsumed`.
#[derive(Debug)]
pub struct ServerConnector<S = TcpStream> {
    stream: Option<S>,
    peer_addr: SocketAddr,
    config: ServerConfig,
}

impl ServerConnector<TcpStream> {
    /// Wrap an accepted TCP stream, reading the peer address from the socket
    pub fn from_tcp(stream: TcpStream, config: ServerConfig) -> io::Result<Self> {
        let peer_addr = stream.peer_addr()?;
        Ok(Self::new(stream, peer_addr, config))
    }
}

impl<S> ServerConnector<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer_addr: SocketAddr, config: ServerConfig) -> Self {
        Self {
            stream: Some(stream),
            peer_addr,
            config,
        }
    }

    /// Restrict the role accepted from the client
    pub fn set_binding_type(&mut self, binding_type: BindingType) -> &mut Self {
        self.config.binding_type = Some(binding_type);
        self
    }

    pub fn set_user_check<F>(&mut self, user_check: F) -> &mut Self
    where
        F: Fn(&str, &str, SocketAddr) -> bool + Send + Sync + 'static,
    {
        self.config.user_check = Some(Arc::new(user_check));
        self
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Wait for a bind request, decide it and answer. Returns the bound role.
    async fn handshake(&self, connection: &mut Connection<S>) -> ConnectResult<BindingType> {
        let request = match await_frame(connection, |frame| match frame {
            Frame::BindRequest(request) => Ok(request),
            other => Err(other),
        })
        .await
        {
            Ok(request) => request,
            Err(ConnectError::Codec(err)) => {
                self.reject_malformed(connection, &err).await;
                return Err(err.into());
            }
            Err(err) => return Err(err),
        };

        let requested = request.binding_type;
        debug!(
            system_id = %request.system_id,
            binding_type = %requested,
            peer = %self.peer_addr,
            "bind request received"
        );

        if let Some(expected) = self.config.binding_type {
            if expected != requested {
                warn!(
                    system_id = %request.system_id,
                    peer = %self.peer_addr,
                    %expected,
                    %requested,
                    "bind rejected, binding type not allowed"
                );
                Self::reject(connection, &request, CommandStatus::BindFailed).await;
                return Err(ConnectError::BindingTypeMismatch {
                    expected,
                    requested,
                });
            }
        }

        let Some(user_check) = self.config.user_check.as_ref() else {
            warn!(peer = %self.peer_addr, "bind rejected, no user check configured");
            Self::reject(connection, &request, self.config.reject_status).await;
            return Err(ConnectError::MissingUserCheck);
        };

        if !user_check.check(&request.system_id, &request.password, self.peer_addr) {
            warn!(
                system_id = %request.system_id,
                peer = %self.peer_addr,
                status = %self.config.reject_status,
                "bind rejected by user check"
            );
            Self::reject(connection, &request, self.config.reject_status).await;
            return Err(ConnectError::AuthenticationFailed {
                system_id: request.system_id,
            });
        }

        let response =
            BindResponse::for_request(&request, CommandStatus::Ok, self.config.system_id.as_str())
                .with_interface_version(InterfaceVersion::SmppV34);
        connection.write_frame(&Frame::BindResponse(response)).await?;

        info!(
            system_id = %request.system_id,
            binding_type = %requested,
            peer = %self.peer_addr,
            "client bound"
        );
        connection.set_bound(request.system_id, requested);

        Ok(requested)
    }

    /// Answer a bind whose header decoded but whose body did not, with the
    /// status matching the offending field. Best-effort, like `reject`.
    async fn reject_malformed(&self, connection: &mut Connection<S>, err: &CodecError) {
        if matches!(err, CodecError::Io(_)) {
            return;
        }
        let Some(header) = connection.pending_header() else {
            return;
        };
        if !header.command_id.is_bind_request() {
            return;
        }
        let Some(binding_type) = BindingType::from_command_id(header.command_id) else {
            return;
        };

        let status = err.to_command_status();
        warn!(
            peer = %self.peer_addr,
            %binding_type,
            error = %err,
            %status,
            "bind rejected, malformed request"
        );
        let response = BindResponse {
            binding_type,
            command_status: status,
            sequence_number: header.sequence_number,
            system_id: String::new(),
            sc_interface_version: None,
        };
        if let Err(err) = connection.write_frame(&Frame::BindResponse(response)).await {
            warn!(error = %err, %status, "failed to send bind rejection");
        }
    }

    /// Best-effort rejection; the caller is about to close the stream anyway.
    async fn reject(connection: &mut Connection<S>, request: &BindRequest, status: CommandStatus) {
        let response = BindResponse::for_request(request, status, "");
        if let Err(err) = connection.write_frame(&Frame::BindResponse(response)).await {
            warn!(error = %err, %status, "failed to send bind rejection");
        }
    }
}

impl<S> Connector for ServerConnector<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    type Stream = S;

    async fn connect(&mut self) -> ConnectResult<Connection<S>> {
        let stream = self.stream.take().ok_or(ConnectError::StreamConsumed)?;
        let mut connection = Connection::new(stream).with_peer_addr(self.peer_addr);

        let handshake_timeout = self.config.handshake_timeout;
        let result = timeout(handshake_timeout, self.handshake(&mut connection))
            .await
            .unwrap_or(Err(ConnectError::Timeout(handshake_timeout)));

        match result {
            Ok(binding_type) => {
                self.config.binding_type = Some(binding_type);
                Ok(connection)
            }
            Err(err) => {
                debug!(peer = %self.peer_addr, error = %err, "closing connection after failed bind");
                close_quietly(connection).await;
                Err(err)
            }
        }
    }

    fn bind_type(&self) -> Option<BindingType> {
        self.config.binding_type
    }
}
