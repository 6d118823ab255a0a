// ABOUTME: ESME side of the bind handshake for transmitter, receiver and transceiver roles
// ABOUTME: Dials the SMSC, sends the bind request and waits for the matching response

use super::{
    Auth, BIND_SEQUENCE_NUMBER, BindError, ConnectError, ConnectResult, Connector,
    DEFAULT_HANDSHAKE_TIMEOUT, Dialer, await_frame, close_quietly,
};
use crate::codec::Frame;
use crate::connection::Connection;
use crate::datatypes::{AddressRange, BindRequest, BindResponse, BindingType, InterfaceVersion};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Build the bind request a client sends for `binding_type`.
pub fn bind_request(
    auth: &Auth,
    binding_type: BindingType,
    address_range: AddressRange,
) -> BindRequest {
    BindRequest {
        binding_type,
        sequence_number: BIND_SEQUENCE_NUMBER,
        system_id: auth.system_id().to_string(),
        password: auth.password().to_string(),
        system_type: auth.system_type().to_string(),
        interface_version: InterfaceVersion::SmppV34,
        address_range,
    }
}

/// Optional settings for receiver and transceiver connectors
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub address_range: Option<AddressRange>,
    pub handshake_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            address_range: None,
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
        }
    }
}

impl ClientOptions {
    /// Address range the SMSC should route to this ESME
    pub fn with_address_range(mut self, address_range: AddressRange) -> Self {
        self.address_range = Some(address_range);
        self
    }

    pub fn with_handshake_timeout(mut self, handshake_timeout: Duration) -> Self {
        self.handshake_timeout = handshake_timeout;
        self
    }
}

/// Client connector. The binding type is fixed by the constructor used and
/// never changes afterwards; `connect()` may be called again to open a fresh
/// session with the same settings.
#[derive(Debug)]
pub struct ClientConnector<D> {
    dialer: D,
    auth: Auth,
    binding_type: BindingType,
    address_range: Option<AddressRange>,
    handshake_timeout: Duration,
}

impl<D: Dialer> ClientConnector<D> {
    /// Transmitter (TX) connector
    pub fn transmitter(dialer: D, auth: Auth) -> Self {
        Self::with_options(dialer, auth, BindingType::Transmitter, ClientOptions::default())
    }

    /// Receiver (RX) connector
    pub fn receiver(dialer: D, auth: Auth, options: ClientOptions) -> Self {
        Self::with_options(dialer, auth, BindingType::Receiver, options)
    }

    /// Transceiver (TRX) connector
    pub fn transceiver(dialer: D, auth: Auth, options: ClientOptions) -> Self {
        Self::with_options(dialer, auth, BindingType::Transceiver, options)
    }

    fn with_options(
        dialer: D,
        auth: Auth,
        binding_type: BindingType,
        options: ClientOptions,
    ) -> Self {
        Self {
            dialer,
            auth,
            binding_type,
            address_range: options.address_range,
            handshake_timeout: options.handshake_timeout,
        }
    }

    pub fn with_handshake_timeout(mut self, handshake_timeout: Duration) -> Self {
        self.handshake_timeout = handshake_timeout;
        self
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn address_range(&self) -> Option<&AddressRange> {
        self.address_range.as_ref()
    }

    pub fn handshake_timeout(&self) -> Duration {
        self.handshake_timeout
    }

    /// The request `connect()` will send
    pub fn bind_request(&self) -> BindRequest {
        bind_request(
            &self.auth,
            self.binding_type,
            self.address_range.clone().unwrap_or_default(),
        )
    }

    /// Write the bind request and wait for any bind response.
    async fn handshake<S>(
        connection: &mut Connection<S>,
        request: BindRequest,
    ) -> ConnectResult<BindResponse>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        connection.write_frame(&Frame::BindRequest(request)).await?;

        let response = await_frame(connection, |frame| match frame {
            Frame::BindResponse(response) => Ok(response),
            other => Err(other),
        })
        .await?;

        if !response.command_status.is_ok() {
            return Err(BindError::new(response.command_status).into());
        }

        Ok(response)
    }
}

impl<D: Dialer> Connector for ClientConnector<D> {
    type Stream = D::Stream;

    async fn connect(&mut self) -> ConnectResult<Connection<D::Stream>> {
        let smsc = self.auth.smsc();
        debug!(smsc, binding_type = %self.binding_type, "dialing SMSC");

        let stream = self.dialer.dial(smsc).await.map_err(ConnectError::Dial)?;
        let mut connection = Connection::new(stream);

        let request = self.bind_request();
        debug!(
            system_id = %request.system_id,
            binding_type = %request.binding_type,
            "sending bind request"
        );

        let result = timeout(
            self.handshake_timeout,
            Self::handshake(&mut connection, request),
        )
        .await
        .unwrap_or(Err(ConnectError::Timeout(self.handshake_timeout)));

        match result {
            Ok(response) => {
                info!(
                    smsc,
                    system_id = %response.system_id,
                    binding_type = %self.binding_type,
                    "bound to SMSC"
                );
                connection.set_bound(response.system_id, self.binding_type);
                Ok(connection)
            }
            Err(err) => {
                warn!(smsc, binding_type = %self.binding_type, error = %err, "bind failed");
                close_quietly(connection).await;
                Err(err)
            }
        }
    }

    fn bind_type(&self) -> Option<BindingType> {
        Some(self.binding_type)
    }
}
