//! SMPP v3.4 bind handshake.
//!
//! Turns a raw byte stream into an authenticated, role-tagged SMPP session,
//! from either end of the wire:
//!
//! - [`ClientConnector`] dials an SMSC and binds as transmitter, receiver or
//!   transceiver.
//! - [`ServerConnector`] takes an accepted stream, waits for the bind request
//!   and authenticates it through a [`UserCheck`].
//!
//! Both implement [`Connector`]; a successful `connect()` yields a
//! [`Connection`] carrying the negotiated system id and binding type.
//!
//! ```rust,no_run
//! use smpp_bind::{Auth, ClientConnector, Connector, TcpDialer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let auth = Auth::new("localhost:2775", "system_id", "password");
//!     let mut connector = ClientConnector::transmitter(TcpDialer, auth);
//!
//!     let connection = connector.connect().await?;
//!     println!("bound to {:?}", connection.system_id());
//!
//!     connection.close().await?;
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod connection;
pub mod connector;
pub mod datatypes;
mod macros;


pub use codec::{CodecError, Decodable, Encodable, Frame, PduHeader, PduRegistry};
pub use connection::Connection;
pub use connector::{
    Auth, BindError, ClientConnector, ClientOptions, ConnectError, ConnectResult, Connector,
    DEFAULT_HANDSHAKE_TIMEOUT, Dialer, ServerConfig, ServerConnector, TcpDialer, UserCheck,
    bind_request,
};
pub use datatypes::{AddressRange, BindRequest, BindResponse, BindingType, CommandStatus};
