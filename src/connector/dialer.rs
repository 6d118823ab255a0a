// ABOUTME: Dial abstraction used by client connectors to open the raw stream
// ABOUTME: TcpDialer dials plain TCP; any async closure from address to stream also works

use std::future::Future;
use std::io;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::debug;

/// Opens a byte stream to an SMSC address.
///
/// Implemented for `TcpDialer` and for any `Fn(String) -> Future<Output =
/// io::Result<S>>`, which is how tests plug in in-memory pipes and how a TLS
/// transport would be added.
pub trait Dialer {
    type Stream: AsyncRead + AsyncWrite + Unpin;

    async fn dial(&self, addr: &str) -> io::Result<Self::Stream>;
}

/// Plain TCP, no TLS
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpDialer;

impl Dialer for TcpDialer {
    type Stream = TcpStream;

    async fn dial(&self, addr: &str) -> io::Result<TcpStream> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        debug!(addr, local = ?stream.local_addr().ok(), "tcp connected");
        Ok(stream)
    }
}

impl<F, Fut, S> Dialer for F
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = io::Result<S>>,
    S: AsyncRead + AsyncWrite + Unpin,
{
    type Stream = S;

    async fn dial(&self, addr: &str) -> io::Result<S> {
        (self)(addr.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{DuplexStream, duplex};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn tcp_dialer_connects() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let accept = tokio::spawn(async move { listener.accept().await.map(|(_, peer)| peer) });
        let stream = TcpDialer.dial(&addr).await.unwrap();

        let peer = accept.await.unwrap().unwrap();
        assert_eq!(stream.local_addr().unwrap(), peer);
    }

    #[tokio::test]
    async fn closure_dialer_receives_address() {
        let dialer = |addr: String| async move {
            assert_eq!(addr, "in-memory:1");
            let (client, _server) = duplex(64);
            Ok::<DuplexStream, io::Error>(client)
        };

        assert!(dialer.dial("in-memory:1").await.is_ok());
    }

    #[tokio::test]
    async fn closure_dialer_error_passes_through() {
        let dialer = |_addr: String| async {
            Err::<DuplexStream, _>(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"))
        };

        let err = dialer.dial("nowhere:1").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionRefused);
    }
}
