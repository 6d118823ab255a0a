// ABOUTME: Provides framed SMPP v3.4 I/O over any async byte stream
// ABOUTME: Carries the system id and binding type negotiated by a bind handshake

use crate::codec::{CodecError, Encodable, Frame, PduHeader};
use crate::datatypes::BindingType;
use bytes::{Buf, BytesMut};
use std::io::{self, Cursor};
use std::net::SocketAddr;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;

/// A framed SMPP connection.
///
/// Wraps a byte stream (a `TcpStream` in production, anything implementing
/// `AsyncRead + AsyncWrite` in tests) and reads and writes whole PDUs. Once a
/// bind handshake succeeds the connection also records who is on the other
/// end and in what role:
///
/// ```text
/// OPEN --bind ok--> BOUND_TX / BOUND_RX / BOUND_TRX
/// ```
///
/// `system_id()` and `binding_type()` stay `None` until then.
#[derive(Debug)]
pub struct Connection<S = TcpStream> {
    // Writes go through a `BufWriter`; every `write_frame` flushes, so the
    // buffer is empty between calls.
    stream: BufWriter<S>,

    // The buffer for reading frames.
    buffer: BytesMut,

    system_id: Option<String>,
    binding_type: Option<BindingType>,
    peer_addr: Option<SocketAddr>,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Create a new `Connection`, backed by `stream`. Read and write buffers
    /// are initialized.
    pub fn new(stream: S) -> Connection<S> {
        Connection {
            stream: BufWriter::new(stream),
            // Bind PDUs are well under 100 bytes; 4KB leaves room for whatever
            // a peer pipelines behind them.
            buffer: BytesMut::with_capacity(4 * 1024),
            system_id: None,
            binding_type: None,
            peer_addr: None,
        }
    }

    pub fn with_peer_addr(mut self, peer_addr: SocketAddr) -> Connection<S> {
        self.peer_addr = Some(peer_addr);
        self
    }

    /// Read a single `Frame` value from the underlying stream.
    ///
    /// Waits until enough data has arrived to parse a frame. Data remaining in
    /// the read buffer after the frame is kept for the next call.
    ///
    /// Returns `None` if the peer closed the stream on a frame boundary. A
    /// close in the middle of a frame is an error.
    pub async fn read_frame(&mut self) -> Result<Option<Frame>, CodecError> {
        loop {
            if let Some(frame) = self.parse_frame()? {
                return Ok(Some(frame));
            }

            // `0` indicates "end of stream".
            if 0 == self.stream.read_buf(&mut self.buffer).await? {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                return Err(io::Error::new(
                    io::ErrorKind::ConnectionReset,
                    "connection reset by peer",
                )
                .into());
            }
        }
    }

    /// Tries to parse a frame from the buffer. `Ok(None)` means more data is
    /// needed. A malformed frame is an error and leaves the connection in an
    /// unusable state.
    fn parse_frame(&mut self) -> Result<Option<Frame>, CodecError> {
        let mut buf = Cursor::new(&self.buffer[..]);

        // `check` is much cheaper than a full parse and lets us skip
        // allocating until the whole frame is buffered.
        let len = match Frame::check(&mut buf) {
            Ok(len) => len,
            Err(CodecError::Incomplete) => return Ok(None),
            Err(e) => return Err(e),
        };

        // The frame is complete, so any error from here on is fatal
        // (including `Incomplete` from a body shorter than its fields).
        let frame = Frame::parse(&mut buf)?;
        self.buffer.advance(len);

        Ok(Some(frame))
    }

    /// Header of the PDU at the front of the read buffer. After `read_frame`
    /// fails on a malformed body, this is the header of the offending PDU,
    /// which stays buffered.
    pub fn pending_header(&self) -> Option<PduHeader> {
        PduHeader::decode(&mut Cursor::new(&self.buffer[..])).ok()
    }

    /// Encode and write a single `Frame`, then flush. Returns the number of
    /// bytes written.
    pub async fn write_frame(&mut self, frame: &Frame) -> Result<usize, CodecError> {
        let bytes = frame.to_bytes()?;
        self.stream.write_all(&bytes).await?;
        self.stream.flush().await?;
        Ok(bytes.len())
    }

    /// Shut down the write half of the stream and drop it.
    pub async fn close(mut self) -> io::Result<()> {
        self.stream.shutdown().await
    }

    /// System id of the peer, recorded after a successful bind
    pub fn system_id(&self) -> Option<&str> {
        self.system_id.as_deref()
    }

    /// Role negotiated by the bind
    pub fn binding_type(&self) -> Option<BindingType> {
        self.binding_type
    }

    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer_addr
    }

    pub fn get_ref(&self) -> &S {
        self.stream.get_ref()
    }

    /// Unwrap the stream together with any bytes already read from it but
    /// not yet parsed.
    pub fn into_parts(self) -> (S, BytesMut) {
        (self.stream.into_inner(), self.buffer)
    }

    pub(crate) fn set_bound(&mut self, system_id: String, binding_type: BindingType) {
        self.system_id = Some(system_id);
        self.binding_type = Some(binding_type);
    }
}
