// SMPP v3.4 Codec - Separates parsing/encoding logic from domain models
//
// Each PDU implements Encodable/Decodable; Frame dispatches between them and
// the PduRegistry maps command ids to decoders. Only the PDUs that can show up
// while a bind is being negotiated are registered, everything else is carried
// as an opaque Frame::Unknown so a handshake can skip over it.

use crate::datatypes::{
    BindRequest, BindResponse, CommandId, CommandStatus, EnquireLink, EnquireLinkResponse,
    GenericNack, Unbind, UnbindResponse,
};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::OnceLock;
use thiserror::Error;

/// Maximum allowed PDU size to prevent memory exhaustion attacks
pub const MAX_PDU_SIZE: u32 = 65536; // 64KB

/// SMPP v3.4 PDU Header (16 bytes, common to all PDUs)
#[derive(Debug, Clone, PartialEq)]
pub struct PduHeader {
    pub command_length: u32,
    pub command_id: CommandId,
    pub command_status: CommandStatus,
    pub sequence_number: u32,
}

impl PduHeader {
    pub const SIZE: usize = 16;

    /// Decode PDU header from buffer with validation
    pub fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        if buf.remaining() < Self::SIZE {
            return Err(CodecError::Incomplete);
        }

        let command_length = buf.get_u32();
        let command_id_raw = buf.get_u32();
        let command_status_raw = buf.get_u32();
        let sequence_number = buf.get_u32();

        if !(Self::SIZE as u32..=MAX_PDU_SIZE).contains(&command_length) {
            return Err(CodecError::InvalidPduLength {
                length: command_length,
                min: Self::SIZE as u32,
                max: MAX_PDU_SIZE,
            });
        }

        let command_id = CommandId::try_from(command_id_raw)
            .map_err(|_| CodecError::InvalidCommandId(command_id_raw))?;
        // Unlisted and vendor-specific values decode to CommandStatus::Other
        let command_status = CommandStatus::from(command_status_raw);

        // SMPP v3.4: requests must carry a NULL command_status
        if !command_id.is_response() && command_status != CommandStatus::Ok {
            return Err(CodecError::InvalidRequestStatus {
                command_id,
                command_status,
            });
        }

        if sequence_number == 0 || sequence_number == 0xFFFF_FFFF {
            return Err(CodecError::ReservedSequenceNumber(sequence_number));
        }

        Ok(PduHeader {
            command_length,
            command_id,
            command_status,
            sequence_number,
        })
    }

    /// Encode PDU header to buffer
    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u32(self.command_length);
        buf.put_u32(self.command_id as u32);
        buf.put_u32(self.command_status.into());
        buf.put_u32(self.sequence_number);
    }
}

/// Trait for types that can be encoded to bytes
pub trait Encodable {
    /// Encode this PDU to the buffer. The command_length written here is a
    /// placeholder; `to_bytes` patches in the real value.
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError>;

    /// Encode into a fresh buffer and fix the command_length field.
    fn to_bytes(&self) -> Result<Bytes, CodecError> {
        let mut buf = BytesMut::with_capacity(64);
        self.encode(&mut buf)?;

        if buf.len() > MAX_PDU_SIZE as usize {
            return Err(CodecError::InvalidPduLength {
                length: buf.len() as u32,
                min: PduHeader::SIZE as u32,
                max: MAX_PDU_SIZE,
            });
        }

        let length = buf.len() as u32;
        buf[0..4].copy_from_slice(&length.to_be_bytes());

        Ok(buf.freeze())
    }
}

/// Trait for types that can be decoded from bytes
pub trait Decodable: Sized {
    /// Decode this PDU from its body. `body` covers exactly
    /// `command_length - 16` bytes.
    fn decode(header: PduHeader, body: &mut Cursor<&[u8]>) -> Result<Self, CodecError>;

    /// The command ids this PDU type is decoded from
    fn command_ids() -> &'static [CommandId];

    /// Validate the header is appropriate for this PDU type
    fn validate_header(header: &PduHeader) -> Result<(), CodecError> {
        if !Self::command_ids().contains(&header.command_id) {
            return Err(CodecError::UnexpectedCommandId {
                expected: Self::command_ids()[0],
                actual: header.command_id,
            });
        }
        Ok(())
    }
}

/// Codec errors with detailed context for debugging
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Incomplete PDU: need more data")]
    Incomplete,

    #[error("Invalid command_id: {0:#x}")]
    InvalidCommandId(u32),

    #[error("Invalid PDU length: {length}, must be {min}-{max}")]
    InvalidPduLength { length: u32, min: u32, max: u32 },

    #[error("Request PDU {command_id:?} has non-zero status: {command_status:?}")]
    InvalidRequestStatus {
        command_id: CommandId,
        command_status: CommandStatus,
    },

    #[error("Reserved sequence number: {0} (0 and 0xFFFFFFFF are reserved)")]
    ReservedSequenceNumber(u32),

    #[error("Unexpected command_id: expected {expected:?}, got {actual:?}")]
    UnexpectedCommandId {
        expected: CommandId,
        actual: CommandId,
    },

    #[error("Field '{field}' validation failed: {reason}")]
    FieldValidation { field: &'static str, reason: String },

    #[error("UTF-8 decoding error in field '{field}': {source}")]
    Utf8Error {
        field: &'static str,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Map a decoding failure to the command_status a peer should be told
    pub fn to_command_status(&self) -> CommandStatus {
        match self {
            CodecError::InvalidPduLength { .. } => CommandStatus::InvalidCommandLength,
            CodecError::InvalidCommandId(_) => CommandStatus::InvalidCommandId,
            CodecError::FieldValidation { field, .. } => match *field {
                "system_id" => CommandStatus::InvalidSystemId,
                "password" => CommandStatus::InvalidPassword,
                "system_type" => CommandStatus::InvalidSystemTypeField,
                _ => CommandStatus::SystemError,
            },
            _ => CommandStatus::SystemError,
        }
    }
}

/// Decode a C-Octet String of at most `max_len` bytes, terminator included.
pub fn decode_cstring(
    buf: &mut Cursor<&[u8]>,
    max_len: usize,
    field_name: &'static str,
) -> Result<String, CodecError> {
    let chunk = buf.chunk();
    let end = chunk
        .iter()
        .take(max_len)
        .position(|&b| b == 0)
        .ok_or_else(|| CodecError::FieldValidation {
            field: field_name,
            reason: format!("no null terminator within {max_len} octets"),
        })?;

    let value = String::from_utf8(chunk[..end].to_vec()).map_err(|e| CodecError::Utf8Error {
        field: field_name,
        source: e,
    })?;

    buf.advance(end + 1);
    Ok(value)
}

/// Decode a single byte
pub fn decode_u8(buf: &mut Cursor<&[u8]>) -> Result<u8, CodecError> {
    if buf.remaining() < 1 {
        return Err(CodecError::Incomplete);
    }
    Ok(buf.get_u8())
}

/// Decode a 16-bit big-endian integer
pub fn decode_u16(buf: &mut Cursor<&[u8]>) -> Result<u16, CodecError> {
    if buf.remaining() < 2 {
        return Err(CodecError::Incomplete);
    }
    Ok(buf.get_u16())
}

/// Encode a C-Octet String, rejecting values that do not fit `max_len`
/// (terminator included).
pub fn encode_cstring(
    buf: &mut BytesMut,
    value: &str,
    max_len: usize,
    field_name: &'static str,
) -> Result<(), CodecError> {
    if value.len() >= max_len {
        return Err(CodecError::FieldValidation {
            field: field_name,
            reason: format!(
                "{} octets exceeds maximum of {}",
                value.len(),
                max_len - 1
            ),
        });
    }
    buf.put_slice(value.as_bytes());
    buf.put_u8(0);
    Ok(())
}

/// Generic frame type that can hold any PDU seen during a bind exchange
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    BindRequest(BindRequest),
    BindResponse(BindResponse),

    EnquireLink(EnquireLink),
    EnquireLinkResp(EnquireLinkResponse),

    Unbind(Unbind),
    UnbindResp(UnbindResponse),

    GenericNack(GenericNack),

    /// Anything not registered, including reserved and vendor command ids
    Unknown {
        command_id: u32,
        command_status: u32,
        sequence_number: u32,
        body: Bytes,
    },
}

type DecoderFn =
    Box<dyn Fn(PduHeader, &mut Cursor<&[u8]>) -> Result<Frame, CodecError> + Send + Sync>;

/// Registry of PDU decoders for extensible parsing
pub struct PduRegistry {
    decoders: HashMap<CommandId, DecoderFn>,
}

impl PduRegistry {
    /// Create a new registry with the bind-phase PDUs registered
    pub fn new() -> Self {
        let mut registry = Self {
            decoders: HashMap::new(),
        };

        registry.register_pdu::<BindRequest, _>(Frame::BindRequest);
        registry.register_pdu::<BindResponse, _>(Frame::BindResponse);

        registry.register_pdu::<EnquireLink, _>(Frame::EnquireLink);
        registry.register_pdu::<EnquireLinkResponse, _>(Frame::EnquireLinkResp);
        registry.register_pdu::<Unbind, _>(Frame::Unbind);
        registry.register_pdu::<UnbindResponse, _>(Frame::UnbindResp);
        registry.register_pdu::<GenericNack, _>(Frame::GenericNack);

        registry
    }

    /// Shared registry used by `Frame::parse`
    pub fn standard() -> &'static PduRegistry {
        static REGISTRY: OnceLock<PduRegistry> = OnceLock::new();
        REGISTRY.get_or_init(PduRegistry::new)
    }

    fn register_pdu<T, F>(&mut self, frame_constructor: F)
    where
        T: Decodable + 'static,
        F: Fn(T) -> Frame + Clone + Send + Sync + 'static,
    {
        for command_id in T::command_ids() {
            let constructor = frame_constructor.clone();
            let decoder = Box::new(move |header: PduHeader, buf: &mut Cursor<&[u8]>| {
                let pdu = T::decode(header, buf)?;
                Ok(constructor(pdu))
            });
            self.decoders.insert(*command_id, decoder);
        }
    }

    /// Decode a PDU given its header and body
    pub fn decode_pdu(
        &self,
        header: PduHeader,
        body: &mut Cursor<&[u8]>,
    ) -> Result<Frame, CodecError> {
        match self.decoders.get(&header.command_id) {
            Some(decoder) => decoder(header, body),
            None => {
                let body = body.copy_to_bytes(body.remaining());
                Ok(Frame::Unknown {
                    command_id: header.command_id as u32,
                    command_status: header.command_status.into(),
                    sequence_number: header.sequence_number,
                    body,
                })
            }
        }
    }

    /// Check if a command_id is registered
    pub fn is_registered(&self, command_id: CommandId) -> bool {
        self.decoders.contains_key(&command_id)
    }

    /// Get all registered command_ids
    pub fn registered_commands(&self) -> Vec<CommandId> {
        self.decoders.keys().copied().collect()
    }
}

impl Default for PduRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// Raw command_id of this frame
    pub fn command_id(&self) -> u32 {
        match self {
            Frame::BindRequest(pdu) => pdu.binding_type.request_command_id() as u32,
            Frame::BindResponse(pdu) => pdu.binding_type.response_command_id() as u32,
            Frame::EnquireLink(_) => CommandId::EnquireLink as u32,
            Frame::EnquireLinkResp(_) => CommandId::EnquireLinkResp as u32,
            Frame::Unbind(_) => CommandId::Unbind as u32,
            Frame::UnbindResp(_) => CommandId::UnbindResp as u32,
            Frame::GenericNack(_) => CommandId::GenericNack as u32,
            Frame::Unknown { command_id, .. } => *command_id,
        }
    }

    /// Get the sequence number for this frame
    pub fn sequence_number(&self) -> u32 {
        match self {
            Frame::BindRequest(pdu) => pdu.sequence_number,
            Frame::BindResponse(pdu) => pdu.sequence_number,
            Frame::EnquireLink(pdu) => pdu.sequence_number,
            Frame::EnquireLinkResp(pdu) => pdu.sequence_number,
            Frame::Unbind(pdu) => pdu.sequence_number,
            Frame::UnbindResp(pdu) => pdu.sequence_number,
            Frame::GenericNack(pdu) => pdu.sequence_number,
            Frame::Unknown {
                sequence_number, ..
            } => *sequence_number,
        }
    }

    /// Check if this frame is a response PDU
    pub fn is_response(&self) -> bool {
        self.command_id() & 0x8000_0000 != 0
    }

    /// Short name for log output
    pub fn name(&self) -> &'static str {
        match self {
            Frame::BindRequest(_) => "bind",
            Frame::BindResponse(_) => "bind_resp",
            Frame::EnquireLink(_) => "enquire_link",
            Frame::EnquireLinkResp(_) => "enquire_link_resp",
            Frame::Unbind(_) => "unbind",
            Frame::UnbindResp(_) => "unbind_resp",
            Frame::GenericNack(_) => "generic_nack",
            Frame::Unknown { .. } => "unknown",
        }
    }

    /// Check whether `buf` holds a complete PDU. Returns its length without
    /// advancing the cursor.
    pub fn check(buf: &mut Cursor<&[u8]>) -> Result<usize, CodecError> {
        if buf.remaining() < 4 {
            return Err(CodecError::Incomplete);
        }

        let pos = buf.position();
        let command_length = buf.get_u32();
        buf.set_position(pos);

        if !(PduHeader::SIZE as u32..=MAX_PDU_SIZE).contains(&command_length) {
            return Err(CodecError::InvalidPduLength {
                length: command_length,
                min: PduHeader::SIZE as u32,
                max: MAX_PDU_SIZE,
            });
        }

        if buf.remaining() < command_length as usize {
            return Err(CodecError::Incomplete);
        }

        Ok(command_length as usize)
    }

    /// Parse one complete PDU and advance the cursor past it.
    pub fn parse(buf: &mut Cursor<&[u8]>) -> Result<Frame, CodecError> {
        let len = Frame::check(buf)?;
        let start = buf.position() as usize;
        let data: &[u8] = *buf.get_ref();
        let pdu = &data[start..start + len];
        buf.set_position((start + len) as u64);

        if pdu.len() < PduHeader::SIZE {
            return Err(CodecError::Incomplete);
        }

        let command_id = u32::from_be_bytes([pdu[4], pdu[5], pdu[6], pdu[7]]);
        if CommandId::try_from(command_id).is_err() {
            tracing::debug!(command_id = %format_args!("{command_id:#010x}"), "unregistered command_id");
            return Ok(Frame::Unknown {
                command_id,
                command_status: u32::from_be_bytes([pdu[8], pdu[9], pdu[10], pdu[11]]),
                sequence_number: u32::from_be_bytes([pdu[12], pdu[13], pdu[14], pdu[15]]),
                body: Bytes::copy_from_slice(&pdu[PduHeader::SIZE..]),
            });
        }

        let header = PduHeader::decode(&mut Cursor::new(pdu))?;
        let mut body = Cursor::new(&pdu[PduHeader::SIZE..]);
        PduRegistry::standard().decode_pdu(header, &mut body)
    }
}

impl Encodable for Frame {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        match self {
            Frame::BindRequest(pdu) => pdu.encode(buf),
            Frame::BindResponse(pdu) => pdu.encode(buf),
            Frame::EnquireLink(pdu) => pdu.encode(buf),
            Frame::EnquireLinkResp(pdu) => pdu.encode(buf),
            Frame::Unbind(pdu) => pdu.encode(buf),
            Frame::UnbindResp(pdu) => pdu.encode(buf),
            Frame::GenericNack(pdu) => pdu.encode(buf),
            Frame::Unknown {
                command_id,
                command_status,
                sequence_number,
                body,
            } => {
                buf.put_u32(0);
                buf.put_u32(*command_id);
                buf.put_u32(*command_status);
                buf.put_u32(*sequence_number);
                buf.put_slice(body);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdu_header_encode_decode() {
        let header = PduHeader {
            command_length: 16,
            command_id: CommandId::EnquireLink,
            command_status: CommandStatus::Ok,
            sequence_number: 42,
        };

        let mut buf = BytesMut::new();
        header.encode(&mut buf);

        let mut cursor = Cursor::new(buf.as_ref());
        let decoded = PduHeader::decode(&mut cursor).unwrap();

        assert_eq!(header, decoded);
    }

    #[test]
    fn pdu_header_validation() {
        let data: &[u8] = &[
            0x00, 0x00, 0x00, 0x08, // command_length too small
            0x00, 0x00, 0x00, 0x15, // command_id
            0x00, 0x00, 0x00, 0x00, // command_status
            0x00, 0x00, 0x00, 0x01, // sequence_number
        ];
        let result = PduHeader::decode(&mut Cursor::new(data));
        assert!(matches!(result, Err(CodecError::InvalidPduLength { .. })));

        let data: &[u8] = &[
            0x00, 0x00, 0x00, 0x10, // command_length
            0x00, 0x00, 0x00, 0x15, // command_id
            0x00, 0x00, 0x00, 0x00, // command_status
            0x00, 0x00, 0x00, 0x00, // sequence_number (reserved)
        ];
        let result = PduHeader::decode(&mut Cursor::new(data));
        assert!(matches!(result, Err(CodecError::ReservedSequenceNumber(0))));
    }

    #[test]
    fn request_with_error_status_is_rejected() {
        let data: &[u8] = &[
            0x00, 0x00, 0x00, 0x10, // command_length
            0x00, 0x00, 0x00, 0x15, // enquire_link
            0x00, 0x00, 0x00, 0x08, // system error
            0x00, 0x00, 0x00, 0x01, // sequence_number
        ];
        let result = PduHeader::decode(&mut Cursor::new(data));
        assert!(matches!(
            result,
            Err(CodecError::InvalidRequestStatus { .. })
        ));
    }

    #[test]
    fn vendor_command_status_is_kept_verbatim() {
        let data: &[u8] = &[
            0x00, 0x00, 0x00, 0x10, // command_length
            0x80, 0x00, 0x00, 0x15, // enquire_link_resp
            0x00, 0x00, 0x04, 0x01, // vendor specific status
            0x00, 0x00, 0x00, 0x01, // sequence_number
        ];
        let header = PduHeader::decode(&mut Cursor::new(data)).unwrap();
        assert_eq!(header.command_status, CommandStatus::Other(0x401));

        let mut buf = BytesMut::new();
        header.encode(&mut buf);
        assert_eq!(buf.as_ref(), data);
    }

    #[test]
    fn decode_cstring_variable_length() {
        let data = b"hello\0world\0";
        let mut cursor = Cursor::new(&data[..]);
        assert_eq!(decode_cstring(&mut cursor, 16, "a").unwrap(), "hello");
        assert_eq!(cursor.position(), 6);
        assert_eq!(decode_cstring(&mut cursor, 16, "b").unwrap(), "world");
        assert!(!cursor.has_remaining());
    }

    #[test]
    fn decode_cstring_without_terminator() {
        let data = b"abcdefgh";
        let mut cursor = Cursor::new(&data[..]);
        let result = decode_cstring(&mut cursor, 4, "password");
        assert!(matches!(
            result,
            Err(CodecError::FieldValidation {
                field: "password",
                ..
            })
        ));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn encode_cstring_limits() {
        let mut buf = BytesMut::new();
        encode_cstring(&mut buf, "hello", 9, "password").unwrap();
        assert_eq!(buf.as_ref(), b"hello\0");

        let mut buf = BytesMut::new();
        let result = encode_cstring(&mut buf, "123456789", 9, "password");
        assert!(result.is_err());
        assert!(buf.is_empty());
    }

    #[test]
    fn check_reports_incomplete_and_length() {
        let bytes = EnquireLink::new(7).to_bytes().unwrap();

        let partial = &bytes[..10];
        assert!(matches!(
            Frame::check(&mut Cursor::new(partial)),
            Err(CodecError::Incomplete)
        ));

        let mut cursor = Cursor::new(bytes.as_ref());
        assert_eq!(Frame::check(&mut cursor).unwrap(), 16);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn check_rejects_oversized_length() {
        let data: &[u8] = &[0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00];
        assert!(matches!(
            Frame::check(&mut Cursor::new(data)),
            Err(CodecError::InvalidPduLength { .. })
        ));
    }

    #[test]
    fn parse_consecutive_frames() {
        let mut data = BytesMut::new();
        data.extend_from_slice(&EnquireLink::new(1).to_bytes().unwrap());
        data.extend_from_slice(&GenericNack::system_error(2).to_bytes().unwrap());

        let mut cursor = Cursor::new(data.as_ref());
        let first = Frame::parse(&mut cursor).unwrap();
        let second = Frame::parse(&mut cursor).unwrap();

        assert!(matches!(first, Frame::EnquireLink(ref p) if p.sequence_number == 1));
        assert!(matches!(second, Frame::GenericNack(ref p) if p.sequence_number == 2));
        assert!(!cursor.has_remaining());
    }

    #[test]
    fn parse_reserved_command_id_as_unknown() {
        let mut pdu = Vec::new();
        pdu.extend_from_slice(&20u32.to_be_bytes());
        pdu.extend_from_slice(&0x0000_000Au32.to_be_bytes());
        pdu.extend_from_slice(&0u32.to_be_bytes());
        pdu.extend_from_slice(&5u32.to_be_bytes());
        pdu.extend_from_slice(&[0x01, 0x02, 0x03, 0x04]);

        let frame = Frame::parse(&mut Cursor::new(pdu.as_slice())).unwrap();
        match frame {
            Frame::Unknown {
                command_id,
                sequence_number,
                body,
                ..
            } => {
                assert_eq!(command_id, 0x0000_000A);
                assert_eq!(sequence_number, 5);
                assert_eq!(body.as_ref(), &[0x01, 0x02, 0x03, 0x04]);
            }
            other => panic!("Expected Unknown frame, got {other:?}"),
        }
    }

    #[test]
    fn parse_unregistered_known_command_as_unknown() {
        let mut pdu = Vec::new();
        pdu.extend_from_slice(&17u32.to_be_bytes());
        pdu.extend_from_slice(&(CommandId::DeliverSm as u32).to_be_bytes());
        pdu.extend_from_slice(&0u32.to_be_bytes());
        pdu.extend_from_slice(&9u32.to_be_bytes());
        pdu.push(0xAA);

        let frame = Frame::parse(&mut Cursor::new(pdu.as_slice())).unwrap();
        assert_eq!(frame.command_id(), CommandId::DeliverSm as u32);
        assert_eq!(frame.sequence_number(), 9);
        assert_eq!(frame.name(), "unknown");

        let reencoded = frame.to_bytes().unwrap();
        assert_eq!(reencoded.as_ref(), pdu.as_slice());
    }

    #[test]
    fn registry_has_bind_phase_pdus() {
        let registry = PduRegistry::new();
        for id in [
            CommandId::BindTransmitter,
            CommandId::BindReceiver,
            CommandId::BindTransceiver,
            CommandId::BindTransmitterResp,
            CommandId::BindReceiverResp,
            CommandId::BindTransceiverResp,
            CommandId::EnquireLink,
            CommandId::EnquireLinkResp,
            CommandId::Unbind,
            CommandId::UnbindResp,
            CommandId::GenericNack,
        ] {
            assert!(registry.is_registered(id), "{id:?} not registered");
        }
        assert!(!registry.is_registered(CommandId::SubmitSm));
        assert_eq!(registry.registered_commands().len(), 11);
    }

    #[test]
    fn frame_accessors() {
        let frame = Frame::EnquireLink(EnquireLink::new(42));
        assert_eq!(frame.command_id(), CommandId::EnquireLink as u32);
        assert_eq!(frame.sequence_number(), 42);
        assert!(!frame.is_response());

        let frame = Frame::EnquireLinkResp(EnquireLinkResponse::new(43));
        assert_eq!(frame.sequence_number(), 43);
        assert!(frame.is_response());
    }

    #[test]
    fn codec_error_to_status() {
        let err = CodecError::FieldValidation {
            field: "system_id",
            reason: "too long".into(),
        };
        assert_eq!(err.to_command_status(), CommandStatus::InvalidSystemId);
        assert_eq!(
            CodecError::InvalidCommandId(0x99).to_command_status(),
            CommandStatus::InvalidCommandId
        );
        assert_eq!(
            CodecError::Incomplete.to_command_status(),
            CommandStatus::SystemError
        );
    }
}
