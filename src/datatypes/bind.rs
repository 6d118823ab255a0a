use crate::codec::{
    CodecError, Decodable, Encodable, PduHeader, decode_cstring, decode_u8, decode_u16,
    encode_cstring,
};
use crate::datatypes::{
    CommandId, CommandStatus, InterfaceVersion, NumericPlanIndicator, TypeOfNumber,
};
use bytes::{Buf, BufMut, BytesMut};
use std::fmt;
use std::io::Cursor;

// SMPP v3.4 field limits, null terminator included
pub const MAX_SYSTEM_ID_LENGTH: usize = 16;
pub const MAX_PASSWORD_LENGTH: usize = 9;
pub const MAX_SYSTEM_TYPE_LENGTH: usize = 13;
pub const MAX_ADDRESS_RANGE_LENGTH: usize = 41;

/// TLV tag of sc_interface_version in bind responses
pub const SC_INTERFACE_VERSION_TAG: u16 = 0x0210;

/// Role requested for the session. Selects which of the three bind command
/// ids goes on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BindingType {
    /// send-only (bind_transmitter)
    Transmitter,
    /// receive-only (bind_receiver)
    Receiver,
    /// both directions (bind_transceiver)
    Transceiver,
}

impl BindingType {
    pub fn request_command_id(&self) -> CommandId {
        match self {
            BindingType::Transmitter => CommandId::BindTransmitter,
            BindingType::Receiver => CommandId::BindReceiver,
            BindingType::Transceiver => CommandId::BindTransceiver,
        }
    }

    pub fn response_command_id(&self) -> CommandId {
        match self {
            BindingType::Transmitter => CommandId::BindTransmitterResp,
            BindingType::Receiver => CommandId::BindReceiverResp,
            BindingType::Transceiver => CommandId::BindTransceiverResp,
        }
    }

    /// Binding type of a bind request or bind response command id
    pub fn from_command_id(command_id: CommandId) -> Option<Self> {
        match command_id {
            CommandId::BindTransmitter | CommandId::BindTransmitterResp => {
                Some(BindingType::Transmitter)
            }
            CommandId::BindReceiver | CommandId::BindReceiverResp => Some(BindingType::Receiver),
            CommandId::BindTransceiver | CommandId::BindTransceiverResp => {
                Some(BindingType::Transceiver)
            }
            _ => None,
        }
    }
}

impl fmt::Display for BindingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BindingType::Transmitter => "transmitter",
            BindingType::Receiver => "receiver",
            BindingType::Transceiver => "transceiver",
        })
    }
}

/// Address range served by a Receiver/Transceiver ESME. The pattern is opaque
/// here; the SMSC interprets it (usually as a regular expression).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressRange {
    pub ton: TypeOfNumber,
    pub npi: NumericPlanIndicator,
    pub range: String,
}

impl AddressRange {
    pub fn new(range: impl Into<String>) -> Self {
        Self {
            range: range.into(),
            ..Self::default()
        }
    }

    pub fn with_numbering(mut self, ton: TypeOfNumber, npi: NumericPlanIndicator) -> Self {
        self.ton = ton;
        self.npi = npi;
        self
    }
}

/// bind_transmitter / bind_receiver / bind_transceiver. The three PDUs share
/// a body layout and differ only in command_id, carried here as
/// `binding_type`. The header command_status of a request is always NULL.
#[derive(Clone, Debug, PartialEq)]
pub struct BindRequest {
    pub binding_type: BindingType,
    pub sequence_number: u32,

    /// 5.2.1 system_id: identification of the ESME requesting to bind.
    pub system_id: String,

    /// 5.2.2 password: empty when the SMSC requires none.
    pub password: String,

    /// 5.2.3 system_type: category of ESME, e.g. "VMS" or "OTA".
    pub system_type: String,

    /// 5.2.4 interface_version supported by the ESME.
    pub interface_version: InterfaceVersion,

    /// 5.2.5 - 5.2.7 addr_ton, addr_npi and address_range.
    pub address_range: AddressRange,
}

impl BindRequest {
    pub fn new(binding_type: BindingType, sequence_number: u32) -> Self {
        Self {
            binding_type,
            sequence_number,
            system_id: String::new(),
            password: String::new(),
            system_type: String::new(),
            interface_version: InterfaceVersion::SmppV34,
            address_range: AddressRange::default(),
        }
    }
}

impl Encodable for BindRequest {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        PduHeader {
            command_length: 0,
            command_id: self.binding_type.request_command_id(),
            command_status: CommandStatus::Ok,
            sequence_number: self.sequence_number,
        }
        .encode(buf);

        encode_cstring(buf, &self.system_id, MAX_SYSTEM_ID_LENGTH, "system_id")?;
        encode_cstring(buf, &self.password, MAX_PASSWORD_LENGTH, "password")?;
        encode_cstring(buf, &self.system_type, MAX_SYSTEM_TYPE_LENGTH, "system_type")?;
        buf.put_u8(self.interface_version.into());
        buf.put_u8(self.address_range.ton.into());
        buf.put_u8(self.address_range.npi.into());
        encode_cstring(
            buf,
            &self.address_range.range,
            MAX_ADDRESS_RANGE_LENGTH,
            "address_range",
        )?;

        Ok(())
    }
}

impl Decodable for BindRequest {
    fn command_ids() -> &'static [CommandId] {
        &[
            CommandId::BindTransmitter,
            CommandId::BindReceiver,
            CommandId::BindTransceiver,
        ]
    }

    fn decode(header: PduHeader, body: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(&header)?;
        let binding_type = BindingType::from_command_id(header.command_id)
            .ok_or(CodecError::InvalidCommandId(header.command_id as u32))?;

        let system_id = decode_cstring(body, MAX_SYSTEM_ID_LENGTH, "system_id")?;
        let password = decode_cstring(body, MAX_PASSWORD_LENGTH, "password")?;
        let system_type = decode_cstring(body, MAX_SYSTEM_TYPE_LENGTH, "system_type")?;

        // Any value is accepted; unlisted ones are carried as `Other`
        let interface_version = InterfaceVersion::from(decode_u8(body)?);
        let ton = TypeOfNumber::from(decode_u8(body)?);
        let npi = NumericPlanIndicator::from(decode_u8(body)?);
        let range = decode_cstring(body, MAX_ADDRESS_RANGE_LENGTH, "address_range")?;

        Ok(BindRequest {
            binding_type,
            sequence_number: header.sequence_number,
            system_id,
            password,
            system_type,
            interface_version,
            address_range: AddressRange { ton, npi, range },
        })
    }
}

/// bind_transmitter_resp / bind_receiver_resp / bind_transceiver_resp
#[derive(Clone, Debug, PartialEq)]
pub struct BindResponse {
    pub binding_type: BindingType,
    pub command_status: CommandStatus,
    pub sequence_number: u32,

    /// Identifier of the answering side. SMSCs commonly omit the body when
    /// the bind is rejected; it decodes as an empty string.
    pub system_id: String,

    /// Optional sc_interface_version TLV
    pub sc_interface_version: Option<InterfaceVersion>,
}

impl BindResponse {
    /// Response matching `request`: same binding type and sequence number.
    pub fn for_request(
        request: &BindRequest,
        command_status: CommandStatus,
        system_id: impl Into<String>,
    ) -> Self {
        Self {
            binding_type: request.binding_type,
            command_status,
            sequence_number: request.sequence_number,
            system_id: system_id.into(),
            sc_interface_version: None,
        }
    }

    pub fn with_interface_version(mut self, version: InterfaceVersion) -> Self {
        self.sc_interface_version = Some(version);
        self
    }
}

impl Encodable for BindResponse {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        PduHeader {
            command_length: 0,
            command_id: self.binding_type.response_command_id(),
            command_status: self.command_status,
            sequence_number: self.sequence_number,
        }
        .encode(buf);

        encode_cstring(buf, &self.system_id, MAX_SYSTEM_ID_LENGTH, "system_id")?;

        if let Some(version) = self.sc_interface_version {
            buf.put_u16(SC_INTERFACE_VERSION_TAG);
            buf.put_u16(1);
            buf.put_u8(version.into());
        }

        Ok(())
    }
}

impl Decodable for BindResponse {
    fn command_ids() -> &'static [CommandId] {
        &[
            CommandId::BindTransmitterResp,
            CommandId::BindReceiverResp,
            CommandId::BindTransceiverResp,
        ]
    }

    fn decode(header: PduHeader, body: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(&header)?;
        let binding_type = BindingType::from_command_id(header.command_id)
            .ok_or(CodecError::InvalidCommandId(header.command_id as u32))?;

        let system_id = if body.has_remaining() {
            decode_cstring(body, MAX_SYSTEM_ID_LENGTH, "system_id")?
        } else {
            String::new()
        };

        let mut sc_interface_version = None;
        while body.has_remaining() {
            let tag = decode_u16(body)?;
            let length = decode_u16(body)? as usize;
            if body.remaining() < length {
                return Err(CodecError::FieldValidation {
                    field: "tlv",
                    reason: format!("tag {tag:#06x} declares {length} octets, {} left", body.remaining()),
                });
            }

            if tag == SC_INTERFACE_VERSION_TAG && length == 1 {
                let raw = body.get_u8();
                sc_interface_version = Some(InterfaceVersion::from(raw));
            } else {
                body.advance(length);
            }
        }

        Ok(BindResponse {
            binding_type,
            command_status: header.command_status,
            sequence_number: header.sequence_number,
            system_id,
            sc_interface_version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Frame;

    fn sample_request(binding_type: BindingType) -> BindRequest {
        BindRequest {
            binding_type,
            sequence_number: 1,
            system_id: "SMPP3TEST".to_string(),
            password: "secret08".to_string(),
            system_type: "SUBMIT1".to_string(),
            interface_version: InterfaceVersion::SmppV34,
            address_range: AddressRange::default()
                .with_numbering(TypeOfNumber::International, NumericPlanIndicator::Isdn),
        }
    }

    #[test]
    fn bind_transmitter_to_bytes() {
        let bytes = sample_request(BindingType::Transmitter).to_bytes().unwrap();

        let expected: Vec<u8> = vec![
            // Header:
            0x00, 0x00, 0x00, 0x2F, // command_length
            0x00, 0x00, 0x00, 0x02, // command_id
            0x00, 0x00, 0x00, 0x00, // command_status
            0x00, 0x00, 0x00, 0x01, // sequence_number
            // Body:
            0x53, 0x4D, 0x50, 0x50, 0x33, 0x54, 0x45, 0x53, 0x54, 0x00, // system_id
            0x73, 0x65, 0x63, 0x72, 0x65, 0x74, 0x30, 0x38, 0x00, // password
            0x53, 0x55, 0x42, 0x4D, 0x49, 0x54, 0x31, 0x00, // system_type
            0x34, // interface_version
            0x01, // addr_ton
            0x01, // addr_npi
            0x00, // address_range
        ];

        assert_eq!(bytes.as_ref(), expected.as_slice());
    }

    #[test]
    fn binding_type_selects_command_id() {
        let rx = sample_request(BindingType::Receiver).to_bytes().unwrap();
        assert_eq!(&rx[4..8], &[0x00, 0x00, 0x00, 0x01]);

        let trx = sample_request(BindingType::Transceiver).to_bytes().unwrap();
        assert_eq!(&trx[4..8], &[0x00, 0x00, 0x00, 0x09]);
    }

    #[test]
    fn bind_receiver_with_address_range_parses_back() {
        let mut request = sample_request(BindingType::Receiver);
        request.address_range.range = "^1234.*".to_string();

        let bytes = request.to_bytes().unwrap();
        let frame = Frame::parse(&mut Cursor::new(bytes.as_ref())).unwrap();

        assert_eq!(frame, Frame::BindRequest(request));
    }

    #[test]
    fn empty_password_is_a_single_null() {
        let mut request = sample_request(BindingType::Transmitter);
        request.password.clear();

        let bytes = request.to_bytes().unwrap();
        assert_eq!(bytes.len(), 0x27);
        assert_eq!(bytes[26], 0x00);
    }

    #[test]
    fn oversize_fields_fail_to_encode() {
        let mut request = sample_request(BindingType::Transmitter);
        request.system_id = "A".repeat(16);
        assert!(matches!(
            request.to_bytes(),
            Err(CodecError::FieldValidation {
                field: "system_id",
                ..
            })
        ));

        let mut request = sample_request(BindingType::Transmitter);
        request.password = "B".repeat(9);
        assert!(matches!(
            request.to_bytes(),
            Err(CodecError::FieldValidation {
                field: "password",
                ..
            })
        ));

        let mut request = sample_request(BindingType::Transmitter);
        request.address_range.range = "D".repeat(41);
        assert!(request.to_bytes().is_err());
    }

    #[test]
    fn max_length_fields_encode() {
        let mut request = sample_request(BindingType::Transceiver);
        request.system_id = "A".repeat(15);
        request.password = "B".repeat(8);
        request.system_type = "C".repeat(12);
        request.address_range.range = "D".repeat(40);

        let bytes = request.to_bytes().unwrap();
        let frame = Frame::parse(&mut Cursor::new(bytes.as_ref())).unwrap();
        assert_eq!(frame, Frame::BindRequest(request));
    }

    #[test]
    fn bind_transmitter_response_to_bytes() {
        let response = BindResponse {
            binding_type: BindingType::Transmitter,
            command_status: CommandStatus::Ok,
            sequence_number: 1,
            system_id: "SMPP3TEST".to_string(),
            sc_interface_version: None,
        };

        let expected: Vec<u8> = vec![
            0x00, 0x00, 0x00, 0x1A, // command_length
            0x80, 0x00, 0x00, 0x02, // command_id
            0x00, 0x00, 0x00, 0x00, // command_status
            0x00, 0x00, 0x00, 0x01, // sequence_number
            0x53, 0x4D, 0x50, 0x50, 0x33, 0x54, 0x45, 0x53, 0x54, 0x00, // system_id
        ];

        assert_eq!(response.to_bytes().unwrap().as_ref(), expected.as_slice());
    }

    #[test]
    fn bind_response_with_interface_version_tlv() {
        let request = sample_request(BindingType::Transceiver);
        let response = BindResponse::for_request(&request, CommandStatus::Ok, "SMSC01")
            .with_interface_version(InterfaceVersion::SmppV34);

        let bytes = response.to_bytes().unwrap();
        assert_eq!(&bytes[bytes.len() - 5..], &[0x02, 0x10, 0x00, 0x01, 0x34]);

        let frame = Frame::parse(&mut Cursor::new(bytes.as_ref())).unwrap();
        assert_eq!(frame, Frame::BindResponse(response));
    }

    #[test]
    fn bind_response_without_body() {
        let data: &[u8] = &[
            0x00, 0x00, 0x00, 0x10, // command_length
            0x80, 0x00, 0x00, 0x09, // bind_transceiver_resp
            0x00, 0x00, 0x00, 0x0E, // invalid password
            0x00, 0x00, 0x00, 0x01, // sequence_number
        ];

        match Frame::parse(&mut Cursor::new(data)).unwrap() {
            Frame::BindResponse(resp) => {
                assert_eq!(resp.binding_type, BindingType::Transceiver);
                assert_eq!(resp.command_status, CommandStatus::InvalidPassword);
                assert!(resp.system_id.is_empty());
            }
            other => panic!("Expected BindResponse, got {other:?}"),
        }
    }

    #[test]
    fn bind_response_skips_unknown_tlvs() {
        let data: &[u8] = &[
            0x00, 0x00, 0x00, 0x1B, // command_length
            0x80, 0x00, 0x00, 0x01, // bind_receiver_resp
            0x00, 0x00, 0x00, 0x00, // command_status
            0x00, 0x00, 0x00, 0x02, // sequence_number
            0x53, 0x4D, 0x53, 0x43, 0x00, // "SMSC"
            0x14, 0x00, 0x00, 0x01, 0xFF, // vendor TLV
            0x00, // trailing byte short of a TLV header
        ];

        let result = Frame::parse(&mut Cursor::new(data));
        assert!(matches!(result, Err(CodecError::Incomplete)));

        let data: &[u8] = &[
            0x00, 0x00, 0x00, 0x1A, // command_length
            0x80, 0x00, 0x00, 0x01, // bind_receiver_resp
            0x00, 0x00, 0x00, 0x00, // command_status
            0x00, 0x00, 0x00, 0x02, // sequence_number
            0x53, 0x4D, 0x53, 0x43, 0x00, // "SMSC"
            0x14, 0x00, 0x00, 0x01, 0xFF, // vendor TLV
        ];

        match Frame::parse(&mut Cursor::new(data)).unwrap() {
            Frame::BindResponse(resp) => {
                assert_eq!(resp.system_id, "SMSC");
                assert_eq!(resp.sc_interface_version, None);
            }
            other => panic!("Expected BindResponse, got {other:?}"),
        }
    }

    #[test]
    fn bind_request_keeps_unlisted_numbering_and_version() {
        let mut bytes = sample_request(BindingType::Transmitter)
            .to_bytes()
            .unwrap()
            .to_vec();
        // interface_version, addr_ton and addr_npi precede the final
        // address_range terminator
        let len = bytes.len();
        bytes[len - 4] = 0x00;
        bytes[len - 3] = 0x7F;
        bytes[len - 2] = 0x20;

        let frame = Frame::parse(&mut Cursor::new(bytes.as_slice())).unwrap();
        let Frame::BindRequest(request) = frame else {
            panic!("Expected BindRequest, got {frame:?}");
        };
        assert_eq!(request.interface_version, InterfaceVersion::Other(0x00));
        assert_eq!(request.address_range.ton, TypeOfNumber::Other(0x7F));
        assert_eq!(request.address_range.npi, NumericPlanIndicator::Other(0x20));

        let reencoded = Frame::BindRequest(request).to_bytes().unwrap();
        assert_eq!(reencoded.as_ref(), bytes.as_slice());
    }

    #[test]
    fn binding_type_command_ids() {
        for binding_type in [
            BindingType::Transmitter,
            BindingType::Receiver,
            BindingType::Transceiver,
        ] {
            assert_eq!(
                BindingType::from_command_id(binding_type.request_command_id()),
                Some(binding_type)
            );
            assert_eq!(
                BindingType::from_command_id(binding_type.response_command_id()),
                Some(binding_type)
            );
        }
        assert_eq!(BindingType::from_command_id(CommandId::Outbind), None);
        assert_eq!(BindingType::Transceiver.to_string(), "transceiver");
    }
}
