use num_enum::{FromPrimitive, IntoPrimitive};
use std::fmt;

/// The command_status field of an SMPP response indicates the success or
/// failure of the request. Requests always carry `Ok` (NULL). Bind responses
/// use the `BindFailed` / `InvalidPassword` / `InvalidSystemId` family to
/// reject a bind attempt. Codes outside the table (reserved values and the
/// 0x400-0x4FF vendor range) decode to `Other` with the raw value preserved.
#[derive(FromPrimitive, IntoPrimitive)]
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommandStatus {
    Ok = 0x00000000,
    InvalidMsgLength = 0x00000001,
    InvalidCommandLength = 0x00000002,
    InvalidCommandId = 0x00000003,
    IncorrectBindStatus = 0x00000004,
    AlreadyBoundState = 0x00000005,
    InvalidPriorityFlag = 0x00000006,
    InvalidRegisteredDeliveryFlag = 0x00000007,
    SystemError = 0x00000008,
    InvalidSourceAddress = 0x0000000A,
    InvalidDestinationAddress = 0x0000000B,
    InvalidMessageId = 0x0000000C,
    BindFailed = 0x0000000D,
    InvalidPassword = 0x0000000E,
    InvalidSystemId = 0x0000000F,
    CancelSmFailed = 0x00000011,
    ReplacedSmFailed = 0x00000013,
    MessageQueueFull = 0x00000014,
    InvalidServiceType = 0x00000015,
    InvalidNumberOfDestinations = 0x00000033,
    InvalidDistributionListName = 0x00000034,
    InvalidDestinationFlag = 0x00000040,
    InvalidSubmitWithReplaceRequest = 0x00000042,
    InvalidEsmClassFieldData = 0x00000043,
    CannotSubmitToDistributionList = 0x00000044,
    SubmitFailed = 0x00000045,
    InvalidSourceAddressTon = 0x00000048,
    InvalidSourceAddressNpi = 0x00000049,
    InvalidDestinationAddressTon = 0x00000050,
    InvalidDestinationAddressNpi = 0x00000051,
    InvalidSystemTypeField = 0x00000053,
    InvalidReplaceIfPresentFlag = 0x00000054,
    InvalidNumberOfMessages = 0x00000055,
    ThrottlingError = 0x00000058,
    InvalidScheduledDeliveryTime = 0x00000061,
    InvalidExpiryTime = 0x00000062,
    InvalidPredefinedMessageId = 0x00000063,
    ReceiverTemporaryAppError = 0x00000064,
    ReceiverPermanentAppError = 0x00000065,
    ReceiverRejectMessageError = 0x00000066,
    QuerySmRequestFailed = 0x00000067,
    ErrorInOptionalPartofPduBody = 0x000000C0,
    OptionalParameterNotAllowed = 0x000000C1,
    InvalidParameterLength = 0x000000C2,
    ExpectedOptionalParameterMissing = 0x000000C3,
    InvalidOptionalParameterValue = 0x000000C4,
    DeliveryFailed = 0x000000FE,
    UnknownError = 0x000000FF,
    #[num_enum(catch_all)]
    Other(u32),
}

impl CommandStatus {
    pub fn is_ok(&self) -> bool {
        *self == CommandStatus::Ok
    }

    /// Raw wire value
    pub fn code(&self) -> u32 {
        u32::from(*self)
    }

    pub fn is_vendor_specific(&self) -> bool {
        (0x0000_0400..=0x0000_04FF).contains(&self.code())
    }

    /// Human readable description, as listed in the SMPP v3.4 error code table.
    pub fn description(&self) -> &'static str {
        match self {
            CommandStatus::Ok => "No Error",
            CommandStatus::InvalidMsgLength => "Message Length is invalid",
            CommandStatus::InvalidCommandLength => "Command Length is invalid",
            CommandStatus::InvalidCommandId => "Invalid Command ID",
            CommandStatus::IncorrectBindStatus => "Incorrect BIND Status for given command",
            CommandStatus::AlreadyBoundState => "ESME Already in Bound State",
            CommandStatus::InvalidPriorityFlag => "Invalid Priority Flag",
            CommandStatus::InvalidRegisteredDeliveryFlag => "Invalid Registered Delivery Flag",
            CommandStatus::SystemError => "System Error",
            CommandStatus::InvalidSourceAddress => "Invalid Source Address",
            CommandStatus::InvalidDestinationAddress => "Invalid Dest Addr",
            CommandStatus::InvalidMessageId => "Message ID is invalid",
            CommandStatus::BindFailed => "Bind Failed",
            CommandStatus::InvalidPassword => "Invalid Password",
            CommandStatus::InvalidSystemId => "Invalid System ID",
            CommandStatus::CancelSmFailed => "Cancel SM Failed",
            CommandStatus::ReplacedSmFailed => "Replace SM Failed",
            CommandStatus::MessageQueueFull => "Message Queue Full",
            CommandStatus::InvalidServiceType => "Invalid Service Type",
            CommandStatus::InvalidNumberOfDestinations => "Invalid number of destinations",
            CommandStatus::InvalidDistributionListName => "Invalid Distribution List name",
            CommandStatus::InvalidDestinationFlag => "Destination flag is invalid",
            CommandStatus::InvalidSubmitWithReplaceRequest => "Invalid 'submit with replace' request",
            CommandStatus::InvalidEsmClassFieldData => "Invalid esm_class field data",
            CommandStatus::CannotSubmitToDistributionList => "Cannot Submit to Distribution List",
            CommandStatus::SubmitFailed => "submit_sm or submit_multi failed",
            CommandStatus::InvalidSourceAddressTon => "Invalid Source address TON",
            CommandStatus::InvalidSourceAddressNpi => "Invalid Source address NPI",
            CommandStatus::InvalidDestinationAddressTon => "Invalid Destination address TON",
            CommandStatus::InvalidDestinationAddressNpi => "Invalid Destination address NPI",
            CommandStatus::InvalidSystemTypeField => "Invalid system_type field",
            CommandStatus::InvalidReplaceIfPresentFlag => "Invalid replace_if_present flag",
            CommandStatus::InvalidNumberOfMessages => "Invalid number of messages",
            CommandStatus::ThrottlingError => "Throttling error",
            CommandStatus::InvalidScheduledDeliveryTime => "Invalid Scheduled Delivery Time",
            CommandStatus::InvalidExpiryTime => "Invalid message validity period",
            CommandStatus::InvalidPredefinedMessageId => "Predefined Message Invalid or Not Found",
            CommandStatus::ReceiverTemporaryAppError => "ESME Receiver Temporary App Error Code",
            CommandStatus::ReceiverPermanentAppError => "ESME Receiver Permanent App Error Code",
            CommandStatus::ReceiverRejectMessageError => "ESME Receiver Reject Message Error Code",
            CommandStatus::QuerySmRequestFailed => "query_sm request failed",
            CommandStatus::ErrorInOptionalPartofPduBody => "Error in the optional part of the PDU Body",
            CommandStatus::OptionalParameterNotAllowed => "Optional Parameter not allowed",
            CommandStatus::InvalidParameterLength => "Invalid Parameter Length",
            CommandStatus::ExpectedOptionalParameterMissing => "Expected Optional Parameter missing",
            CommandStatus::InvalidOptionalParameterValue => "Invalid Optional Parameter Value",
            CommandStatus::DeliveryFailed => "Delivery Failure",
            CommandStatus::UnknownError => "Unknown Error",
            CommandStatus::Other(0x0000_0400..=0x0000_04FF) => "Vendor Specific Error",
            CommandStatus::Other(_) => "Reserved",
        }
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandStatus::Other(code) => write!(f, "Other ({code:#010x})"),
            status => write!(f, "{:?} ({:#010x})", status, status.code()),
        }
    }
}
