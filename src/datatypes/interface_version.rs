use num_enum::{FromPrimitive, IntoPrimitive};

/// This parameter is used to indicate the version of the SMPP protocol.
/// Binds are always requested as 3.4; a peer may announce any other value,
/// which is kept as `Other`.
#[derive(FromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InterfaceVersion {
    SmppV33 = 0x33,
    SmppV34 = 0x34,
    SmppV50 = 0x50,
    #[num_enum(catch_all)]
    Other(u8),
}

impl Default for InterfaceVersion {
    fn default() -> Self {
        InterfaceVersion::SmppV34
    }
}
