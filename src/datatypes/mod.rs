mod bind;
mod command_id;
mod command_status;
mod enquire_link;
mod generic_nack;
mod interface_version;
mod numeric_plan_indicator;
mod type_of_number;
mod unbind;

pub use bind::{
    AddressRange, BindRequest, BindResponse, BindingType, MAX_ADDRESS_RANGE_LENGTH,
    MAX_PASSWORD_LENGTH, MAX_SYSTEM_ID_LENGTH, MAX_SYSTEM_TYPE_LENGTH, SC_INTERFACE_VERSION_TAG,
};
pub use command_id::CommandId;
pub use command_status::CommandStatus;
pub use enquire_link::{EnquireLink, EnquireLinkResponse};
pub use generic_nack::GenericNack;
pub use interface_version::InterfaceVersion;
pub use numeric_plan_indicator::NumericPlanIndicator;
pub use type_of_number::TypeOfNumber;
pub use unbind::{Unbind, UnbindResponse};
