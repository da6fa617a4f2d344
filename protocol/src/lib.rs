//! The DHCP protocol codec.
//!
//! Encodes server messages into the BOOTP wire format and decodes client datagrams
//! into `Message` with typed options.

pub mod constants;
pub mod options;

mod deserializer;
mod error;
mod hardware_address;
mod hardware_type;
mod message;
mod operation_code;
mod outbound;
mod serializer;

pub use self::{
    constants::*,
    error::Error,
    hardware_address::HardwareAddress,
    hardware_type::HardwareType,
    message::Message,
    operation_code::OperationCode,
    options::{MessageType, OptionKind, OptionTag, OptionValue, Options},
    outbound::OutboundMessage,
};
