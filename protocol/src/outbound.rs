//! The server-to-client DHCP message.

use std::{fmt, net::Ipv4Addr};

use eui48::EUI48LEN;

use crate::{
    constants::FLAG_BROADCAST,
    hardware_address::HardwareAddress,
    hardware_type::HardwareType,
    message::fmt_options,
    operation_code::OperationCode,
    options::Options,
};

/// DHCP message built by the server.
///
/// The transaction ID and the client hardware address have no sensible default,
/// so the message cannot be serialized until both are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub operation_code: OperationCode,
    pub hardware_type: HardwareType,
    pub hardware_address_length: u8,
    pub hops: u8,
    pub transaction_id: Option<u32>,
    pub seconds: u16,
    pub flags: u16,
    pub client_ip_address: Ipv4Addr,
    pub your_ip_address: Ipv4Addr,
    pub server_ip_address: Ipv4Addr,
    pub gateway_ip_address: Ipv4Addr,
    /// Written up to `hardware_address_length` octets, zero-padded.
    pub client_hardware_address: Option<HardwareAddress>,
    /// The client's parameter request list.
    ///
    /// Only orders the options on the wire and is never sent itself.
    pub parameter_request_list: Vec<u8>,
    pub options: Options,
}

impl Default for OutboundMessage {
    fn default() -> Self {
        OutboundMessage {
            operation_code: OperationCode::BootReply,
            hardware_type: HardwareType::Ethernet,
            hardware_address_length: EUI48LEN as u8,
            hops: 0,
            transaction_id: None,
            seconds: 0,
            flags: 0,
            client_ip_address: Ipv4Addr::UNSPECIFIED,
            your_ip_address: Ipv4Addr::UNSPECIFIED,
            server_ip_address: Ipv4Addr::UNSPECIFIED,
            gateway_ip_address: Ipv4Addr::UNSPECIFIED,
            client_hardware_address: None,
            parameter_request_list: Vec::new(),
            options: Options::new(),
        }
    }
}

impl OutboundMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_broadcast(&self) -> bool {
        self.flags & FLAG_BROADCAST != 0
    }
}

impl fmt::Display for OutboundMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}HEADER{}", "_".repeat(30), "_".repeat(39))?;
        writeln!(f, "{:32} | {}", "Operation code", self.operation_code)?;
        writeln!(f, "{:32} | {}", "Hardware type", self.hardware_type)?;
        writeln!(f, "{:32} | {}", "Hardware address length", self.hardware_address_length)?;
        writeln!(f, "{:32} | {}", "Hops", self.hops)?;
        match self.transaction_id {
            Some(transaction_id) => writeln!(f, "{:32} | {:#010x}", "Transaction ID", transaction_id)?,
            None => writeln!(f, "{:32} | -", "Transaction ID")?,
        }
        writeln!(f, "{:32} | {}", "Seconds", self.seconds)?;
        writeln!(f, "{:32} | {}", "Broadcast flag", self.is_broadcast())?;
        writeln!(f, "{:32} | {}", "Client IP address", self.client_ip_address)?;
        writeln!(f, "{:32} | {}", "Your IP address", self.your_ip_address)?;
        writeln!(f, "{:32} | {}", "Server IP address", self.server_ip_address)?;
        writeln!(f, "{:32} | {}", "Gateway IP address", self.gateway_ip_address)?;
        match self.client_hardware_address {
            Some(ref address) => writeln!(f, "{:32} | {}", "Client hardware address", address)?,
            None => writeln!(f, "{:32} | -", "Client hardware address")?,
        }
        fmt_options(f, &self.options)
    }
}
