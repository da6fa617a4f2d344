//! The decoded DHCP message and its pretty printer.

use std::{fmt, net::Ipv4Addr};

use crate::{
    constants::FLAG_BROADCAST,
    hardware_address::HardwareAddress,
    hardware_type::HardwareType,
    operation_code::OperationCode,
    options::{OptionTag, Options},
};

/// DHCP message received from a client.
///
/// Is built by `Message::from_bytes` and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub operation_code: OperationCode,
    pub hardware_type: HardwareType,
    pub hardware_address_length: u8,
    pub hops: u8,
    pub transaction_id: u32,
    pub seconds: u16,
    pub flags: u16,
    pub client_ip_address: Ipv4Addr,
    pub your_ip_address: Ipv4Addr,
    pub server_ip_address: Ipv4Addr,
    pub gateway_ip_address: Ipv4Addr,
    /// The first `hardware_address_length` octets of `chaddr`.
    pub client_hardware_address: HardwareAddress,
    pub server_name: Vec<u8>,
    pub boot_filename: Vec<u8>,
    pub options: Options,
}

impl Message {
    /// The client identifier option or the hardware address if the option is absent.
    pub fn client_id(&self) -> Vec<u8> {
        match self.options.client_id() {
            Some(client_id) => client_id.to_owned(),
            None => self.client_hardware_address.as_bytes().to_vec(),
        }
    }

    pub fn is_broadcast(&self) -> bool {
        self.flags & FLAG_BROADCAST != 0
    }
}

/// Strips the trailing zero padding of a fixed-size string field.
fn trim_padding(field: &[u8]) -> &[u8] {
    let last = field.iter().rposition(|byte| *byte != 0).map_or(0, |i| i + 1);
    &field[..last]
}

/// Prints the options table shared by the inbound and outbound messages.
pub(crate) fn fmt_options(f: &mut fmt::Formatter, options: &Options) -> fmt::Result {
    writeln!(f, "{}OPTIONS{}", "_".repeat(30), "_".repeat(38))?;
    for (code, value) in options.iter() {
        let name = OptionTag::from_code(code)
            .map(|tag| format!("{:?}", tag))
            .unwrap_or_default();
        writeln!(f, "[{:03}] {:27}| {}", code, name, value)?;
    }
    for (code, value) in options.iter_extra() {
        writeln!(f, "[{:03}] {:27}| {:?}", code, "", value)?;
    }
    writeln!(f, "{}", "_".repeat(75))
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}HEADER{}", "_".repeat(30), "_".repeat(39))?;
        writeln!(f, "{:32} | {}", "Operation code", self.operation_code)?;
        writeln!(f, "{:32} | {}", "Hardware type", self.hardware_type)?;
        writeln!(f, "{:32} | {}", "Hardware address length", self.hardware_address_length)?;
        writeln!(f, "{:32} | {}", "Hops", self.hops)?;
        writeln!(f, "{:32} | {:#010x}", "Transaction ID", self.transaction_id)?;
        writeln!(f, "{:32} | {}", "Seconds", self.seconds)?;
        writeln!(f, "{:32} | {}", "Broadcast flag", self.is_broadcast())?;
        writeln!(f, "{:32} | {}", "Client IP address", self.client_ip_address)?;
        writeln!(f, "{:32} | {}", "Your IP address", self.your_ip_address)?;
        writeln!(f, "{:32} | {}", "Server IP address", self.server_ip_address)?;
        writeln!(f, "{:32} | {}", "Gateway IP address", self.gateway_ip_address)?;
        writeln!(f, "{:32} | {}", "Client hardware address", self.client_hardware_address)?;
        writeln!(
            f,
            "{:32} | {:?}",
            "Server name",
            String::from_utf8_lossy(trim_padding(&self.server_name))
        )?;
        writeln!(
            f,
            "{:32} | {:?}",
            "Boot filename",
            String::from_utf8_lossy(trim_padding(&self.boot_filename))
        )?;
        fmt_options(f, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_only_trailing_zeroes() {
        assert_eq!(trim_padding(&[b'a', 0, b'b', 0, 0]), &[b'a', 0, b'b']);
        assert_eq!(trim_padding(&[0, 0, 0]), &[] as &[u8]);
    }
}
