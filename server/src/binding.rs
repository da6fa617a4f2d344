//! The notification a client has chosen an address.

use std::{fmt, net::Ipv4Addr};

use chrono::{DateTime, Utc};

use dhcp_protocol::{HardwareAddress, Message, MessageType};

/// What a client told the server when it made its choice.
///
/// Is handed to the `client_has_chosen` observer and never stored by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub transaction_id: u32,
    /// The client identifier option or the hardware address.
    pub client_id: Vec<u8>,
    pub client_hardware_address: HardwareAddress,
    /// `DhcpRequest` or `DhcpInform`.
    pub message_type: MessageType,
    /// The requested address, or `ciaddr` if the client is already configured.
    pub address: Option<Ipv4Addr>,
    /// The server the client has chosen.
    pub server_id: Option<Ipv4Addr>,
    pub chosen_at: DateTime<Utc>,
}

impl Binding {
    pub fn new(message: &Message, message_type: MessageType) -> Self {
        let address = match message.options.address_request() {
            Some(address) => Some(*address),
            None if !message.client_ip_address.is_unspecified() => Some(message.client_ip_address),
            None => None,
        };

        Binding {
            transaction_id: message.transaction_id,
            client_id: message.client_id(),
            client_hardware_address: message.client_hardware_address,
            message_type,
            address,
            server_id: message.options.dhcp_server_id().cloned(),
            chosen_at: Utc::now(),
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {:#010x} from {}",
            self.message_type, self.transaction_id, self.client_hardware_address,
        )?;
        if let Some(address) = self.address {
            write!(f, " for {}", address)?;
        }
        if let Some(server_id) = self.server_id {
            write!(f, " at server {}", server_id)?;
        }
        write!(f, " ({})", self.chosen_at.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use dhcp_protocol::{OperationCode, OutboundMessage};
    use eui48::MacAddress;

    use super::*;

    fn request() -> OutboundMessage {
        let mut message = OutboundMessage::new();
        message.operation_code = OperationCode::BootRequest;
        message.transaction_id = Some(0x42);
        message.client_hardware_address = Some(MacAddress::new([2, 0, 0, 0, 0, 1]).into());
        message.options.set_dhcp_message_type(MessageType::DhcpRequest);
        message
    }

    fn decode(message: &OutboundMessage) -> Message {
        Message::from_bytes(&message.to_bytes().unwrap()).unwrap()
    }

    #[test]
    fn prefers_the_requested_address() {
        let mut message = request();
        message.client_ip_address = Ipv4Addr::new(192, 168, 0, 9);
        message.options.set_address_request(Ipv4Addr::new(192, 168, 0, 10));
        message.options.set_dhcp_server_id(Ipv4Addr::new(192, 168, 0, 1));

        let binding = Binding::new(&decode(&message), MessageType::DhcpRequest);
        assert_eq!(binding.transaction_id, 0x42);
        assert_eq!(binding.address, Some(Ipv4Addr::new(192, 168, 0, 10)));
        assert_eq!(binding.server_id, Some(Ipv4Addr::new(192, 168, 0, 1)));
        assert_eq!(binding.client_id, vec![2, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn falls_back_to_the_client_address() {
        let mut message = request();
        message.client_ip_address = Ipv4Addr::new(192, 168, 0, 9);
        let binding = Binding::new(&decode(&message), MessageType::DhcpInform);
        assert_eq!(binding.address, Some(Ipv4Addr::new(192, 168, 0, 9)));
        assert_eq!(binding.message_type, MessageType::DhcpInform);

        let binding = Binding::new(&decode(&request()), MessageType::DhcpRequest);
        assert_eq!(binding.address, None);
        assert_eq!(binding.server_id, None);
    }
}
