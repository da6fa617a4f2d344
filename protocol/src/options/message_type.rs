//! The value of option 53.

use std::fmt;

/// DHCP message type.
///
/// The RFC 2131 types are named, later additions are carried as their raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    DhcpDiscover,
    DhcpOffer,
    DhcpRequest,
    DhcpDecline,
    DhcpAck,
    DhcpNak,
    DhcpRelease,
    DhcpInform,
    Unknown(u8),
}

const NAMED: [(u8, MessageType, &str); 8] = [
    (1, MessageType::DhcpDiscover, "DHCPDISCOVER"),
    (2, MessageType::DhcpOffer, "DHCPOFFER"),
    (3, MessageType::DhcpRequest, "DHCPREQUEST"),
    (4, MessageType::DhcpDecline, "DHCPDECLINE"),
    (5, MessageType::DhcpAck, "DHCPACK"),
    (6, MessageType::DhcpNak, "DHCPNAK"),
    (7, MessageType::DhcpRelease, "DHCPRELEASE"),
    (8, MessageType::DhcpInform, "DHCPINFORM"),
];

impl From<u8> for MessageType {
    fn from(value: u8) -> Self {
        NAMED
            .iter()
            .find(|(code, _, _)| *code == value)
            .map_or(MessageType::Unknown(value), |(_, message_type, _)| *message_type)
    }
}

impl From<MessageType> for u8 {
    fn from(value: MessageType) -> Self {
        match value {
            MessageType::Unknown(code) => code,
            named => NAMED
                .iter()
                .find(|(_, message_type, _)| *message_type == named)
                .map_or(0, |(code, _, _)| *code),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match NAMED.iter().find(|(_, message_type, _)| message_type == self) {
            Some((_, _, name)) => write!(f, "{}", name),
            None => write!(f, "DHCP message type {}", u8::from(*self)),
        }
    }
}
