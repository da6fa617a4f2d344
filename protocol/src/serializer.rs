//! DHCP message serialization module.

use bytes::BufMut;

use crate::{constants::*, error::Error, outbound::OutboundMessage};

impl OutboundMessage {
    /// DHCP message serialization.
    ///
    /// Writes the 236 byte BOOTP header, the magic cookie, the options in the order
    /// given by `Options::ordered_codes` and the `End` option.
    ///
    /// # Errors
    /// `Error::MissingTransactionId` or `Error::MissingHardwareAddress` if a mandatory
    /// header field is not set.
    /// `Error::OptionTooLong` if an option payload exceeds 255 bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let transaction_id = self.transaction_id.ok_or(Error::MissingTransactionId)?;
        let client_hardware_address = self
            .client_hardware_address
            .ok_or(Error::MissingHardwareAddress)?;

        let mut options = Vec::new();
        for code in self.options.ordered_codes(&self.parameter_request_list) {
            let payload = match self.options.payload(code) {
                Some(payload) => payload,
                None => continue,
            };
            if payload.len() > u8::max_value() as usize {
                return Err(Error::OptionTooLong {
                    tag: code,
                    length: payload.len(),
                });
            }
            options.push((code, payload));
        }

        let mut dst = Vec::with_capacity(OFFSET_OPTIONS + SIZE_OPTION_PREFIX * (options.len() + 1));
        dst.put_u8(u8::from(self.operation_code));
        dst.put_u8(u8::from(self.hardware_type));
        dst.put_u8(self.hardware_address_length);
        dst.put_u8(self.hops);
        dst.put_u32(transaction_id);
        dst.put_u16(self.seconds);
        dst.put_u16(self.flags);
        dst.put_u32(u32::from(self.client_ip_address));
        dst.put_u32(u32::from(self.your_ip_address));
        dst.put_u32(u32::from(self.server_ip_address));
        dst.put_u32(u32::from(self.gateway_ip_address));

        let mut hardware_address = [0u8; SIZE_HARDWARE_ADDRESS];
        let octets = client_hardware_address.as_bytes();
        let length = (self.hardware_address_length as usize).min(octets.len());
        hardware_address[..length].copy_from_slice(&octets[..length]);
        dst.put_slice(&hardware_address);
        dst.put_slice(&[0u8; SIZE_SERVER_NAME + SIZE_BOOT_FILENAME]);

        dst.put_u32(MAGIC_COOKIE);
        for (code, payload) in options.iter() {
            dst.put_u8(*code);
            dst.put_u8(payload.len() as u8);
            dst.put_slice(payload);
        }
        dst.put_u8(OPTION_END);

        Ok(dst)
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use eui48::MacAddress;

    use super::*;
    use crate::{hardware_address::HardwareAddress, hardware_type::HardwareType, options::MessageType};

    fn offer() -> OutboundMessage {
        let mut message = OutboundMessage::new();
        message.transaction_id = Some(0x1234_5678);
        message.client_hardware_address = Some(MacAddress::new([0x01, 0x02, 0x03, 0x04, 0x05, 0x06]).into());
        message.your_ip_address = Ipv4Addr::new(192, 168, 0, 10);
        message.server_ip_address = Ipv4Addr::new(192, 168, 0, 1);
        message.options.set_dhcp_message_type(MessageType::DhcpOffer);
        message.options.set_subnet_mask(Ipv4Addr::new(255, 255, 255, 0));
        message.options.set_routers(vec![Ipv4Addr::new(192, 168, 0, 1)]);
        message.options.set_address_time(86400);
        message
    }

    #[test]
    fn writes_header_fields_at_their_offsets() {
        let mut message = offer();
        message.seconds = 0x0102;
        message.flags = FLAG_BROADCAST;
        message.hops = 3;
        message.client_ip_address = Ipv4Addr::new(10, 0, 0, 1);
        message.gateway_ip_address = Ipv4Addr::new(10, 0, 0, 254);
        let bytes = message.to_bytes().unwrap();

        assert_eq!(&bytes[0..4], &[2, 1, 6, 3]);
        assert_eq!(&bytes[4..8], &[0x12, 0x34, 0x56, 0x78]);
        assert_eq!(&bytes[8..10], &[0x01, 0x02]);
        assert_eq!(&bytes[10..12], &[0x80, 0x00]);
        assert_eq!(&bytes[12..16], &[10, 0, 0, 1]);
        assert_eq!(&bytes[16..20], &[192, 168, 0, 10]);
        assert_eq!(&bytes[20..24], &[192, 168, 0, 1]);
        assert_eq!(&bytes[24..28], &[10, 0, 0, 254]);
        assert_eq!(&bytes[28..34], &[1, 2, 3, 4, 5, 6]);
        assert!(bytes[34..OFFSET_MAGIC_COOKIE].iter().all(|byte| *byte == 0));
    }

    #[test]
    fn magic_cookie_follows_the_fixed_header() {
        let bytes = offer().to_bytes().unwrap();
        assert_eq!(&bytes[236..240], &[0x63, 0x82, 0x53, 0x63]);

        let mut empty = OutboundMessage::new();
        empty.transaction_id = Some(u32::max_value());
        empty.client_hardware_address = Some(MacAddress::broadcast().into());
        let bytes = empty.to_bytes().unwrap();
        assert_eq!(&bytes[236..240], &[0x63, 0x82, 0x53, 0x63]);
        assert_eq!(&bytes[240..], &[OPTION_END]);
    }

    #[test]
    fn options_follow_the_parameter_request_list() {
        let mut message = offer();
        message.parameter_request_list = vec![3, 1, 51];
        let bytes = message.to_bytes().unwrap();

        let mut codes = Vec::new();
        let mut position = OFFSET_OPTIONS;
        while bytes[position] != OPTION_END {
            codes.push(bytes[position]);
            position += SIZE_OPTION_PREFIX + bytes[position + 1] as usize;
        }
        assert_eq!(codes, vec![3, 1, 51, 53]);
    }

    #[test]
    fn writes_option_triples() {
        let mut message = offer();
        message.options = Default::default();
        message.options.set_address_time(86400);
        let bytes = message.to_bytes().unwrap();
        assert_eq!(&bytes[OFFSET_OPTIONS..], &[51, 4, 0x00, 0x01, 0x51, 0x80, OPTION_END]);
    }

    #[test]
    fn rejects_missing_transaction_id() {
        let mut message = offer();
        message.transaction_id = None;
        assert_eq!(message.to_bytes(), Err(Error::MissingTransactionId));
    }

    #[test]
    fn rejects_missing_hardware_address() {
        let mut message = offer();
        message.client_hardware_address = None;
        assert_eq!(message.to_bytes(), Err(Error::MissingHardwareAddress));
    }

    #[test]
    fn rejects_oversized_option() {
        let mut message = offer();
        message.options.set_extra(224, vec![0u8; 256]).unwrap();
        assert_eq!(
            message.to_bytes(),
            Err(Error::OptionTooLong { tag: 224, length: 256 })
        );
    }

    #[test]
    fn short_hardware_address_length_truncates_the_address() {
        let mut message = offer();
        message.hardware_address_length = 4;
        let bytes = message.to_bytes().unwrap();
        assert_eq!(&bytes[28..34], &[1, 2, 3, 4, 0, 0]);
    }

    #[test]
    fn writes_hardware_address_longer_than_a_mac() {
        let infiniband: Vec<u8> = (1..=16).collect();
        let mut message = offer();
        message.hardware_type = HardwareType::Unknown(32);
        message.hardware_address_length = 16;
        message.client_hardware_address = Some(HardwareAddress::new(&infiniband));
        let bytes = message.to_bytes().unwrap();
        assert_eq!(&bytes[0..3], &[2, 32, 16]);
        assert_eq!(&bytes[28..44], &infiniband[..]);
    }
}
