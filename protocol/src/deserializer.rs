//! DHCP message deserialization module.

use std::net::Ipv4Addr;

use bytes::Buf;
use crate::{
    constants::*, error::Error, hardware_address::HardwareAddress, message::Message,
    options::Options,
};

/// Checks if there is enough space in buffer to get a value.
macro_rules! check_remaining(
    ($cursor:expr, $length:expr) => (
        if $cursor.remaining() < $length {
            return Err(Error::Truncated);
        }
    );
);

impl Message {
    /// DHCP message deserialization.
    ///
    /// # Errors
    /// `Error::Truncated` if the packet is abrupted, too small or contains invalid length octets.
    /// `Error::MagicCookie` if the options are not preceded by the DHCP magic cookie.
    /// `Error::InvalidOptionLength` if a known option has a payload of invalid size.
    pub fn from_bytes(src: &[u8]) -> Result<Self, Error> {
        let mut cursor = src;
        check_remaining!(cursor, OFFSET_OPTIONS);

        let operation_code = cursor.get_u8().into();
        let hardware_type = cursor.get_u8().into();
        let hardware_address_length = cursor.get_u8();
        let hops = cursor.get_u8();
        let transaction_id = cursor.get_u32();
        let seconds = cursor.get_u16();
        let flags = cursor.get_u16();
        let client_ip_address = Ipv4Addr::from(cursor.get_u32());
        let your_ip_address = Ipv4Addr::from(cursor.get_u32());
        let server_ip_address = Ipv4Addr::from(cursor.get_u32());
        let gateway_ip_address = Ipv4Addr::from(cursor.get_u32());

        let length = (hardware_address_length as usize).min(SIZE_HARDWARE_ADDRESS);
        let client_hardware_address = HardwareAddress::new(&cursor[..length]);
        cursor.advance(SIZE_HARDWARE_ADDRESS);

        let server_name = cursor[..SIZE_SERVER_NAME].to_vec();
        cursor.advance(SIZE_SERVER_NAME);
        let boot_filename = cursor[..SIZE_BOOT_FILENAME].to_vec();
        cursor.advance(SIZE_BOOT_FILENAME);

        if cursor.get_u32() != MAGIC_COOKIE {
            return Err(Error::MagicCookie);
        }

        Ok(Message {
            operation_code,
            hardware_type,
            hardware_address_length,
            hops,
            transaction_id,
            seconds,
            flags,
            client_ip_address,
            your_ip_address,
            server_ip_address,
            gateway_ip_address,
            client_hardware_address,
            server_name,
            boot_filename,
            options: Options::from_bytes(cursor)?,
        })
    }
}
