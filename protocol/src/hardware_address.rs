//! The BOOTP `chaddr` field.

use std::fmt;

use eui48::MacAddress;

use crate::constants::SIZE_HARDWARE_ADDRESS;

/// A client hardware address of up to 16 octets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HardwareAddress {
    octets: [u8; SIZE_HARDWARE_ADDRESS],
    length: usize,
}

impl HardwareAddress {
    /// Takes at most the first 16 octets of `bytes`.
    pub fn new(bytes: &[u8]) -> Self {
        let length = bytes.len().min(SIZE_HARDWARE_ADDRESS);
        let mut octets = [0u8; SIZE_HARDWARE_ADDRESS];
        octets[..length].copy_from_slice(&bytes[..length]);
        HardwareAddress { octets, length }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.octets[..self.length]
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl From<MacAddress> for HardwareAddress {
    fn from(address: MacAddress) -> Self {
        HardwareAddress::new(address.as_bytes())
    }
}

impl fmt::Display for HardwareAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, octet) in self.as_bytes().iter().enumerate() {
            if i > 0 {
                write!(f, ":")?;
            }
            write!(f, "{:02x}", octet)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_up_to_sixteen_octets() {
        let infiniband: Vec<u8> = (1..=20).collect();
        let address = HardwareAddress::new(&infiniband);
        assert_eq!(address.len(), SIZE_HARDWARE_ADDRESS);
        assert_eq!(address.as_bytes(), &infiniband[..SIZE_HARDWARE_ADDRESS]);
    }

    #[test]
    fn formats_as_colon_separated_hex() {
        let mac = HardwareAddress::from(MacAddress::new([0x02, 0, 0, 0, 0x12, 0x34]));
        assert_eq!(mac.to_string(), "02:00:00:00:12:34");
        assert_eq!(HardwareAddress::new(&[0xab, 1, 2, 3, 4, 5, 6, 7]).to_string(), "ab:01:02:03:04:05:06:07");
        assert!(HardwareAddress::new(&[]).is_empty());
    }
}
