//! The BOOTP `htype` field.

use std::fmt;

/// ARP hardware type of the client.
///
/// Only Ethernet has a name, every other type is carried as its raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareType {
    Ethernet,
    Unknown(u8),
}

impl From<u8> for HardwareType {
    fn from(value: u8) -> Self {
        match value {
            1 => HardwareType::Ethernet,
            code => HardwareType::Unknown(code),
        }
    }
}

impl From<HardwareType> for u8 {
    fn from(value: HardwareType) -> Self {
        match value {
            HardwareType::Ethernet => 1,
            HardwareType::Unknown(code) => code,
        }
    }
}

impl fmt::Display for HardwareType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HardwareType::Ethernet => write!(f, "Ethernet"),
            HardwareType::Unknown(code) => write!(f, "Unknown ({})", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ieee_802_is_not_ethernet() {
        assert_eq!(HardwareType::from(6), HardwareType::Unknown(6));
        assert_eq!(u8::from(HardwareType::from(6)), 6);
        assert_eq!(u8::from(HardwareType::from(1)), 1);
    }
}
