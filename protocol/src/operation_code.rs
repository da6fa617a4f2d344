//! The BOOTP `op` field.

use std::fmt;

/// BOOTP operation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationCode {
    BootRequest,
    BootReply,
    /// Any other code, written back as received.
    Unknown(u8),
}

impl From<u8> for OperationCode {
    fn from(value: u8) -> Self {
        match value {
            1 => OperationCode::BootRequest,
            2 => OperationCode::BootReply,
            code => OperationCode::Unknown(code),
        }
    }
}

impl From<OperationCode> for u8 {
    fn from(value: OperationCode) -> Self {
        match value {
            OperationCode::BootRequest => 1,
            OperationCode::BootReply => 2,
            OperationCode::Unknown(code) => code,
        }
    }
}

impl fmt::Display for OperationCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OperationCode::BootRequest => write!(f, "BOOTREQUEST"),
            OperationCode::BootReply => write!(f, "BOOTREPLY"),
            OperationCode::Unknown(code) => write!(f, "UNKNOWN ({})", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_code_is_kept() {
        assert_eq!(OperationCode::from(7), OperationCode::Unknown(7));
        assert_eq!(u8::from(OperationCode::from(7)), 7);
        assert_eq!(u8::from(OperationCode::from(0)), 0);
        assert_eq!(u8::from(OperationCode::BootReply), 2);
    }
}
