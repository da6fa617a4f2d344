//! Typed DHCP option values and their per-kind formatting.

use std::{fmt, mem, net::Ipv4Addr};

use bytes::{Buf, BufMut};

use super::{MessageType, OptionKind};

/// A typed option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Ipv4(Ipv4Addr),
    Ipv4List(Vec<Ipv4Addr>),
    Ipv4Pairs(Vec<(Ipv4Addr, Ipv4Addr)>),
    U8(u8),
    U16(u16),
    U16List(Vec<u16>),
    U32(u32),
    I32(i32),
    String(String),
    Bytes(Vec<u8>),
    MessageType(MessageType),
}

impl OptionValue {
    /// The kind this value is formatted as.
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionValue::Ipv4(_) => OptionKind::Ipv4,
            OptionValue::Ipv4List(_) => OptionKind::Ipv4List,
            OptionValue::Ipv4Pairs(_) => OptionKind::Ipv4Pairs,
            OptionValue::U8(_) => OptionKind::U8,
            OptionValue::U16(_) => OptionKind::U16,
            OptionValue::U16List(_) => OptionKind::U16List,
            OptionValue::U32(_) => OptionKind::U32,
            OptionValue::I32(_) => OptionKind::I32,
            OptionValue::String(_) => OptionKind::String,
            OptionValue::Bytes(_) => OptionKind::Bytes,
            OptionValue::MessageType(_) => OptionKind::MessageType,
        }
    }

    /// Formats the value into its option payload (without the tag and length octets).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut dst = Vec::new();
        match self {
            OptionValue::Ipv4(value) => dst.put_u32(u32::from(*value)),
            OptionValue::Ipv4List(value) => {
                for element in value.iter() {
                    dst.put_u32(u32::from(*element));
                }
            }
            OptionValue::Ipv4Pairs(value) => {
                for (first, second) in value.iter() {
                    dst.put_u32(u32::from(*first));
                    dst.put_u32(u32::from(*second));
                }
            }
            OptionValue::U8(value) => dst.put_u8(*value),
            OptionValue::U16(value) => dst.put_u16(*value),
            OptionValue::U16List(value) => {
                for element in value.iter() {
                    dst.put_u16(*element);
                }
            }
            OptionValue::U32(value) => dst.put_u32(*value),
            OptionValue::I32(value) => dst.put_i32(*value),
            OptionValue::String(value) => dst.put_slice(value.as_bytes()),
            OptionValue::Bytes(value) => dst.put_slice(value),
            OptionValue::MessageType(value) => dst.put_u8(u8::from(*value)),
        }
        dst
    }

    /// Parses an option payload according to `kind`.
    ///
    /// Returns `None` if the payload length does not suit the kind.
    /// A string payload which is not UTF-8 is kept as `Bytes`.
    pub fn parse(kind: OptionKind, mut src: &[u8]) -> Option<Self> {
        let len = src.len();
        let value = match kind {
            OptionKind::Ipv4 => {
                exact(len, mem::size_of::<u32>())?;
                OptionValue::Ipv4(Ipv4Addr::from(src.get_u32()))
            }
            OptionKind::Ipv4List => {
                divisible(len, mem::size_of::<u32>())?;
                let mut value = Vec::with_capacity(len / mem::size_of::<u32>());
                while src.has_remaining() {
                    value.push(Ipv4Addr::from(src.get_u32()));
                }
                OptionValue::Ipv4List(value)
            }
            OptionKind::Ipv4Pairs => {
                divisible(len, mem::size_of::<u32>() * 2)?;
                let mut value = Vec::with_capacity(len / (mem::size_of::<u32>() * 2));
                while src.has_remaining() {
                    let first = Ipv4Addr::from(src.get_u32());
                    let second = Ipv4Addr::from(src.get_u32());
                    value.push((first, second));
                }
                OptionValue::Ipv4Pairs(value)
            }
            OptionKind::U8 => {
                exact(len, mem::size_of::<u8>())?;
                OptionValue::U8(src.get_u8())
            }
            OptionKind::U16 => {
                exact(len, mem::size_of::<u16>())?;
                OptionValue::U16(src.get_u16())
            }
            OptionKind::U16List => {
                divisible(len, mem::size_of::<u16>())?;
                let mut value = Vec::with_capacity(len / mem::size_of::<u16>());
                while src.has_remaining() {
                    value.push(src.get_u16());
                }
                OptionValue::U16List(value)
            }
            OptionKind::U32 => {
                exact(len, mem::size_of::<u32>())?;
                OptionValue::U32(src.get_u32())
            }
            OptionKind::I32 => {
                exact(len, mem::size_of::<i32>())?;
                OptionValue::I32(src.get_i32())
            }
            OptionKind::String => match String::from_utf8(src.to_vec()) {
                Ok(value) => OptionValue::String(value),
                Err(error) => OptionValue::Bytes(error.into_bytes()),
            },
            OptionKind::Bytes => OptionValue::Bytes(src.to_vec()),
            OptionKind::MessageType => {
                exact(len, mem::size_of::<u8>())?;
                OptionValue::MessageType(src.get_u8().into())
            }
        };
        Some(value)
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OptionValue::Ipv4(value) => write!(f, "{}", value),
            OptionValue::MessageType(value) => write!(f, "{}", value),
            OptionValue::String(value) => write!(f, "{:?}", value),
            OptionValue::U8(value) => write!(f, "{}", value),
            OptionValue::U16(value) => write!(f, "{}", value),
            OptionValue::U32(value) => write!(f, "{}", value),
            OptionValue::I32(value) => write!(f, "{}", value),
            OptionValue::Ipv4List(value) => write!(f, "{:?}", value),
            OptionValue::Ipv4Pairs(value) => write!(f, "{:?}", value),
            OptionValue::U16List(value) => write!(f, "{:?}", value),
            OptionValue::Bytes(value) => write!(f, "{:?}", value),
        }
    }
}

fn exact(len: usize, expected: usize) -> Option<()> {
    if len == expected {
        Some(())
    } else {
        None
    }
}

fn divisible(len: usize, divider: usize) -> Option<()> {
    if len % divider == 0 {
        Some(())
    } else {
        None
    }
}
