//! DHCP options module.
//!
//! Options are held as an explicit map from the option code to its typed value.
//! Codes outside the canonical table live in a separate map of raw payloads.

mod message_type;
mod option_tag;
mod value;

pub use self::{
    message_type::MessageType,
    option_tag::{OptionKind, OptionTag},
    value::OptionValue,
};

use std::{collections::BTreeMap, net::Ipv4Addr};

use bytes::Buf;

use crate::{constants::*, error::Error};

/// DHCP options.
///
/// [RFC 2132](https://tools.ietf.org/html/rfc2132)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Canonical options keyed by code.
    values: BTreeMap<u8, OptionValue>,
    /// Options attached outside the canonical table, as raw payloads.
    extra: BTreeMap<u8, Vec<u8>>,
}

/// Generates a typed getter and setter pair for a canonical option.
macro_rules! accessor (
    ($getter:ident, $setter:ident, $tag:ident, $variant:ident, $type:ty) => (
        pub fn $getter(&self) -> Option<&$type> {
            match self.values.get(&(OptionTag::$tag as u8)) {
                Some(OptionValue::$variant(value)) => Some(value),
                _ => None,
            }
        }

        pub fn $setter(&mut self, value: $type) {
            self.values.insert(OptionTag::$tag as u8, OptionValue::$variant(value));
        }
    );
);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a canonical option.
    ///
    /// # Errors
    /// `Error::InvalidOptionValue` if the value kind does not match the tag.
    pub fn set(&mut self, tag: OptionTag, value: OptionValue) -> Result<(), Error> {
        if tag.kind() != value.kind() {
            return Err(Error::InvalidOptionValue { tag: tag.code() });
        }
        self.values.insert(tag.code(), value);
        Ok(())
    }

    pub fn get(&self, tag: OptionTag) -> Option<&OptionValue> {
        self.values.get(&tag.code())
    }

    pub fn remove(&mut self, tag: OptionTag) -> Option<OptionValue> {
        self.values.remove(&tag.code())
    }

    /// Attaches a raw option outside the canonical table.
    ///
    /// # Errors
    /// `Error::ReservedOptionCode` for `Pad` and `End`.
    pub fn set_extra(&mut self, code: u8, value: Vec<u8>) -> Result<(), Error> {
        if code == OPTION_PAD || code == OPTION_END {
            return Err(Error::ReservedOptionCode(code));
        }
        self.extra.insert(code, value);
        Ok(())
    }

    pub fn extra(&self, code: u8) -> Option<&[u8]> {
        self.extra.get(&code).map(Vec::as_slice)
    }

    /// Whether the code has either a typed or an extra value.
    pub fn contains(&self, code: u8) -> bool {
        self.values.contains_key(&code) || self.extra.contains_key(&code)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.extra.is_empty()
    }

    /// Iterates over the canonical options in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &OptionValue)> {
        self.values.iter().map(|(code, value)| (*code, value))
    }

    /// Iterates over the extra options in ascending code order.
    pub fn iter_extra(&self) -> impl Iterator<Item = (u8, &[u8])> {
        self.extra.iter().map(|(code, value)| (*code, value.as_slice()))
    }

    /// The formatted payload of the option. A typed value wins over an extra one.
    pub fn payload(&self, code: u8) -> Option<Vec<u8>> {
        match self.values.get(&code) {
            Some(value) => Some(value.to_bytes()),
            None => self.extra.get(&code).cloned(),
        }
    }

    /// The order the options are written to the wire.
    ///
    /// The codes the client asked for come first in the order it asked for them,
    /// then the rest of the canonical options ascending, then the rest of the extra
    /// options ascending. No code appears twice.
    pub fn ordered_codes(&self, parameter_request_list: &[u8]) -> Vec<u8> {
        let mut done: Vec<u8> = Vec::with_capacity(self.values.len() + self.extra.len());
        for code in parameter_request_list.iter() {
            if self.contains(*code) && !done.contains(code) {
                done.push(*code);
            }
        }
        for code in self.values.keys().chain(self.extra.keys()) {
            if !done.contains(code) {
                done.push(*code);
            }
        }
        done
    }

    /// Reads options until `End` or the end of the buffer.
    ///
    /// # Errors
    /// `Error::Truncated` if a length octet overruns the buffer.
    /// `Error::InvalidOptionLength` if a canonical option has a malformed payload.
    pub(crate) fn from_bytes(mut src: &[u8]) -> Result<Self, Error> {
        let mut options = Options::new();
        while src.has_remaining() {
            let code = src.get_u8();
            match code {
                OPTION_PAD => continue,
                OPTION_END => break,
                _ => {}
            }

            if !src.has_remaining() {
                return Err(Error::Truncated);
            }
            let length = src.get_u8() as usize;
            if src.remaining() < length {
                return Err(Error::Truncated);
            }

            let payload = &src[..length];
            match OptionTag::from_code(code) {
                Some(tag) => {
                    let value = OptionValue::parse(tag.kind(), payload)
                        .ok_or(Error::InvalidOptionLength { tag: code, length })?;
                    options.values.insert(code, value);
                }
                None => {
                    options.extra.insert(code, payload.to_vec());
                }
            }
            src.advance(length);
        }
        Ok(options)
    }

    accessor!(subnet_mask, set_subnet_mask, SubnetMask, Ipv4, Ipv4Addr);
    accessor!(routers, set_routers, Routers, Ipv4List, Vec<Ipv4Addr>);
    accessor!(domain_name_servers, set_domain_name_servers, DomainNameServers, Ipv4List, Vec<Ipv4Addr>);
    accessor!(hostname, set_hostname, Hostname, String, String);
    accessor!(address_request, set_address_request, AddressRequest, Ipv4, Ipv4Addr);
    accessor!(address_time, set_address_time, AddressTime, U32, u32);
    accessor!(dhcp_message_type, set_dhcp_message_type, DhcpMessageType, MessageType, MessageType);
    accessor!(dhcp_server_id, set_dhcp_server_id, DhcpServerId, Ipv4, Ipv4Addr);
    accessor!(parameter_list, set_parameter_list, ParameterList, Bytes, Vec<u8>);
    accessor!(dhcp_message, set_dhcp_message, DhcpMessage, String, String);
    accessor!(renewal_time, set_renewal_time, RenewalTime, U32, u32);
    accessor!(rebinding_time, set_rebinding_time, RebindingTime, U32, u32);
    accessor!(client_id, set_client_id, ClientId, Bytes, Vec<u8>);
}
