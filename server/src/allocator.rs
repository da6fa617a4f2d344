//! The IP assignment counter.

use std::net::Ipv4Addr;

use crate::error::Error;

/// The lowest final octet a client may be given.
const FIRST_HOST_OCTET: u16 = 1;
/// The highest final octet a client may be given.
const LAST_HOST_OCTET: u16 = 254;

/// Cycles through a window of final octets inside the network prefix.
///
/// Neither persisted nor tied to a client, so two clients may be offered the same address.
#[derive(Debug, Clone)]
pub struct Allocator {
    network: Ipv4Addr,
    start: u8,
    size: u8,
    current: u8,
}

impl Allocator {
    /// # Errors
    /// `Error::Configuration` if the window is empty or leaves the host octet range.
    pub fn new(network: Ipv4Addr, start: u8, size: u8) -> Result<Self, Error> {
        check_window(start, size)?;
        Ok(Allocator {
            network,
            start,
            size,
            current: start,
        })
    }

    /// Advances the counter and returns the network prefix with the counter as its final octet.
    pub fn next(&mut self) -> Ipv4Addr {
        let offset = (u16::from(self.current - self.start) + 1) % u16::from(self.size);
        self.current = self.start + offset as u8;

        let octets = self.network.octets();
        Ipv4Addr::new(octets[0], octets[1], octets[2], self.current)
    }
}

/// # Errors
/// `Error::Configuration` if the window is empty or leaves the host octet range.
pub(crate) fn check_window(start: u8, size: u8) -> Result<(), Error> {
    if size == 0 {
        return Err(Error::Configuration("The address window is empty".to_owned()));
    }
    let last = u16::from(start) + u16::from(size) - 1;
    if u16::from(start) < FIRST_HOST_OCTET || last > LAST_HOST_OCTET {
        return Err(Error::Configuration(format!(
            "The address window {}..={} leaves the range {}..={}",
            start, last, FIRST_HOST_OCTET, LAST_HOST_OCTET,
        )));
    }
    Ok(())
}
