//! The UDP socket the DHCP server talks through.
//!
//! `Datagram` is the seam between the server and the network,
//! `DhcpFramed` is its implementation over a real UDP socket.

mod socket;

pub use socket::{Datagram, DhcpFramed, BUFFER_READ_CAPACITY};
