//! The main DHCP socket module.

use std::{
    io,
    net::{SocketAddr, UdpSocket},
    time::Duration,
};

use log::debug;
use net2::UdpBuilder;
use parking_lot::RwLock;

/// Must be enough to receive any DHCP message.
pub const BUFFER_READ_CAPACITY: usize = 8192;

/// The shortest wait `recv_from` performs, since a zero read timeout means blocking forever.
const MINIMAL_READ_TIMEOUT: Duration = Duration::from_millis(1);

/// A datagram socket as the DHCP server needs it.
///
/// Is shared between the event loop, which receives, and the delay worker, which sends.
pub trait Datagram: Send + Sync {
    /// Waits up to `timeout` for one datagram.
    ///
    /// Returns `Ok(None)` if nothing has arrived in time.
    ///
    /// # Errors
    /// `io::Error` on a socket error or if the socket is closed.
    fn recv_from(&self, buf: &mut [u8], timeout: Duration) -> io::Result<Option<(usize, SocketAddr)>>;

    /// Sends one datagram.
    ///
    /// # Errors
    /// `io::Error` on a socket error or if the socket is closed.
    fn send_to(&self, buf: &[u8], addr: SocketAddr) -> io::Result<usize>;

    /// Releases the socket. Every subsequent call fails.
    fn close(&self);
}

/// A UDP socket bound with address reuse and allowed to broadcast.
pub struct DhcpFramed {
    /// `None` after `close`.
    socket: RwLock<Option<UdpSocket>>,
}

impl DhcpFramed {
    /// Binds to `addr`.
    ///
    /// # Errors
    /// `io::Error` on unsuccessful socket building or binding.
    pub fn bind(addr: SocketAddr) -> io::Result<Self> {
        let socket = UdpBuilder::new_v4()?.reuse_address(true)?.bind(addr)?;
        socket.set_broadcast(true)?;
        debug!("Bound a DHCP socket to {}", socket.local_addr()?);

        Ok(DhcpFramed {
            socket: RwLock::new(Some(socket)),
        })
    }

    /// # Errors
    /// `io::Error` if the socket is closed.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        match *self.socket.read() {
            Some(ref socket) => socket.local_addr(),
            None => Err(closed()),
        }
    }
}

impl Datagram for DhcpFramed {
    fn recv_from(&self, buf: &mut [u8], timeout: Duration) -> io::Result<Option<(usize, SocketAddr)>> {
        let guard = self.socket.read();
        let socket = guard.as_ref().ok_or_else(closed)?;

        socket.set_read_timeout(Some(timeout.max(MINIMAL_READ_TIMEOUT)))?;
        match socket.recv_from(buf) {
            Ok((amount, addr)) => Ok(Some((amount, addr))),
            Err(ref error)
                if error.kind() == io::ErrorKind::WouldBlock
                    || error.kind() == io::ErrorKind::TimedOut =>
            {
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    fn send_to(&self, buf: &[u8], addr: SocketAddr) -> io::Result<usize> {
        let guard = self.socket.read();
        let socket = guard.as_ref().ok_or_else(closed)?;

        let sent = socket.send_to(buf, addr)?;
        if sent != buf.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "Failed to write entire datagram to socket",
            ));
        }
        Ok(sent)
    }

    fn close(&self) {
        if self.socket.write().take().is_some() {
            debug!("The DHCP socket has been closed");
        }
    }
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, "The socket is closed")
}
