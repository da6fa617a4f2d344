//! Server module

use std::{
    collections::HashMap,
    io,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use log::{debug, info, warn};
use parking_lot::Mutex;

use dhcp_framed::{Datagram, DhcpFramed, BUFFER_READ_CAPACITY};
use dhcp_protocol::{Message, OutboundMessage, DHCP_PORT_CLIENT, DHCP_PORT_SERVER};

use crate::{
    allocator::Allocator,
    binding::Binding,
    builder::MessageBuilder,
    clock::{Clock, SystemClock},
    config::Configuration,
    error::Error,
    scheduler::Scheduler,
    transaction::{Received, Transaction},
};

/// The socket wait of a single `run` iteration.
pub const POLL_TIMEOUT: Duration = Duration::from_secs(1);

type Observer = Arc<dyn Fn(&Binding) + Send + Sync>;

/// The outcome of one `Server::update` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Nothing has arrived in time.
    Idle,
    /// The message has been accepted by its transaction.
    Handled(u32),
    /// The message has been ignored by its transaction.
    Unhandled(u32),
    /// The datagram is not a DHCP message.
    Malformed,
}

/// The DHCP server.
///
/// A handle over shared state, so clones drive and close the same server.
#[derive(Clone)]
pub struct Server {
    inner: Arc<Inner>,
}

/// The state shared by the event loop and the delayed replies.
pub(crate) struct Inner {
    pub(crate) configuration: Configuration,
    pub(crate) builder: MessageBuilder,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) scheduler: Scheduler,
    socket: Arc<dyn Datagram>,
    transactions: Mutex<HashMap<u32, Transaction>>,
    allocator: Mutex<Allocator>,
    observer: Mutex<Observer>,
    closed: AtomicBool,
}

impl Server {
    /// Binds `0.0.0.0:67` and starts the delay scheduler.
    ///
    /// # Errors
    /// `Error::Configuration` if the configuration is invalid.
    /// `Error::Bind` if the socket cannot be bound.
    pub fn new(configuration: Configuration) -> Result<Self, Error> {
        configuration.validate()?;
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DHCP_PORT_SERVER);
        let socket = DhcpFramed::bind(addr).map_err(Error::Bind)?;
        Self::with_socket(configuration, Arc::new(socket), Arc::new(SystemClock))
    }

    /// Creates a server over an already bound socket and a time source.
    ///
    /// # Errors
    /// `Error::Configuration` if the configuration is invalid.
    /// `Error::Io` if the scheduler thread cannot be spawned.
    pub fn with_socket(
        configuration: Configuration,
        socket: Arc<dyn Datagram>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, Error> {
        let allocator = Allocator::new(
            configuration.network,
            configuration.address_window_start,
            configuration.address_window_size,
        )?;
        let scheduler = Scheduler::new(clock.clone())?;
        let builder = MessageBuilder::new(&configuration);
        let observer: Observer = Arc::new(log_binding);
        info!(
            "DHCP server {} is serving {}/{}",
            configuration.server_identifier, configuration.network, configuration.subnet_mask,
        );

        Ok(Server {
            inner: Arc::new(Inner {
                configuration,
                builder,
                clock,
                scheduler,
                socket,
                transactions: Mutex::new(HashMap::new()),
                allocator: Mutex::new(allocator),
                observer: Mutex::new(observer),
                closed: AtomicBool::new(false),
            }),
        })
    }

    /// Replaces the callback told about every client which has chosen an address.
    ///
    /// The default one logs the binding.
    pub fn on_client_chosen<F>(&self, callback: F)
    where
        F: Fn(&Binding) + Send + Sync + 'static,
    {
        *self.inner.observer.lock() = Arc::new(callback);
    }

    /// Waits up to `timeout` for one datagram, dispatches it to its transaction
    /// and removes the transactions which are done.
    ///
    /// # Errors
    /// `Error::Closed` if the server is closed.
    /// `Error::Socket` on a socket error.
    pub fn update(&self, timeout: Duration) -> Result<Event, Error> {
        if self.inner.is_closed() {
            return Err(Error::Closed);
        }

        let mut buf = [0u8; BUFFER_READ_CAPACITY];
        let event = match self.inner.socket.recv_from(&mut buf, timeout) {
            Ok(Some((amount, source))) => self.inner.dispatch(&buf[..amount], source),
            Ok(None) => Ok(Event::Idle),
            Err(_) if self.inner.is_closed() => Err(Error::Closed),
            Err(error) => Err(Error::Socket(error)),
        };
        self.inner.sweep();
        event
    }

    /// The next address of the assignment window.
    pub fn get_ip_address(&self, client_id: &[u8]) -> Ipv4Addr {
        self.inner.get_ip_address(client_id)
    }

    /// Encodes the message and sends it to the limited broadcast address.
    ///
    /// # Errors
    /// `Error::Encode` if the message cannot be encoded.
    /// `Error::Socket` if it cannot be sent.
    pub fn broadcast(&self, message: &OutboundMessage) -> Result<(), Error> {
        self.inner.broadcast(message)
    }

    /// Updates until closed.
    pub fn run(&self) {
        while !self.inner.is_closed() {
            match self.update(POLL_TIMEOUT) {
                Ok(_) | Err(Error::Closed) => {}
                Err(error) => warn!("Server error: {}", error),
            }
        }
        debug!("The server loop has stopped");
    }

    /// Spawns `run` on its own thread.
    ///
    /// # Errors
    /// `io::Error` if the thread cannot be spawned.
    pub fn run_in_background(&self) -> io::Result<JoinHandle<()>> {
        let server = self.clone();
        thread::Builder::new()
            .name("dhcp-server".to_owned())
            .spawn(move || server.run())
    }

    /// Closes the socket, discards the pending replies and closes every transaction.
    ///
    /// Does nothing if already closed.
    pub fn close(&self) {
        self.inner.close();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    pub fn configuration(&self) -> &Configuration {
        &self.inner.configuration
    }

    /// The number of transactions not yet swept.
    pub fn transaction_count(&self) -> usize {
        self.inner.transactions.lock().len()
    }

    /// Whether the transaction is done. An unknown transaction counts as done.
    pub fn is_transaction_done(&self, transaction_id: u32) -> bool {
        !self.inner.is_active(transaction_id)
    }
}

impl Inner {
    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Whether the transaction exists and is neither closed nor expired.
    pub(crate) fn is_active(&self, transaction_id: u32) -> bool {
        if self.is_closed() {
            return false;
        }
        let now = self.clock.now();
        match self.transactions.lock().get(&transaction_id) {
            Some(transaction) => !transaction.is_done(now),
            None => false,
        }
    }

    /// Closes the transaction if it is active. Returns whether it was.
    pub(crate) fn finish(&self, transaction_id: u32) -> bool {
        if self.is_closed() {
            return false;
        }
        let now = self.clock.now();
        match self.transactions.lock().get_mut(&transaction_id) {
            Some(transaction) if !transaction.is_done(now) => {
                transaction.close();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn notify(&self, binding: Binding) {
        let observer = self.observer.lock().clone();
        observer(&binding);
    }

    pub(crate) fn get_ip_address(&self, client_id: &[u8]) -> Ipv4Addr {
        let address = self.allocator.lock().next();
        debug!("Assigned {} to client {:02x?}", address, client_id);
        address
    }

    pub(crate) fn broadcast(&self, message: &OutboundMessage) -> Result<(), Error> {
        let destination = SocketAddr::new(IpAddr::V4(Ipv4Addr::BROADCAST), DHCP_PORT_CLIENT);
        let bytes = message.to_bytes()?;
        log_send!(message, destination);
        self.socket
            .send_to(&bytes, destination)
            .map_err(Error::Socket)?;
        Ok(())
    }

    fn dispatch(self: &Arc<Self>, datagram: &[u8], source: SocketAddr) -> Result<Event, Error> {
        let message = match Message::from_bytes(datagram) {
            Ok(message) => message,
            Err(error) => {
                warn!("Unable to parse a packet from {}: {}", source, error);
                return Ok(Event::Malformed);
            }
        };
        log_receive!(message, source);

        let transaction_id = message.transaction_id;
        let received = {
            let now = self.clock.now();
            let deadline = now + self.configuration.transaction_lifetime;
            let mut transactions = self.transactions.lock();
            transactions
                .entry(transaction_id)
                .or_insert_with(|| Transaction::new(transaction_id, deadline))
                .receive(&message, self)?
        };

        match received {
            Received::Scheduled => Ok(Event::Handled(transaction_id)),
            Received::Informed(binding) => {
                self.notify(binding);
                Ok(Event::Handled(transaction_id))
            }
            Received::Unrecognized => {
                info!(
                    "Transaction {:#010x} does not handle the message from {}",
                    transaction_id, source
                );
                Ok(Event::Unhandled(transaction_id))
            }
            Received::Finished => {
                info!(
                    "Transaction {:#010x} is done, the message from {} is ignored",
                    transaction_id, source
                );
                Ok(Event::Unhandled(transaction_id))
            }
        }
    }

    /// Removes the transactions which are done.
    fn sweep(&self) {
        let now = self.clock.now();
        let mut transactions = self.transactions.lock();
        transactions.retain(|transaction_id, transaction| {
            let done = transaction.is_done(now);
            if done {
                transaction.close();
                debug!("Transaction {:#010x} is removed", transaction_id);
            }
            !done
        });
    }

    fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.socket.close();
        self.scheduler.close();
        for transaction in self.transactions.lock().values_mut() {
            transaction.close();
        }
        info!("The DHCP server is closed");
    }
}

fn log_binding(binding: &Binding) {
    info!("Client has chosen: {}", binding);
}
