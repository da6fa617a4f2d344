//! The per-exchange state machine.

use std::{
    sync::{Arc, Weak},
    time::Instant,
};

use log::{debug, info, warn};

use dhcp_protocol::{Message, MessageType, OperationCode};

use crate::{binding::Binding, error::Error, server::Inner};

/// What a transaction has done with a message.
#[derive(Debug)]
pub(crate) enum Received {
    /// A reply has been scheduled.
    Scheduled,
    /// The transaction is done and the observer must be told.
    Informed(Binding),
    /// The message is not a client message the server answers.
    Unrecognized,
    /// The transaction had been done before the message arrived.
    Finished,
}

/// One DHCP exchange, keyed by the client's transaction ID.
///
/// Is active until closed or until its deadline passes.
#[derive(Debug)]
pub(crate) struct Transaction {
    transaction_id: u32,
    deadline: Instant,
    closed: bool,
}

impl Transaction {
    pub fn new(transaction_id: u32, deadline: Instant) -> Self {
        Transaction {
            transaction_id,
            deadline,
            closed: false,
        }
    }

    pub fn is_done(&self, now: Instant) -> bool {
        self.closed || now >= self.deadline
    }

    pub fn close(&mut self) {
        if !self.closed {
            debug!("Transaction {:#010x} is closed", self.transaction_id);
        }
        self.closed = true;
    }

    /// Reacts to a client message.
    ///
    /// `DHCPDISCOVER` and `DHCPREQUEST` schedule their replies, `DHCPINFORM` finishes the transaction.
    ///
    /// # Errors
    /// `Error::SchedulerClosed` if the server is being closed.
    pub fn receive(&mut self, message: &Message, server: &Arc<Inner>) -> Result<Received, Error> {
        if self.is_done(server.clock.now()) {
            return Ok(Received::Finished);
        }
        if message.operation_code != OperationCode::BootRequest {
            return Ok(Received::Unrecognized);
        }

        match message.options.dhcp_message_type() {
            Some(MessageType::DhcpDiscover) => {
                let handler = Handler::new(server, message);
                server
                    .scheduler
                    .schedule(server.configuration.offer_delay, move || handler.offer())?;
                Ok(Received::Scheduled)
            }
            Some(MessageType::DhcpRequest) => {
                let handler = Handler::new(server, message);
                server
                    .scheduler
                    .schedule(server.configuration.acknowledge_delay, move || handler.acknowledge())?;
                Ok(Received::Scheduled)
            }
            Some(MessageType::DhcpInform) => {
                self.close();
                Ok(Received::Informed(Binding::new(message, MessageType::DhcpInform)))
            }
            _ => Ok(Received::Unrecognized),
        }
    }
}

/// A delayed reply.
///
/// Holds the server weakly, so pending replies do not keep a dropped server alive.
struct Handler {
    server: Weak<Inner>,
    message: Message,
}

impl Handler {
    fn new(server: &Arc<Inner>, message: &Message) -> Self {
        Handler {
            server: Arc::downgrade(server),
            message: message.to_owned(),
        }
    }

    /// Broadcasts a `DHCPOFFER` if the transaction is still active.
    fn offer(self) {
        let server = match self.server.upgrade() {
            Some(server) => server,
            None => return,
        };
        let discover = &self.message;
        if !server.is_active(discover.transaction_id) {
            debug!(
                "Transaction {:#010x} is done, the offer is dropped",
                discover.transaction_id
            );
            return;
        }

        let address = server.get_ip_address(&discover.client_id());
        let offer = server.builder.dhcp_discover_to_offer(discover, address);
        if let Err(error) = server.broadcast(&offer) {
            warn!("Unable to send the offer: {}", error);
        }
    }

    /// Finishes the transaction, tells the observer and acknowledges if this server has been chosen.
    fn acknowledge(self) {
        let server = match self.server.upgrade() {
            Some(server) => server,
            None => return,
        };
        let request = &self.message;
        if !server.finish(request.transaction_id) {
            debug!(
                "Transaction {:#010x} is done, the request is dropped",
                request.transaction_id
            );
            return;
        }
        server.notify(Binding::new(request, MessageType::DhcpRequest));

        match request.options.dhcp_server_id() {
            Some(server_id) if *server_id == server.configuration.server_identifier => {
                let ack = server.builder.dhcp_request_to_ack(request);
                if let Err(error) = server.broadcast(&ack) {
                    warn!("Unable to send the acknowledgement: {}", error);
                }
            }
            Some(server_id) => info!(
                "Transaction {:#010x} has chosen server {}",
                request.transaction_id, server_id
            ),
            None => info!(
                "Transaction {:#010x} has not named a server",
                request.transaction_id
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn is_done_after_the_deadline() {
        let now = Instant::now();
        let transaction = Transaction::new(1, now + Duration::from_secs(20));
        assert!(!transaction.is_done(now));
        assert!(!transaction.is_done(now + Duration::from_secs(19)));
        assert!(transaction.is_done(now + Duration::from_secs(20)));
    }

    #[test]
    fn is_done_once_closed() {
        let now = Instant::now();
        let mut transaction = Transaction::new(1, now + Duration::from_secs(20));
        transaction.close();
        assert!(transaction.is_done(now));
        transaction.close();
        assert!(transaction.is_done(now));
    }
}
