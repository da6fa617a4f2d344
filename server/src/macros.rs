//! Logging helpers used in the server event loop and the delayed handlers.

/// Logs an inbound message.
macro_rules! log_receive(
    ($message:expr, $source:expr) => (
        match $message.options.dhcp_message_type() {
            Some(message_type) => log::info!("Received {} from {}", message_type, $source.ip()),
            None => log::info!("Received a BOOTP message from {}", $source.ip()),
        }
        log::debug!("{}", $message);
    );
);

/// Logs an outbound message.
macro_rules! log_send(
    ($message:expr, $destination:expr) => (
        match $message.options.dhcp_message_type() {
            Some(message_type) => log::info!("Sending {} to {}", message_type, $destination),
            None => log::info!("Sending a BOOTP message to {}", $destination),
        }
        log::debug!("{}", $message);
    );
);
