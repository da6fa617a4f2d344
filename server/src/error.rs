//! The DHCP server error.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to bind the server socket: {0}")]
    Bind(#[source] io::Error),
    #[error("Socket error: {0}")]
    Socket(#[source] io::Error),
    #[error("Unable to encode a message: {0}")]
    Encode(#[from] dhcp_protocol::Error),
    #[error("The delay scheduler is closed")]
    SchedulerClosed,
    #[error("The server is closed")]
    Closed,
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),
}
