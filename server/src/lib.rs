//! The DHCP server protocol engine.
//!
//! Answers `DHCPDISCOVER` with a delayed `DHCPOFFER` and `DHCPREQUEST` with a delayed
//! `DHCPACK`, tracking every exchange as a transaction keyed by its transaction ID.

#[macro_use]
mod macros;

mod allocator;
mod binding;
mod builder;
mod clock;
mod config;
mod error;
mod scheduler;
mod server;
mod transaction;

pub use self::{
    allocator::Allocator,
    binding::Binding,
    builder::MessageBuilder,
    clock::{Clock, ManualClock, SystemClock},
    config::Configuration,
    error::Error,
    scheduler::Scheduler,
    server::{Event, Server, POLL_TIMEOUT},
};
