//! A builder for common DHCP server messages.

use std::net::Ipv4Addr;

use dhcp_protocol::*;

use crate::config::Configuration;

/// Builds common server messages with some parameters.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    /// Sent to clients in the `server_ip_address` field and the server identifier option.
    server_identifier: Ipv4Addr,
    /// Sent to clients in the `hostname` option.
    hostname: Option<String>,
    /// Sent to clients in options.
    subnet_mask: Ipv4Addr,
    /// Sent to clients in options.
    routers: Vec<Ipv4Addr>,
    /// Sent to clients in options.
    domain_name_servers: Vec<Ipv4Addr>,
    /// Sent to clients in options.
    lease_time: u32,
}

impl MessageBuilder {
    /// Creates a builder with message parameters which will not be changed.
    pub fn new(configuration: &Configuration) -> Self {
        MessageBuilder {
            server_identifier: configuration.server_identifier,
            hostname: configuration.hostname.to_owned(),
            subnet_mask: configuration.subnet_mask,
            routers: configuration.routers.to_owned(),
            domain_name_servers: configuration.domain_name_servers.to_owned(),
            lease_time: configuration.lease_time,
        }
    }

    /// Creates a `DHCPOFFER` message from a `DHCPDISCOVER` message.
    pub fn dhcp_discover_to_offer(&self, discover: &Message, address: Ipv4Addr) -> OutboundMessage {
        let mut offer = self.reply(discover, MessageType::DhcpOffer);
        offer.your_ip_address = address;
        offer
    }

    /// Creates a `DHCPACK` message from a `DHCPREQUEST` message.
    ///
    /// The assigned address is the requested one, or `ciaddr` if the client is already configured.
    pub fn dhcp_request_to_ack(&self, request: &Message) -> OutboundMessage {
        let mut ack = self.reply(request, MessageType::DhcpAck);
        ack.client_ip_address = request.client_ip_address;
        ack.your_ip_address = match request.options.address_request() {
            Some(address) => *address,
            None => request.client_ip_address,
        };
        ack
    }

    fn reply(&self, request: &Message, message_type: MessageType) -> OutboundMessage {
        let mut reply = OutboundMessage::new();
        reply.hardware_address_length = request.hardware_address_length;
        reply.transaction_id = Some(request.transaction_id);
        reply.flags = request.flags;
        reply.server_ip_address = self.server_identifier;
        reply.gateway_ip_address = request.gateway_ip_address;
        reply.client_hardware_address = Some(request.client_hardware_address);
        if let Some(parameter_list) = request.options.parameter_list() {
            reply.parameter_request_list = parameter_list.to_owned();
        }

        reply.options.set_dhcp_message_type(message_type);
        reply.options.set_client_id(request.client_id());
        self.append_default_options(&mut reply.options);
        reply
    }

    fn append_default_options(&self, options: &mut Options) {
        options.set_subnet_mask(self.subnet_mask);
        if !self.routers.is_empty() {
            options.set_routers(self.routers.to_owned());
        }
        options.set_address_time(self.lease_time);
        options.set_dhcp_server_id(self.server_identifier);
        if !self.domain_name_servers.is_empty() {
            options.set_domain_name_servers(self.domain_name_servers.to_owned());
        }
        if let Some(ref hostname) = self.hostname {
            options.set_hostname(hostname.to_owned());
        }
    }
}
