//! The server configuration.

use std::{fs, net::Ipv4Addr, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{allocator, error::Error};

/// Everything the server sends to clients and the timing of the exchange.
///
/// Every field has a default, so a configuration file may name only what it changes.
/// Delays are written as fractional seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Between a `DHCPDISCOVER` and the `DHCPOFFER`.
    #[serde(with = "seconds")]
    pub offer_delay: Duration,
    /// Between a `DHCPREQUEST` and the `DHCPACK`.
    #[serde(with = "seconds")]
    pub acknowledge_delay: Duration,
    /// How long a transaction accepts messages after its first one.
    #[serde(with = "seconds")]
    pub transaction_lifetime: Duration,

    /// Sent in the `siaddr` field and the server identifier option.
    pub server_identifier: Ipv4Addr,
    /// Its final octet is replaced by the assigned one.
    pub network: Ipv4Addr,
    pub subnet_mask: Ipv4Addr,
    pub routers: Vec<Ipv4Addr>,
    /// In seconds.
    pub lease_time: u32,
    pub domain_name_servers: Vec<Ipv4Addr>,
    pub hostname: Option<String>,

    /// The first final octet of the assignment window.
    pub address_window_start: u8,
    /// The number of final octets in the assignment window.
    pub address_window_size: u8,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            offer_delay: Duration::from_secs(1),
            acknowledge_delay: Duration::from_secs(0),
            transaction_lifetime: Duration::from_secs(20),

            server_identifier: Ipv4Addr::UNSPECIFIED,
            network: Ipv4Addr::new(192, 168, 0, 0),
            subnet_mask: Ipv4Addr::new(255, 255, 255, 0),
            routers: Vec::new(),
            lease_time: 86400,
            domain_name_servers: Vec::new(),
            hostname: None,

            address_window_start: 5,
            address_window_size: 200,
        }
    }
}

impl Configuration {
    /// Loads and validates a JSON configuration file.
    ///
    /// # Errors
    /// `Error::Io` if the file cannot be read.
    /// `Error::Json` if it is not a valid configuration.
    /// `Error::Configuration` if `validate` fails.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let data = fs::read(path)?;
        let configuration: Self = serde_json::from_slice(&data)?;
        configuration.validate()?;
        Ok(configuration)
    }

    /// Writes the configuration as pretty-printed JSON.
    ///
    /// # Errors
    /// `Error::Io` if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let data = serde_json::to_vec_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    /// # Errors
    /// `Error::Configuration` if the address window is empty or leaves the host octet range.
    pub fn validate(&self) -> Result<(), Error> {
        allocator::check_window(self.address_window_start, self.address_window_size)
    }
}

/// `Duration` as fractional seconds.
mod seconds {
    use std::time::Duration;

    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_object_gives_the_defaults() {
        let file = write("{}");
        let configuration = Configuration::from_file(file.path()).unwrap();
        assert_eq!(configuration, Configuration::default());
        assert_eq!(configuration.offer_delay, Duration::from_secs(1));
        assert_eq!(configuration.transaction_lifetime, Duration::from_secs(20));
        assert_eq!(configuration.lease_time, 86400);
    }

    #[test]
    fn reads_fractional_delays_and_addresses() {
        let file = write(
            r#"{
                "offer_delay": 0.25,
                "acknowledge_delay": 2,
                "server_identifier": "192.168.0.1",
                "routers": ["192.168.0.1"],
                "domain_name_servers": ["8.8.8.8", "8.8.4.4"],
                "hostname": "gateway"
            }"#,
        );
        let configuration = Configuration::from_file(file.path()).unwrap();
        assert_eq!(configuration.offer_delay, Duration::from_millis(250));
        assert_eq!(configuration.acknowledge_delay, Duration::from_secs(2));
        assert_eq!(configuration.server_identifier, Ipv4Addr::new(192, 168, 0, 1));
        assert_eq!(configuration.routers, vec![Ipv4Addr::new(192, 168, 0, 1)]);
        assert_eq!(configuration.domain_name_servers.len(), 2);
        assert_eq!(configuration.hostname, Some("gateway".to_owned()));
    }

    #[test]
    fn saved_configuration_loads_back() {
        let file = NamedTempFile::new().unwrap();
        let mut configuration = Configuration::default();
        configuration.offer_delay = Duration::from_millis(1500);
        configuration.address_window_start = 100;
        configuration.address_window_size = 50;
        configuration.save(file.path()).unwrap();

        assert_eq!(Configuration::from_file(file.path()).unwrap(), configuration);
    }

    #[test]
    fn rejects_negative_delay() {
        let file = write(r#"{ "offer_delay": -1 }"#);
        match Configuration::from_file(file.path()) {
            Err(Error::Json(_)) => {}
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn rejects_window_outside_host_range() {
        let file = write(r#"{ "address_window_start": 250, "address_window_size": 10 }"#);
        match Configuration::from_file(file.path()) {
            Err(Error::Configuration(_)) => {}
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn reports_missing_file() {
        match Configuration::from_file("/nonexistent/dhcp-server.json") {
            Err(Error::Io(_)) => {}
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
