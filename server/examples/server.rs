//! Runs the DHCP server on `0.0.0.0:67` until Ctrl-C.

use std::{error::Error, path::PathBuf};

use clap::Parser;
use log::{error, info};

use dhcp_server::{Configuration, Server};

#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Cli {
    /// JSON configuration file. The defaults are used without it.
    #[clap(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut configuration = match cli.config {
        Some(ref path) => Configuration::from_file(path)?,
        None => Configuration::default(),
    };
    if configuration.hostname.is_none() {
        configuration.hostname = hostname::get()
            .ok()
            .and_then(|hostname| hostname.into_string().ok());
    }

    let server = Server::new(configuration)?;
    let handle = server.run_in_background()?;
    info!("DHCP server is running, press Ctrl-C to stop");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    if let Err(error) = runtime.block_on(tokio::signal::ctrl_c()) {
        error!("Unable to listen for Ctrl-C: {}", error);
    }

    server.close();
    if handle.join().is_err() {
        error!("The server thread has panicked");
    }
    Ok(())
}
