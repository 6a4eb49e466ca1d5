//! Sockdial - SOCKS5 client dialer
//!
//! Opens a tunnel through a SOCKS5 proxy and relays stdin/stdout over it.

use anyhow::{Context, Result};
use clap::Parser;
use sockdial::config::{load_config, Config, ProxyConfig};
use sockdial::helper::relay;
use sockdial::{Connector, TargetAddr};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Sockdial - connect to a host through an authenticated SOCKS5 proxy
#[derive(Parser, Debug)]
#[command(name = "sockdial")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Destination hostname, resolved by the proxy
    host: String,

    /// Destination port
    port: String,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Proxy IPv4 address
    #[arg(long)]
    proxy: Option<String>,

    /// Proxy port
    #[arg(long)]
    proxy_port: Option<u16>,

    /// SOCKS5 username
    #[arg(short, long)]
    username: Option<String>,

    /// SOCKS5 password
    #[arg(short, long)]
    password: Option<String>,

    /// Timeout for connecting to the proxy, in seconds
    #[arg(long)]
    connect_timeout: Option<u64>,

    /// Timeout for the SOCKS5 handshake, in seconds
    #[arg(long)]
    handshake_timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable JSON logging format
    #[arg(long)]
    json_log: bool,
}

impl Args {
    /// Command line values take precedence over the configuration file
    fn apply(&self, proxy: &mut ProxyConfig) {
        if let Some(addr) = &self.proxy {
            proxy.addr = addr.clone();
        }
        if let Some(port) = self.proxy_port {
            proxy.port = port;
        }
        if let Some(username) = &self.username {
            proxy.username = Some(username.clone());
        }
        if let Some(password) = &self.password {
            proxy.password = Some(password.clone());
        }
        if self.connect_timeout.is_some() {
            proxy.connect_timeout = self.connect_timeout;
        }
        if self.handshake_timeout.is_some() {
            proxy.handshake_timeout = self.handshake_timeout;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    setup_logging(&args.log_level, args.json_log)?;

    // Load configuration
    let mut config = match &args.config {
        Some(path) => {
            let config = load_config(path)?;
            info!("Configuration loaded from: {:?}", path);
            config
        }
        None => Config::default(),
    };
    args.apply(&mut config.proxy);
    config.proxy.validate()?;

    let target = TargetAddr::parse(args.host.as_bytes(), args.port.as_bytes())?;

    info!("Sockdial v{}", sockdial::VERSION);

    let connector = Connector::from_config(&config.proxy)?;
    let stream = connector
        .connect(&target)
        .await
        .with_context(|| format!("Failed to reach {} via {}", target, connector.endpoint()))?;

    relay(stream, tokio::io::stdin(), tokio::io::stdout())
        .await
        .with_context(|| "Relay failed")?;

    Ok(())
}

/// Setup logging based on configuration
///
/// Logs go to stderr; stdout carries tunnel data.
fn setup_logging(level: &str, json: bool) -> Result<()> {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    if json {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}
