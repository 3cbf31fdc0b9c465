//! Daemon configuration.
//!
//! Every setting can be given as a command-line flag or through the
//! environment variable named next to it. [`Cli`] is the raw parsed form;
//! [`DaemonConfig::from_cli`] validates it into the settings the daemon
//! runs with.

use crate::discovery::{
    domain::EvictionPolicy,
    services::{DEFAULT_PROBE_HOST, ScanSettings},
};
use crate::service::domain::ProtocolTag;
use clap::{ArgAction, Parser};
use reqwest::Url;
use std::num::NonZeroUsize;
use std::time::Duration;
use thiserror::Error;

/// Default seconds between discovery rounds.
pub const DEFAULT_INTERVAL_SECS: u64 = 10;

/// Default Consul agent address.
pub const DEFAULT_CONSUL_ADDR: &str = "localhost:8500";

/// Default Docker daemon address.
pub const DEFAULT_DOCKER_HOST: &str = "http://localhost:2375";

/// Command-line flags with environment fallbacks.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "portolan",
    version,
    about = "Discovers agent services in local containers and registers them with Consul"
)]
pub struct Cli {
    /// Seconds between discovery rounds.
    #[arg(
        long,
        env = "DISCOVERY_INTERVAL",
        default_value_t = DEFAULT_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval: u64,

    /// Consul agent address, with or without an `http://` scheme.
    #[arg(long, env = "CONSUL_HTTP_ADDR", default_value = DEFAULT_CONSUL_ADDR)]
    pub consul_addr: String,

    /// Docker daemon address (`tcp://` or `http://`).
    #[arg(long, env = "DOCKER_HOST", default_value = DEFAULT_DOCKER_HOST)]
    pub docker_host: String,

    /// Host on which published container ports are probed.
    #[arg(long, env = "PORTOLAN_PROBE_HOST", default_value = DEFAULT_PROBE_HOST)]
    pub probe_host: String,

    /// What happens to records of containers that disappear
    /// (`retain` or `evict-missing`).
    #[arg(long, env = "PORTOLAN_EVICTION", default_value = "retain")]
    pub eviction: EvictionPolicy,

    /// Whether stopped containers are listed too.
    #[arg(
        long,
        env = "PORTOLAN_INCLUDE_STOPPED",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub include_stopped: bool,

    /// Sniffers to run, in order.
    #[arg(
        long,
        env = "PORTOLAN_SNIFFERS",
        default_value = "ACP,MCP,AP,A2A",
        value_delimiter = ','
    )]
    pub sniffers: Vec<ProtocolTag>,

    /// Maximum number of containers probed at once.
    #[arg(long, env = "PORTOLAN_PROBE_CONCURRENCY", default_value = "1")]
    pub probe_concurrency: NonZeroUsize,

    /// Run a single round and exit.
    #[arg(long)]
    pub once: bool,
}

/// Configuration errors detected at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An address could not be parsed as a URL.
    #[error("invalid {setting} address '{value}': {reason}")]
    InvalidAddress {
        /// Setting the address came from.
        setting: &'static str,
        /// Raw value.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// An address uses a scheme no adapter can speak.
    #[error("unsupported scheme '{scheme}' for {setting}; use tcp:// or http://")]
    UnsupportedScheme {
        /// Setting the address came from.
        setting: &'static str,
        /// Offending scheme.
        scheme: String,
    },

    /// The sniffer list was empty.
    #[error("at least one sniffer must be enabled")]
    NoSniffers,
}

/// Validated daemon settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    /// Time between round starts.
    pub interval: Duration,
    /// Consul agent base URL.
    pub consul_url: Url,
    /// Docker daemon base URL.
    pub docker_url: Url,
    /// Whether stopped containers are listed.
    pub include_stopped: bool,
    /// Sniffer order.
    pub sniffers: Vec<ProtocolTag>,
    /// Discovery round settings.
    pub scan: ScanSettings,
    /// Run a single round and exit.
    pub once: bool,
}

impl DaemonConfig {
    /// Validates parsed flags.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an address is malformed or uses an
    /// unsupported scheme, or when no sniffer is enabled.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        if cli.sniffers.is_empty() {
            return Err(ConfigError::NoSniffers);
        }

        Ok(Self {
            interval: Duration::from_secs(cli.interval),
            consul_url: http_base_url("CONSUL_HTTP_ADDR", &cli.consul_addr)?,
            docker_url: http_base_url("DOCKER_HOST", &cli.docker_host)?,
            include_stopped: cli.include_stopped,
            sniffers: cli.sniffers,
            scan: ScanSettings {
                probe_host: cli.probe_host,
                eviction: cli.eviction,
                probe_concurrency: cli.probe_concurrency,
            },
            once: cli.once,
        })
    }
}

/// Normalizes a daemon address into an HTTP base URL.
///
/// Bare `host:port` values get an `http://` scheme and `tcp://` is spoken
/// as plain HTTP. Unix sockets are rejected.
///
/// # Errors
///
/// Returns [`ConfigError`] for unparsable addresses and unsupported schemes.
pub fn http_base_url(setting: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let candidate = match trimmed.split_once("://") {
        Some(("tcp", rest)) => format!("http://{rest}"),
        Some(("http" | "https", _)) => trimmed.to_owned(),
        Some((scheme, _)) => {
            return Err(ConfigError::UnsupportedScheme {
                setting,
                scheme: scheme.to_owned(),
            });
        }
        None => format!("http://{trimmed}"),
    };

    let url = Url::parse(&candidate).map_err(|err| ConfigError::InvalidAddress {
        setting,
        value: raw.to_owned(),
        reason: err.to_string(),
    })?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::InvalidAddress {
            setting,
            value: raw.to_owned(),
            reason: "missing host".to_owned(),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ADDRESSES: [&str; 4] = [
        "--consul-addr",
        "consul.internal:8500",
        "--docker-host",
        "tcp://docker.internal:2375",
    ];

    fn parse(extra: &[&str]) -> Result<Cli, clap::Error> {
        let args = ["portolan"]
            .into_iter()
            .chain(ADDRESSES)
            .chain(extra.iter().copied());
        Cli::try_parse_from(args)
    }

    #[rstest]
    fn explicit_flags_are_validated() {
        let cli = parse(&[
            "--interval",
            "30",
            "--eviction",
            "evict-missing",
            "--include-stopped",
            "false",
            "--sniffers",
            "mcp,acp",
            "--probe-concurrency",
            "4",
            "--probe-host",
            "host.docker.internal",
        ])
        .expect("flags parse");
        let config = DaemonConfig::from_cli(cli).expect("valid config");

        assert_eq!(config.interval, Duration::from_secs(30));
        assert_eq!(config.consul_url.as_str(), "http://consul.internal:8500/");
        assert_eq!(config.docker_url.as_str(), "http://docker.internal:2375/");
        assert!(!config.include_stopped);
        assert_eq!(config.sniffers, vec![ProtocolTag::Mcp, ProtocolTag::Acp]);
        assert_eq!(config.scan.eviction, EvictionPolicy::EvictMissing);
        assert_eq!(config.scan.probe_concurrency.get(), 4);
        assert_eq!(config.scan.probe_host, "host.docker.internal");
        assert!(!config.once);
    }

    #[rstest]
    #[case("0")]
    #[case("ten")]
    #[case("-5")]
    fn interval_must_be_a_positive_integer(#[case] interval: &str) {
        assert!(parse(&["--interval", interval]).is_err());
    }

    #[rstest]
    fn unknown_sniffer_is_rejected() {
        assert!(parse(&["--sniffers", "ACP,XYZ"]).is_err());
    }

    #[rstest]
    fn unknown_eviction_policy_is_rejected() {
        assert!(parse(&["--eviction", "sometimes"]).is_err());
    }

    #[rstest]
    #[case("localhost:8500", "http://localhost:8500/")]
    #[case("tcp://127.0.0.1:2375", "http://127.0.0.1:2375/")]
    #[case("https://consul.example:8501", "https://consul.example:8501/")]
    #[case("  http://docker:2375/ ", "http://docker:2375/")]
    fn addresses_normalize_to_http(#[case] raw: &str, #[case] expected: &str) {
        let url = http_base_url("TEST", raw).expect("valid address");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    fn unix_sockets_are_unsupported() {
        let err = http_base_url("DOCKER_HOST", "unix:///var/run/docker.sock")
            .expect_err("unix sockets rejected");
        assert_eq!(
            err,
            ConfigError::UnsupportedScheme {
                setting: "DOCKER_HOST",
                scheme: "unix".to_owned(),
            }
        );
    }

    #[rstest]
    #[case("")]
    #[case("http://")]
    fn addresses_need_a_host(#[case] raw: &str) {
        assert!(matches!(
            http_base_url("TEST", raw),
            Err(ConfigError::InvalidAddress { .. })
        ));
    }
}
