use std::time::Duration;

use adapters::stacks::ClientConfig;
use corelib::BtcNetwork;

use crate::cli::Cli;

pub const DEFAULT_API_URL: &str = "https://api.hiro.so";
pub const DEFAULT_SWAP_DEPLOYER: &str = "SP2CY5V39NHDPWSXMW9QDT3HC3GD6Q7RDAFCABJSE";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Stacks node / API base url.
    pub api_url: String,

    /// Host serving `/v1/addresses/stacks/{address}` name lookups.
    pub bns_url: String,

    /// Address the swap contracts are deployed under.
    pub swap_deployer: String,

    /// Network used to render `btc-receiver` scripts.
    pub network: BtcNetwork,

    pub http_timeout: Duration,

    /// JSON logs; on by default when `APP_ENV=production`.
    pub json_logs: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = var("STACKS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            bns_url: var("BNS_LOOKUP_URL").unwrap_or_else(|| api_url.clone()),
            api_url,
            swap_deployer: var("SWAP_DEPLOYER")
                .unwrap_or_else(|| DEFAULT_SWAP_DEPLOYER.to_string()),
            network: var("STACKS_NETWORK")
                .as_deref()
                .map(parse_network)
                .unwrap_or_default(),
            http_timeout: Duration::from_secs(
                var("HTTP_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            json_logs: var("APP_ENV").is_some_and(|e| e == "production"),
        }
    }

    /// Flags win over the environment.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.api_url {
            self.api_url = url.clone();
        }
        if let Some(url) = &cli.bns_url {
            self.bns_url = url.clone();
        }
        if let Some(deployer) = &cli.deployer {
            self.swap_deployer = deployer.clone();
        }
        if let Some(network) = cli.network {
            self.network = network.into();
        }
        self.json_logs |= cli.json_logs;
        self
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_url: self.api_url.clone(),
            bns_url: self.bns_url.clone(),
            swap_deployer: self.swap_deployer.clone(),
            timeout: self.http_timeout,
        }
    }
}

/// Anything but `testnet` is mainnet.
fn parse_network(s: &str) -> BtcNetwork {
    if s.eq_ignore_ascii_case("testnet") {
        BtcNetwork::Testnet
    } else {
        BtcNetwork::Mainnet
    }
}
