//! Strategy chain construction.

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::fetch::{
    DirectStrategy, HeaderProfile, Orchestrator, ProxyStrategy, RelayStrategy, TransportStrategy,
};

use super::client::init_client;

/// Builds the strategy chain described by `config`.
///
/// Order, fastest and most direct first:
/// 1. `direct` - browser headers
/// 2. `proxy` - only when upstream proxies are configured
/// 3. `cors-proxy`, `cors-proxy-2`, ... - one per configured relay
/// 4. `simple` - minimal headers
///
/// # Errors
///
/// Returns an `InitializationError` if an HTTP client cannot be built or a
/// proxy URL is invalid.
pub fn init_strategies(
    config: &Config,
) -> Result<Vec<Box<dyn TransportStrategy>>, InitializationError> {
    let client = init_client()?;
    let mut strategies: Vec<Box<dyn TransportStrategy>> = Vec::new();

    strategies.push(Box::new(DirectStrategy::new(
        "direct",
        client.clone(),
        HeaderProfile::Browser,
        config.direct_timeout(),
    )));

    if !config.proxies.is_empty() {
        strategies.push(Box::new(ProxyStrategy::new(
            "proxy",
            &config.proxies,
            config.proxy_timeout(),
        )?));
    }

    for (index, relay) in config.relays.iter().enumerate() {
        let name = if index == 0 {
            "cors-proxy".to_string()
        } else {
            format!("cors-proxy-{}", index + 1)
        };
        strategies.push(Box::new(RelayStrategy::new(
            name,
            client.clone(),
            relay.clone(),
            config.relay_timeout(),
        )));
    }

    strategies.push(Box::new(DirectStrategy::new(
        "simple",
        client,
        HeaderProfile::Minimal,
        config.simple_timeout(),
    )));

    Ok(strategies)
}

/// Builds the orchestrator for `config`.
///
/// # Errors
///
/// See [`init_strategies`].
pub fn init_orchestrator(config: &Config) -> Result<Orchestrator, InitializationError> {
    let strategies = init_strategies(config)?;
    log::info!(
        "Transport chain: {}",
        strategies
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(" -> ")
    );
    Orchestrator::new(strategies, config.attempt_delay(), config.overall_timeout())
}
