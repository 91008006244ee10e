//! The `ip` subcommand: resolve and show the public addresses.

use anyhow::Result;
use tracing::{error, info};

use dyninwx_core::config::Settings;
use dyninwx_ip_http::{HttpIdentSource, IdentSource};

pub async fn run(settings: &Settings, all: bool, no_ipv4: bool, no_ipv6: bool) -> Result<u8> {
    let ident = HttpIdentSource::from_settings(settings)?;

    if !no_ipv4 {
        show_ipv4(settings, &ident, all).await;
    }
    if !no_ipv6 {
        show_ipv6(settings, &ident, all).await;
    }

    Ok(0)
}

async fn show_ipv4(settings: &Settings, ident: &HttpIdentSource, all: bool) {
    if all {
        for (resolver, outcome) in ident.all_ipv4(&settings.ident_pool_ipv4).await {
            match outcome {
                Ok(address) => {
                    info!("[{:<40}] => [{:>45}]", resolver.as_str(), address.to_string());
                }
                Err(err) => error!("[{:<40}] => fail: {err}", resolver.as_str()),
            }
        }
        return;
    }

    match ident.first_ipv4(&settings.ident_pool_ipv4).await {
        Some(address) => info!("public IPv4 address: [{address}]"),
        None => error!("no ident resolver answered with a public IPv4 address"),
    }
}

async fn show_ipv6(settings: &Settings, ident: &HttpIdentSource, all: bool) {
    if all {
        for (resolver, outcome) in ident.all_ipv6(&settings.ident_pool_ipv6).await {
            match outcome {
                Ok(address) => {
                    info!("[{:<40}] => [{:>45}]", resolver.as_str(), address.to_string());
                }
                Err(err) => error!("[{:<40}] => fail: {err}", resolver.as_str()),
            }
        }
        return;
    }

    match ident.first_ipv6(&settings.ident_pool_ipv6).await {
        Some(address) => info!("public IPv6 address: [{address}]"),
        None => error!("no ident resolver answered with a public IPv6 address"),
    }
}
