//! The `update` subcommand: push the current public addresses to every
//! configured record.

use std::net::IpAddr;

use anyhow::{Result, bail};
use tracing::{error, info};

use dyninwx_core::config::{RecordConfiguration, Settings};
use dyninwx_ip_http::{HttpIdentSource, IdentSource};
use dyninwx_provider_inwx::{InwxProvider, InwxProviderConfig};

const RC_NO_IPV4_ADDRESS: u8 = 1;
const RC_NO_IPV6_ADDRESS: u8 = 2;
const RC_UPDATE_IPV4_FAILED: u8 = 4;
const RC_UPDATE_IPV6_FAILED: u8 = 8;

pub async fn run(settings: &Settings) -> Result<u8> {
    let credentials = settings.credentials()?;
    let provider = InwxProvider::new(InwxProviderConfig::from_settings(settings), credentials)?;
    let ident = HttpIdentSource::from_settings(settings)?;

    let rc_ipv4 = update_ipv4_records(settings, &provider, &ident).await?;
    let rc_ipv6 = update_ipv6_records(settings, &provider, &ident).await?;

    Ok(rc_ipv4 | rc_ipv6)
}

async fn update_ipv4_records(
    settings: &Settings,
    provider: &InwxProvider,
    ident: &HttpIdentSource,
) -> Result<u8> {
    if settings.ipv4_records.is_empty() {
        info!("skipping IPv4 records update, no IPv4 records defined");
        return Ok(0);
    }
    if settings.ident_pool_ipv4.is_empty() {
        bail!("cannot update IPv4 records, no IPv4 resolvers configured");
    }

    let Some(address) = ident.first_ipv4(&settings.ident_pool_ipv4).await else {
        error!("no ident resolver answered with a public IPv4 address");
        return Ok(RC_NO_IPV4_ADDRESS);
    };
    info!("public IPv4 address: [{address}]");

    push_records(
        provider,
        &settings.ipv4_records,
        IpAddr::V4(address),
        RC_UPDATE_IPV4_FAILED,
    )
    .await
}

async fn update_ipv6_records(
    settings: &Settings,
    provider: &InwxProvider,
    ident: &HttpIdentSource,
) -> Result<u8> {
    if settings.ipv6_records.is_empty() {
        info!("skipping IPv6 records update, no IPv6 records defined");
        return Ok(0);
    }
    if settings.ident_pool_ipv6.is_empty() {
        bail!("cannot update IPv6 records, no IPv6 resolvers configured");
    }

    let Some(address) = ident.first_ipv6(&settings.ident_pool_ipv6).await else {
        error!("no ident resolver answered with a public IPv6 address");
        return Ok(RC_NO_IPV6_ADDRESS);
    };
    info!("public IPv6 address: [{address}]");

    push_records(
        provider,
        &settings.ipv6_records,
        IpAddr::V6(address),
        RC_UPDATE_IPV6_FAILED,
    )
    .await
}

/// Push one address to every record of a family. A failed or rejected
/// update marks the family's failure code but remaining records are still
/// attempted.
async fn push_records(
    provider: &InwxProvider,
    records: &[RecordConfiguration],
    address: IpAddr,
    failure_code: u8,
) -> Result<u8> {
    let mut rc = 0;

    for record in records {
        match provider
            .update_record(record.record_id, address, record.ttl)
            .await
        {
            Ok(envelope) if envelope.is_success() => {
                info!(
                    "updated record {} -> [{address}]: {}",
                    record.record_id, envelope.message
                );
            }
            Ok(envelope) => {
                error!(
                    "update of record {} was rejected: code {} ({})",
                    record.record_id, envelope.code, envelope.message
                );
                rc = failure_code;
            }
            Err(err) => {
                error!("update of record {} failed: {err}", record.record_id);
                rc = failure_code;
            }
        }
    }

    Ok(rc)
}
