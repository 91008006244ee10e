//! The `list` subcommand: show all known nameserver records.

use anyhow::Result;
use tracing::{error, info};

use dyninwx_core::config::Settings;
use dyninwx_provider_inwx::{InwxProvider, InwxProviderConfig};

pub async fn run(settings: &Settings, domain: &str, json: bool) -> Result<u8> {
    let credentials = settings.credentials()?;
    let provider = InwxProvider::new(InwxProviderConfig::from_settings(settings), credentials)?;

    let (envelope, records) = provider.list_records(domain).await?;
    if !envelope.is_success() {
        error!(
            "listing records for [{domain}] was rejected: code {} ({})",
            envelope.code, envelope.message
        );
        return Ok(1);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(0);
    }

    for record in &records {
        info!(
            "{} :: {} :: {} :: {} :: {} :: {}",
            record.id,
            record.record_type,
            record.name,
            record.content,
            record.ttl_seconds,
            record.prio
        );
    }

    Ok(0)
}
