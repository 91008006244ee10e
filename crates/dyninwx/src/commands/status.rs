//! The `status` subcommand: show the projected settings.

use anyhow::Result;
use tracing::info;

use dyninwx_core::config::Settings;

pub fn run(settings: &Settings) -> Result<u8> {
    info!("{settings}");
    Ok(0)
}
