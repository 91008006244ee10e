//! Settings file resolution and first-run bootstrap.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::info;

const SETTINGS_FILE_NAME: &str = "application.properties";

const SAMPLE_SETTINGS: &str = "\
# dyninwx settings
#
# API credentials
#jdynsinwx.inwx.username=username
#jdynsinwx.inwx.password=password
#jdynsinwx.inwx.api.endpoint=https://api.domrobot.com/xmlrpc

# Records to keep in sync (one block per record id)
#jdynsinwx.inwx.record.ipv4[1].id=12345678
#jdynsinwx.inwx.record.ipv4[1].ttl=300
#jdynsinwx.inwx.record.ipv6[1].id=12345679

# Ident endpoints answering with the caller's public address, per family
jdynsinwx.ident.pool.ipv4[1]=https://ipv4.ident.me/
jdynsinwx.ident.pool.ipv6[1]=https://ipv6.ident.me/

# Request timeout in milliseconds
#jdynsinwx.ident.connection.request.timeout=1500
";

/// Resolve the default settings file, writing a commented sample on first
/// use so there is always a file to edit.
pub fn default_settings_file() -> Result<PathBuf> {
    let file = config_home()?;

    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create [{}]", parent.display()))?;
    }

    if !file.exists() {
        info!("writing sample settings to [{}]", file.display());
        fs::write(&file, SAMPLE_SETTINGS)
            .with_context(|| format!("cannot write [{}]", file.display()))?;
    }

    Ok(file)
}

fn config_home() -> Result<PathBuf> {
    if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME")
        && !xdg_config_home.is_empty()
    {
        return Ok(PathBuf::from(xdg_config_home)
            .join("dyninwx")
            .join(SETTINGS_FILE_NAME));
    }

    if let Ok(home) = env::var("HOME")
        && !home.is_empty()
    {
        return Ok(PathBuf::from(home)
            .join(".config")
            .join("dyninwx")
            .join(SETTINGS_FILE_NAME));
    }

    bail!("cannot determine a configuration directory; set XDG_CONFIG_HOME or HOME")
}
