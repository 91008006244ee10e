//! # dyninwx-ip-http
//!
//! Resolves the host's public IP addresses through "ident" HTTP endpoints:
//! services that answer a plain-text GET with the caller's address as seen
//! from the outside.
//!
//! Address families never mix: the IPv4 pool must list endpoints reachable
//! over IPv4 (answering with an IPv4 address) and likewise for IPv6, and
//! the lookups parse the answer strictly as the requested family.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use url::Url;

use dyninwx_core::config::Settings;
use dyninwx_core::error::{Error, Result};

/// A service that can answer "what is my public address?" per family.
///
/// `first_ipv4`/`first_ipv6` implement the pick-first pool strategy:
/// endpoints are tried in configured order, failures are logged and
/// skipped, and the first answer wins.
#[async_trait]
pub trait IdentSource: Send + Sync {
    /// Resolve the public IPv4 address through one ident endpoint.
    async fn ipv4(&self, resolver: &Url) -> Result<Ipv4Addr>;

    /// Resolve the public IPv6 address through one ident endpoint.
    async fn ipv6(&self, resolver: &Url) -> Result<Ipv6Addr>;

    /// First successful IPv4 answer from the pool, in pool order.
    async fn first_ipv4(&self, pool: &[Url]) -> Option<Ipv4Addr> {
        for resolver in pool {
            match self.ipv4(resolver).await {
                Ok(address) => return Some(address),
                Err(error) => {
                    tracing::warn!(resolver = %resolver, %error, "IPv4 ident lookup failed");
                }
            }
        }
        None
    }

    /// First successful IPv6 answer from the pool, in pool order.
    async fn first_ipv6(&self, pool: &[Url]) -> Option<Ipv6Addr> {
        for resolver in pool {
            match self.ipv6(resolver).await {
                Ok(address) => return Some(address),
                Err(error) => {
                    tracing::warn!(resolver = %resolver, %error, "IPv6 ident lookup failed");
                }
            }
        }
        None
    }
}

/// Ident source backed by plain HTTP GET requests
pub struct HttpIdentSource {
    client: reqwest::Client,
}

impl HttpIdentSource {
    /// Create a source with explicit timeouts.
    pub fn new(connect_timeout: Duration, request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| Error::http(format!("cannot build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Create a source with the timeouts from projected settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(settings.connect_timeout, settings.request_timeout)
    }

    /// Resolve every endpoint of an IPv4 pool (show-all strategy).
    pub async fn all_ipv4(&self, pool: &[Url]) -> Vec<(Url, Result<Ipv4Addr>)> {
        let mut results = Vec::with_capacity(pool.len());
        for resolver in pool {
            results.push((resolver.clone(), self.ipv4(resolver).await));
        }
        results
    }

    /// Resolve every endpoint of an IPv6 pool (show-all strategy).
    pub async fn all_ipv6(&self, pool: &[Url]) -> Vec<(Url, Result<Ipv6Addr>)> {
        let mut results = Vec::with_capacity(pool.len());
        for resolver in pool {
            results.push((resolver.clone(), self.ipv6(resolver).await));
        }
        results
    }

    async fn fetch(&self, resolver: &Url) -> Result<String> {
        let response = self
            .client
            .get(resolver.clone())
            .header(ACCEPT, "text/plain")
            .send()
            .await
            .map_err(|e| Error::http(format!("request to [{resolver}] failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http(format!(
                "ident service [{resolver}] answered with status {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::http(format!("cannot read ident response body: {e}")))?;

        let body = body.trim().to_string();
        if body.is_empty() {
            return Err(Error::EmptyIdentResponse {
                url: resolver.to_string(),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl IdentSource for HttpIdentSource {
    async fn ipv4(&self, resolver: &Url) -> Result<Ipv4Addr> {
        let body = self.fetch(resolver).await?;
        body.parse().map_err(|_| Error::InvalidAddress {
            family: "IPv4",
            value: body,
        })
    }

    async fn ipv6(&self, resolver: &Url) -> Result<Ipv6Addr> {
        let body = self.fetch(resolver).await?;
        body.parse().map_err(|_| Error::InvalidAddress {
            family: "IPv6",
            value: body,
        })
    }
}
