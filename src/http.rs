//! Shared reqwest client construction for page fetches and downloads.
//!
//! Both clients use the same policy: connect/read timeouts, gzip, the project
//! User-Agent and default redirect/TLS handling.

use std::panic::{AssertUnwindSafe, catch_unwind};

use reqwest::{Client, ClientBuilder, Proxy};
use tracing::warn;

use crate::config::HttpTimeouts;
use crate::user_agent;

/// Builds the HTTP client.
///
/// Some sandboxed macOS environments panic while reading the system proxy
/// configuration. In that case the client is rebuilt with system proxy lookup
/// disabled and only the `*_PROXY` environment variables applied.
///
/// # Errors
///
/// Returns the reqwest builder error if the client cannot be constructed.
pub(crate) fn build_client(timeouts: HttpTimeouts) -> Result<Client, reqwest::Error> {
    match catch_unwind(AssertUnwindSafe(|| base_builder(timeouts).build())) {
        Ok(result) => result,
        Err(_) => {
            warn!("HTTP client builder panicked while loading system proxy settings; retrying with env-proxy fallback");
            apply_env_proxy_fallback(base_builder(timeouts).no_proxy()).build()
        }
    }
}

fn base_builder(timeouts: HttpTimeouts) -> ClientBuilder {
    Client::builder()
        .connect_timeout(timeouts.connect)
        .timeout(timeouts.read)
        .gzip(true)
        .user_agent(user_agent::default_user_agent())
}

fn apply_env_proxy_fallback(mut builder: ClientBuilder) -> ClientBuilder {
    if let Some(proxy) = first_env_var(&["HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"])
        && let Ok(resolved) = Proxy::https(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    if let Some(proxy) = first_env_var(&["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"])
        && let Ok(resolved) = Proxy::http(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    builder
}

fn first_env_var(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
