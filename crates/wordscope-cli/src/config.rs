//! Service configuration for the CLI.
//!
//! The base URL comes from `--api-url`, which clap also fills from
//! `$WORDSCOPE_API_URL`; otherwise the local development service is used.

use wordscope_core::config::ApiConfig;

/// Builds the client configuration from the (optional) base URL override.
pub fn build_config(api_url: Option<&str>) -> ApiConfig {
    let config = ApiConfig::from_override(api_url);
    tracing::info!("Using analysis service at {}", config.base_url());
    config
}
