//! Shared HTTP client construction and JSON fetching.

use std::time::Duration;

use perldeps_util::errors::PerldepsError;
use reqwest::Client;
use serde::de::DeserializeOwned;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the shared reqwest client for package lookups.
///
/// Both services ask bots to identify themselves, so the User-Agent names
/// this tool explicitly.
pub fn build_client() -> miette::Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("koha-perldeps/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| {
            PerldepsError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            }
            .into()
        })
}

/// GET a URL and deserialize the JSON response body.
///
/// Any transport failure or non-success status is fatal: the tool cannot
/// make progress without its lookup services.
pub(crate) async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> miette::Result<T> {
    tracing::debug!("GET {url}");
    let resp = client.get(url).send().await.map_err(|e| PerldepsError::Network {
        message: format!("Request to {url} failed: {e}"),
    })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(PerldepsError::Network {
            message: format!("HTTP {status} fetching {url}"),
        }
        .into());
    }

    resp.json::<T>().await.map_err(|e| {
        PerldepsError::Network {
            message: format!("Invalid response from {url}: {e}"),
        }
        .into()
    })
}
