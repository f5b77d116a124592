//! AUR RPC v5 lookup.

use reqwest::Client;
use serde::Deserialize;

use crate::client::get_json;

/// Response envelope of the RPC `info` call.
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub resultcount: u32,
    #[serde(default)]
    pub results: Vec<AurPackage>,
}

/// One AUR package entry.
///
/// `version` carries the pkgrel suffix (`4.59-1`) and must be normalized
/// before use; `maintainer` is null for orphaned packages.
#[derive(Debug, Clone, Deserialize)]
pub struct AurPackage {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Maintainer", default)]
    pub maintainer: Option<String>,
    #[serde(rename = "Depends", default)]
    pub depends: Vec<String>,
    #[serde(rename = "Provides", default)]
    pub provides: Vec<String>,
}

/// Query the AUR for an exact package name.
pub async fn lookup(
    client: &Client,
    base_url: &str,
    name: &str,
) -> miette::Result<Option<AurPackage>> {
    let url = format!("{base_url}?arg%5B%5D={name}");
    let resp: RpcResponse = get_json(client, &url).await?;
    Ok(resp.results.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lookup_parses_a_hit() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/?arg%5B%5D=perl-marc-record")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "resultcount": 1,
                    "results": [{
                        "Name": "perl-marc-record",
                        "Version": "2.0.7-6",
                        "Maintainer": "jsmith",
                        "Depends": ["perl-marc-charset>=0.98", "perl"],
                        "Provides": []
                    }]
                }"#,
            )
            .create_async()
            .await;

        let client = Client::new();
        let pkg = lookup(&client, &server.url(), "perl-marc-record")
            .await
            .unwrap()
            .unwrap();

        mock.assert_async().await;
        assert_eq!(pkg.name, "perl-marc-record");
        assert_eq!(pkg.version, "2.0.7-6");
        assert_eq!(pkg.maintainer.as_deref(), Some("jsmith"));
        assert_eq!(pkg.depends.len(), 2);
    }

    #[tokio::test]
    async fn null_maintainer_means_orphan() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/?arg%5B%5D=perl-orphaned")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "resultcount": 1,
                    "results": [{
                        "Name": "perl-orphaned",
                        "Version": "0.1-1",
                        "Maintainer": null
                    }]
                }"#,
            )
            .create_async()
            .await;

        let client = Client::new();
        let pkg = lookup(&client, &server.url(), "perl-orphaned")
            .await
            .unwrap()
            .unwrap();
        assert!(pkg.maintainer.is_none());
        assert!(pkg.depends.is_empty());
        assert!(pkg.provides.is_empty());
    }

    #[tokio::test]
    async fn zero_results_mean_a_miss() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/?arg%5B%5D=perl-nope")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"resultcount": 0, "results": []}"#)
            .create_async()
            .await;

        let client = Client::new();
        let pkg = lookup(&client, &server.url(), "perl-nope").await.unwrap();
        assert!(pkg.is_none());
    }
}
