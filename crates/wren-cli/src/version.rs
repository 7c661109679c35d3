use async_trait::async_trait;
use serde::Deserialize;
use wren_core::{Error, Result, VersionSource};

const REGISTRY_URL: &str = "https://crates.io/api/v1/crates/wren-core";

/// Latest published version according to the crates.io registry.
pub struct CratesIoSource {
    client: reqwest::Client,
}

impl CratesIoSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct RegistryResponse {
    #[serde(rename = "crate")]
    krate: RegistryCrate,
}

#[derive(Deserialize)]
struct RegistryCrate {
    max_version: String,
}

#[async_trait]
impl VersionSource for CratesIoSource {
    async fn latest(&self) -> Result<String> {
        let response = self
            .client
            .get(REGISTRY_URL)
            .header(
                reqwest::header::USER_AGENT,
                concat!("wren/", env!("CARGO_PKG_VERSION")),
            )
            .send()
            .await
            .map_err(|e| Error::VersionLookup(e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::VersionLookup(e.to_string()))?;

        let body: RegistryResponse = response
            .json()
            .await
            .map_err(|e| Error::VersionLookup(e.to_string()))?;

        Ok(body.krate.max_version)
    }
}
