// src/edgar/client.rs
use crate::dom::{self, Document};
use crate::utils::error::EdgarError;
use reqwest::header;

/// EDGAR rejects requests without a descriptive User-Agent ("Company contact@email").
pub const DEFAULT_USER_AGENT: &str =
    concat!("filing_section/", env!("CARGO_PKG_VERSION"), " admin@example.com");

/// Settings for fetching a filing document.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Creates a reqwest client configured for EDGAR interaction.
/// No timeout: the request blocks until the transport resolves or fails.
fn build_edgar_client(config: &FetchConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str()) // Set the required User-Agent
        .build()
}

/// Downloads a filing document from its URL.
pub async fn download_filing_doc(url: &str, config: &FetchConfig) -> Result<String, EdgarError> {
    let client = build_edgar_client(config)?; // Propagate client build error if any

    tracing::info!("Downloading document from: {}", url);
    tracing::debug!("Using User-Agent: {}", config.user_agent);

    let response = client.get(url)
        // SEC uses various content types, but often text/html for filings
        .header(header::ACCEPT, "text/html,application/xhtml+xml,text/plain,*/*")
        .send()
        .await?; // Propagates reqwest::Error as EdgarError::Network

    // Check if the request was successful (status code 2xx)
    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::FORBIDDEN {
            tracing::warn!("Received 403 Forbidden - check User-Agent and rate limits.");
            return Err(EdgarError::RateLimited);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(EdgarError::FilingDocNotFound(url.to_string()));
        }
        return Err(EdgarError::Http(status));
    }

    // Read the response body as text
    let body = response.text().await?;
    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

    Ok(body)
}

/// Downloads a filing and returns its cleaned document tree.
pub async fn fetch_clean_document(url: &str, config: &FetchConfig) -> Result<Document, EdgarError> {
    let body = download_filing_doc(url, config).await?;
    Ok(dom::clean_html(&body))
}
