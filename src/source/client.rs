// src/source/client.rs
use crate::utils::error::FetchError;
use reqwest::header;
use std::time::Duration;

pub const DEFAULT_SOURCE_URL: &str = "https://www.redhidrosurmedioambiente.es/saih/resumen/embalses";

const SCRAPER_USER_AGENT: &str = concat!("embalses_scraper/", env!("CARGO_PKG_VERSION"));

/// Creates a reqwest client for the status page.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(SCRAPER_USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Downloads the page at `url` and returns its body as text.
pub async fn download_page(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    tracing::info!("Downloading page from: {}", url);

    let response = client
        .get(url)
        .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
        .send()
        .await?; // Propagates reqwest::Error as FetchError::Network

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }
        return Err(FetchError::Http(status));
    }

    let body = response.text().await?;
    tracing::debug!("Downloaded {} bytes from {}", body.len(), url);

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds() {
        assert!(build_client(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_user_agent_names_crate() {
        assert!(SCRAPER_USER_AGENT.starts_with("embalses_scraper/"));
    }

    #[test]
    fn test_unreachable_host_is_network_error() {
        // Reserve a free local port, then release it so nothing is listening there
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = format!("http://127.0.0.1:{}/embalses", port);

        let client = build_client(Duration::from_secs(2)).unwrap();
        let result = tokio_test::block_on(download_page(&client, &url));
        assert!(matches!(result, Err(FetchError::Network(_))));
    }
}
