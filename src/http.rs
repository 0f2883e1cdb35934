use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;

const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// Blocking HTTP GET. Non-2xx responses are errors.
pub trait HttpFetch {
    /// Fetches an HTML page as text
    fn get_text(&self, url: &str, timeout: Duration) -> Result<String, FetchError>;

    /// Fetches raw bytes, e.g. an image
    fn get_bytes(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError>;
}

impl<T: HttpFetch + ?Sized> HttpFetch for &T {
    fn get_text(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        (**self).get_text(url, timeout)
    }

    fn get_bytes(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        (**self).get_bytes(url, timeout)
    }
}

pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(user_agent: &str) -> Result<ReqwestFetcher, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()?;
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: Client) -> ReqwestFetcher {
        ReqwestFetcher { client }
    }

    fn get(&self, url: &str, timeout: Duration, accept: Option<&str>) -> Result<Response, FetchError> {
        let mut request = self.client.get(url).timeout(timeout);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
        }

        Ok(response)
    }
}

impl HttpFetch for ReqwestFetcher {
    fn get_text(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let response = self.get(url, timeout, Some(HTML_ACCEPT))?;
        Ok(response.text()?)
    }

    fn get_bytes(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        let response = self.get(url, timeout, None)?;
        Ok(response.bytes()?.to_vec())
    }
}
