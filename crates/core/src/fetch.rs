use crate::error::AnalyzerError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Download seam for report bytes, faked in tests the same way the
/// summarizer fakes its LLM client.
#[async_trait]
pub trait ReportFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AnalyzerError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Some report hosts refuse requests without a browser-like
    /// User-Agent, hence the fixed header and the hard 30s timeout.
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self, AnalyzerError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ReportFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AnalyzerError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(AnalyzerError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
