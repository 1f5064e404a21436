use std::time::Duration;

use crate::parser::{self, ParseError};
use crate::types::ExtractedRecord;

use reqwest::Client;

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
}

#[derive(Debug, Clone)]
pub struct WebScraper {
    client: Client,
    base_url: String,
}

impl WebScraper {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            base_url: crate::BASE_URL.to_string(),
        })
    }

    /// Looks a subject up via the search endpoint and extracts its record.
    ///
    /// An exact title match redirects straight to the article. Anything else
    /// lands on a search or disambiguation page without an infobox, which
    /// fails extraction for this subject; resolution is not attempted.
    pub async fn fetch_subject(&self, subject: &str) -> Result<ExtractedRecord, ScraperError> {
        let url = format!("{}/w/index.php", self.base_url);
        let html = self
            .client
            .get(&url)
            .query(&[("search", subject)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let record = parser::extract_record(&html)?;
        Ok(record)
    }
}
