//! Product page scraper: pulls visible text out of the content regions.

use reqwest::StatusCode;
use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

use crate::core::errors::ApiError;

/// The two content regions scraped on product pages: the description blocks
/// and the answered Q&A entries.
pub const CONTENT_SELECTORS: &str = ".mb-4, .qna__question.js-qnaResponse";

/// Scraped page text staged for embedding and upsert.
#[derive(Debug, Clone, Serialize)]
pub struct ProductRecord {
    pub text: String,
}

/// Outcome of a single scrape attempt. HTTP-status failures are data, not
/// errors: the caller decides whether to store the diagnostic rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeOutcome {
    Text(String),
    FetchFailed(StatusCode),
}

impl ScrapeOutcome {
    /// The text to store: page text, or the diagnostic line for a failed
    /// fetch (matching what the index has historically contained).
    pub fn into_text(self) -> String {
        match self {
            ScrapeOutcome::Text(text) => text,
            ScrapeOutcome::FetchFailed(status) => format!(
                "Failed to retrieve the webpage. Status code: {}",
                status.as_u16()
            ),
        }
    }
}

/// Fetch `url` and extract its content-region text in document order,
/// whitespace-normalized and space-joined. One attempt, no retry.
/// Transport failures (no HTTP response at all) are upstream errors.
pub async fn scrape_product_page(
    client: &reqwest::Client,
    url: &Url,
) -> Result<ScrapeOutcome, ApiError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(ApiError::upstream)?;

    let status = response.status();
    if !status.is_success() {
        return Ok(ScrapeOutcome::FetchFailed(status));
    }

    let body = response.text().await.map_err(ApiError::upstream)?;
    Ok(ScrapeOutcome::Text(extract_content_text(&body)?))
}

fn extract_content_text(html: &str) -> Result<String, ApiError> {
    let selector = Selector::parse(CONTENT_SELECTORS)
        .map_err(|e| ApiError::internal(format!("invalid content selector: {:?}", e)))?;

    let document = Html::parse_document(html);
    let fragments: Vec<String> = document
        .select(&selector)
        .map(|element| {
            element
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|text| !text.is_empty())
        .collect();

    Ok(fragments.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn extracts_content_regions_in_document_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/PS123.htm"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><body>
                    <div class="mb-4">Door shelf bin, white.</div>
                    <nav>site chrome</nav>
                    <div class="qna__question js-qnaResponse">Does it fit WRS325FDAM04?</div>
                    <div class="mb-4">Genuine OEM part.</div>
                </body></html>"#,
            ))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/PS123.htm", server.uri())).unwrap();
        let outcome = scrape_product_page(&reqwest::Client::new(), &url)
            .await
            .unwrap();

        assert_eq!(
            outcome.into_text(),
            "Door shelf bin, white. Does it fit WRS325FDAM04? Genuine OEM part."
        );
    }

    #[tokio::test]
    async fn normalizes_internal_whitespace() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/PS123.htm"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<div class=\"mb-4\">  spaced \n\t out  </div>",
            ))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/PS123.htm", server.uri())).unwrap();
        let outcome = scrape_product_page(&reqwest::Client::new(), &url)
            .await
            .unwrap();

        assert_eq!(outcome.into_text(), "spaced out");
    }

    #[tokio::test]
    async fn not_found_is_soft_failure_with_diagnostic() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone.htm"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/gone.htm", server.uri())).unwrap();
        let outcome = scrape_product_page(&reqwest::Client::new(), &url)
            .await
            .unwrap();

        assert_eq!(outcome, ScrapeOutcome::FetchFailed(StatusCode::NOT_FOUND));
        assert!(outcome.into_text().contains("404"));
    }

    #[tokio::test]
    async fn connection_failure_is_an_error() {
        // Nothing listens on this port.
        let url = Url::parse("http://127.0.0.1:1/PS123.htm").unwrap();
        let result = scrape_product_page(&reqwest::Client::new(), &url).await;
        assert!(matches!(result, Err(ApiError::Upstream(_))));
    }
}
