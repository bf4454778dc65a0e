//! Link crawler: discovers product pages from a category listing.

pub mod scrape;

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use crate::core::errors::ApiError;

/// Query-string marker identifying product detail links.
pub const PRODUCT_MARKER: &str = "SourceCode=18";

/// Suffix carried by category page URLs; stripping it yields the category
/// keyword used to spot sub-category links.
pub const CATEGORY_SUFFIX: &str = "-Parts.htm";

#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Pause after each visited page's link pass, against rate limiting.
    pub politeness_delay: Duration,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            politeness_delay: Duration::from_secs(2),
        }
    }
}

/// How a single anchor should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkClass {
    /// A product detail page: collect, never recurse.
    Product,
    /// A sub-category of the crawled category: recurse one level deeper.
    Recurse,
    /// Anything else.
    Ignore,
}

/// Classify a raw relative href. Containment checks, not structural parsing:
/// the site encodes link kinds in query-string markers and path keywords.
pub fn classify(href: &str, category_keyword: &str) -> LinkClass {
    if href.contains(PRODUCT_MARKER) {
        LinkClass::Product
    } else if href.contains(category_keyword) {
        LinkClass::Recurse
    } else {
        LinkClass::Ignore
    }
}

/// Keyword matching sub-category hrefs, derived from the category URL's last
/// path segment: `.../Refrigerator-Parts.htm` -> `Refrigerator-`.
pub fn category_keyword(category_url: &Url) -> String {
    let segment = category_url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();
    let stem = segment.strip_suffix(CATEGORY_SUFFIX).unwrap_or(segment);
    format!("{}-", stem)
}

/// Lowercased id namespace for a category, e.g. `refrigerator-parts`.
pub fn category_slug(category_url: &Url) -> String {
    let segment = category_url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();
    segment
        .strip_suffix(".htm")
        .unwrap_or(segment)
        .to_lowercase()
}

struct Frontier {
    visited: HashSet<Url>,
    collected: HashSet<Url>,
}

/// Depth-first crawler over one category's link graph.
pub struct LinkCrawler {
    client: reqwest::Client,
    config: CrawlerConfig,
}

impl LinkCrawler {
    pub fn new(config: CrawlerConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::internal)?;
        Ok(Self { client, config })
    }

    /// Discover product URLs reachable from `category_url` within
    /// `max_depth` recursions. Fetch failures abandon their branch; the
    /// collected set is returned regardless.
    pub async fn crawl(&self, category_url: &Url, max_depth: u32) -> HashSet<Url> {
        let keyword = category_keyword(category_url);
        let origin = match origin_of(category_url) {
            Some(origin) => origin,
            None => {
                warn!("category URL {} has no origin, nothing to crawl", category_url);
                return HashSet::new();
            }
        };

        info!("sourcing product links from category {}", category_url);

        let mut frontier = Frontier {
            visited: HashSet::new(),
            collected: HashSet::new(),
        };
        self.visit(
            category_url.clone(),
            0,
            max_depth,
            &keyword,
            &origin,
            &mut frontier,
        )
        .await;

        info!(
            "crawl of {} finished with {} product links",
            category_url,
            frontier.collected.len()
        );
        frontier.collected
    }

    fn visit<'a>(
        &'a self,
        url: Url,
        depth: u32,
        max_depth: u32,
        keyword: &'a str,
        origin: &'a Url,
        frontier: &'a mut Frontier,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            if depth > max_depth || frontier.visited.contains(&url) || !url.has_host() {
                return;
            }

            // Visited before fetching, so a failed page is never retried.
            frontier.visited.insert(url.clone());

            let body = match self.fetch(&url).await {
                Ok(body) => body,
                Err(err) => {
                    warn!("error fetching {}: {}", url, err);
                    return;
                }
            };

            for href in extract_hrefs(&body) {
                let Ok(absolute) = origin.join(&href) else {
                    continue;
                };
                if !absolute.has_host() {
                    continue;
                }

                match classify(&href, keyword) {
                    LinkClass::Product => {
                        frontier.collected.insert(absolute);
                    }
                    LinkClass::Recurse => {
                        if !frontier.visited.contains(&absolute) {
                            self.visit(absolute, depth + 1, max_depth, keyword, origin, frontier)
                                .await;
                        }
                    }
                    LinkClass::Ignore => {}
                }
            }

            debug!(
                "processed {} at depth {}, {} products so far",
                url,
                depth,
                frontier.collected.len()
            );
            tokio::time::sleep(self.config.politeness_delay).await;
        })
    }

    async fn fetch(&self, url: &Url) -> Result<String, reqwest::Error> {
        self.client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

/// Scheme plus network location of a URL, the base product hrefs resolve
/// against.
fn origin_of(url: &Url) -> Option<Url> {
    let host = url.host_str()?;
    let mut origin = format!("{}://{}", url.scheme(), host);
    if let Some(port) = url.port() {
        origin.push_str(&format!(":{}", port));
    }
    Url::parse(&origin).ok()
}

/// All anchor hrefs in document order. Parsing is synchronous and the DOM is
/// dropped before any await.
fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}
