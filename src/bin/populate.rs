//! Offline index population: crawl the category pages, scrape each product
//! page, embed its text, and upsert into the vector index.
//!
//! Run manually and supervised. Failures abort the batch; rerunning upserts
//! the same ids, so a rerun is the recovery path.

use anyhow::Context;
use url::Url;

use partchat_backend::core::config::{AppPaths, Settings};
use partchat_backend::core::logging;
use partchat_backend::crawler::scrape::{scrape_product_page, ProductRecord};
use partchat_backend::crawler::{category_slug, CrawlerConfig, LinkCrawler};
use partchat_backend::llm::provider::LlmProvider;
use partchat_backend::llm::OpenAiProvider;
use partchat_backend::rag::pinecone::INDEX_NAME;
use partchat_backend::rag::store::VectorStore;
use partchat_backend::rag::PineconeIndex;

/// The two category listings the index is built from.
const CATEGORY_URLS: [&str; 2] = [
    "https://www.partselect.com/Refrigerator-Parts.htm",
    "https://www.partselect.com/Dishwasher-Parts.htm",
];

/// Only links found directly on the category page are collected.
const CRAWL_DEPTH: u32 = 0;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let paths = AppPaths::new();
    logging::init(&paths);

    let settings = Settings::from_env()?;
    let llm = OpenAiProvider::new(&settings);
    let index = PineconeIndex::new(&settings);
    let crawler = LinkCrawler::new(CrawlerConfig::default())?;
    let client = reqwest::Client::new();

    tracing::info!("populating {} from {} categories", INDEX_NAME, CATEGORY_URLS.len());

    let mut total = 0usize;
    for category in CATEGORY_URLS {
        let category_url = Url::parse(category).context("invalid category URL")?;
        let slug = category_slug(&category_url);

        let product_urls = crawler.crawl(&category_url, CRAWL_DEPTH).await;
        tracing::info!("{}: {} product links collected", slug, product_urls.len());

        for (i, product_url) in product_urls.iter().enumerate() {
            let outcome = scrape_product_page(&client, product_url)
                .await
                .with_context(|| format!("scraping {}", product_url))?;
            let record = ProductRecord {
                text: outcome.into_text(),
            };

            let vector = llm
                .embed(&record.text)
                .await
                .with_context(|| format!("embedding {}", product_url))?;

            let id = format!("{}_product_{}", slug, i);
            index
                .upsert(&id, &vector, &record.text)
                .await
                .with_context(|| format!("upserting {}", id))?;

            tracing::info!("upserted {}", id);
            total += 1;
        }
    }

    tracing::info!("successfully added {} documents to {}", total, INDEX_NAME);
    Ok(())
}
