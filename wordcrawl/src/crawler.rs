//! The crawl orchestrator: fetch, parse, traverse, aggregate.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use ego_tree::NodeRef;
use reqwest::Client;
use scraper::Html;
use scraper::node::Node;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{CrawlError, Result};
use crate::result::CrawlerResult;
use crate::text::{clean, is_valid_word, tokenize};
use crate::topk::TopWords;
use crate::traverse::walk_section;

/// Page crawled when no base address override is given.
pub const DEFAULT_BASE_ADDRESS: &str = "https://en.wikipedia.org/wiki/Microsoft";
/// Id of the anchor element whose parent becomes the traversal root.
pub const DEFAULT_ROOT_ID: &str = "History";
/// Element name that terminates the sibling walk.
pub const DEFAULT_END_MARKER: &str = "h2";

const DEFAULT_MAX_RETRIES: usize = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Crawls one web page and counts unique words in a bounded section of it.
///
/// State is scoped to one instance; concurrent crawls must each use their
/// own `Crawler`.
pub struct Crawler {
    client: Client,
    base_address: String,
    root_id: String,
    end_marker: String,
    excluded_words: HashSet<String>,
    tally: TopWords,
    max_retries: usize,
    retry_delay: Duration,
}

impl Crawler {
    /// Create a crawler that reports at most `word_limit` words, skipping
    /// any token in `excluded_words`. A `word_limit` of zero falls back to
    /// the default of 10.
    pub fn new(word_limit: usize, excluded_words: Vec<String>) -> Self {
        let client = Client::builder()
            .user_agent(concat!("wordcrawl/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_address: DEFAULT_BASE_ADDRESS.to_string(),
            root_id: DEFAULT_ROOT_ID.to_string(),
            end_marker: DEFAULT_END_MARKER.to_string(),
            excluded_words: excluded_words.into_iter().collect(),
            tally: TopWords::new(word_limit),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Override the page to crawl. Primarily for tests.
    pub fn with_base_address(mut self, base_address: impl Into<String>) -> Self {
        self.base_address = base_address.into();
        self
    }

    /// Override the id of the anchor element whose parent becomes the
    /// traversal root.
    pub fn with_root_id(mut self, root_id: impl Into<String>) -> Self {
        self.root_id = root_id.into();
        self
    }

    /// Override the element name that terminates the sibling walk.
    pub fn with_end_marker(mut self, end_marker: impl Into<String>) -> Self {
        self.end_marker = end_marker.into();
        self
    }

    pub fn with_retry_policy(mut self, max_retries: usize, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    pub fn word_limit(&self) -> usize {
        self.tally.limit()
    }

    pub fn excluded_words(&self) -> &HashSet<String> {
        &self.excluded_words
    }

    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    /// Authoritative counts for every word seen so far.
    pub fn word_counts(&self) -> &HashMap<String, u64> {
        self.tally.counts()
    }

    /// The currently tracked most frequent words.
    pub fn most_frequent(&self) -> HashMap<String, u64> {
        self.tally.snapshot()
    }

    /// Run one crawl of the configured page.
    ///
    /// Failures at any stage are carried in the returned result rather
    /// than propagated; a failure result never contains a word table.
    pub async fn crawl(&mut self) -> CrawlerResult {
        if let Err(e) = Url::parse(&self.base_address) {
            return CrawlerResult::failure(CrawlError::InvalidUrl(format!(
                "{}: {}",
                self.base_address, e
            )));
        }

        info!("Starting crawl of {}", self.base_address);

        let body = match self.fetch_with_retry().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Fetch of {} failed: {}", self.base_address, e);
                return CrawlerResult::failure(e);
            }
        };

        let document = Html::parse_document(&body);
        let end_marker = self.end_marker.clone();
        if let Err(e) = self.count_document(&document, None, &end_marker) {
            warn!("Traversal of {} failed: {}", self.base_address, e);
            return CrawlerResult::failure(e);
        }

        info!(
            "Crawl complete. {} distinct words seen, {} tracked",
            self.word_counts().len(),
            self.most_frequent().len()
        );
        CrawlerResult::success(self.most_frequent())
    }

    /// Count every word in the section starting at `root`, or at the
    /// parent of the element with the configured root id when no root is
    /// supplied. The explicit root is primarily an override surface for
    /// tests.
    pub fn count_document(
        &mut self,
        document: &Html,
        root: Option<NodeRef<'_, Node>>,
        end_name: &str,
    ) -> Result<()> {
        let root = match root {
            Some(node) => node,
            None => self.locate_root(document)?,
        };

        let Crawler {
            tally,
            excluded_words,
            ..
        } = self;

        walk_section(root, end_name, &mut |text| {
            for token in tokenize(&clean(text, false), " ") {
                if excluded_words.contains(&token) || !is_valid_word(&token) {
                    continue;
                }
                tally.record(&token);
            }
        })
    }

    fn locate_root<'a>(&self, document: &'a Html) -> Result<NodeRef<'a, Node>> {
        let anchor = document
            .tree
            .root()
            .descendants()
            .find(|node| {
                node.value()
                    .as_element()
                    .is_some_and(|element| element.id() == Some(self.root_id.as_str()))
            })
            .ok_or_else(|| CrawlError::RootNotFound(self.root_id.clone()))?;

        anchor
            .parent()
            .ok_or_else(|| CrawlError::RootNotFound(self.root_id.clone()))
    }

    async fn fetch_with_retry(&self) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.fetch_page().await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    attempt += 1;
                    if attempt > self.max_retries {
                        return Err(e);
                    }
                    warn!(
                        "Fetch attempt {}/{} failed: {}. Retrying in {:?}",
                        attempt,
                        self.max_retries + 1,
                        e,
                        self.retry_delay
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
        }
    }

    async fn fetch_page(&self) -> Result<String> {
        debug!("Fetching {}", self.base_address);
        let response = self.client.get(&self.base_address).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::HttpStatus {
                url: self.base_address.clone(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}
