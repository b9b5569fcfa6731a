use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::CrawlError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = -1;

/// Outcome of one crawl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerResult {
    /// 0 on success, negative on failure.
    pub success_code: i32,
    /// Description of the error that caused a failure.
    pub error: Option<String>,
    /// The most frequent words with their counts. Never present on failure.
    pub words: Option<HashMap<String, u64>>,
}

impl CrawlerResult {
    pub fn success(words: HashMap<String, u64>) -> Self {
        Self {
            success_code: SUCCESS,
            error: None,
            words: Some(words),
        }
    }

    pub fn failure(error: CrawlError) -> Self {
        Self {
            success_code: FAILURE,
            error: Some(error.to_string()),
            words: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success_code == SUCCESS
    }
}
