//! Crawls a single web page and maintains a bounded summary of the most
//! frequent words in one section of it.

pub mod crawler;
pub mod error;
pub mod result;
pub mod text;
pub mod topk;
pub mod traverse;

pub use crawler::Crawler;
pub use error::CrawlError;
pub use result::CrawlerResult;
pub use topk::TopWords;
