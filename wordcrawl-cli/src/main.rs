mod arguments;

use arguments::Args;
use clap::Parser;
use tracing::{Level, error, info, warn};
use wordcrawl::Crawler;

#[tokio::main]
async fn main() {
    let args: Args = Args::parse();

    let level = args.log_level.trim().parse::<Level>().unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    let word_limit = if args.word_limit <= 0 {
        warn!(
            "Word limit {} is not positive; using the default of 10",
            args.word_limit
        );
        10
    } else {
        args.word_limit as usize
    };

    let excluded_words: Vec<String> = args
        .excluded_words
        .replace(' ', ",")
        .split(',')
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect();

    info!(
        "Starting crawler with log_level={}, word_limit={}, excluded_words=[{}]",
        level,
        word_limit,
        excluded_words.join(",")
    );

    let mut crawler = Crawler::new(word_limit, excluded_words);
    if let Some(base_address) = args.base_address {
        crawler = crawler.with_base_address(base_address);
    }

    let result = crawler.crawl().await;

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to serialize result: {}", e),
        }
        return;
    }

    if let Some(message) = result.error {
        error!("Crawl failed: {}", message);
        return;
    }

    let mut rows: Vec<(String, u64)> = result.words.unwrap_or_default().into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    println!("Most frequent words:");
    for (word, count) in rows {
        println!("  {count:>6}  {word}");
    }
}
