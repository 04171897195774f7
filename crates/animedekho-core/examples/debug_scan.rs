//! Debug script to watch a scan in a visible browser window
//!
//! Run with: cargo run --example debug_scan -p animedekho-core -- "Shinchan" 1 1

use animedekho_core::{ScanOutcome, ScannerConfig, SearchRequest, VideoLocator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let title = args.first().map(String::as_str).unwrap_or("shinchan");
    let season = args.get(1).map(String::as_str).unwrap_or("1");
    let episode = args.get(2).map(String::as_str).unwrap_or("1");

    let request = SearchRequest::parse(Some(title), Some(season), Some(episode))?;

    let config = ScannerConfig {
        headless: false,
        ..ScannerConfig::default()
    };
    let locator = VideoLocator::with_config(config);

    println!("Candidates for '{}' S{}E{}:\n", request.title, request.season, request.episode);
    for (i, url) in locator.candidates(&request).iter().enumerate() {
        println!("{}. {}", i + 1, url);
    }
    println!();

    match locator.find(&request).await {
        ScanOutcome::Found(url) => println!("Video URL: {}", url),
        ScanOutcome::NotFound => println!("No video URL found"),
        ScanOutcome::Failed(e) => println!("Scan failed: {}", e),
    }

    Ok(())
}
