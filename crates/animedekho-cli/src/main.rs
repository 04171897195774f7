use std::env;
use std::process;

use animedekho_core::VideoLocator;
use tracing_subscriber::{EnvFilter, fmt};

/// Splits `<program> <title> <season> <episode>` into its three inputs
fn parse_args(args: &[String]) -> Option<(&str, &str, &str)> {
    match args {
        [_, title, season, episode] => Some((title.as_str(), season.as_str(), episode.as_str())),
        _ => None,
    }
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout carries exactly one JSON line
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();

    let Some((title, season, episode)) = parse_args(&args) else {
        let program = args.first().map(String::as_str).unwrap_or("animedekho");
        eprintln!("Usage: {} <title> <season> <episode>", program);
        eprintln!("\nExample: {} \"Shinchan\" 1 1", program);
        process::exit(1);
    };

    let locator = VideoLocator::new();
    let result = locator.lookup(Some(title), Some(season), Some(episode)).await;

    match serde_json::to_string(&result) {
        Ok(line) => println!("{}", line),
        Err(e) => {
            eprintln!("Error: could not encode result: {}", e);
            process::exit(1);
        }
    }

    if !result.success {
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_valid() {
        let args = args(&["animedekho", "One Piece", "1", "12"]);
        assert_eq!(parse_args(&args), Some(("One Piece", "1", "12")));
    }

    #[test]
    fn test_parse_args_too_few() {
        assert_eq!(parse_args(&args(&["animedekho", "Naruto", "1"])), None);
        assert_eq!(parse_args(&args(&["animedekho"])), None);
    }

    #[test]
    fn test_parse_args_too_many() {
        let args = args(&["animedekho", "One", "Piece", "1", "12"]);
        assert_eq!(parse_args(&args), None);
    }
}
