use log::{info, warn};

use crate::config::SearchConfig;
use crate::error::Result;
use crate::handlers::{build_search_url, decode_response, parse_response, sort_results, StoreTransport};
use crate::models::SearchResult;

/// Terminal result of one search, as the UI renders it.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Empty,
    Error,
    Items(Vec<SearchResult>),
}

/// Query, fetch, decode, parse and sort. Fails as a whole; never yields partial results.
pub fn fetch_results(
    transport: &dyn StoreTransport,
    config: &SearchConfig,
    term: &str,
) -> Result<Vec<SearchResult>> {
    let url = build_search_url(config, term)?;
    let body = transport.get_text(&url)?;
    let response = decode_response(&body)?;
    let mut results = parse_response(&response, config.malformed_items)?;
    sort_results(&mut results);
    Ok(results)
}

pub fn run_search(transport: &dyn StoreTransport, config: &SearchConfig, term: &str) -> SearchOutcome {
    match fetch_results(transport, config, term) {
        Ok(results) if results.is_empty() => {
            info!("No results for {:?}", term);
            SearchOutcome::Empty
        }
        Ok(results) => {
            info!("Found {} results for {:?}", results.len(), term);
            SearchOutcome::Items(results)
        }
        Err(e) if e.is_network_failure() => {
            warn!("Could not read from the store for {:?}: {}", term, e);
            SearchOutcome::Error
        }
        Err(e) => {
            warn!("Search for {:?} failed: {}", term, e);
            SearchOutcome::Error
        }
    }
}
