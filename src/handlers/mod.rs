pub mod grid_layout;
pub mod ordering;
pub mod response_parser;
pub mod search;
pub mod search_query;
pub mod store_transport;

// Re-exports for convenient access
pub use grid_layout::{compute_layout, page_count};
pub use ordering::sort_results;
pub use response_parser::{decode_response, parse_response, parse_results};
pub use search::{fetch_results, run_search, SearchOutcome};
pub use search_query::build_search_url;
pub use store_transport::{HttpStore, StoreTransport};
