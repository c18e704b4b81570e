use url::{form_urlencoded, Url};

use crate::config::SearchConfig;
use crate::error::{AppError, Result};

/// Store search URL for `term`, e.g. `https://itunes.apple.com/search?term=abba&limit=200`.
pub fn build_search_url(config: &SearchConfig, term: &str) -> Result<Url> {
    if term.trim().is_empty() {
        return Err(AppError::InvalidTerm);
    }

    let params = form_urlencoded::Serializer::new(String::new())
        .append_pair("term", term)
        .append_pair("limit", &config.limit.to_string())
        .finish();

    let mut url = config.endpoint.clone();
    url.set_query(Some(&params));
    Ok(url)
}
