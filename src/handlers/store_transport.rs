use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use log::{debug, warn};
use reqwest::blocking::{Client as HttpClient, ClientBuilder};
use url::Url;

use crate::config::SearchConfig;
use crate::error::{AppError, Result};

/// Blocking GETs against the store. Shared across worker threads.
pub trait StoreTransport: Send + Sync {
    fn get_text(&self, url: &Url) -> Result<String>;
    fn get_bytes(&self, url: &Url) -> Result<Vec<u8>>;
}

pub struct HttpStore {
    http_client: HttpClient,
    retry_window: Duration,
}

impl HttpStore {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let http_client = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(HttpStore {
            http_client,
            retry_window: config.retry_window,
        })
    }

    fn fetch_text_once(&self, url: &Url) -> Result<String> {
        let response = self
            .http_client
            .get(url.clone())
            .header("Accept", "application/json")
            .send()?
            .error_for_status()?;

        Ok(response.text()?)
    }
}

impl StoreTransport for HttpStore {
    fn get_text(&self, url: &Url) -> Result<String> {
        if self.retry_window.is_zero() {
            return self.fetch_text_once(url);
        }

        let policy = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(self.retry_window))
            .build();

        backoff::retry(policy, || {
            self.fetch_text_once(url).map_err(|e| {
                if is_transient(&e) {
                    warn!("Store request failed, retrying: {}", e);
                    backoff::Error::transient(e)
                } else {
                    backoff::Error::permanent(e)
                }
            })
        })
        .map_err(|e| match e {
            backoff::Error::Permanent(err) => err,
            backoff::Error::Transient { err, .. } => err,
        })
    }

    fn get_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        debug!("Downloading {}", url);
        let response = self.http_client.get(url.clone()).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

fn is_transient(err: &AppError) -> bool {
    match err {
        AppError::NetworkError(e) => {
            e.is_timeout()
                || e.is_connect()
                || e.status().map_or(false, |status| status.is_server_error())
        }
        _ => false,
    }
}
