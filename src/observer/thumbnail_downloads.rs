//! Thumbnail downloads owned by one display surface.
//!
//! Downloads are fire-and-forget: no cap, no retry. The only handle the surface
//! keeps is the group itself; `cancel_all` (or dropping the group) silences every
//! outstanding download in one call.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use log::debug;
use url::Url;

use crate::error::Result;
use crate::handlers::StoreTransport;
use crate::models::SearchResult;

pub struct ThumbnailDownloads {
    transport: Arc<dyn StoreTransport>,
    // Completion callbacks run while holding this lock, so once `cancel_all`
    // has taken it no callback can start afterwards.
    cancelled: Arc<Mutex<bool>>,
    workers: Vec<JoinHandle<()>>,
}

impl ThumbnailDownloads {
    pub fn new(transport: Arc<dyn StoreTransport>) -> Self {
        ThumbnailDownloads {
            transport,
            cancelled: Arc::new(Mutex::new(false)),
            workers: Vec::new(),
        }
    }

    /// Downloads `url` for tile `index` and reports through `on_complete`.
    /// Returns false when nothing was started (bad URL or group cancelled).
    pub fn start<F>(&mut self, index: usize, url: &str, on_complete: F) -> bool
    where
        F: FnOnce(usize, Result<Vec<u8>>) + Send + 'static,
    {
        if self.is_cancelled() {
            return false;
        }

        let url = match Url::parse(url) {
            Ok(url) => url,
            Err(e) => {
                debug!("Not downloading artwork for tile {}: {}", index, e);
                return false;
            }
        };

        let transport = Arc::clone(&self.transport);
        let cancelled = Arc::clone(&self.cancelled);

        let spawned = thread::Builder::new()
            .name(format!("thumbnail-{index}"))
            .spawn(move || {
                let result = transport.get_bytes(&url);
                let cancelled = cancelled.lock().unwrap_or_else(PoisonError::into_inner);
                if *cancelled {
                    debug!("Dropping artwork for tile {} after cancellation", index);
                    return;
                }
                on_complete(index, result);
            });

        match spawned {
            Ok(handle) => {
                self.workers.retain(|worker| !worker.is_finished());
                self.workers.push(handle);
                true
            }
            Err(e) => {
                debug!("Could not start artwork download for tile {}: {}", index, e);
                false
            }
        }
    }

    /// One download per result's small artwork, tile index = position in `results`.
    /// Returns how many were started.
    pub fn start_for_results<F>(&mut self, results: &[SearchResult], on_complete: F) -> usize
    where
        F: Fn(usize, Result<Vec<u8>>) + Send + Sync + 'static,
    {
        let on_complete = Arc::new(on_complete);
        let mut started = 0;
        for (index, result) in results.iter().enumerate() {
            let on_complete = Arc::clone(&on_complete);
            if self.start(index, &result.artwork_small_url, move |i, bytes| {
                on_complete(i, bytes)
            }) {
                started += 1;
            }
        }
        started
    }

    pub fn cancel_all(&mut self) {
        let mut cancelled = self.cancelled.lock().unwrap_or_else(PoisonError::into_inner);
        if !*cancelled {
            *cancelled = true;
            debug!("Cancelled {} artwork downloads", self.pending());
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Downloads still running, cancelled or not.
    pub fn pending(&self) -> usize {
        self.workers.iter().filter(|handle| !handle.is_finished()).count()
    }
}

impl Drop for ThumbnailDownloads {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
